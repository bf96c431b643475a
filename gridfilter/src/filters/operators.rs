//! Operator table
//!
//! Maps the operator codes sent by grid components to predicate fragments.

use std::fmt;

use super::error::FilterError;

/// Filter operators understood by the compiler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterOperator {
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,
    IsNull,
    IsNotNull,
    StartsWith,
    EndsWith,
    Contains,
    DoesNotContain,
    IsEmpty,
    IsNotEmpty,
}

/// Code, operator and predicate fragment for every supported operator
static OPERATOR_TABLE: [(&str, FilterOperator, &str); 14] = [
    ("eq", FilterOperator::Eq, "="),
    ("neq", FilterOperator::Neq, "!="),
    ("lt", FilterOperator::Lt, "<"),
    ("lte", FilterOperator::Lte, "<="),
    ("gt", FilterOperator::Gt, ">"),
    ("gte", FilterOperator::Gte, ">="),
    ("isnull", FilterOperator::IsNull, "="),
    ("isnotnull", FilterOperator::IsNotNull, "!="),
    ("startswith", FilterOperator::StartsWith, "StartsWith"),
    ("endswith", FilterOperator::EndsWith, "EndsWith"),
    ("contains", FilterOperator::Contains, "Contains"),
    ("doesnotcontain", FilterOperator::DoesNotContain, "Contains"),
    ("isempty", FilterOperator::IsEmpty, ""),
    ("isnotempty", FilterOperator::IsNotEmpty, "!"),
];

/// Look up an operator by its wire code
pub fn lookup(code: &str) -> Result<FilterOperator, FilterError> {
    OPERATOR_TABLE
        .iter()
        .find(|(c, _, _)| *c == code)
        .map(|(_, op, _)| *op)
        .ok_or_else(|| FilterError::UnknownOperator(code.to_string()))
}

impl FilterOperator {
    fn entry(self) -> &'static (&'static str, FilterOperator, &'static str) {
        // Every variant has exactly one row, in declaration order
        &OPERATOR_TABLE[self as usize]
    }

    /// Wire code, e.g. `"doesnotcontain"`
    pub fn code(self) -> &'static str {
        self.entry().0
    }

    /// Predicate fragment: a comparison symbol, a method name, or a prefix
    pub fn fragment(self) -> &'static str {
        self.entry().2
    }

    /// Operators whose rendering never references a parameter
    pub fn is_valueless(self) -> bool {
        matches!(
            self,
            Self::IsNull | Self::IsNotNull | Self::IsEmpty | Self::IsNotEmpty
        )
    }

    /// Operators that fold string case on both sides when not case-sensitive
    pub fn folds_case(self) -> bool {
        matches!(
            self,
            Self::Eq | Self::Contains | Self::DoesNotContain | Self::StartsWith | Self::EndsWith
        )
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
