//! Error type for filter parsing and compilation
//!
//! Every variant describes bad caller input. None of them are retried or
//! downgraded to an empty predicate.

use thiserror::Error;

/// Errors raised while parsing, resolving, coercing or compiling a filter tree
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    /// Operator code is not one of the fourteen known codes
    #[error("Unknown filter operator: {0}")]
    UnknownOperator(String),

    /// Field name has no case-insensitive match in the record schema
    #[error("Cannot filter by field: {0}")]
    UnresolvedField(String),

    /// Raw value cannot be converted to the resolved field type
    #[error("Cannot convert {value:?} for field {field} to {target}: {reason}")]
    Conversion {
        field: String,
        value: Option<String>,
        target: &'static str,
        reason: String,
    },

    /// Filter JSON could not be parsed
    #[error("Invalid filter JSON: {0}")]
    InvalidJson(String),

    /// Filter JSON exceeds the configured byte limit
    #[error("Filter JSON exceeds maximum size of {max_bytes} bytes")]
    FilterJsonTooLarge { max_bytes: usize },

    /// Filter tree nests deeper than allowed
    #[error("Filter tree exceeds maximum depth of {max_depth}")]
    FilterTooDeep { max_depth: usize },

    /// Filter tree holds more leaves than allowed
    #[error("Maximum {max_leaves} filters allowed")]
    TooManyFilters { max_leaves: usize },

    /// Node is neither a usable leaf nor a usable composite
    #[error("Malformed filter node: {0}")]
    MalformedFilter(String),

    /// Composite logic is not `and` or `or`
    #[error("Unknown filter logic: {0}")]
    InvalidLogic(String),
}

impl FilterError {
    /// Create a conversion error
    pub fn conversion(
        field: &str,
        value: Option<&str>,
        target: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        Self::Conversion {
            field: field.to_string(),
            value: value.map(str::to_string),
            target,
            reason: reason.into(),
        }
    }

    /// Create a malformed node error
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedFilter(reason.into())
    }

    /// Stable machine-readable code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownOperator(_) => "UNKNOWN_FILTER_OPERATOR",
            Self::UnresolvedField(_) => "INVALID_FILTER_FIELD",
            Self::Conversion { .. } => "INVALID_FILTER_VALUE",
            Self::InvalidJson(_) => "INVALID_FILTER_JSON",
            Self::FilterJsonTooLarge { .. } => "FILTER_JSON_TOO_LARGE",
            Self::FilterTooDeep { .. } => "FILTER_TOO_DEEP",
            Self::TooManyFilters { .. } => "TOO_MANY_FILTERS",
            Self::MalformedFilter(_) => "MALFORMED_FILTER",
            Self::InvalidLogic(_) => "INVALID_FILTER_LOGIC",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_operator_display() {
        let err = FilterError::UnknownOperator("regex".to_string());
        assert_eq!(err.to_string(), "Unknown filter operator: regex");
        assert_eq!(err.code(), "UNKNOWN_FILTER_OPERATOR");
    }

    #[test]
    fn test_conversion_error_display() {
        let err = FilterError::conversion("Age", Some("abc"), "integer", "invalid digit");
        assert_eq!(
            err.to_string(),
            "Cannot convert Some(\"abc\") for field Age to integer: invalid digit"
        );
        assert_eq!(err.code(), "INVALID_FILTER_VALUE");
    }

    #[test]
    fn test_limit_errors_display() {
        assert_eq!(
            FilterError::TooManyFilters { max_leaves: 50 }.to_string(),
            "Maximum 50 filters allowed"
        );
        assert_eq!(
            FilterError::FilterJsonTooLarge { max_bytes: 1024 }.to_string(),
            "Filter JSON exceeds maximum size of 1024 bytes"
        );
    }
}
