//! Filter tree definitions
//!
//! A filter tree is either a single field comparison or a logical
//! combination of child trees.

use std::fmt;

use serde::Deserialize;

use super::error::FilterError;
use super::operators::FilterOperator;

/// Logical connective of a composite node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Logic {
    #[default]
    And,
    Or,
}

impl Logic {
    pub fn parse(s: &str) -> Result<Self, FilterError> {
        match s.to_ascii_lowercase().as_str() {
            "and" => Ok(Self::And),
            "or" => Ok(Self::Or),
            _ => Err(FilterError::InvalidLogic(s.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
        }
    }
}

impl fmt::Display for Logic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field comparison
#[derive(Debug, Clone, PartialEq)]
pub struct Leaf {
    pub field: String,
    pub operator: FilterOperator,
    /// Unconverted value as sent by the client
    pub value: Option<String>,
    pub case_sensitive: bool,
}

impl Leaf {
    pub fn new(field: impl Into<String>, operator: FilterOperator, value: Option<&str>) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.map(str::to_string),
            case_sensitive: false,
        }
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }
}

/// Logical combination of child filters
#[derive(Debug, Clone, PartialEq)]
pub struct Composite {
    pub logic: Logic,
    pub filters: Vec<FilterNode>,
}

/// A node of a filter tree
#[derive(Debug, Clone, PartialEq)]
pub enum FilterNode {
    Leaf(Leaf),
    Composite(Composite),
}

impl FilterNode {
    pub fn leaf(field: impl Into<String>, operator: FilterOperator, value: Option<&str>) -> Self {
        Self::Leaf(Leaf::new(field, operator, value))
    }

    pub fn and(filters: Vec<FilterNode>) -> Self {
        Self::Composite(Composite {
            logic: Logic::And,
            filters,
        })
    }

    pub fn or(filters: Vec<FilterNode>) -> Self {
        Self::Composite(Composite {
            logic: Logic::Or,
            filters,
        })
    }

    /// Nesting depth; a lone leaf has depth 1
    pub fn depth(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Composite(c) => 1 + c.filters.iter().map(|f| f.depth()).max().unwrap_or(0),
        }
    }
}

impl From<Leaf> for FilterNode {
    fn from(leaf: Leaf) -> Self {
        Self::Leaf(leaf)
    }
}

/// Filter node as sent over the wire by grid components
///
/// Every field is optional; [`FilterDescriptor::into_node`] decides which
/// shape the node has.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterDescriptor {
    pub field: Option<String>,
    pub operator: Option<String>,
    #[serde(default, deserialize_with = "deserialize_raw_value")]
    pub value: Option<String>,
    pub logic: Option<String>,
    pub filters: Option<Vec<FilterDescriptor>>,
    #[serde(default, alias = "caseSensitive")]
    pub casesensitive: bool,
}

/// Accept any JSON scalar as the raw value, keeping its textual form
fn deserialize_raw_value<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::String(s) => Ok(Some(s)),
        serde_json::Value::Bool(b) => Ok(Some(b.to_string())),
        serde_json::Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(D::Error::custom(format!(
            "filter value must be a scalar, got {}",
            other
        ))),
    }
}

impl FilterDescriptor {
    /// Convert into a typed node
    ///
    /// A non-empty `filters` list makes a composite. With `strict` set, leaf
    /// fields on such a node are rejected; otherwise they are ignored.
    pub fn into_node(self, strict: bool) -> Result<FilterNode, FilterError> {
        match self.filters {
            Some(children) if !children.is_empty() => {
                let has_leaf_fields =
                    self.field.is_some() || self.operator.is_some() || self.value.is_some();
                if has_leaf_fields {
                    if strict {
                        return Err(FilterError::malformed(
                            "node has both child filters and a field comparison",
                        ));
                    }
                    tracing::warn!(
                        field = ?self.field,
                        operator = ?self.operator,
                        "Ignoring field comparison on composite filter node"
                    );
                }

                let logic = match self.logic.as_deref() {
                    Some(logic) => Logic::parse(logic)?,
                    None => Logic::default(),
                };
                let filters = children
                    .into_iter()
                    .map(|child| child.into_node(strict))
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(FilterNode::Composite(Composite { logic, filters }))
            }
            _ => {
                let field = self
                    .field
                    .filter(|f| !f.trim().is_empty())
                    .ok_or_else(|| FilterError::malformed("leaf filter is missing a field"))?;
                let code = self
                    .operator
                    .ok_or_else(|| FilterError::malformed("leaf filter is missing an operator"))?;
                let operator = super::operators::lookup(&code)?;

                Ok(FilterNode::Leaf(Leaf {
                    field,
                    operator,
                    value: self.value,
                    case_sensitive: self.casesensitive,
                }))
            }
        }
    }
}
