//! Filter parsing
//!
//! Parses JSON filter descriptors into a [`FilterNode`] tree with validation.

use crate::core::constants::{DEFAULT_MAX_FILTER_DEPTH, DEFAULT_MAX_FILTERS, MAX_FILTER_JSON_SIZE};

use super::error::FilterError;
use super::flatten::flatten;
use super::types::{FilterDescriptor, FilterNode};

/// Bounds applied to untrusted filter input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLimits {
    pub max_json_bytes: usize,
    pub max_depth: usize,
    pub max_leaves: usize,
    /// Reject nodes that carry both child filters and a field comparison
    pub strict_nodes: bool,
}

impl Default for ParseLimits {
    fn default() -> Self {
        Self {
            max_json_bytes: MAX_FILTER_JSON_SIZE,
            max_depth: DEFAULT_MAX_FILTER_DEPTH,
            max_leaves: DEFAULT_MAX_FILTERS,
            strict_nodes: false,
        }
    }
}

/// Parse a filter tree from its JSON wire form
///
/// Validates JSON size, parses the descriptor, converts it into a typed tree
/// and checks depth and leaf count.
pub fn parse_filter(json_str: &str, limits: &ParseLimits) -> Result<FilterNode, FilterError> {
    if json_str.len() > limits.max_json_bytes {
        return Err(FilterError::FilterJsonTooLarge {
            max_bytes: limits.max_json_bytes,
        });
    }

    let descriptor: FilterDescriptor =
        serde_json::from_str(json_str).map_err(|e| FilterError::InvalidJson(e.to_string()))?;

    let node = descriptor.into_node(limits.strict_nodes)?;
    validate_node(&node, limits)?;

    Ok(node)
}

/// Check a tree against depth and leaf-count limits
pub fn validate_node(node: &FilterNode, limits: &ParseLimits) -> Result<(), FilterError> {
    if node.depth() > limits.max_depth {
        return Err(FilterError::FilterTooDeep {
            max_depth: limits.max_depth,
        });
    }

    let leaves = flatten(node).len();
    if leaves > limits.max_leaves {
        return Err(FilterError::TooManyFilters {
            max_leaves: limits.max_leaves,
        });
    }

    tracing::trace!(leaves, depth = node.depth(), "Parsed filter tree");
    Ok(())
}
