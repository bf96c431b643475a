//! Tree flattening
//!
//! The order produced here is the parameter order: the leaf at position `i`
//! is bound to placeholder `@i`.

use std::collections::HashMap;

use super::types::{FilterNode, Leaf};

/// Collect the leaves of `root` depth-first, children in order
pub fn flatten(root: &FilterNode) -> Vec<&Leaf> {
    let mut leaves = Vec::new();
    collect(root, &mut leaves);
    leaves
}

fn collect<'a>(node: &'a FilterNode, leaves: &mut Vec<&'a Leaf>) {
    match node {
        FilterNode::Leaf(leaf) => leaves.push(leaf),
        FilterNode::Composite(composite) => {
            for child in &composite.filters {
                collect(child, leaves);
            }
        }
    }
}

/// Positions of flattened leaves, looked up by identity
///
/// Keyed by node address, so structurally equal leaves keep distinct
/// positions. Built once per compilation.
#[derive(Debug, Clone, Default)]
pub struct LeafIndex {
    positions: HashMap<usize, usize>,
}

impl LeafIndex {
    pub fn new(leaves: &[&Leaf]) -> Self {
        let positions = leaves
            .iter()
            .enumerate()
            .map(|(index, leaf)| (address(leaf), index))
            .collect();
        Self { positions }
    }

    /// Position of `leaf`, or `None` if it was not among the flattened leaves
    pub fn get(&self, leaf: &Leaf) -> Option<usize> {
        self.positions.get(&address(leaf)).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

fn address(leaf: &Leaf) -> usize {
    leaf as *const Leaf as usize
}
