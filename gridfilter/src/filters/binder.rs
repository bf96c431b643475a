//! Parameter binding
//!
//! Pairs the flattened leaves with the values the compiler coerced for them.

use super::types::Leaf;
use super::value::Value;

/// Coerced leaf values, one slot per flattened leaf
///
/// Slots are filled the first time the compiler renders the matching leaf
/// and never recomputed within that compilation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConvertedValues {
    slots: Vec<Option<Value>>,
}

impl ConvertedValues {
    pub fn with_len(len: usize) -> Self {
        Self {
            slots: vec![None; len],
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Return the value at `index`, computing it first if the slot is empty
    pub fn get_or_try_insert<E>(
        &mut self,
        index: usize,
        compute: impl FnOnce() -> Result<Value, E>,
    ) -> Result<&Value, E> {
        let slot = &mut self.slots[index];
        if slot.is_none() {
            *slot = Some(compute()?);
        }
        Ok(slot.get_or_insert(Value::Null))
    }
}

/// Values for `@0..@n`, in flattening order
///
/// Call after compilation with the same leaf sequence the compiler used. A
/// slot the compiler never filled binds `Value::Null`.
pub fn bind_values(leaves: &[&Leaf], converted: &ConvertedValues) -> Vec<Value> {
    debug_assert_eq!(
        leaves.len(),
        converted.len(),
        "leaf order and converted values diverged"
    );

    (0..leaves.len())
        .map(|index| converted.get(index).cloned().unwrap_or(Value::Null))
        .collect()
}
