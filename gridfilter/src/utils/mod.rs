//! Utility functions for the crate

pub mod time;
