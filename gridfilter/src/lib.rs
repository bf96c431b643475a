//! Grid filter compiler
//!
//! Turns the nested filter descriptors sent by data-grid components into a
//! predicate string with `@N` placeholders plus the typed values for those
//! placeholders, ready for a dynamic predicate engine.
//!
//! ```
//! use gridfilter::filters::{FieldType, ParseLimits, RecordSchema, compile_filter, parse_filter};
//!
//! let schema = RecordSchema::new()
//!     .field("Name", FieldType::String)
//!     .nullable_field("Age", FieldType::Integer);
//!
//! let json = r#"{"logic": "and", "filters": [
//!     {"field": "name", "operator": "startswith", "value": "Jo"},
//!     {"field": "age", "operator": "gte", "value": "21"}
//! ]}"#;
//! let tree = parse_filter(json, &ParseLimits::default()).unwrap();
//! let compiled = compile_filter(&tree, &schema).unwrap();
//!
//! assert_eq!(compiled.predicate, "(Name.ToLower().StartsWith(@0) and Age >= @1)");
//! assert_eq!(compiled.parameters.len(), 2);
//! ```

pub mod core;
pub mod filters;
pub mod utils;
