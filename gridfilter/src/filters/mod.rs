//! Grid filter system
//!
//! Parses grid filter descriptors and compiles them into a predicate with
//! positional placeholders plus the typed values bound to them.
//!
//! ## Usage
//!
//! ```
//! use gridfilter::filters::{FieldType, ParseLimits, RecordSchema, Value, compile_filter, parse_filter};
//!
//! let schema = RecordSchema::new().field("Tags", FieldType::String);
//! let json_str = r#"{"field": "tags", "operator": "doesnotcontain", "value": "x", "casesensitive": true}"#;
//! let tree = parse_filter(json_str, &ParseLimits::default()).unwrap();
//! let compiled = compile_filter(&tree, &schema).unwrap();
//!
//! assert_eq!(compiled.predicate, "!Tags.Contains(@0)");
//! assert_eq!(compiled.parameters, vec![Value::String("x".to_string())]);
//! ```

mod binder;
mod coerce;
mod compiler;
mod error;
mod flatten;
mod format;
mod operators;
mod parser;
mod schema;
mod types;
mod value;

pub use binder::{ConvertedValues, bind_values};
pub use coerce::coerce;
pub use compiler::{CompiledFilter, PredicateCompiler, compile_filter, compile_filter_with};
pub use error::FilterError;
pub use flatten::{LeafIndex, flatten};
pub use format::{FormatProvider, default_format_provider, set_default_format_provider};
pub use operators::{FilterOperator, lookup};
pub use parser::{ParseLimits, parse_filter, validate_node};
pub use schema::{FieldDef, FieldType, RecordSchema, resolve_field_type};
pub use types::{Composite, FilterDescriptor, FilterNode, Leaf, Logic};
pub use value::Value;
