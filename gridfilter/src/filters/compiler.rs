//! Predicate compilation
//!
//! Renders a filter tree into a dynamic-predicate string with `@N`
//! placeholders. Composites are always parenthesized, so the output never
//! depends on connective precedence.

use super::binder::{ConvertedValues, bind_values};
use super::coerce::coerce;
use super::error::FilterError;
use super::flatten::{LeafIndex, flatten};
use super::format::{FormatProvider, default_format_provider};
use super::operators::FilterOperator;
use super::schema::RecordSchema;
use super::types::{Composite, FilterNode, Leaf};
use super::value::Value;

/// Null-or-empty test used for string null checks and emptiness checks
const NULL_OR_EMPTY: &str = "String.IsNullOrEmpty";

/// Compiled predicate and the values for its placeholders
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledFilter {
    /// Predicate with `@0`, `@1`, ... placeholders
    pub predicate: String,
    /// Value for each placeholder, by index
    pub parameters: Vec<Value>,
}

/// Compile `root` against `schema` using the process-wide format provider
pub fn compile_filter(
    root: &FilterNode,
    schema: &RecordSchema,
) -> Result<CompiledFilter, FilterError> {
    let provider = default_format_provider();
    compile_filter_with(root, schema, &provider)
}

/// Compile `root` against `schema` using an explicit format provider
pub fn compile_filter_with(
    root: &FilterNode,
    schema: &RecordSchema,
    provider: &FormatProvider,
) -> Result<CompiledFilter, FilterError> {
    let leaves = flatten(root);
    let mut compiler = PredicateCompiler::new(schema, provider, &leaves);
    let predicate = compiler.compile(root)?;
    let parameters = bind_values(&leaves, compiler.converted());

    tracing::debug!(
        leaves = leaves.len(),
        predicate = %predicate,
        "Compiled filter"
    );

    Ok(CompiledFilter {
        predicate,
        parameters,
    })
}

/// Recursive renderer for one compilation
///
/// Holds the flattened leaf positions, which decide each leaf's placeholder
/// index, and the coerced value for every leaf rendered so far.
pub struct PredicateCompiler<'a> {
    schema: &'a RecordSchema,
    provider: &'a FormatProvider,
    positions: LeafIndex,
    converted: ConvertedValues,
}

impl<'a> PredicateCompiler<'a> {
    pub fn new(
        schema: &'a RecordSchema,
        provider: &'a FormatProvider,
        leaves: &'a [&'a Leaf],
    ) -> Self {
        Self {
            schema,
            provider,
            positions: LeafIndex::new(leaves),
            converted: ConvertedValues::with_len(leaves.len()),
        }
    }

    pub fn converted(&self) -> &ConvertedValues {
        &self.converted
    }

    /// Render `node` and every node below it
    pub fn compile(&mut self, node: &FilterNode) -> Result<String, FilterError> {
        match node {
            FilterNode::Leaf(leaf) => self.compile_leaf(leaf),
            FilterNode::Composite(composite) => self.compile_composite(composite),
        }
    }

    fn compile_composite(&mut self, composite: &Composite) -> Result<String, FilterError> {
        if composite.filters.is_empty() {
            return Err(FilterError::malformed("composite filter has no children"));
        }

        let parts = composite
            .filters
            .iter()
            .map(|child| self.compile(child))
            .collect::<Result<Vec<_>, _>>()?;
        let separator = format!(" {} ", composite.logic);

        Ok(format!("({})", parts.join(&separator)))
    }

    fn compile_leaf(&mut self, leaf: &Leaf) -> Result<String, FilterError> {
        let def = self
            .schema
            .resolve(&leaf.field)
            .ok_or_else(|| FilterError::UnresolvedField(leaf.field.clone()))?;
        let index = self
            .positions
            .get(leaf)
            .ok_or_else(|| FilterError::malformed("leaf is not part of the compiled tree"))?;

        let provider = self.provider;
        let value = self.converted.get_or_try_insert(index, || {
            coerce(
                leaf.value.as_deref(),
                def,
                leaf.case_sensitive,
                leaf.operator,
                provider,
            )
        })?;
        tracing::trace!(
            field = %def.name,
            operator = %leaf.operator,
            index,
            value = %value,
            "Compiling filter leaf"
        );

        let is_string = def.field_type.is_string();
        let fold = is_string && !leaf.case_sensitive;
        let field = def.name.as_str();
        let access = if fold {
            format!("{}.ToLower()", field)
        } else {
            field.to_string()
        };
        let fragment = leaf.operator.fragment();

        let rendered = match leaf.operator {
            FilterOperator::DoesNotContain => format!("!{}.{}(@{})", access, fragment, index),
            FilterOperator::IsNull | FilterOperator::IsNotNull if is_string => {
                let negate = if leaf.operator == FilterOperator::IsNotNull {
                    "!"
                } else {
                    ""
                };
                format!("{}{}({})", negate, NULL_OR_EMPTY, field)
            }
            FilterOperator::IsNull | FilterOperator::IsNotNull => {
                format!("{} {} null", field, fragment)
            }
            FilterOperator::IsEmpty | FilterOperator::IsNotEmpty => {
                format!("{}{}({})", fragment, NULL_OR_EMPTY, field)
            }
            FilterOperator::StartsWith | FilterOperator::EndsWith | FilterOperator::Contains => {
                format!("{}.{}(@{})", access, fragment, index)
            }
            FilterOperator::Eq if fold => format!("{}.Equals(@{})", access, index),
            _ => format!("{} {} @{}", field, fragment, index),
        };

        Ok(rendered)
    }
}
