//! Value coercion
//!
//! Converts the raw string of a leaf into a [`Value`] of the resolved field
//! type. Rules, first match wins:
//!
//! 1. case-insensitive string comparisons lower-case the value, matching the
//!    `ToLower()` the compiler applies to the field access;
//! 2. date and date-time fields try the provider's lenient layouts;
//! 3. everything else (and failed dates) goes through generic conversion.

use chrono::NaiveDate;
use uuid::Uuid;

use super::error::FilterError;
use super::format::FormatProvider;
use super::operators::FilterOperator;
use super::schema::{FieldDef, FieldType};
use super::value::Value;
use crate::utils::time::parse_rfc3339_utc;

/// Coerce `raw` for a comparison against `field`
pub fn coerce(
    raw: Option<&str>,
    field: &FieldDef,
    case_sensitive: bool,
    operator: FilterOperator,
    provider: &FormatProvider,
) -> Result<Value, FilterError> {
    if field.field_type.is_string() && !case_sensitive && operator.folds_case() {
        return Ok(raw.map_or(Value::Null, |s| Value::String(s.to_lowercase())));
    }

    // Null checks never read their parameter
    if operator.is_valueless() && raw.is_none_or(|s| s.trim().is_empty()) {
        return Ok(Value::Null);
    }

    if let Some(s) = raw
        && field.field_type.is_temporal()
    {
        let parsed = match field.field_type {
            FieldType::DateTime => provider.parse_datetime(s).map(Value::DateTime),
            _ => provider.parse_date(s).map(Value::Date),
        };
        if let Some(value) = parsed {
            return Ok(value);
        }
        tracing::trace!(field = %field.name, value = s, "Lenient date parse failed, using generic conversion");
    }

    convert(raw, field, provider)
}

/// Generic conversion to the field type
fn convert(
    raw: Option<&str>,
    field: &FieldDef,
    provider: &FormatProvider,
) -> Result<Value, FilterError> {
    let target = field.field_type.as_str();
    let Some(s) = raw else {
        if field.permits_absence() {
            return Ok(Value::Null);
        }
        return Err(FilterError::conversion(
            &field.name,
            None,
            target,
            "a value is required for a non-nullable field",
        ));
    };

    let fail = |reason: String| FilterError::conversion(&field.name, Some(s), target, reason);

    match field.field_type {
        FieldType::String => Ok(Value::String(s.to_string())),
        FieldType::Boolean => provider.parse_bool(s).map(Value::Boolean).map_err(fail),
        FieldType::Integer => provider.parse_integer(s).map(Value::Integer).map_err(fail),
        FieldType::Float => provider.parse_float(s).map(Value::Float).map_err(fail),
        FieldType::DateTime => parse_rfc3339_utc(s)
            .map(Value::DateTime)
            .map_err(|e| fail(e.to_string())),
        FieldType::Date => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Value::Date)
            .map_err(|e| fail(e.to_string())),
        FieldType::Uuid => Uuid::parse_str(s.trim())
            .map(Value::Uuid)
            .map_err(|e| fail(e.to_string())),
    }
}
