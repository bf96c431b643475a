//! Record schema descriptors
//!
//! Callers describe the filterable fields of their record type up front; the
//! compiler resolves field names against this instead of inspecting types at
//! run time.

use std::fmt;

use serde::Deserialize;

/// Value type of a record field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Boolean,
    Integer,
    Float,
    DateTime,
    Date,
    Uuid,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::DateTime => "datetime",
            Self::Date => "date",
            Self::Uuid => "uuid",
        }
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Self::String)
    }

    pub fn is_temporal(&self) -> bool {
        matches!(self, Self::DateTime | Self::Date)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A declared field of the target record type
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldDef {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub nullable: bool,
}

impl FieldDef {
    /// Whether an absent value is acceptable for this field
    pub fn permits_absence(&self) -> bool {
        self.nullable || self.field_type.is_string()
    }
}

/// Ordered set of filterable fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct RecordSchema {
    fields: Vec<FieldDef>,
}

impl RecordSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a non-nullable field
    pub fn field(self, name: impl Into<String>, field_type: FieldType) -> Self {
        self.push(name.into(), field_type, false)
    }

    /// Add a nullable field
    pub fn nullable_field(self, name: impl Into<String>, field_type: FieldType) -> Self {
        self.push(name.into(), field_type, true)
    }

    fn push(mut self, name: String, field_type: FieldType, nullable: bool) -> Self {
        self.fields.push(FieldDef {
            name,
            field_type,
            nullable,
        });
        self
    }

    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// First field whose name matches case-insensitively, in declaration order
    pub fn resolve(&self, name: &str) -> Option<&FieldDef> {
        self.fields
            .iter()
            .find(|f| f.name.to_lowercase() == name.to_lowercase())
    }
}

impl From<Vec<FieldDef>> for RecordSchema {
    fn from(fields: Vec<FieldDef>) -> Self {
        Self { fields }
    }
}

/// Resolve the declared type of `field_name`, if the schema has it
pub fn resolve_field_type(schema: &RecordSchema, field_name: &str) -> Option<FieldType> {
    schema.resolve(field_name).map(|f| f.field_type)
}
