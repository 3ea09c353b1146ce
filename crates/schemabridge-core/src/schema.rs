//! Record descriptions and the registry that holds them.
//!
//! The registry is the language-neutral hand-off point between the
//! extraction front-end and every generator. It is built once per run from a
//! full parse of the declaration source and is read-only afterwards.

use crate::error::{ExtractionError, SchemaResult};
use crate::types::TypeExpr;
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::BTreeSet;

/// Default declared for a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FieldDefault {
    /// A literal value, kept as source text (`0`, `'en'`, `None`).
    Literal(String),

    /// A factory callable, kept as source text (`list`, `uuid4`).
    Factory(String),
}

/// One field of a record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSpec {
    /// Source (snake_case) name; also the wire key.
    pub name: String,

    /// Declared type.
    #[serde(rename = "type")]
    pub ty: TypeExpr,

    /// Human description, empty when none was given.
    pub description: String,

    /// Descriptive constraints in declaration order (`ge` → `1`).
    pub constraints: IndexMap<String, String>,

    /// Declared default, if any.
    pub default: Option<FieldDefault>,
}

impl FieldSpec {
    /// Create a field with no description, constraints or default.
    pub fn new(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            name: name.into(),
            ty,
            description: String::new(),
            constraints: IndexMap::new(),
            default: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_constraint(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.constraints.insert(name.into(), value.into());
        self
    }

    pub fn with_default(mut self, default: FieldDefault) -> Self {
        self.default = Some(default);
        self
    }

    /// `name=value` pairs joined with `, `, or `None` when unconstrained.
    pub fn constraint_summary(&self) -> Option<String> {
        if self.constraints.is_empty() {
            return None;
        }
        Some(
            self.constraints
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join(", "),
        )
    }

    /// Inclusive `(ge, le)` bounds when both are declared.
    pub fn inclusive_range(&self) -> Option<(&str, &str)> {
        let low = self.constraints.get("ge")?;
        let high = self.constraints.get("le")?;
        Some((low.as_str(), high.as_str()))
    }
}

/// One extracted record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaSpec {
    pub name: String,
    pub docstring: String,
    /// Declaration order drives emitted property and documentation order.
    pub fields: Vec<FieldSpec>,
    pub is_frozen: bool,
    pub has_computed_accessors: bool,
}

impl SchemaSpec {
    /// Create a frozen record with no docstring and no fields.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            docstring: String::new(),
            fields: Vec::new(),
            is_frozen: true,
            has_computed_accessors: false,
        }
    }

    pub fn with_docstring(mut self, docstring: impl Into<String>) -> Self {
        self.docstring = docstring.into();
        self
    }

    pub fn with_field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Resolved collection of every extracted record, in declaration order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct SchemaRegistry {
    schemas: IndexMap<String, SchemaSpec>,
}

impl SchemaRegistry {
    /// Build a registry, rejecting duplicate record or field names.
    pub fn from_schemas(schemas: impl IntoIterator<Item = SchemaSpec>) -> SchemaResult<Self> {
        let mut registry = IndexMap::new();
        for schema in schemas {
            let mut seen = BTreeSet::new();
            for field in &schema.fields {
                if !seen.insert(field.name.as_str()) {
                    return Err(ExtractionError::DuplicateField {
                        record: schema.name.clone(),
                        field: field.name.clone(),
                    });
                }
            }
            if registry.contains_key(&schema.name) {
                return Err(ExtractionError::DuplicateRecord(schema.name));
            }
            registry.insert(schema.name.clone(), schema);
        }
        Ok(Self { schemas: registry })
    }

    pub fn get(&self, name: &str) -> Option<&SchemaSpec> {
        self.schemas.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// The registered record a type refers to, directly or through one wrapper.
    pub fn record_for(&self, ty: &TypeExpr) -> Option<&SchemaSpec> {
        ty.reference_name().and_then(|name| self.get(name))
    }

    /// Names of known records referenced by `schema`'s fields, sorted.
    pub fn nested_records(&self, schema: &SchemaSpec) -> BTreeSet<String> {
        schema
            .fields
            .iter()
            .filter_map(|field| self.record_for(&field.ty))
            .map(|record| record.name.clone())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SchemaSpec> {
        self.schemas.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
