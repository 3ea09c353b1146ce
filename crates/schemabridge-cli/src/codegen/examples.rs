//! Wire-format example synthesis for documentation.
//!
//! Examples are JSON-like text, not JSON values: optional fields carry a
//! trailing `// or null` note and record lists end with a `...` marker.
//!
//! Two contexts exist. A *field view* is the example shown for a single
//! top-level field; a *summary* is a value nested inside an expanded object,
//! where lists of records collapse to `[R, ...]` and notes are dropped.

use schemabridge_core::{Primitive, SchemaRegistry, SchemaSpec, TypeExpr};

pub const UUID_EXAMPLE: &str = "\"550e8400-e29b-41d4-a716-446655440000\"";

/// Builds example values against a registry.
#[derive(Debug, Clone, Copy)]
pub struct ExampleBuilder<'a> {
    registry: &'a SchemaRegistry,
}

impl<'a> ExampleBuilder<'a> {
    pub fn new(registry: &'a SchemaRegistry) -> Self {
        Self { registry }
    }

    /// Example for a top-level field, as in `"<name>": <example>`.
    pub fn field_example(&self, ty: &TypeExpr) -> String {
        let mut stack = Vec::new();
        match ty {
            TypeExpr::List(inner) => match self.known(inner) {
                Some(record) => {
                    let object = self.object_at(record, 2, &mut stack);
                    format!("[\n  {object},\n  {object},\n  ...\n]")
                }
                None => self.list_example(inner),
            },
            TypeExpr::Optional(inner) => {
                format!("{}  // or null", self.value_at(inner, 0, &mut stack))
            }
            other => self.value_at(other, 0, &mut stack),
        }
    }

    /// Fully expanded example object for `schema`.
    pub fn object_example(&self, schema: &SchemaSpec) -> String {
        self.object_at(schema, 0, &mut Vec::new())
    }

    fn known(&self, ty: &TypeExpr) -> Option<&'a SchemaSpec> {
        match ty {
            TypeExpr::Reference(name) => self.registry.get(name),
            _ => None,
        }
    }

    /// Object whose first line starts at the caller's cursor and whose
    /// closing brace sits at `indent`.
    fn object_at(&self, schema: &SchemaSpec, indent: usize, stack: &mut Vec<String>) -> String {
        if schema.fields.is_empty() {
            return "{}".to_string();
        }

        stack.push(schema.name.clone());
        let pad = " ".repeat(indent + 2);
        let members: Vec<String> = schema
            .fields
            .iter()
            .map(|field| {
                format!(
                    "{pad}\"{}\": {}",
                    field.name,
                    self.summary_value(&field.ty, indent + 2, stack)
                )
            })
            .collect();
        stack.pop();

        format!("{{\n{}\n{}}}", members.join(",\n"), " ".repeat(indent))
    }

    /// A value nested inside an expanded object.
    fn summary_value(&self, ty: &TypeExpr, indent: usize, stack: &mut Vec<String>) -> String {
        match ty {
            TypeExpr::List(inner) => match inner.as_ref() {
                TypeExpr::Reference(name) if self.registry.contains(name) => {
                    format!("[{name}, ...]")
                }
                other => self.list_example(other),
            },
            TypeExpr::Optional(inner) => self.value_at(inner, indent, stack),
            other => self.value_at(other, indent, stack),
        }
    }

    /// A scalar or record value; records already being expanded render by name.
    fn value_at(&self, ty: &TypeExpr, indent: usize, stack: &mut Vec<String>) -> String {
        match ty {
            TypeExpr::Scalar(primitive) => scalar_example(*primitive).to_string(),
            TypeExpr::Reference(name) => match self.registry.get(name) {
                Some(_) if stack.iter().any(|open| open == name) => name.clone(),
                Some(record) => self.object_at(record, indent, stack),
                None => "{}".to_string(),
            },
            TypeExpr::List(_) | TypeExpr::Optional(_) => self.summary_value(ty, indent, stack),
        }
    }

    fn list_example(&self, element: &TypeExpr) -> String {
        match element {
            TypeExpr::Scalar(primitive) => scalar_list_example(*primitive),
            _ => "[]".to_string(),
        }
    }
}

pub fn scalar_example(primitive: Primitive) -> &'static str {
    match primitive {
        Primitive::Str => "\"string\"",
        Primitive::Int => "1",
        Primitive::Float => "0.5",
        Primitive::Bool => "true",
        Primitive::Uuid => UUID_EXAMPLE,
    }
}

fn scalar_list_example(primitive: Primitive) -> String {
    match primitive {
        Primitive::Str => "[\"...\", \"...\"]".to_string(),
        Primitive::Int => "[1, 2]".to_string(),
        Primitive::Float => "[0.5, 0.8]".to_string(),
        Primitive::Bool => "[true, false]".to_string(),
        Primitive::Uuid => format!("[{UUID_EXAMPLE}, {UUID_EXAMPLE}]"),
    }
}
