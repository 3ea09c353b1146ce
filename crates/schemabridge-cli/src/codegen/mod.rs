//! Code and documentation generation from extracted records.
//!
//! Every generator is a pure function of a [`SchemaSpec`] and the
//! [`SchemaRegistry`] it belongs to; nothing here touches the filesystem.
//!
//! # Architecture
//!
//! ```text
//! schemas.py
//!     ↓
//!  [schemabridge-python]
//!     ↓
//!  SchemaRegistry
//!     ↓
//!  ├─→ [php]      → <Record>.php
//!  └─→ [markdown] → <Record>.md   (uses [examples] and [links])
//! ```
//!
//! # Usage
//!
//! ```rust
//! use schemabridge_cli::codegen::php::{PhpOptions, generate_php_class};
//! use schemabridge_core::{FieldSpec, Primitive, SchemaRegistry, SchemaSpec, TypeExpr};
//!
//! let point = SchemaSpec::new("Point")
//!     .with_field(FieldSpec::new("x", TypeExpr::Scalar(Primitive::Int)));
//! let registry = SchemaRegistry::from_schemas([point]).unwrap();
//! let point = registry.get("Point").unwrap();
//!
//! let rendered = generate_php_class(point, &registry, &PhpOptions::default());
//! assert!(rendered.source.contains("public int $x;"));
//! assert!(rendered.warnings.is_empty());
//! ```
//!
//! # See Also
//!
//! - [`naming`] for the snake_case to camelCase rule
//! - [`examples`] for wire-format example synthesis
//! - [`links`] for cross-page link resolution

pub mod examples;
pub mod links;
pub mod markdown;
pub mod naming;
pub mod php;

pub use examples::ExampleBuilder;
pub use links::{LinkResolver, LinkTarget};
pub use markdown::{DocsOptions, generate_doc_page};
pub use php::{Banner, PhpOptions, generate_php_class};

use schemabridge_core::{Primitive, SchemaRegistry, SchemaSpec, TypeExpr, UnresolvedReference};

/// Generated source plus the non-fatal warnings found while producing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub source: String,
    pub warnings: Vec<UnresolvedReference>,
}

/// Every field of `schema` whose type names a record missing from `registry`.
pub fn unresolved_references(
    schema: &SchemaSpec,
    registry: &SchemaRegistry,
) -> Vec<UnresolvedReference> {
    schema
        .fields
        .iter()
        .filter_map(|field| {
            let name = field.ty.reference_name()?;
            (!registry.contains(name))
                .then(|| UnresolvedReference::new(&schema.name, &field.name, name))
        })
        .collect()
}

/// PHP spelling of a primitive.
pub fn php_scalar(primitive: Primitive) -> &'static str {
    match primitive {
        Primitive::Str | Primitive::Uuid => "string",
        Primitive::Int => "int",
        Primitive::Float => "float",
        Primitive::Bool => "bool",
    }
}

/// PHP declaration type for a field: lists collapse to `array`.
pub fn php_type(ty: &TypeExpr) -> String {
    match ty {
        TypeExpr::Scalar(primitive) => php_scalar(*primitive).to_string(),
        TypeExpr::Reference(name) => name.clone(),
        TypeExpr::List(_) => "array".to_string(),
        TypeExpr::Optional(inner) => format!("?{}", php_type(inner)),
    }
}

/// PHP type as shown to readers: lists keep their element type as `T[]`.
pub fn php_display_type(ty: &TypeExpr) -> String {
    match ty {
        TypeExpr::List(inner) => format!("{}[]", php_type(inner)),
        other => php_type(other),
    }
}
