//! PHP class generation from record definitions.
//!
//! Each record becomes one class with a docblocked public property per field
//! and a constructor that hydrates the instance from a decoded JSON array.
//!
//! # Hydration
//!
//! | Field type | Assignment |
//! |------------|------------|
//! | `List[R]` (known R) | `array_map(fn($item) => new R($item), $data['k'] ?? [])` |
//! | other `List[T]` | `$data['k'] ?? []` |
//! | `Optional[R]` (known R) | `isset($data['k']) ? new R($data['k']) : null` |
//! | `Optional[float]` | `isset($data['k']) ? floatval($data['k']) : null` |
//! | other `Optional[T]` | `$data['k'] ?? null` |
//! | `R` (known R) | `new R($data['k'])` |
//! | unknown `R` | `$data['k']` |
//! | `float` | `floatval($data['k'] ?? 0.0)` |
//! | `str`, `UUID`, `int`, `bool` | `$data['k'] ?? ''`, `0`, `false` |
//!
//! Keys are the source field names; properties are their camelCase form.

use super::naming::to_camel_case;
use super::{Rendered, php_display_type, php_type, unresolved_references};
use schemabridge_core::{FieldSpec, Primitive, SchemaRegistry, SchemaSpec, TypeExpr};

const RULE: &str =
    "===============================================================================";

/// Provenance lines written at the top of every generated class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    /// Where the records were declared
    pub source_label: String,

    /// Command that regenerates the output
    pub regenerate_command: String,
}

impl Default for Banner {
    fn default() -> Self {
        Self {
            source_label: "schemas.py".to_string(),
            regenerate_command: "schemabridge generate".to_string(),
        }
    }
}

/// Options for PHP class generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhpOptions {
    pub namespace: String,
    pub banner: Banner,

    /// Emit `public readonly` properties for frozen records
    pub readonly_frozen: bool,
}

impl Default for PhpOptions {
    fn default() -> Self {
        Self {
            namespace: "Schemas".to_string(),
            banner: Banner::default(),
            readonly_frozen: false,
        }
    }
}

/// Generate the PHP class for one record.
///
/// Unknown referenced names are emitted as opaque values and reported in
/// [`Rendered::warnings`].
pub fn generate_php_class(
    schema: &SchemaSpec,
    registry: &SchemaRegistry,
    options: &PhpOptions,
) -> Rendered {
    let mut code = String::new();

    code.push_str("<?php\n\n");
    code.push_str(&banner(&options.banner));
    code.push_str(&format!("namespace {};\n\n", options.namespace));

    code.push_str(&docblock(&doc_lines(&schema.docstring), ""));
    code.push_str(&format!("class {} {{\n", schema.name));

    let readonly = options.readonly_frozen && schema.is_frozen;
    for field in &schema.fields {
        code.push('\n');
        code.push_str(&property(field, readonly));
    }

    code.push('\n');
    code.push_str(&constructor(schema, registry));
    code.push_str("}\n");

    Rendered {
        source: code,
        warnings: unresolved_references(schema, registry),
    }
}

fn banner(banner: &Banner) -> String {
    let lines = [
        "/*".to_string(),
        format!(" * {RULE}"),
        " * WARNING: AUTO-GENERATED FILE - DO NOT EDIT MANUALLY!".to_string(),
        format!(" * {RULE}"),
        " *".to_string(),
        " * This file is automatically generated from Python schemas in:".to_string(),
        format!(" * {}", banner.source_label),
        " *".to_string(),
        " * To make changes:".to_string(),
        " * 1. Edit the Python schema file".to_string(),
        format!(" * 2. Run: {}", banner.regenerate_command),
        " * 3. All PHP classes and documentation will be regenerated".to_string(),
        " *".to_string(),
        " * Any manual edits to this file WILL BE OVERWRITTEN!".to_string(),
        format!(" * {RULE}"),
        " */".to_string(),
    ];

    let mut out = lines.join("\n");
    out.push_str("\n\n");
    out
}

fn doc_lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}

/// `/** ... */` block at `indent`; empty when there is nothing to say.
fn docblock(lines: &[String], indent: &str) -> String {
    if lines.is_empty() {
        return String::new();
    }

    let mut out = format!("{indent}/**\n");
    for line in lines {
        if line.is_empty() {
            out.push_str(&format!("{indent} *\n"));
        } else {
            out.push_str(&format!("{indent} * {line}\n"));
        }
    }
    out.push_str(&format!("{indent} */\n"));
    out
}

fn property(field: &FieldSpec, readonly: bool) -> String {
    let mut lines = doc_lines(&field.description);
    if lines.is_empty() {
        lines.push(String::new());
    }
    if let Some(summary) = field.constraint_summary() {
        lines.push(format!("Constraints: {summary}"));
    }
    if field.ty.is_list() {
        lines.push(format!("@var {}", php_display_type(&field.ty)));
    }

    let modifier = if readonly { "public readonly" } else { "public" };
    let mut out = docblock(&lines, "    ");
    out.push_str(&format!(
        "    {modifier} {} ${};\n",
        php_type(&field.ty),
        to_camel_case(&field.name)
    ));
    out
}

fn constructor(schema: &SchemaSpec, registry: &SchemaRegistry) -> String {
    let lines = vec![
        format!("{} constructor.", schema.name),
        "@param array $data The JSON data from the API".to_string(),
    ];

    let mut out = docblock(&lines, "    ");
    out.push_str("    public function __construct(array $data) {\n");
    for field in &schema.fields {
        out.push_str(&format!(
            "        $this->{} = {};\n",
            to_camel_case(&field.name),
            hydration(field, registry)
        ));
    }
    out.push_str("    }\n");
    out
}

/// Right-hand side of the constructor assignment for `field`.
fn hydration(field: &FieldSpec, registry: &SchemaRegistry) -> String {
    let key = format!("$data['{}']", field.name);
    let known = |ty: &TypeExpr| match ty {
        TypeExpr::Reference(name) if registry.contains(name) => Some(name.clone()),
        _ => None,
    };

    match &field.ty {
        TypeExpr::List(inner) => match known(inner) {
            Some(record) => format!("array_map(fn($item) => new {record}($item), {key} ?? [])"),
            None => format!("{key} ?? []"),
        },
        TypeExpr::Optional(inner) => match (known(inner), inner.as_ref()) {
            (Some(record), _) => format!("isset({key}) ? new {record}({key}) : null"),
            (None, TypeExpr::Scalar(Primitive::Float)) => {
                format!("isset({key}) ? floatval({key}) : null")
            }
            (None, _) => format!("{key} ?? null"),
        },
        TypeExpr::Reference(name) if registry.contains(name) => format!("new {name}({key})"),
        TypeExpr::Reference(_) => key,
        TypeExpr::Scalar(Primitive::Float) => format!("floatval({key} ?? 0.0)"),
        TypeExpr::Scalar(Primitive::Int) => format!("{key} ?? 0"),
        TypeExpr::Scalar(Primitive::Bool) => format!("{key} ?? false"),
        TypeExpr::Scalar(Primitive::Str | Primitive::Uuid) => format!("{key} ?? ''"),
    }
}
