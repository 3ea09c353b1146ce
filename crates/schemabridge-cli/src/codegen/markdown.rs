//! Docusaurus reference pages for main records.
//!
//! A page shows each field three ways (Python accessor, PHP accessor and the
//! JSON wire form) in `<Tabs groupId="language">` so the reader's language
//! choice sticks across the site. Inline subtypes of the record are rendered
//! as tables at the bottom of the same page.

use super::examples::ExampleBuilder;
use super::links::{LinkResolver, LinkTarget};
use super::naming::to_camel_case;
use super::{Rendered, php_display_type, unresolved_references};
use schemabridge_core::{DocsLayout, FieldSpec, SchemaRegistry, SchemaSpec, TypeExpr};

/// Options for documentation page generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocsOptions {
    /// Python import path of the schema module
    pub module: String,

    /// PHP namespace of the generated classes
    pub namespace: String,
}

impl Default for DocsOptions {
    fn default() -> Self {
        Self {
            module: "schemas".to_string(),
            namespace: "Schemas".to_string(),
        }
    }
}

/// Generate the documentation page for a main record.
pub fn generate_doc_page(
    schema: &SchemaSpec,
    registry: &SchemaRegistry,
    layout: &DocsLayout,
    options: &DocsOptions,
) -> Rendered {
    let page = Page {
        schema,
        registry,
        layout,
        options,
        links: LinkResolver::new(registry, layout),
        examples: ExampleBuilder::new(registry),
    };

    Rendered {
        source: page.render(),
        warnings: unresolved_references(schema, registry),
    }
}

struct Page<'a> {
    schema: &'a SchemaSpec,
    registry: &'a SchemaRegistry,
    layout: &'a DocsLayout,
    options: &'a DocsOptions,
    links: LinkResolver<'a>,
    examples: ExampleBuilder<'a>,
}

impl Page<'_> {
    fn render(&self) -> String {
        let schema = self.schema;
        let mut md = String::new();

        md.push_str("---\n");
        md.push_str(&format!(
            "sidebar_position: {}\n",
            self.layout.sidebar_position(&schema.name).unwrap_or(1)
        ));
        md.push_str("---\n\n");
        md.push_str("import Tabs from '@theme/Tabs';\n");
        md.push_str("import TabItem from '@theme/TabItem';\n\n");

        md.push_str(&format!("# {}\n\n", schema.name));
        if !schema.docstring.is_empty() {
            md.push_str(&format!("{}\n\n", schema.docstring));
        }

        md.push_str(&self.imports());
        md.push_str("## Fields\n\n");
        for field in &schema.fields {
            md.push_str(&self.field_section(field));
        }

        md.push_str(&self.subtypes());

        let end = md.trim_end().len();
        md.truncate(end);
        md.push('\n');
        md
    }

    /// Import block naming the record and every known record it references.
    fn imports(&self) -> String {
        let mut names = self.registry.nested_records(self.schema);
        names.insert(self.schema.name.clone());
        let names: Vec<String> = names.into_iter().collect();

        let python = format!(
            "```python\nfrom {} import {}\n```",
            self.options.module,
            names.join(", ")
        );
        let php_uses: Vec<String> = names
            .iter()
            .map(|name| format!("use {}\\{name};", self.options.namespace))
            .collect();
        let php = format!("```php\n{}\n```", php_uses.join("\n"));

        tabs(
            &python,
            &php,
            "Types are returned as JSON objects in API responses.",
        )
    }

    fn field_section(&self, field: &FieldSpec) -> String {
        let mut md = format!("### {}\n\n", field.name);
        if !field.description.is_empty() {
            md.push_str(&format!("{}\n\n", field.description));
        }
        if let Some(summary) = field.constraint_summary() {
            md.push_str(&format!("**Constraints:** {summary}\n\n"));
        }

        let link = self.link_for(&field.ty);
        md.push_str(&tabs(
            &self.python_view(field, link.as_ref()),
            &self.php_view(field, link.as_ref()),
            &self.json_view(field, link.as_ref()),
        ));
        md
    }

    /// Link for the record a field refers to, directly or through a wrapper.
    fn link_for(&self, ty: &TypeExpr) -> Option<(String, LinkTarget)> {
        let name = ty.reference_name()?;
        let target = self.links.resolve(name, &self.schema.name)?;
        Some((name.to_string(), target))
    }

    fn python_view(&self, field: &FieldSpec, link: Option<&(String, LinkTarget)>) -> String {
        let range = range_comment(field);
        let accessor = format!("result.{}: ", field.name);
        match link {
            Some((name, target)) => {
                let linked = format!("[`{name}`]({target})");
                match &field.ty {
                    TypeExpr::List(_) => {
                        format!("<code>{accessor}List[</code>{linked}<code>]</code>{range}")
                    }
                    TypeExpr::Optional(_) => {
                        format!("<code>{accessor}Optional[</code>{linked}<code>]</code>{range}")
                    }
                    _ => format!("<code>{accessor}</code>{linked}{range}"),
                }
            }
            None => format!("`{accessor}{}{range}`", field.ty),
        }
    }

    fn php_view(&self, field: &FieldSpec, link: Option<&(String, LinkTarget)>) -> String {
        let accessor = format!("$result->{}: ", to_camel_case(&field.name));
        match link {
            Some((name, target)) => {
                let linked = format!("[`{name}`]({target})");
                match &field.ty {
                    TypeExpr::List(_) => format!("<code>{accessor}</code>{linked}<code>[]</code>"),
                    TypeExpr::Optional(_) => format!("<code>{accessor}?</code>{linked}"),
                    _ => format!("<code>{accessor}</code>{linked}"),
                }
            }
            None => format!("`{accessor}{}`", php_display_type(&field.ty)),
        }
    }

    fn json_view(&self, field: &FieldSpec, link: Option<&(String, LinkTarget)>) -> String {
        let mut view = format!(
            "```json\n\"{}\": {}\n```",
            field.name,
            self.examples.field_example(&field.ty)
        );

        if let Some((name, target)) = link {
            let linked = format!("[`{name}`]({target})");
            let prose = match &field.ty {
                TypeExpr::List(_) => format!("Each element is a {linked} object."),
                TypeExpr::Optional(_) => format!("This is a {linked} object (or null)."),
                _ => format!("This is a {linked} object."),
            };
            view.push_str(&format!("\n\n{prose}"));
        }
        view
    }

    fn subtypes(&self) -> String {
        let subtypes: Vec<&SchemaSpec> = self
            .layout
            .inline_subtypes_of(&self.schema.name)
            .iter()
            .filter_map(|name| self.registry.get(name))
            .collect();
        if subtypes.is_empty() {
            return String::new();
        }

        let mut md = "## Sub-types\n\n".to_string();
        for subtype in subtypes {
            md.push_str(&format!("### {}\n\n", subtype.name));
            if !subtype.docstring.is_empty() {
                md.push_str(&format!("{}\n\n", subtype.docstring));
            }

            let python_rows: Vec<(String, String, &str)> = subtype
                .fields
                .iter()
                .map(|f| {
                    let ty = format!("{}{}", f.ty, range_comment(f));
                    (f.name.clone(), ty, f.description.as_str())
                })
                .collect();
            let php_rows: Vec<(String, String, &str)> = subtype
                .fields
                .iter()
                .map(|f| {
                    let ty = php_display_type(&f.ty);
                    (to_camel_case(&f.name), ty, f.description.as_str())
                })
                .collect();
            let json = format!("```json\n{}\n```", self.examples.object_example(subtype));

            md.push_str(&tabs(&table(&python_rows), &table(&php_rows), &json));
        }
        md
    }
}

/// `  # lo-hi` when the field declares both inclusive bounds.
fn range_comment(field: &FieldSpec) -> String {
    field
        .inclusive_range()
        .map(|(low, high)| format!("  # {low}-{high}"))
        .unwrap_or_default()
}

fn tabs(python: &str, php: &str, rest: &str) -> String {
    let mut md = "<Tabs groupId=\"language\">\n".to_string();
    for (value, label, body) in [
        ("python", "Python", python),
        ("php", "PHP", php),
        ("rest", "JSON", rest),
    ] {
        md.push_str(&format!(
            "<TabItem value=\"{value}\" label=\"{label}\">\n\n{body}\n\n</TabItem>\n"
        ));
    }
    md.push_str("</Tabs>\n\n");
    md
}

fn table(rows: &[(String, String, &str)]) -> String {
    let mut md = "| Field | Type | Description |\n|-------|------|-------------|".to_string();
    for (name, ty, description) in rows {
        md.push_str(&format!(
            "\n| `{name}` | `{ty}` | {} |",
            table_cell(description)
        ));
    }
    md
}

fn table_cell(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace('|', "\\|")
}
