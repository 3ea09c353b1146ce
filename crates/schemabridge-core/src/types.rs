//! Type expressions for record fields.
//!
//! A field's declared annotation is parsed once into a [`TypeExpr`] and every
//! generator switches on the variant instead of re-inspecting the text.
//!
//! # Supported grammar
//!
//! ```text
//! type     := wrapped | wrapped '|' 'None' | 'None' '|' wrapped
//! wrapped  := WRAPPER '[' leaf ']' | leaf
//! WRAPPER  := 'List' | 'list' | 'typing.List' | 'Optional' | 'typing.Optional'
//! leaf     := IDENT ('.' IDENT)*
//! ```
//!
//! Exactly one level of wrapping is supported: `List[Optional[int]]` and
//! `Optional[List[str]]` are rejected.
//!
//! # Examples
//!
//! ```
//! use schemabridge_core::{Primitive, TypeExpr};
//!
//! let ty = TypeExpr::parse("List[Point]").unwrap();
//! assert_eq!(ty.reference_name(), Some("Point"));
//!
//! let ty = TypeExpr::parse("float | None").unwrap();
//! assert_eq!(ty, TypeExpr::Optional(Box::new(TypeExpr::Scalar(Primitive::Float))));
//! ```

use crate::error::TypeParseError;
use serde::Serialize;
use std::fmt;

/// Primitive scalar kinds understood by every generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    /// `str`
    Str,
    /// `int`
    Int,
    /// `float`
    Float,
    /// `bool`
    Bool,
    /// `UUID`
    Uuid,
}

impl Primitive {
    /// Look up a primitive by its Python spelling.
    pub fn from_python(name: &str) -> Option<Self> {
        match name {
            "str" => Some(Primitive::Str),
            "int" => Some(Primitive::Int),
            "float" => Some(Primitive::Float),
            "bool" => Some(Primitive::Bool),
            "UUID" | "uuid.UUID" => Some(Primitive::Uuid),
            _ => None,
        }
    }

    /// The canonical Python spelling.
    pub fn python_name(self) -> &'static str {
        match self {
            Primitive::Str => "str",
            Primitive::Int => "int",
            Primitive::Float => "float",
            Primitive::Bool => "bool",
            Primitive::Uuid => "UUID",
        }
    }
}

/// A field's declared type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "of", rename_all = "lowercase")]
pub enum TypeExpr {
    /// A primitive value.
    Scalar(Primitive),

    /// Another record, or an unrecognized named type.
    Reference(String),

    /// Homogeneous ordered collection.
    List(Box<TypeExpr>),

    /// Value that may be absent.
    Optional(Box<TypeExpr>),
}

#[derive(Clone, Copy)]
enum Wrapper {
    List,
    Optional,
}

impl TypeExpr {
    /// Parse a declaration's type text.
    pub fn parse(raw: &str) -> Result<TypeExpr, TypeParseError> {
        let text = raw.trim();
        if text.is_empty() {
            return Err(TypeParseError::new(raw, "empty type annotation"));
        }
        check_brackets(raw, text)?;

        let parts = split_top_level(text, '|');
        if parts.len() == 1 {
            return parse_wrapped(raw, text);
        }

        let (nones, rest): (Vec<&str>, Vec<&str>) =
            parts.into_iter().partition(|part| *part == "None");
        if nones.len() != 1 || rest.len() != 1 {
            return Err(TypeParseError::new(
                raw,
                "only `T | None` unions are supported",
            ));
        }

        match parse_wrapped(raw, rest[0])? {
            TypeExpr::List(_) | TypeExpr::Optional(_) => Err(TypeParseError::new(
                raw,
                "only one level of wrapping is supported",
            )),
            leaf => Ok(TypeExpr::Optional(Box::new(leaf))),
        }
    }

    /// The wrapped type of a `List` or `Optional`.
    pub fn inner(&self) -> Option<&TypeExpr> {
        match self {
            TypeExpr::List(inner) | TypeExpr::Optional(inner) => Some(inner),
            TypeExpr::Scalar(_) | TypeExpr::Reference(_) => None,
        }
    }

    /// The innermost type, looking through any wrapper.
    pub fn leaf(&self) -> &TypeExpr {
        match self.inner() {
            Some(inner) => inner.leaf(),
            None => self,
        }
    }

    /// The referenced name, whether direct or wrapped.
    pub fn reference_name(&self) -> Option<&str> {
        match self.leaf() {
            TypeExpr::Reference(name) => Some(name),
            _ => None,
        }
    }

    /// The primitive at the leaf, if any.
    pub fn primitive(&self) -> Option<Primitive> {
        match self.leaf() {
            TypeExpr::Scalar(primitive) => Some(*primitive),
            _ => None,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, TypeExpr::List(_))
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, TypeExpr::Optional(_))
    }
}

impl fmt::Display for TypeExpr {
    /// Canonical Python spelling.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Scalar(primitive) => f.write_str(primitive.python_name()),
            TypeExpr::Reference(name) => f.write_str(name),
            TypeExpr::List(inner) => write!(f, "List[{inner}]"),
            TypeExpr::Optional(inner) => write!(f, "Optional[{inner}]"),
        }
    }
}

fn check_brackets(raw: &str, text: &str) -> Result<(), TypeParseError> {
    let mut depth = 0usize;
    for c in text.chars() {
        match c {
            '[' => depth += 1,
            ']' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| TypeParseError::new(raw, "unbalanced brackets"))?;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(TypeParseError::new(raw, "unbalanced brackets"));
    }
    Ok(())
}

/// Split on `sep` outside of brackets, trimming each part.
fn split_top_level(text: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            c if c == sep && depth == 0 => {
                parts.push(text[start..i].trim());
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(text[start..].trim());
    parts
}

fn parse_wrapped(raw: &str, text: &str) -> Result<TypeExpr, TypeParseError> {
    let Some(open) = text.find('[') else {
        return parse_leaf(raw, text);
    };

    // The bracket opened after the head must close at the very end.
    let mut depth = 0usize;
    let mut close = None;
    for (i, c) in text.char_indices().skip_while(|(i, _)| *i < open) {
        match c {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    close = Some(i);
                    break;
                }
            }
            _ => {}
        }
    }
    if close != Some(text.len() - 1) {
        return Err(TypeParseError::new(
            raw,
            "unexpected text after closing bracket",
        ));
    }

    let head = text[..open].trim();
    let wrapper = match head.strip_prefix("typing.").unwrap_or(head) {
        "List" | "list" => Wrapper::List,
        "Optional" => Wrapper::Optional,
        other => {
            return Err(TypeParseError::new(
                raw,
                format!("unsupported type constructor `{other}`"),
            ));
        }
    };

    let inner = text[open + 1..text.len() - 1].trim();
    if inner.is_empty() {
        return Err(TypeParseError::new(raw, "missing type argument"));
    }
    if inner.contains(',') {
        return Err(TypeParseError::new(raw, "expected exactly one type argument"));
    }
    if inner.contains('[') || inner.contains('|') {
        return Err(TypeParseError::new(
            raw,
            "only one level of wrapping is supported",
        ));
    }

    let leaf = Box::new(parse_leaf(raw, inner)?);
    Ok(match wrapper {
        Wrapper::List => TypeExpr::List(leaf),
        Wrapper::Optional => TypeExpr::Optional(leaf),
    })
}

fn parse_leaf(raw: &str, text: &str) -> Result<TypeExpr, TypeParseError> {
    if let Some(primitive) = Primitive::from_python(text) {
        return Ok(TypeExpr::Scalar(primitive));
    }
    if text == "None" {
        return Err(TypeParseError::new(
            raw,
            "`None` is only valid as part of an optional type",
        ));
    }
    if !is_dotted_identifier(text) {
        return Err(TypeParseError::new(
            raw,
            format!("`{text}` is not a type name"),
        ));
    }
    Ok(TypeExpr::Reference(text.to_string()))
}

fn is_dotted_identifier(text: &str) -> bool {
    text.split('.').all(|segment| {
        let mut chars = segment.chars();
        match chars.next() {
            Some(first) if first.is_alphabetic() || first == '_' => {
                chars.all(|c| c.is_alphanumeric() || c == '_')
            }
            _ => false,
        }
    })
}


#[cfg(test)]
#[path = "types/types_parameterized_tests.rs"]
mod types_parameterized_tests;
