//! Naming convention utilities for code generation.
//!
//! The source field name is the single source of truth: target names are
//! derived from it by one fixed rule, with no per-field overrides.
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `snake_case` | [`to_camel_case`] | `snakeCase` |
//! | `word` | [`capitalize`] | `Word` |

/// Convert snake_case to camelCase.
///
/// The first segment is kept as written; each later segment is capitalized
/// with the rest of it lowercased. Empty segments contribute nothing, so a
/// leading underscore leaves the next segment capitalized.
///
/// # Examples
///
/// ```
/// use schemabridge_cli::codegen::naming::to_camel_case;
///
/// assert_eq!(to_camel_case("overall_score"), "overallScore");
/// assert_eq!(to_camel_case("is_spam"), "isSpam");
/// assert_eq!(to_camel_case("already"), "already");
/// ```
pub fn to_camel_case(s: &str) -> String {
    let mut segments = s.split('_');
    let mut result = segments.next().unwrap_or_default().to_string();
    for segment in segments {
        result.push_str(&capitalize(&segment.to_lowercase()));
    }
    result
}

/// Capitalize the first letter of a string.
///
/// # Examples
///
/// ```
/// use schemabridge_cli::codegen::naming::capitalize;
///
/// assert_eq!(capitalize("hello"), "Hello");
/// assert_eq!(capitalize(""), "");
/// ```
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}
