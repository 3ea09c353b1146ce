//! Documentation layout configuration

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// Editorial classification of records into pages
///
/// Main records get their own documentation page; inline subtypes are
/// documented as subsections of a specific parent page. Anything else is an
/// ordinary nested type without a page of its own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocsLayout {
    /// Records with a dedicated page, in navigation order
    #[serde(default)]
    pub main_records: Vec<String>,

    /// Parent record → records documented inline on the parent's page
    #[serde(default)]
    pub inline_subtypes: IndexMap<String, Vec<String>>,
}

/// Inconsistent documentation layout
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("record names in the documentation layout cannot be empty")]
    EmptyName,

    #[error("main record {0} is listed more than once")]
    DuplicateMainRecord(String),

    #[error("inline subtype parent {0} is not a main record")]
    ParentNotMain(String),

    #[error("{0} is both a main record and an inline subtype")]
    SubtypeIsMain(String),

    #[error("inline subtype {subtype} is listed under both {first} and {second}")]
    MultipleParents {
        subtype: String,
        first: String,
        second: String,
    },
}

impl DocsLayout {
    /// Create an empty layout
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_main_record(mut self, name: impl Into<String>) -> Self {
        self.main_records.push(name.into());
        self
    }

    pub fn with_inline_subtypes<I, S>(mut self, parent: impl Into<String>, subtypes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inline_subtypes
            .insert(parent.into(), subtypes.into_iter().map(Into::into).collect());
        self
    }

    /// Whether `name` has its own page
    pub fn is_main(&self, name: &str) -> bool {
        self.main_records.iter().any(|m| m == name)
    }

    /// Navigation position of a main record (1-based)
    pub fn sidebar_position(&self, name: &str) -> Option<usize> {
        self.main_records
            .iter()
            .position(|m| m == name)
            .map(|index| index + 1)
    }

    /// Records documented inline on `parent`'s page, in listed order
    pub fn inline_subtypes_of(&self, parent: &str) -> &[String] {
        self.inline_subtypes
            .get(parent)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn is_inline_subtype_of(&self, name: &str, parent: &str) -> bool {
        self.inline_subtypes_of(parent).iter().any(|s| s == name)
    }

    /// The page that documents `subtype` inline
    pub fn parent_of(&self, subtype: &str) -> Option<&str> {
        self.inline_subtypes
            .iter()
            .find(|(_, subtypes)| subtypes.iter().any(|s| s == subtype))
            .map(|(parent, _)| parent.as_str())
    }

    /// Every record name the layout mentions
    pub fn referenced_names(&self) -> BTreeSet<&str> {
        self.main_records
            .iter()
            .chain(self.inline_subtypes.keys())
            .chain(self.inline_subtypes.values().flatten())
            .map(String::as_str)
            .collect()
    }

    /// Check that every record lands on at most one page
    pub fn validate(&self) -> Result<(), LayoutError> {
        let mut mains = BTreeSet::new();
        for name in &self.main_records {
            if name.is_empty() {
                return Err(LayoutError::EmptyName);
            }
            if !mains.insert(name.as_str()) {
                return Err(LayoutError::DuplicateMainRecord(name.clone()));
            }
        }

        let mut parents: IndexMap<&str, &str> = IndexMap::new();
        for (parent, subtypes) in &self.inline_subtypes {
            if !mains.contains(parent.as_str()) {
                return Err(LayoutError::ParentNotMain(parent.clone()));
            }
            for subtype in subtypes {
                if subtype.is_empty() {
                    return Err(LayoutError::EmptyName);
                }
                if mains.contains(subtype.as_str()) {
                    return Err(LayoutError::SubtypeIsMain(subtype.clone()));
                }
                if let Some(first) = parents.insert(subtype.as_str(), parent.as_str()) {
                    return Err(LayoutError::MultipleParents {
                        subtype: subtype.clone(),
                        first: first.to_string(),
                        second: parent.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}
