//! Keyword table: resource type → lowercase keywords.
//!
//! The table is plain data. The built-in one ships as `data/keywords.toml`;
//! callers may load their own and inject it into the classifier.

use std::path::Path;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::error::ClassifyError;

const BUILTIN: &str = include_str!("../data/keywords.toml");

static BUILTIN_TABLE: LazyLock<KeywordTable> = LazyLock::new(|| {
    KeywordTable::from_toml_str(BUILTIN).unwrap_or_else(|e| {
        tracing::error!(%e, "built-in keyword table is malformed, classifier disabled");
        KeywordTable::default()
    })
});

/// Keywords associated with one resource type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordMapping {
    /// Resource type value (e.g., `project`).
    pub value: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Ordered keyword table. Entry order breaks confidence ties.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordTable {
    #[serde(default)]
    types: Vec<KeywordMapping>,
}

impl KeywordTable {
    /// Build a table from mappings, lowercasing keywords and dropping blanks.
    #[must_use]
    pub fn new(types: Vec<KeywordMapping>) -> Self {
        let types = types
            .into_iter()
            .map(|mapping| KeywordMapping {
                keywords: mapping
                    .keywords
                    .iter()
                    .map(|k| k.trim().to_lowercase())
                    .filter(|k| !k.is_empty())
                    .collect(),
                value: mapping.value,
            })
            .collect();
        Self { types }
    }

    /// The table shipped with the crate, parsed once per process.
    #[must_use]
    pub fn builtin() -> Self {
        BUILTIN_TABLE.clone()
    }

    /// Parse a table from TOML (`[[types]] value = ".." keywords = [..]`).
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::Parse`] if the TOML is invalid.
    pub fn from_toml_str(source: &str) -> Result<Self, ClassifyError> {
        let raw: Self = toml::from_str(source)?;
        Ok(Self::new(raw.types))
    }

    /// Read and parse a table file.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::Io`] if the file cannot be read, or
    /// [`ClassifyError::Parse`] if it is invalid.
    pub fn from_path(path: &Path) -> Result<Self, ClassifyError> {
        let source = std::fs::read_to_string(path).map_err(|source| ClassifyError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    #[must_use]
    pub fn mappings(&self) -> &[KeywordMapping] {
        &self.types
    }

    /// Keywords of one resource type, if present.
    #[must_use]
    pub fn keywords_for(&self, value: &str) -> Option<&[String]> {
        self.types
            .iter()
            .find(|m| m.value == value)
            .map(|m| m.keywords.as_slice())
    }
}
