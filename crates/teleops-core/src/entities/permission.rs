use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Free-text metadata of a permission being edited.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PermissionText {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub category: String,
}

impl PermissionText {
    /// Name, code, and category joined by spaces and lowercased.
    #[must_use]
    pub fn haystack(&self) -> String {
        format!("{} {} {}", self.name, self.code, self.category).to_lowercase()
    }
}
