use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::VersionStatus;
use crate::errors::CoreError;

/// Bucket name for leaf items without a category.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Normalize a nullable category label. Null and blank labels map to
/// [`UNCATEGORIZED`]; everything else is trimmed.
#[must_use]
pub fn normalize_category(category: Option<&str>) -> &str {
    match category.map(str::trim) {
        Some(label) if !label.is_empty() => label,
        _ => UNCATEGORIZED,
    }
}

/// A row of a design list: either a category header or a leaf equipment entry.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DesignItem {
    pub id: String,
    pub name: String,
    /// Category label of a leaf. Headers carry their own name here or nothing.
    #[serde(default)]
    pub category: Option<String>,
    /// `true` for a group header row.
    #[serde(default)]
    pub is_category: bool,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub attributes: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
    /// Dense, zero-based presentation order within a version.
    #[serde(default)]
    pub sort_order: u32,
}

impl DesignItem {
    /// Build a header row.
    #[must_use]
    pub fn header(id: impl Into<String>, name: impl Into<String>, sort_order: u32) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            category: Some(name.clone()),
            name,
            is_category: true,
            model: None,
            manufacturer: None,
            attributes: None,
            remarks: None,
            sort_order,
        }
    }

    /// Build a leaf row under `category`.
    #[must_use]
    pub fn leaf(
        id: impl Into<String>,
        name: impl Into<String>,
        category: Option<String>,
        sort_order: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            is_category: false,
            model: None,
            manufacturer: None,
            attributes: None,
            remarks: None,
            sort_order,
        }
    }

    /// The group this row belongs to: a header's own name, or a leaf's
    /// normalized category.
    #[must_use]
    pub fn group_name(&self) -> &str {
        if self.is_category {
            self.name.trim()
        } else {
            normalize_category(self.category.as_deref())
        }
    }

    /// Reject rows without a usable name.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the name is blank.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            let kind = if self.is_category { "category" } else { "item" };
            return Err(CoreError::Validation(format!("{kind} name must not be empty")));
        }
        Ok(())
    }
}

/// A versioned snapshot of a project's design list.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DesignVersion {
    pub id: String,
    pub project_id: String,
    pub version_number: u32,
    pub status: VersionStatus,
    #[serde(default)]
    pub items: Vec<DesignItem>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

impl DesignVersion {
    #[must_use]
    pub fn is_draft(&self) -> bool {
        self.status == VersionStatus::Draft
    }

    #[must_use]
    pub fn is_published(&self) -> bool {
        self.status == VersionStatus::Published
    }

    /// The newest published version (highest version number) in `versions`.
    #[must_use]
    pub fn latest_published(versions: &[Self]) -> Option<&Self> {
        versions
            .iter()
            .filter(|v| v.is_published())
            .max_by_key(|v| v.version_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn version(id: &str, number: u32, status: VersionStatus) -> DesignVersion {
        DesignVersion {
            id: id.to_string(),
            project_id: "prj-1".to_string(),
            version_number: number,
            status,
            items: Vec::new(),
            created_at: Utc::now(),
            published_at: None,
        }
    }

    #[test]
    fn normalize_maps_null_and_blank_to_uncategorized() {
        assert_eq!(normalize_category(None), UNCATEGORIZED);
        assert_eq!(normalize_category(Some("   ")), UNCATEGORIZED);
        assert_eq!(normalize_category(Some(" Antenna ")), "Antenna");
    }

    #[test]
    fn group_name_uses_header_name_for_headers() {
        let header = DesignItem::header("h1", "Antenna", 0);
        let leaf = DesignItem::leaf("l1", "RRU-1", None, 1);
        assert_eq!(header.group_name(), "Antenna");
        assert_eq!(leaf.group_name(), UNCATEGORIZED);
    }

    #[test]
    fn blank_names_fail_validation() {
        let leaf = DesignItem::leaf("l1", "  ", Some("Antenna".into()), 0);
        let err = leaf.validate().unwrap_err();
        assert_eq!(err.to_string(), "Validation error: item name must not be empty");
    }

    #[test]
    fn latest_published_picks_highest_number() {
        let versions = vec![
            version("v1", 1, VersionStatus::Published),
            version("v3", 3, VersionStatus::Published),
            version("v4", 4, VersionStatus::Draft),
        ];
        let latest = DesignVersion::latest_published(&versions).unwrap();
        assert_eq!(latest.id, "v3");
    }

    #[test]
    fn item_defaults_fill_missing_fields() {
        let item: DesignItem = serde_json::from_str(r#"{"id": "i1", "name": "RRU-1"}"#).unwrap();
        assert!(!item.is_category);
        assert_eq!(item.sort_order, 0);
        assert!(item.category.is_none());
    }
}
