//! The local working copy of a design list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use teleops_core::entities::{DesignItem, DesignVersion, normalize_category};
use uuid::Uuid;

use crate::fingerprint::{Fingerprint, fingerprint};
use crate::grouping::same_name;
use crate::reorder::sort_for_display;

/// Where a new draft takes its initial rows from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftSeed {
    Blank,
    /// Copy the rows of a specific published version.
    ClonePublished(String),
    /// Copy the rows of the newest published version.
    EditLatestPublished,
}

/// A leaf row to add to the draft.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewItem {
    pub name: String,
    pub category: Option<String>,
    pub model: Option<String>,
    pub manufacturer: Option<String>,
    pub attributes: Option<String>,
    pub remarks: Option<String>,
}

/// A draft being edited, possibly not yet on the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    pub project_id: String,
    /// Id of the persisted draft version, once it exists on the server.
    pub server_id: Option<String>,
    /// Version the rows were copied from, if any.
    pub cloned_from: Option<String>,
    pub items: Vec<DesignItem>,
    pub updated_at: DateTime<Utc>,
}

impl Draft {
    #[must_use]
    pub fn blank(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            server_id: None,
            cloned_from: None,
            items: Vec::new(),
            updated_at: Utc::now(),
        }
    }

    /// Working copy of a persisted server draft.
    #[must_use]
    pub fn from_version(version: &DesignVersion) -> Self {
        let mut items = version.items.clone();
        sort_for_display(&mut items);
        Self {
            project_id: version.project_id.clone(),
            server_id: Some(version.id.clone()),
            cloned_from: None,
            items,
            updated_at: Utc::now(),
        }
    }

    /// New local draft whose rows copy `source`. Rows get fresh ids; order and
    /// content are kept, so the fingerprint matches the source.
    #[must_use]
    pub fn seeded(project_id: impl Into<String>, source: &DesignVersion) -> Self {
        let mut items: Vec<DesignItem> = source
            .items
            .iter()
            .map(|item| DesignItem {
                id: new_item_id(),
                ..item.clone()
            })
            .collect();
        sort_for_display(&mut items);
        Self {
            project_id: project_id.into(),
            server_id: None,
            cloned_from: Some(source.id.clone()),
            items,
            updated_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn fingerprint(&self) -> Fingerprint {
        fingerprint(&self.items)
    }

    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        self.server_id.is_some()
    }

    /// Whether a leaf with this name already sits in this category.
    #[must_use]
    pub fn has_leaf(&self, name: &str, category: Option<&str>) -> bool {
        let category = normalize_category(category);
        self.items.iter().any(|item| {
            !item.is_category && same_name(&item.name, name) && same_name(item.group_name(), category)
        })
    }

    /// Whether a header with this name exists.
    #[must_use]
    pub fn has_header(&self, name: &str) -> bool {
        self.items
            .iter()
            .any(|item| item.is_category && same_name(&item.name, name))
    }

    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.items.iter().filter(|item| !item.is_category).count()
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Local id for a row not yet persisted, e.g. `itm-1a2b3c4d`.
#[must_use]
pub fn new_item_id() -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("itm-{}", &id[..8])
}
