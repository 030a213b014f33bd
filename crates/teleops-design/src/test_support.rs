//! In-memory backend and fixtures for session tests.

use std::collections::HashSet;
use std::sync::Mutex;

use chrono::Utc;
use teleops_api::ApiError;
use teleops_core::entities::{DesignItem, DesignVersion, EquipmentEntry};
use teleops_core::enums::VersionStatus;

use crate::backend::VersionBackend;
use crate::reorder;

pub const PROJECT: &str = "prj-1";

#[derive(Default)]
struct FakeState {
    versions: Vec<DesignVersion>,
    next_id: u32,
    failing: HashSet<&'static str>,
    version_limit: bool,
    catalog: Vec<EquipmentEntry>,
    calls: Vec<&'static str>,
}

/// Backend that keeps versions in memory and records every call.
#[derive(Default)]
pub struct FakeBackend {
    state: Mutex<FakeState>,
}

impl FakeBackend {
    pub fn with_versions(versions: Vec<DesignVersion>) -> Self {
        let backend = Self::default();
        backend.state.lock().unwrap().versions = versions;
        backend
    }

    /// Make every call of `op` fail with a 503.
    pub fn fail(&self, op: &'static str) {
        self.state.lock().unwrap().failing.insert(op);
    }

    pub fn recover(&self, op: &'static str) {
        self.state.lock().unwrap().failing.remove(op);
    }

    pub fn hit_version_limit(&self) {
        self.state.lock().unwrap().version_limit = true;
    }

    pub fn set_catalog(&self, catalog: Vec<EquipmentEntry>) {
        self.state.lock().unwrap().catalog = catalog;
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn versions(&self) -> Vec<DesignVersion> {
        self.state.lock().unwrap().versions.clone()
    }

    fn enter(&self, op: &'static str) -> Result<std::sync::MutexGuard<'_, FakeState>, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(op);
        if state.failing.contains(op) {
            return Err(ApiError::Api {
                status: 503,
                message: format!("{op} unavailable"),
            });
        }
        Ok(state)
    }
}

impl FakeState {
    fn find_mut(&mut self, version_id: &str) -> Result<&mut DesignVersion, ApiError> {
        self.versions
            .iter_mut()
            .find(|v| v.id == version_id)
            .ok_or_else(|| ApiError::Api {
                status: 404,
                message: format!("{version_id} not found"),
            })
    }
}

impl VersionBackend for FakeBackend {
    async fn list_versions(&self, project_id: &str) -> Result<Vec<DesignVersion>, ApiError> {
        let state = self.enter("list_versions")?;
        Ok(state
            .versions
            .iter()
            .filter(|v| v.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn create_version(
        &self,
        project_id: &str,
        clone_from: Option<&str>,
    ) -> Result<DesignVersion, ApiError> {
        let mut state = self.enter("create_version")?;
        let items = clone_from
            .and_then(|id| state.versions.iter().find(|v| v.id == id))
            .map(|v| v.items.clone())
            .unwrap_or_default();
        let version_number = state
            .versions
            .iter()
            .map(|v| v.version_number)
            .max()
            .unwrap_or(0)
            + 1;
        state.next_id += 1;
        let version = DesignVersion {
            id: format!("srv-{}", state.next_id),
            project_id: project_id.to_string(),
            version_number,
            status: VersionStatus::Draft,
            items,
            created_at: Utc::now(),
            published_at: None,
        };
        state.versions.push(version.clone());
        Ok(version)
    }

    async fn replace_items(
        &self,
        version_id: &str,
        items: &[DesignItem],
    ) -> Result<DesignVersion, ApiError> {
        let mut state = self.enter("replace_items")?;
        let version = state.find_mut(version_id)?;
        version.items = items
            .iter()
            .enumerate()
            .map(|(n, item)| DesignItem {
                id: format!("{version_id}-row-{n}"),
                ..item.clone()
            })
            .collect();
        Ok(version.clone())
    }

    async fn reorder_items(
        &self,
        version_id: &str,
        from_index: usize,
        to_index: usize,
    ) -> Result<DesignVersion, ApiError> {
        let mut state = self.enter("reorder_items")?;
        let version = state.find_mut(version_id)?;
        reorder::sort_for_display(&mut version.items);
        reorder::move_item(&mut version.items, from_index, to_index).map_err(|e| {
            ApiError::Api {
                status: 400,
                message: e.to_string(),
            }
        })?;
        Ok(version.clone())
    }

    async fn publish_version(&self, version_id: &str) -> Result<DesignVersion, ApiError> {
        let mut state = self.enter("publish_version")?;
        if state.version_limit {
            return Err(ApiError::VersionLimit {
                message: "project already has 20 versions".into(),
            });
        }
        let version = state.find_mut(version_id)?;
        version.status = VersionStatus::Published;
        version.published_at = Some(Utc::now());
        Ok(version.clone())
    }

    async fn delete_version(&self, version_id: &str) -> Result<(), ApiError> {
        let mut state = self.enter("delete_version")?;
        state.find_mut(version_id)?;
        state.versions.retain(|v| v.id != version_id);
        Ok(())
    }

    async fn search_equipment(&self, query: &str) -> Result<Vec<EquipmentEntry>, ApiError> {
        let state = self.enter("search_equipment")?;
        let needle = query.to_lowercase();
        Ok(state
            .catalog
            .iter()
            .filter(|e| e.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }
}

/// Rows of a small published list: one header and two leaves.
pub fn antenna_rows() -> Vec<DesignItem> {
    vec![
        DesignItem::header("h1", "Antenna", 0),
        DesignItem::leaf("l1", "RRU-1", Some("Antenna".into()), 1),
        DesignItem::leaf("l2", "RRU-2", Some("Antenna".into()), 2),
    ]
}

pub fn version(
    id: &str,
    version_number: u32,
    status: VersionStatus,
    items: Vec<DesignItem>,
) -> DesignVersion {
    DesignVersion {
        id: id.to_string(),
        project_id: PROJECT.to_string(),
        version_number,
        status,
        items,
        created_at: Utc::now(),
        published_at: (status == VersionStatus::Published).then(Utc::now),
    }
}
