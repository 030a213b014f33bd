//! The backend seam of a design session.

use teleops_api::{ApiClient, ApiError};
use teleops_core::entities::{DesignItem, DesignVersion, EquipmentEntry};

/// Server operations a [`crate::DesignSession`] depends on.
///
/// Implemented by [`ApiClient`]; tests substitute an in-memory backend.
#[allow(async_fn_in_trait)]
pub trait VersionBackend {
    async fn list_versions(&self, project_id: &str) -> Result<Vec<DesignVersion>, ApiError>;

    async fn create_version(
        &self,
        project_id: &str,
        clone_from: Option<&str>,
    ) -> Result<DesignVersion, ApiError>;

    async fn replace_items(
        &self,
        version_id: &str,
        items: &[DesignItem],
    ) -> Result<DesignVersion, ApiError>;

    async fn reorder_items(
        &self,
        version_id: &str,
        from_index: usize,
        to_index: usize,
    ) -> Result<DesignVersion, ApiError>;

    async fn publish_version(&self, version_id: &str) -> Result<DesignVersion, ApiError>;

    async fn delete_version(&self, version_id: &str) -> Result<(), ApiError>;

    async fn search_equipment(&self, query: &str) -> Result<Vec<EquipmentEntry>, ApiError>;
}

impl VersionBackend for ApiClient {
    async fn list_versions(&self, project_id: &str) -> Result<Vec<DesignVersion>, ApiError> {
        Self::list_versions(self, project_id).await
    }

    async fn create_version(
        &self,
        project_id: &str,
        clone_from: Option<&str>,
    ) -> Result<DesignVersion, ApiError> {
        Self::create_version(self, project_id, clone_from).await
    }

    async fn replace_items(
        &self,
        version_id: &str,
        items: &[DesignItem],
    ) -> Result<DesignVersion, ApiError> {
        Self::replace_items(self, version_id, items).await
    }

    async fn reorder_items(
        &self,
        version_id: &str,
        from_index: usize,
        to_index: usize,
    ) -> Result<DesignVersion, ApiError> {
        Self::reorder_items(self, version_id, from_index, to_index).await
    }

    async fn publish_version(&self, version_id: &str) -> Result<DesignVersion, ApiError> {
        Self::publish_version(self, version_id).await
    }

    async fn delete_version(&self, version_id: &str) -> Result<(), ApiError> {
        Self::delete_version(self, version_id).await
    }

    async fn search_equipment(&self, query: &str) -> Result<Vec<EquipmentEntry>, ApiError> {
        Self::search_equipment(self, query).await
    }
}
