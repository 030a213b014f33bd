//! Design version endpoints.

use serde::Serialize;
use teleops_core::entities::{DesignItem, DesignVersion};
use teleops_core::envelope::ListEnvelope;

use crate::{
    ApiClient,
    error::ApiError,
    http::{check_response, decode},
};

#[derive(Serialize)]
struct CreateVersionRequest<'a> {
    clone_from: Option<&'a str>,
}

/// Item body for bulk replacement. Server assigns ids.
#[derive(Debug, Serialize, PartialEq, Eq)]
struct ItemPayload<'a> {
    name: &'a str,
    category: Option<&'a str>,
    is_category: bool,
    model: Option<&'a str>,
    manufacturer: Option<&'a str>,
    attributes: Option<&'a str>,
    remarks: Option<&'a str>,
    sort_order: u32,
}

impl<'a> From<&'a DesignItem> for ItemPayload<'a> {
    fn from(item: &'a DesignItem) -> Self {
        Self {
            name: &item.name,
            category: item.category.as_deref(),
            is_category: item.is_category,
            model: item.model.as_deref(),
            manufacturer: item.manufacturer.as_deref(),
            attributes: item.attributes.as_deref(),
            remarks: item.remarks.as_deref(),
            sort_order: item.sort_order,
        }
    }
}

#[derive(Serialize)]
struct ReplaceItemsRequest<'a> {
    items: Vec<ItemPayload<'a>>,
}

#[derive(Serialize)]
struct ReorderRequest {
    from_index: usize,
    to_index: usize,
}

impl ApiClient {
    /// List every version (drafts and published) of a project.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails, the backend returns a
    /// non-success status, or the response cannot be parsed.
    pub async fn list_versions(&self, project_id: &str) -> Result<Vec<DesignVersion>, ApiError> {
        let path = format!(
            "projects/{}/design-versions/",
            urlencoding::encode(project_id)
        );
        tracing::debug!(project_id, "listing design versions");
        let resp = check_response(self.get(&path).send().await?).await?;
        let envelope: ListEnvelope<DesignVersion> = decode(resp).await?;
        Ok(envelope.into_items())
    }

    /// Create a new draft version, optionally cloning another version's items.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, status, or parse failure.
    pub async fn create_version(
        &self,
        project_id: &str,
        clone_from: Option<&str>,
    ) -> Result<DesignVersion, ApiError> {
        let path = format!(
            "projects/{}/design-versions/",
            urlencoding::encode(project_id)
        );
        tracing::debug!(project_id, ?clone_from, "creating design version");
        let resp = check_response(
            self.post(&path)
                .json(&CreateVersionRequest { clone_from })
                .send()
                .await?,
        )
        .await?;
        decode(resp).await
    }

    /// Replace all items of a version with `items`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, status, or parse failure.
    pub async fn replace_items(
        &self,
        version_id: &str,
        items: &[DesignItem],
    ) -> Result<DesignVersion, ApiError> {
        let path = format!("design-versions/{}/items/", urlencoding::encode(version_id));
        tracing::debug!(version_id, count = items.len(), "replacing design items");
        let body = ReplaceItemsRequest {
            items: items.iter().map(ItemPayload::from).collect(),
        };
        let resp = check_response(self.put(&path).json(&body).send().await?).await?;
        decode(resp).await
    }

    /// Move the item at `from_index` to `to_index` on the server.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, status, or parse failure.
    pub async fn reorder_items(
        &self,
        version_id: &str,
        from_index: usize,
        to_index: usize,
    ) -> Result<DesignVersion, ApiError> {
        let path = format!(
            "design-versions/{}/reorder/",
            urlencoding::encode(version_id)
        );
        tracing::debug!(version_id, from_index, to_index, "reordering design items");
        let resp = check_response(
            self.post(&path)
                .json(&ReorderRequest {
                    from_index,
                    to_index,
                })
                .send()
                .await?,
        )
        .await?;
        decode(resp).await
    }

    /// Publish a draft version.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::VersionLimit`] when the backend answers 409
    /// Conflict (version ceiling reached), or another [`ApiError`] on
    /// transport, status, or parse failure.
    pub async fn publish_version(&self, version_id: &str) -> Result<DesignVersion, ApiError> {
        let path = format!(
            "design-versions/{}/publish/",
            urlencoding::encode(version_id)
        );
        tracing::debug!(version_id, "publishing design version");
        let resp = self.post(&path).send().await?;
        let resp = check_response(resp).await.map_err(into_version_limit)?;
        decode(resp).await
    }

    /// Delete a draft version.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport or status failure.
    pub async fn delete_version(&self, version_id: &str) -> Result<(), ApiError> {
        let path = format!("design-versions/{}/", urlencoding::encode(version_id));
        tracing::debug!(version_id, "deleting design version");
        check_response(self.delete(&path).send().await?).await?;
        Ok(())
    }
}

/// A 409 from the publish endpoint means the version ceiling was hit.
fn into_version_limit(error: ApiError) -> ApiError {
    match error {
        ApiError::Api {
            status: 409,
            message,
        } => ApiError::VersionLimit { message },
        other => other,
    }
}
