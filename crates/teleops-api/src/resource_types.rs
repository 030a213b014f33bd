//! Resource-type registry endpoints.

use teleops_core::entities::ResourceType;
use teleops_core::envelope::ListEnvelope;

use crate::{
    ApiClient,
    error::ApiError,
    http::{check_response, decode},
    with_search,
};

/// Built-in resource types, used only when the registry cannot be reached.
const FALLBACK: &[(&str, &str, &str, &str)] = &[
    ("menu", "Menu", "menu", "Navigation menu entries"),
    ("page", "Page", "file", "Application pages and views"),
    ("api", "API", "api", "Backend API endpoints"),
    ("project", "Project", "project", "Projects and project designs"),
    ("site", "Site", "environment", "Cell sites and site surveys"),
    ("device", "Device", "cluster", "Network devices and equipment"),
    ("alarm", "Alarm", "alert", "Alarm monitoring and handling"),
    ("report", "Report", "chart", "Reports and dashboards"),
    ("user", "User", "user", "User and role administration"),
    ("tenant", "Tenant", "team", "Tenant settings"),
    ("data", "Data", "database", "Data import and export"),
    ("other", "Other", "appstore", "Everything else"),
];

/// The built-in fallback list.
#[must_use]
pub fn fallback_resource_types() -> Vec<ResourceType> {
    FALLBACK
        .iter()
        .map(|(value, label, icon, description)| ResourceType {
            value: (*value).to_string(),
            label: (*label).to_string(),
            icon: (*icon).to_string(),
            description: (*description).to_string(),
        })
        .collect()
}

impl ApiClient {
    /// List (or search) the resource-type registry.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, status, or parse failure.
    pub async fn list_resource_types(&self, query: &str) -> Result<Vec<ResourceType>, ApiError> {
        let path = with_search("resource-types/", query);
        let resp = check_response(self.get(&path).send().await?).await?;
        let envelope: ListEnvelope<ResourceType> = decode(resp).await?;
        Ok(envelope.into_items())
    }

    /// Like [`Self::list_resource_types`], but falls back to the built-in list
    /// (filtered by `query`) when the registry is unavailable.
    pub async fn resource_types_or_fallback(&self, query: &str) -> Vec<ResourceType> {
        match self.list_resource_types(query).await {
            Ok(types) => types,
            Err(e) => {
                tracing::warn!(%e, "resource type registry unavailable, using built-in list");
                filter_fallback(query)
            }
        }
    }
}

/// Built-in types whose value or label contains `query`; all of them for a
/// blank query.
#[must_use]
pub fn filter_fallback(query: &str) -> Vec<ResourceType> {
    let needle = query.trim().to_lowercase();
    fallback_resource_types()
        .into_iter()
        .filter(|t| {
            needle.is_empty()
                || t.value.contains(&needle)
                || t.label.to_lowercase().contains(&needle)
        })
        .collect()
}
