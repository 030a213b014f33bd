//! Equipment/category catalog endpoints.

use teleops_core::entities::EquipmentEntry;
use teleops_core::envelope::ListEnvelope;

use crate::{
    ApiClient,
    error::ApiError,
    http::{check_response, decode},
    with_search,
};

impl ApiClient {
    /// Search the equipment catalog by free text.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, status, or parse failure.
    pub async fn search_equipment(&self, query: &str) -> Result<Vec<EquipmentEntry>, ApiError> {
        let path = with_search("equipment/", query);
        let resp = check_response(self.get(&path).send().await?).await?;
        let envelope: ListEnvelope<EquipmentEntry> = decode(resp).await?;
        Ok(envelope.into_items())
    }

    /// Distinct catalog categories, in first-seen order.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, status, or parse failure.
    pub async fn equipment_categories(&self) -> Result<Vec<String>, ApiError> {
        let entries = self.search_equipment("").await?;
        Ok(distinct_categories(&entries))
    }
}

fn distinct_categories(entries: &[EquipmentEntry]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for category in entries.iter().filter_map(|e| e.category.as_deref()) {
        let category = category.trim();
        if !category.is_empty()
            && !categories.iter().any(|c| c.eq_ignore_ascii_case(category))
        {
            categories.push(category.to_string());
        }
    }
    categories
}
