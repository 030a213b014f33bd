//! Keyword-overlap scoring of permission text against resource types.

use serde::Serialize;
use teleops_core::entities::PermissionText;

use crate::table::KeywordTable;

/// One candidate resource type for a permission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub resource_type: String,
    /// Matched keywords over total keywords for the type, in `(0, 1]`.
    pub confidence: f64,
    pub matched: Vec<String>,
}

/// Score every resource type in `table` against the permission text.
///
/// Returns types with at least one keyword occurring as a substring of the
/// lowercased `name code category` text, highest confidence first. Ties keep
/// table order. Blank text yields no candidates.
#[must_use]
pub fn classify(table: &KeywordTable, text: &PermissionText) -> Vec<Suggestion> {
    let haystack = text.haystack();
    if haystack.trim().is_empty() {
        return Vec::new();
    }

    let mut suggestions: Vec<Suggestion> = table
        .mappings()
        .iter()
        .filter_map(|mapping| {
            let matched: Vec<String> = mapping
                .keywords
                .iter()
                .filter(|k| haystack.contains(k.as_str()))
                .cloned()
                .collect();
            if matched.is_empty() {
                return None;
            }
            #[allow(clippy::cast_precision_loss)]
            let confidence = matched.len() as f64 / mapping.keywords.len() as f64;
            Some(Suggestion {
                resource_type: mapping.value.clone(),
                confidence,
                matched,
            })
        })
        .collect();

    // Stable: equal confidences keep table order.
    suggestions.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    tracing::debug!(candidates = suggestions.len(), "classified permission text");
    suggestions
}
