//! Category grouping for display.
//!
//! Headers are ordered by their stored `sort_order`. Categories referenced by
//! leaves without a header get a synthesized group placed after every explicit
//! header; its position comes from a stable hash of the category name so it
//! does not move between renders. Synthesized groups are never persisted.

use serde::Serialize;
use sha2::{Digest, Sha256};
use teleops_core::entities::DesignItem;

/// Spread of synthesized group keys above the last explicit header.
const SYNTHESIZED_SPAN: u64 = 1_000_000;

/// One displayed category with its leaf rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryGroup {
    pub name: String,
    /// Id of the header row; `None` for a synthesized group.
    pub header_id: Option<String>,
    pub sort_key: u64,
    pub items: Vec<DesignItem>,
}

impl CategoryGroup {
    #[must_use]
    pub const fn is_synthesized(&self) -> bool {
        self.header_id.is_none()
    }
}

/// Case-insensitive name comparison used for categories and duplicates.
#[must_use]
pub fn same_name(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// Group `items` by category for display.
#[must_use]
pub fn group_by_category(items: &[DesignItem]) -> Vec<CategoryGroup> {
    let mut headers: Vec<&DesignItem> = items.iter().filter(|i| i.is_category).collect();
    headers.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then_with(|| a.name.cmp(&b.name)));

    let mut groups: Vec<CategoryGroup> = Vec::new();
    for header in headers {
        if groups.iter().any(|g| same_name(&g.name, header.group_name())) {
            continue;
        }
        groups.push(CategoryGroup {
            name: header.group_name().to_string(),
            header_id: Some(header.id.clone()),
            sort_key: u64::from(header.sort_order),
            items: Vec::new(),
        });
    }

    let base = groups.iter().map(|g| g.sort_key + 1).max().unwrap_or(0);

    let mut leaves: Vec<&DesignItem> = items.iter().filter(|i| !i.is_category).collect();
    leaves.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then_with(|| a.name.cmp(&b.name)));

    for leaf in leaves {
        let category = leaf.group_name();
        if let Some(group) = groups.iter_mut().find(|g| same_name(&g.name, category)) {
            group.items.push(leaf.clone());
        } else {
            groups.push(CategoryGroup {
                name: category.to_string(),
                header_id: None,
                sort_key: base + category_hash(category) % SYNTHESIZED_SPAN,
                items: vec![leaf.clone()],
            });
        }
    }

    groups.sort_by(|a, b| a.sort_key.cmp(&b.sort_key).then_with(|| a.name.cmp(&b.name)));
    groups
}

/// Stable 64-bit hash of a category name, case-insensitive.
fn category_hash(name: &str) -> u64 {
    let digest = Sha256::digest(name.trim().to_lowercase().as_bytes());
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(prefix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use teleops_core::entities::UNCATEGORIZED;

    fn names(groups: &[CategoryGroup]) -> Vec<&str> {
        groups.iter().map(|g| g.name.as_str()).collect()
    }

    #[test]
    fn headers_follow_sort_order() {
        let items = vec![
            DesignItem::header("h2", "Power", 3),
            DesignItem::header("h1", "Antenna", 0),
            DesignItem::leaf("l1", "RRU-1", Some("antenna".into()), 1),
            DesignItem::leaf("l2", "PSU", Some("Power".into()), 4),
        ];
        let groups = group_by_category(&items);
        assert_eq!(names(&groups), vec!["Antenna", "Power"]);
        assert_eq!(groups[0].items[0].name, "RRU-1");
        assert!(!groups[0].is_synthesized());
    }

    #[test]
    fn missing_headers_are_synthesized_after_explicit_ones() {
        let items = vec![
            DesignItem::leaf("l1", "Cable", Some("Transmission".into()), 0),
            DesignItem::header("h1", "Antenna", 5),
            DesignItem::leaf("l2", "Loose bolt", None, 2),
        ];
        let groups = group_by_category(&items);
        assert_eq!(groups[0].name, "Antenna");
        assert!(groups[1..].iter().all(CategoryGroup::is_synthesized));
        assert!(groups[1..].iter().all(|g| g.sort_key > 5));
        assert!(groups.iter().any(|g| g.name == UNCATEGORIZED));
    }

    #[test]
    fn synthesized_positions_are_stable() {
        let items = vec![
            DesignItem::leaf("l1", "Cable", Some("Transmission".into()), 0),
            DesignItem::leaf("l2", "Battery", Some("Power".into()), 1),
        ];
        let mut shuffled = items.clone();
        shuffled.reverse();
        assert_eq!(
            names(&group_by_category(&items)),
            names(&group_by_category(&shuffled))
        );
        assert_eq!(group_by_category(&items), group_by_category(&items));
    }

    #[test]
    fn leaves_sort_by_order_then_name() {
        let items = vec![
            DesignItem::header("h1", "Antenna", 0),
            DesignItem::leaf("l1", "b", Some("Antenna".into()), 2),
            DesignItem::leaf("l2", "a", Some("Antenna".into()), 2),
            DesignItem::leaf("l3", "z", Some("Antenna".into()), 1),
        ];
        let groups = group_by_category(&items);
        let leaf_names: Vec<&str> = groups[0].items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(leaf_names, vec!["z", "a", "b"]);
    }

    #[test]
    fn duplicate_headers_collapse() {
        let items = vec![
            DesignItem::header("h1", "Antenna", 0),
            DesignItem::header("h2", "ANTENNA", 1),
        ];
        let groups = group_by_category(&items);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].header_id.as_deref(), Some("h1"));
    }

    #[test]
    fn same_name_ignores_case_and_padding() {
        assert!(same_name(" Antenna", "antenna "));
        assert!(!same_name("Antenna", "Antennas"));
    }
}
