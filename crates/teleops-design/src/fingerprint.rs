//! Order-normalized digest of a design item sequence.
//!
//! Rows are sorted by `(sort_order, name)` (remaining fields break any
//! further tie), and each row's `(name, category, model, manufacturer,
//! attributes, remarks, sort_order, is_category)` tuple is fed to SHA-256
//! with length-prefixed fields. Ids are not part of the digest, so a local
//! copy and its persisted counterpart compare equal.

use serde::Serialize;
use sha2::{Digest, Sha256};
use teleops_core::entities::DesignItem;

/// Hex digest of an item sequence. The empty sequence has the empty
/// fingerprint, which also stands for "no server draft".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    #[must_use]
    pub const fn empty() -> Self {
        Self(String::new())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(PartialEq, Eq, PartialOrd, Ord)]
struct Row<'a> {
    sort_order: u32,
    name: &'a str,
    category: Option<&'a str>,
    model: Option<&'a str>,
    manufacturer: Option<&'a str>,
    attributes: Option<&'a str>,
    remarks: Option<&'a str>,
    is_category: bool,
}

impl<'a> From<&'a DesignItem> for Row<'a> {
    fn from(item: &'a DesignItem) -> Self {
        Self {
            sort_order: item.sort_order,
            name: &item.name,
            category: item.category.as_deref(),
            model: item.model.as_deref(),
            manufacturer: item.manufacturer.as_deref(),
            attributes: item.attributes.as_deref(),
            remarks: item.remarks.as_deref(),
            is_category: item.is_category,
        }
    }
}

/// Fingerprint `items`.
#[must_use]
pub fn fingerprint(items: &[DesignItem]) -> Fingerprint {
    if items.is_empty() {
        return Fingerprint::empty();
    }

    let mut rows: Vec<Row<'_>> = items.iter().map(Row::from).collect();
    rows.sort();

    let mut hasher = Sha256::new();
    for row in &rows {
        put_str(&mut hasher, row.name);
        put_opt(&mut hasher, row.category);
        put_opt(&mut hasher, row.model);
        put_opt(&mut hasher, row.manufacturer);
        put_opt(&mut hasher, row.attributes);
        put_opt(&mut hasher, row.remarks);
        hasher.update(row.sort_order.to_be_bytes());
        hasher.update([u8::from(row.is_category)]);
    }
    Fingerprint(hex::encode(hasher.finalize()))
}

fn put_str(hasher: &mut Sha256, value: &str) {
    hasher.update((value.len() as u64).to_be_bytes());
    hasher.update(value.as_bytes());
}

fn put_opt(hasher: &mut Sha256, value: Option<&str>) {
    match value {
        Some(value) => {
            hasher.update([1]);
            put_str(hasher, value);
        }
        None => hasher.update([0]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::{assert_eq, assert_ne};
    use rstest::rstest;

    fn antenna_items() -> Vec<DesignItem> {
        let mut rru = DesignItem::leaf("i2", "RRU-1", Some("Antenna".into()), 1);
        rru.model = Some("AAU5613".into());
        vec![DesignItem::header("i1", "Antenna", 0), rru]
    }

    #[test]
    fn empty_sequence_has_empty_fingerprint() {
        assert!(fingerprint(&[]).is_empty());
        assert!(!fingerprint(&antenna_items()).is_empty());
    }

    #[test]
    fn array_order_does_not_matter() {
        let items = antenna_items();
        let mut reversed = items.clone();
        reversed.reverse();
        assert_eq!(fingerprint(&items), fingerprint(&reversed));
    }

    #[test]
    fn ids_do_not_matter() {
        let items = antenna_items();
        let mut renamed = items.clone();
        renamed[0].id = "srv-9".into();
        renamed[1].id = "srv-10".into();
        assert_eq!(fingerprint(&items), fingerprint(&renamed));
    }

    #[test]
    fn idempotent() {
        let items = antenna_items();
        assert_eq!(fingerprint(&items), fingerprint(&items));
    }

    #[rstest]
    #[case::name(|i: &mut DesignItem| i.name = "RRU-2".into())]
    #[case::category(|i: &mut DesignItem| i.category = Some("Power".into()))]
    #[case::model(|i: &mut DesignItem| i.model = None)]
    #[case::manufacturer(|i: &mut DesignItem| i.manufacturer = Some("ZTE".into()))]
    #[case::attributes(|i: &mut DesignItem| i.attributes = Some("2T2R".into()))]
    #[case::remarks(|i: &mut DesignItem| i.remarks = Some("roof".into()))]
    #[case::sort_order(|i: &mut DesignItem| i.sort_order = 7)]
    #[case::is_category(|i: &mut DesignItem| i.is_category = true)]
    fn every_field_is_significant(#[case] change: fn(&mut DesignItem)) {
        let items = antenna_items();
        let mut changed = items.clone();
        change(&mut changed[1]);
        assert_ne!(fingerprint(&items), fingerprint(&changed));
    }

    #[test]
    fn field_boundaries_are_unambiguous() {
        let mut a = DesignItem::leaf("a", "ab", Some("c".into()), 0);
        let mut b = DesignItem::leaf("b", "a", Some("bc".into()), 0);
        a.model = None;
        b.model = None;
        assert_ne!(fingerprint(&[a]), fingerprint(&[b]));
    }
}
