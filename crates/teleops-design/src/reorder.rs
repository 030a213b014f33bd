//! Sequence reordering primitives shared by leaf and header moves.

use teleops_core::entities::DesignItem;

use crate::error::DesignError;

/// Rewrite `sort_order` as the dense, zero-based sequence index.
pub fn renumber(items: &mut [DesignItem]) {
    for (index, item) in items.iter_mut().enumerate() {
        item.sort_order = u32::try_from(index).unwrap_or(u32::MAX);
    }
}

/// Sort rows into presentation order: `sort_order`, then name.
pub fn sort_for_display(items: &mut [DesignItem]) {
    items.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then_with(|| a.name.cmp(&b.name)));
}

/// Move the row at `from` so it ends up at index `to`, then renumber.
///
/// # Errors
///
/// Returns [`DesignError::IndexOutOfRange`] if either index is outside the
/// sequence.
pub fn move_item(items: &mut Vec<DesignItem>, from: usize, to: usize) -> Result<(), DesignError> {
    check_index(items, from)?;
    check_index(items, to)?;
    if from != to {
        let item = items.remove(from);
        items.insert(to, item);
    }
    renumber(items);
    Ok(())
}

/// Map a drag gesture (dragged row id dropped onto target row id) to
/// sequence indices.
///
/// # Errors
///
/// Returns [`DesignError::ItemNotFound`] if either id is not in the sequence.
pub fn indices_for_drag(
    items: &[DesignItem],
    dragged_id: &str,
    dropped_id: &str,
) -> Result<(usize, usize), DesignError> {
    let from = index_of(items, dragged_id)
        .ok_or_else(|| DesignError::ItemNotFound(dragged_id.to_string()))?;
    let to = index_of(items, dropped_id)
        .ok_or_else(|| DesignError::ItemNotFound(dropped_id.to_string()))?;
    Ok((from, to))
}

#[must_use]
pub fn index_of(items: &[DesignItem], id: &str) -> Option<usize> {
    items.iter().position(|item| item.id == id)
}

pub(crate) fn check_index(items: &[DesignItem], index: usize) -> Result<(), DesignError> {
    if index < items.len() {
        Ok(())
    } else {
        Err(DesignError::IndexOutOfRange {
            index,
            len: items.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rows(names: &[&str]) -> Vec<DesignItem> {
        let mut items: Vec<DesignItem> = names
            .iter()
            .map(|n| DesignItem::leaf(format!("id-{n}"), *n, None, 0))
            .collect();
        renumber(&mut items);
        items
    }

    fn order(items: &[DesignItem]) -> Vec<(&str, u32)> {
        items.iter().map(|i| (i.name.as_str(), i.sort_order)).collect()
    }

    #[test]
    fn move_down_to_arbitrary_position() {
        let mut items = rows(&["a", "b", "c", "d"]);
        move_item(&mut items, 0, 2).unwrap();
        assert_eq!(order(&items), vec![("b", 0), ("c", 1), ("a", 2), ("d", 3)]);
    }

    #[test]
    fn move_up_adjacent() {
        let mut items = rows(&["a", "b", "c"]);
        move_item(&mut items, 2, 1).unwrap();
        assert_eq!(order(&items), vec![("a", 0), ("c", 1), ("b", 2)]);
    }

    #[test]
    fn out_of_range_is_rejected_without_change() {
        let mut items = rows(&["a", "b"]);
        let err = move_item(&mut items, 0, 5).unwrap_err();
        assert!(matches!(err, DesignError::IndexOutOfRange { index: 5, len: 2 }));
        assert_eq!(order(&items), vec![("a", 0), ("b", 1)]);
    }

    #[test]
    fn drag_ids_map_to_indices() {
        let items = rows(&["a", "b", "c"]);
        assert_eq!(indices_for_drag(&items, "id-c", "id-a").unwrap(), (2, 0));
        assert!(matches!(
            indices_for_drag(&items, "id-x", "id-a"),
            Err(DesignError::ItemNotFound(id)) if id == "id-x"
        ));
    }

    #[test]
    fn display_sort_breaks_ties_by_name() {
        let mut items = vec![
            DesignItem::leaf("1", "b", None, 1),
            DesignItem::leaf("2", "a", None, 1),
            DesignItem::leaf("3", "c", None, 0),
        ];
        sort_for_display(&mut items);
        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }
}
