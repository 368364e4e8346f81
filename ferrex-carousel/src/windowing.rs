//! Content windowing: turns a row position into renderable slots
//!
//! Two modes exist. Until the first transition the row renders a simplified
//! window straight from the front of the list (no previous-page block, since
//! the prev control is not offered yet). After that it renders the steady
//! state: previous, current and next page plus one peek on each edge.

use crate::index::{RowPosition, add_peek_indices, window_indices};
use crate::types::{ContentSlot, ContentWindow};

/// Window used while the row has not moved yet.
///
/// - At least `2 * ipp + 1` items: the first `2 * ipp + 1` items in order.
/// - Between one and two pages: every item, plus item `0` again as a peek.
/// - One page or less: every item, no peek.
pub fn build_initial_window<T: Clone>(
    items: &[T],
    items_per_page: usize,
    item_width: f32,
) -> ContentWindow<T> {
    let total = items.len();
    let full = items_per_page * 2 + 1;

    let mut indices: Vec<usize> = if total >= full {
        (0..full).collect()
    } else {
        (0..total).collect()
    };
    if total > items_per_page && total < full {
        indices.push(0);
    }

    slots_for(items, &indices, item_width)
}

/// Window used once the row has moved: previous, current and next page with
/// a peek on each edge.
pub fn build_steady_state_window<T: Clone>(
    items: &[T],
    position: &RowPosition,
    item_width: f32,
) -> ContentWindow<T> {
    let indices = add_peek_indices(window_indices(position), position);
    slots_for(items, &indices, item_width)
}

/// Picks the window for the current state: empty for an empty row, the
/// initial window before the first move, the steady-state window after.
pub fn determine_visible_content<T: Clone>(
    items: &[T],
    position: &RowPosition,
    item_width: f32,
) -> ContentWindow<T> {
    if items.is_empty() {
        return ContentWindow::empty();
    }
    if !position.has_moved_from_start {
        return build_initial_window(items, position.items_per_page, item_width);
    }
    build_steady_state_window(items, position, item_width)
}

fn slots_for<T: Clone>(
    items: &[T],
    indices: &[usize],
    item_width: f32,
) -> ContentWindow<T> {
    let slots = indices
        .iter()
        .filter_map(|&index| {
            items.get(index).map(|item| ContentSlot {
                index,
                item: item.clone(),
                width_percent: item_width,
            })
        })
        .collect();
    ContentWindow::new(slots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::item_width_percent;

    fn items(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("title-{i}")).collect()
    }

    #[test]
    fn initial_window_takes_two_pages_and_a_peek() {
        let window = build_initial_window(&items(17), 5, 20.0);
        assert_eq!(window.indices(), (0..11).collect::<Vec<_>>());
        assert!(window.iter().all(|slot| slot.width_percent == 20.0));
    }

    #[test]
    fn initial_window_narrow_dataset_repeats_first_item() {
        let window = build_initial_window(&items(7), 5, 20.0);
        assert_eq!(window.indices(), vec![0, 1, 2, 3, 4, 5, 6, 0]);
        assert_eq!(window.slots()[7].item, "title-0");
    }

    #[test]
    fn initial_window_single_page_has_no_peek() {
        let window = build_initial_window(&items(3), 5, 20.0);
        assert_eq!(window.indices(), vec![0, 1, 2]);
    }

    #[test]
    fn empty_row_yields_empty_window() {
        let position = RowPosition::new(0, 5);
        let window = determine_visible_content::<String>(&[], &position, 20.0);
        assert!(window.is_empty());
    }

    #[test]
    fn steady_state_window_carries_three_pages_and_peeks() {
        let list = items(17);
        let position = RowPosition {
            lowest_visible_index: 5,
            items_per_page: 5,
            total_items: 17,
            has_moved_from_start: true,
        };
        let window = determine_visible_content(
            &list,
            &position,
            item_width_percent(5),
        );
        assert_eq!(window.len(), 17);
        assert_eq!(window.slots()[0].index, 16);
        assert_eq!(window.slots()[1].index, 0);
        assert_eq!(window.slots()[6].index, 5);
        assert_eq!(window.slots()[16].index, 15);
        assert_eq!(window.slots()[6].item, "title-5");
    }

    #[test]
    fn steady_state_single_page_skips_missing_indices() {
        let list = items(3);
        let position = RowPosition {
            lowest_visible_index: 0,
            items_per_page: 5,
            total_items: 3,
            has_moved_from_start: true,
        };
        let window = build_steady_state_window(&list, &position, 20.0);
        assert_eq!(window.indices(), vec![0, 1, 2]);
    }
}
