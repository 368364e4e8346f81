//! Pagination indicators
//!
//! The page index is bookkeeping of its own. It is advanced and retreated
//! circularly when a transition commits and clamped when the page size
//! changes; it is never recomputed from the window position.

use serde::Serialize;

/// Number of pages for a row (`ceil(total / items_per_page)`).
pub fn page_count(total_items: usize, items_per_page: usize) -> usize {
    total_items.div_ceil(items_per_page.max(1))
}

/// Highest valid page index, `0` for empty rows.
pub fn max_page_index(total_items: usize, items_per_page: usize) -> usize {
    page_count(total_items, items_per_page).saturating_sub(1)
}

/// Next page index, wrapping from the last page to `0`.
pub fn advance(
    current: usize,
    total_items: usize,
    items_per_page: usize,
) -> usize {
    if current >= max_page_index(total_items, items_per_page) {
        0
    } else {
        current + 1
    }
}

/// Previous page index, wrapping from `0` to the last page.
pub fn retreat(
    current: usize,
    total_items: usize,
    items_per_page: usize,
) -> usize {
    let max = max_page_index(total_items, items_per_page);
    if current == 0 {
        max
    } else {
        (current - 1).min(max)
    }
}

/// Clamps a page index into the range valid for the given page size.
pub fn clamp(
    current: usize,
    total_items: usize,
    items_per_page: usize,
) -> usize {
    current.min(max_page_index(total_items, items_per_page))
}

/// One positional page marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationIndicator {
    pub position: usize,
    pub active: bool,
}

/// Indicator list for a row; `active` is `current == position`.
pub fn indicators(
    total_items: usize,
    items_per_page: usize,
    current: usize,
) -> Vec<PaginationIndicator> {
    (0..page_count(total_items, items_per_page))
        .map(|position| PaginationIndicator {
            position,
            active: position == current,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(page_count(17, 5), 4);
        assert_eq!(page_count(15, 5), 3);
        assert_eq!(page_count(3, 5), 1);
        assert_eq!(page_count(0, 5), 0);
    }

    #[test]
    fn advance_and_retreat_wrap() {
        assert_eq!(advance(2, 17, 5), 3);
        assert_eq!(advance(3, 17, 5), 0);
        assert_eq!(retreat(0, 17, 5), 3);
        assert_eq!(retreat(3, 17, 5), 2);
    }

    #[test]
    fn clamp_after_page_size_grows() {
        // 4 pages at 5 per page, 2 pages at 10 per page.
        assert_eq!(clamp(3, 17, 10), 1);
        assert_eq!(clamp(1, 17, 10), 1);
        assert_eq!(clamp(4, 0, 10), 0);
    }

    #[test]
    fn indicators_mark_only_current_page() {
        let marks = indicators(17, 5, 2);
        assert_eq!(marks.len(), 4);
        let active: Vec<usize> = marks
            .iter()
            .filter(|m| m.active)
            .map(|m| m.position)
            .collect();
        assert_eq!(active, vec![2]);
    }

    #[test]
    fn single_page_has_one_indicator() {
        let marks = indicators(3, 5, 0);
        assert_eq!(
            marks,
            vec![PaginationIndicator {
                position: 0,
                active: true
            }]
        );
    }
}
