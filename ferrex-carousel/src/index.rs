//! Index arithmetic for the row slider
//!
//! Pure functions over a [`RowPosition`]: where the next page starts, how far
//! the track travels for a transition, and which item indices have to be
//! materialized so both neighbouring pages (plus one peek item on each edge)
//! already exist before they slide into view.
//!
//! Paging is a circular buffer stepped one page at a time. The last page is
//! end-aligned (`total - items_per_page`), so a list that does not divide
//! evenly ends on a partial step, and the step after it wraps back to `0`.

use crate::types::Direction;

/// Snapshot of the fields the arithmetic reads from the carousel state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowPosition {
    pub lowest_visible_index: usize,
    pub items_per_page: usize,
    pub total_items: usize,
    pub has_moved_from_start: bool,
}

impl RowPosition {
    pub fn new(total_items: usize, items_per_page: usize) -> Self {
        Self {
            lowest_visible_index: 0,
            items_per_page,
            total_items,
            has_moved_from_start: false,
        }
    }

    pub fn last_valid_index(&self) -> usize {
        last_valid_index(self.total_items, self.items_per_page)
    }

    /// True when every item fits on one page.
    pub fn is_single_page(&self) -> bool {
        self.total_items <= self.items_per_page
    }
}

/// Start index of the last full page.
#[inline]
pub fn last_valid_index(total_items: usize, items_per_page: usize) -> usize {
    total_items.saturating_sub(items_per_page)
}

/// Start index of the window a transition in `direction` lands on.
///
/// `next` wraps to `0` from the last page and otherwise advances a page,
/// clamped to the last page. `prev` wraps to the last page from `0` and
/// otherwise retreats to the previous page boundary. Retreating from an
/// end-aligned last page that sits off the page grid lands on the grid
/// boundary below it. [`crate::state::Carousel`] overrides this with the
/// exact start index when it knows where the forward step came from.
pub fn next_index(position: &RowPosition, direction: Direction) -> usize {
    let ipp = position.items_per_page.max(1);
    let lowest = position.lowest_visible_index;
    let last = position.last_valid_index();

    match direction {
        Direction::Next => {
            if lowest == last {
                0
            } else {
                (lowest + ipp).min(last)
            }
        }
        Direction::Prev => {
            if lowest == 0 {
                last
            } else if lowest == last && lowest % ipp != 0 {
                lowest - lowest % ipp
            } else {
                lowest.saturating_sub(ipp)
            }
        }
    }
}

/// Travel percentage (of one page width) for a transition to `new_index`.
///
/// For `next` this is the distance travelled; wraps always travel a full
/// page. For `prev` it is the offset left over from the start of the
/// previous-page block, so `0` means the track travels a full page.
pub fn move_percentage(
    position: &RowPosition,
    direction: Direction,
    new_index: usize,
) -> f32 {
    let ipp = position.items_per_page.max(1);
    let lowest = position.lowest_visible_index;

    match direction {
        Direction::Next => {
            if new_index == 0 {
                100.0
            } else {
                new_index.saturating_sub(lowest) as f32 * 100.0 / ipp as f32
            }
        }
        Direction::Prev => {
            let distance = lowest.saturating_sub(new_index);
            if lowest != 0 && distance < ipp {
                (ipp - distance) as f32 * 100.0 / ipp as f32
            } else {
                0.0
            }
        }
    }
}

/// Item indices to materialize for the steady-state window, in render order:
/// previous page (once the row has moved), current page, next page.
///
/// A single-page row returns `0..items_per_page` without any wrap math; the
/// caller skips indices past the end of the item list.
pub fn window_indices(position: &RowPosition) -> Vec<usize> {
    let ipp = position.items_per_page;
    let total = position.total_items;

    if total <= ipp {
        return (0..ipp).collect();
    }

    let lowest = position.lowest_visible_index;
    let blocks = if position.has_moved_from_start { 3 } else { 2 };
    let mut indices = Vec::with_capacity(ipp * blocks);

    if position.has_moved_from_start {
        indices.extend((0..ipp).map(|i| (lowest + i + total - ipp) % total));
    }
    indices.extend((0..ipp).map(|i| (lowest + i) % total));
    indices.extend((0..ipp).map(|i| (lowest + i + ipp) % total));

    indices
}

/// Adds one peek index on each edge so edge items exist before they slide in.
///
/// A single-page row already shows every item and is returned as is.
pub fn add_peek_indices(
    indices: Vec<usize>,
    position: &RowPosition,
) -> Vec<usize> {
    let total_items = position.total_items;
    if total_items == 0 || position.is_single_page() {
        return indices;
    }
    let (Some(&first), Some(&last)) = (indices.first(), indices.last()) else {
        return indices;
    };

    let leading = (first + total_items - 1) % total_items;
    let trailing = (last + 1) % total_items;

    let mut peeked = Vec::with_capacity(indices.len() + 2);
    peeked.push(leading);
    peeked.extend(indices);
    peeked.push(trailing);
    peeked
}
