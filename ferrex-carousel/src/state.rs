//! Carousel state machine
//!
//! [`Carousel`] owns the mutable row state and drives the two-phase
//! transition cycle: `move_next`/`move_prev` begin a transition and hand back
//! a [`Transition`] ticket, `commit` applies it once the animation budget has
//! elapsed (or the renderer reports the animation finished). The machine has
//! no clock of its own; see [`crate::driver`] for the timer-driven wrapper.
//!
//! ```text
//! idle ──move_next/move_prev──▶ moving(direction) ──commit──▶ idle
//! ```
//!
//! While a transition is in flight the rendered window is served from the
//! cache captured when it began, so the slot count and identity never change
//! under a running track animation.

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::error::{CarouselError, Result};
use crate::index::{RowPosition, last_valid_index, move_percentage, next_index};
use crate::pagination::{self, PaginationIndicator};
use crate::types::{ContentWindow, Direction, item_width_percent};
use crate::windowing::determine_visible_content;

/// Mutable row state. Read it through [`Carousel::state`]; only the machine
/// writes to it.
#[derive(Debug, Clone)]
pub struct CarouselState<T> {
    pub items: Vec<T>,
    pub items_per_page: usize,
    /// First visible item, an index into `items` (never wrapped).
    pub lowest_visible_index: usize,
    pub direction: Direction,
    /// Track travel for the current transition, in percent of a page.
    pub move_percentage: f32,
    pub is_moving: bool,
    /// False until the first transition begins.
    pub has_moved_from_start: bool,
    /// True until the first `next` transition commits.
    pub is_initial_next: bool,
    pub current_pagination_index: usize,
    /// Set once the row has moved forward; stays set.
    pub show_prev: bool,
}

impl<T> CarouselState<T> {
    fn new(items: Vec<T>, items_per_page: usize) -> Self {
        Self {
            items,
            items_per_page,
            lowest_visible_index: 0,
            direction: Direction::Next,
            move_percentage: 0.0,
            is_moving: false,
            has_moved_from_start: false,
            is_initial_next: true,
            current_pagination_index: 0,
            show_prev: false,
        }
    }

    pub fn total_items(&self) -> usize {
        self.items.len()
    }

    pub fn position(&self) -> RowPosition {
        RowPosition {
            lowest_visible_index: self.lowest_visible_index,
            items_per_page: self.items_per_page,
            total_items: self.items.len(),
            has_moved_from_start: self.has_moved_from_start,
        }
    }
}

/// Ticket for one in-flight transition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Transition {
    pub id: u64,
    pub direction: Direction,
    pub from_index: usize,
    pub to_index: usize,
    pub move_percentage: f32,
    /// First-ever `next` transition, rendered from the initial window.
    pub initial: bool,
}

/// Read-only projection consumed by the rendering layer.
#[derive(Debug, Clone)]
pub struct DerivedView<T> {
    pub total_items: usize,
    pub items_per_page: usize,
    pub show_controls: bool,
    pub show_prev: bool,
    /// Slot width in percent of the visible track.
    pub item_width: f32,
    pub pagination_indicators: Vec<PaginationIndicator>,
    pub window: ContentWindow<T>,
    pub is_moving: bool,
    pub direction: Direction,
    pub move_percentage: f32,
    pub has_moved_from_start: bool,
    pub is_initial_next: bool,
}

#[derive(Debug)]
struct CachedWindow<T> {
    window: ContentWindow<T>,
    revision: u64,
}

/// The row slider state machine.
#[derive(Debug)]
pub struct Carousel<T> {
    state: CarouselState<T>,
    cache: Option<CachedWindow<T>>,
    pending: Option<Transition>,
    next_transition_id: u64,
    /// Start index a `next` came from when it landed on the last page, so
    /// the following `prev` can return there even off the page grid.
    last_page_origin: Option<usize>,
    /// Bumped on every state write; lets an idle window be reused until
    /// something it depends on changes.
    revision: u64,
}

impl<T: Clone> Carousel<T> {
    pub fn new(items: Vec<T>, items_per_page: usize) -> Result<Self> {
        if items_per_page == 0 {
            return Err(CarouselError::InvalidPageSize(items_per_page));
        }
        Ok(Self {
            state: CarouselState::new(items, items_per_page),
            cache: None,
            pending: None,
            next_transition_id: 1,
            last_page_origin: None,
            revision: 0,
        })
    }

    pub fn state(&self) -> &CarouselState<T> {
        &self.state
    }

    pub fn position(&self) -> RowPosition {
        self.state.position()
    }

    /// The transition currently in flight, if any.
    pub fn pending(&self) -> Option<&Transition> {
        self.pending.as_ref()
    }

    pub fn is_moving(&self) -> bool {
        self.state.is_moving
    }

    /// Begin a transition to the next page.
    pub fn move_next(&mut self) -> Result<Transition> {
        self.begin(Direction::Next)
    }

    /// Begin a transition to the previous page. Only available once the row
    /// has moved forward.
    pub fn move_prev(&mut self) -> Result<Transition> {
        self.begin(Direction::Prev)
    }

    fn begin(&mut self, direction: Direction) -> Result<Transition> {
        if let Some(pending) = &self.pending {
            warn!(
                transition = pending.id,
                %direction,
                "carousel busy, ignoring navigation"
            );
            return Err(CarouselError::Busy {
                transition: pending.id,
            });
        }

        let position = self.state.position();
        if position.total_items == 0 || position.is_single_page() {
            return Err(CarouselError::NothingToScroll {
                total_items: position.total_items,
                items_per_page: position.items_per_page,
            });
        }
        if direction == Direction::Prev && !self.state.show_prev {
            return Err(CarouselError::PrevUnavailable);
        }

        let to_index = match (direction, self.last_page_origin) {
            (Direction::Prev, Some(origin))
                if position.lowest_visible_index
                    == position.last_valid_index()
                    && origin < position.lowest_visible_index =>
            {
                origin
            }
            _ => next_index(&position, direction),
        };
        let percentage = move_percentage(&position, direction, to_index);

        // Capture what is on screen right now; it is served for the whole
        // transition.
        self.refresh_cache();

        let transition = Transition {
            id: self.next_transition_id,
            direction,
            from_index: position.lowest_visible_index,
            to_index,
            move_percentage: percentage,
            initial: direction == Direction::Next && self.state.is_initial_next,
        };
        self.next_transition_id += 1;

        self.state.direction = direction;
        self.state.is_moving = true;
        self.state.has_moved_from_start = true;
        self.state.move_percentage = percentage;
        self.pending = Some(transition);
        self.touch();

        debug!(
            transition = transition.id,
            %direction,
            from = transition.from_index,
            to = transition.to_index,
            move_percentage = percentage,
            "carousel transition started"
        );
        Ok(transition)
    }

    /// Apply a finished transition: commit the new start index, leave the
    /// moving phase and move the page indicator.
    pub fn commit(&mut self, transition: &Transition) -> Result<()> {
        let pending = self.pending.ok_or(CarouselError::NoTransition)?;
        if pending.id != transition.id {
            return Err(CarouselError::StaleTransition {
                expected: pending.id,
                got: transition.id,
            });
        }
        self.pending = None;

        let total = self.state.items.len();
        let ipp = self.state.items_per_page;
        // The page size or item list may have changed mid-flight.
        let last = last_valid_index(total, ipp);
        self.state.lowest_visible_index = pending.to_index.min(last);
        self.state.is_moving = false;
        self.last_page_origin = (pending.direction == Direction::Next
            && pending.to_index == last
            && pending.from_index < last)
            .then_some(pending.from_index);

        match pending.direction {
            Direction::Next => {
                self.state.is_initial_next = false;
                if !self.state.show_prev {
                    self.state.show_prev = true;
                }
                self.state.current_pagination_index = pagination::advance(
                    self.state.current_pagination_index,
                    total,
                    ipp,
                );
            }
            Direction::Prev => {
                self.state.current_pagination_index = pagination::retreat(
                    self.state.current_pagination_index,
                    total,
                    ipp,
                );
            }
        }
        self.touch();

        debug!(
            transition = pending.id,
            lowest_visible_index = self.state.lowest_visible_index,
            page = self.state.current_pagination_index,
            "carousel transition committed"
        );
        Ok(())
    }

    /// Apply a new items-per-page count from the responsive provider.
    pub fn update_items_to_display(&mut self, count: usize) -> Result<()> {
        if count == 0 {
            warn!("rejecting zero items per page");
            return Err(CarouselError::InvalidPageSize(count));
        }
        if count == self.state.items_per_page {
            return Ok(());
        }

        let total = self.state.items.len();
        self.state.items_per_page = count;
        self.last_page_origin = None;
        self.state.current_pagination_index = pagination::clamp(
            self.state.current_pagination_index,
            total,
            count,
        );
        if !self.state.is_moving {
            self.clamp_lowest_visible_index();
        }
        self.touch();

        debug!(
            items_per_page = count,
            page = self.state.current_pagination_index,
            "carousel page size updated"
        );
        Ok(())
    }

    /// Replace the row's items, e.g. after the catalog slice refreshed.
    pub fn set_items(&mut self, items: Vec<T>) {
        let total = items.len();
        self.state.items = items;
        self.last_page_origin = None;
        self.state.current_pagination_index = pagination::clamp(
            self.state.current_pagination_index,
            total,
            self.state.items_per_page,
        );
        if !self.state.is_moving {
            self.clamp_lowest_visible_index();
        }
        self.touch();
        debug!(total_items = total, "carousel items replaced");
    }

    /// Projection for the renderer. While a transition is in flight the
    /// window is the one cached when it began; otherwise it is recomputed
    /// from the current state and becomes the new cache.
    pub fn derived(&mut self) -> DerivedView<T> {
        let window = if self.state.is_moving {
            match &self.cache {
                Some(cached) => cached.window.clone(),
                None => self.refresh_cache(),
            }
        } else {
            self.refresh_cache()
        };

        let state = &self.state;
        let total_items = state.items.len();
        DerivedView {
            total_items,
            items_per_page: state.items_per_page,
            show_controls: total_items > state.items_per_page,
            show_prev: state.show_prev,
            item_width: item_width_percent(state.items_per_page),
            pagination_indicators: pagination::indicators(
                total_items,
                state.items_per_page,
                state.current_pagination_index,
            ),
            window,
            is_moving: state.is_moving,
            direction: state.direction,
            move_percentage: state.move_percentage,
            has_moved_from_start: state.has_moved_from_start,
            is_initial_next: state.is_initial_next,
        }
    }

    fn refresh_cache(&mut self) -> ContentWindow<T> {
        if let Some(cached) = &self.cache
            && cached.revision == self.revision
        {
            return cached.window.clone();
        }

        let window = determine_visible_content(
            &self.state.items,
            &self.state.position(),
            item_width_percent(self.state.items_per_page),
        );
        trace!(slots = window.len(), "carousel window recomputed");
        self.cache = Some(CachedWindow {
            window: window.clone(),
            revision: self.revision,
        });
        window
    }

    fn clamp_lowest_visible_index(&mut self) {
        let last = last_valid_index(
            self.state.items.len(),
            self.state.items_per_page,
        );
        if self.state.lowest_visible_index > last {
            self.state.lowest_visible_index = last;
        }
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carousel(total: usize, ipp: usize) -> Carousel<usize> {
        Carousel::new((0..total).collect(), ipp).expect("valid page size")
    }

    fn step(c: &mut Carousel<usize>, direction: Direction) -> Transition {
        let t = match direction {
            Direction::Next => c.move_next(),
            Direction::Prev => c.move_prev(),
        }
        .expect("transition begins");
        c.commit(&t).expect("transition commits");
        t
    }

    #[test]
    fn zero_page_size_is_rejected() {
        assert_eq!(
            Carousel::<usize>::new(vec![1, 2], 0).unwrap_err(),
            CarouselError::InvalidPageSize(0)
        );
        let mut c = carousel(10, 3);
        assert_eq!(
            c.update_items_to_display(0),
            Err(CarouselError::InvalidPageSize(0))
        );
        assert_eq!(c.state().items_per_page, 3);
    }

    #[test]
    fn seventeen_by_five_walkthrough() {
        let mut c = carousel(17, 5);

        let t = c.move_next().unwrap();
        assert_eq!((t.to_index, t.move_percentage, t.initial), (5, 100.0, true));
        assert!(c.state().is_moving);
        assert!(c.state().has_moved_from_start);
        assert!(!c.state().show_prev);
        c.commit(&t).unwrap();
        assert_eq!(c.state().lowest_visible_index, 5);
        assert!(c.state().show_prev);
        assert!(!c.state().is_initial_next);

        let t = step(&mut c, Direction::Next);
        assert_eq!((t.to_index, t.move_percentage), (10, 100.0));
        let t = step(&mut c, Direction::Next);
        assert_eq!((t.to_index, t.move_percentage), (12, 40.0));
        let t = step(&mut c, Direction::Next);
        assert_eq!((t.to_index, t.move_percentage), (0, 100.0));
        assert_eq!(c.state().current_pagination_index, 0);
    }

    #[test]
    fn second_navigation_while_moving_is_busy() {
        let mut c = carousel(17, 5);
        let t = c.move_next().unwrap();
        assert_eq!(
            c.move_next().unwrap_err(),
            CarouselError::Busy { transition: t.id }
        );
        c.commit(&t).unwrap();
        assert_eq!(c.state().lowest_visible_index, 5);
    }

    #[test]
    fn prev_requires_a_forward_move_first() {
        let mut c = carousel(17, 5);
        assert_eq!(c.move_prev().unwrap_err(), CarouselError::PrevUnavailable);
        step(&mut c, Direction::Next);
        let t = step(&mut c, Direction::Prev);
        assert_eq!(t.to_index, 0);
        assert_eq!(c.state().current_pagination_index, 0);
    }

    #[test]
    fn single_page_and_empty_rows_do_not_scroll() {
        let mut c = carousel(3, 5);
        assert_eq!(
            c.move_next().unwrap_err(),
            CarouselError::NothingToScroll {
                total_items: 3,
                items_per_page: 5
            }
        );
        let mut empty = carousel(0, 5);
        assert!(empty.move_next().is_err());
        assert!(empty.derived().window.is_empty());
    }

    #[test]
    fn commit_rejects_stale_and_missing_tickets() {
        let mut c = carousel(17, 5);
        let first = step(&mut c, Direction::Next);
        assert_eq!(c.commit(&first), Err(CarouselError::NoTransition));

        let second = c.move_next().unwrap();
        assert_eq!(
            c.commit(&first),
            Err(CarouselError::StaleTransition {
                expected: second.id,
                got: first.id
            })
        );
        assert!(c.is_moving());
        c.commit(&second).unwrap();
    }

    #[test]
    fn window_is_frozen_while_moving() {
        let mut c = carousel(17, 5);
        let before = c.derived().window;
        let t = c.move_next().unwrap();

        let first = c.derived();
        let second = c.derived();
        assert!(first.window.ptr_eq(&second.window));
        assert!(first.window.ptr_eq(&before));
        assert_eq!(first.window.indices(), (0..11).collect::<Vec<_>>());

        // A resize mid-flight must not reshape the window either.
        c.update_items_to_display(4).unwrap();
        assert!(c.derived().window.ptr_eq(&before));

        c.commit(&t).unwrap();
        let after = c.derived();
        assert!(!after.window.ptr_eq(&before));
        assert!(!after.is_moving);
    }

    #[test]
    fn idle_window_tracks_state_changes() {
        let mut c = carousel(17, 5);
        let a = c.derived().window;
        let b = c.derived().window;
        assert!(a.ptr_eq(&b));

        c.update_items_to_display(4).unwrap();
        let resized = c.derived().window;
        assert!(!resized.ptr_eq(&a));
        assert_eq!(resized.len(), 9);
    }

    #[test]
    fn resize_clamps_pagination_and_start_index() {
        let mut c = carousel(17, 5);
        for _ in 0..3 {
            step(&mut c, Direction::Next);
        }
        assert_eq!(c.state().lowest_visible_index, 12);
        assert_eq!(c.state().current_pagination_index, 3);

        c.update_items_to_display(8).unwrap();
        assert_eq!(c.state().current_pagination_index, 2);
        assert_eq!(c.state().lowest_visible_index, 9);
    }

    #[test]
    fn commit_after_mid_flight_resize_stays_in_bounds() {
        let mut c = carousel(17, 5);
        step(&mut c, Direction::Next);
        step(&mut c, Direction::Next);
        let t = c.move_next().unwrap();
        assert_eq!(t.to_index, 12);
        c.update_items_to_display(10).unwrap();
        c.commit(&t).unwrap();
        assert_eq!(c.state().lowest_visible_index, 7);
    }

    #[test]
    fn derived_projection_for_single_page_row() {
        let mut c = carousel(3, 5);
        let view = c.derived();
        assert_eq!(view.total_items, 3);
        assert!(!view.show_controls);
        assert_eq!(view.item_width, 20.0);
        assert_eq!(view.pagination_indicators.len(), 1);
        assert_eq!(view.window.indices(), vec![0, 1, 2]);
    }

    #[test]
    fn prev_returns_to_off_grid_start_after_resize() {
        let mut c = carousel(17, 6);
        step(&mut c, Direction::Next);
        step(&mut c, Direction::Next);
        assert_eq!(c.state().lowest_visible_index, 11);

        c.update_items_to_display(5).unwrap();
        assert_eq!(c.state().lowest_visible_index, 11);

        let next = step(&mut c, Direction::Next);
        assert_eq!(next.to_index, 12);
        let prev = step(&mut c, Direction::Prev);
        assert_eq!(prev.to_index, 11);
        assert_eq!(prev.move_percentage, 80.0);
        assert_eq!(c.state().lowest_visible_index, 11);

        // The origin is used once; the next prev steps by a page again.
        let prev = step(&mut c, Direction::Prev);
        assert_eq!(prev.to_index, 6);
    }

    #[test]
    fn resize_forgets_last_page_origin() {
        let mut c = carousel(17, 5);
        c.update_items_to_display(6).unwrap();
        step(&mut c, Direction::Next);
        step(&mut c, Direction::Next);
        c.update_items_to_display(5).unwrap();
        step(&mut c, Direction::Next);
        assert_eq!(c.state().lowest_visible_index, 12);

        // A round trip through another page size drops the origin (11),
        // so prev snaps to the page grid below instead.
        c.update_items_to_display(4).unwrap();
        c.update_items_to_display(5).unwrap();
        let prev = step(&mut c, Direction::Prev);
        assert_eq!(prev.to_index, 10);
    }

    #[test]
    fn set_items_shrinks_bounds() {
        let mut c = carousel(17, 5);
        for _ in 0..3 {
            step(&mut c, Direction::Next);
        }
        c.set_items((0..8).collect());
        assert_eq!(c.state().lowest_visible_index, 3);
        assert_eq!(c.state().current_pagination_index, 1);
    }
}
