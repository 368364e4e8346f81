//! Swipe-threshold detection for touch and drag input
//!
//! Turns a horizontal drag into a navigation intent once it travels far
//! enough. Dragging the track to the left reveals the next page.

use crate::types::Direction;

/// Default drag distance, in pixels, before a swipe counts.
pub const DEFAULT_SWIPE_THRESHOLD_PX: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeTracker {
    threshold: f32,
    start_x: Option<f32>,
    current_x: f32,
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new(DEFAULT_SWIPE_THRESHOLD_PX)
    }
}

impl SwipeTracker {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold: threshold.abs(),
            start_x: None,
            current_x: 0.0,
        }
    }

    pub fn begin(&mut self, x: f32) {
        self.start_x = Some(x);
        self.current_x = x;
    }

    pub fn update(&mut self, x: f32) {
        if self.start_x.is_some() {
            self.current_x = x;
        }
    }

    /// Signed drag distance so far; negative is a drag to the left.
    pub fn delta(&self) -> f32 {
        self.start_x.map_or(0.0, |start| self.current_x - start)
    }

    pub fn is_tracking(&self) -> bool {
        self.start_x.is_some()
    }

    /// End the gesture and report the intent, if the drag crossed the
    /// threshold.
    pub fn finish(&mut self) -> Option<Direction> {
        let delta = self.delta();
        self.start_x = None;
        if delta.abs() < self.threshold || delta == 0.0 {
            return None;
        }
        Some(if delta < 0.0 {
            Direction::Next
        } else {
            Direction::Prev
        })
    }

    /// Abandon the gesture (pointer left the row, touch cancelled).
    pub fn cancel(&mut self) {
        self.start_x = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn left_drag_past_threshold_moves_next() {
        let mut swipe = SwipeTracker::default();
        swipe.begin(400.0);
        swipe.update(330.0);
        assert_eq!(swipe.finish(), Some(Direction::Next));
        assert!(!swipe.is_tracking());
    }

    #[test]
    fn right_drag_moves_prev() {
        let mut swipe = SwipeTracker::new(30.0);
        swipe.begin(100.0);
        swipe.update(140.0);
        assert_eq!(swipe.finish(), Some(Direction::Prev));
    }

    #[test]
    fn short_or_cancelled_drags_are_ignored() {
        let mut swipe = SwipeTracker::default();
        swipe.begin(100.0);
        swipe.update(120.0);
        assert_eq!(swipe.finish(), None);

        swipe.begin(100.0);
        swipe.update(0.0);
        swipe.cancel();
        assert_eq!(swipe.finish(), None);

        // Moves without a begin are not tracked.
        swipe.update(500.0);
        assert_eq!(swipe.delta(), 0.0);
    }
}
