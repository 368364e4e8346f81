//! Track translation for the renderer
//!
//! The track lays every window slot out side by side, each `100 / ipp`
//! percent wide. At rest after the first move the current page sits behind
//! the leading peek and the previous-page block, hence the `-(100 + w)` base.
//! During a transition the track eases from the rest offset to the target
//! offset below over the animation budget.

use std::fmt;
use std::time::Duration;

use crate::state::DerivedView;
use crate::types::{Direction, item_width_percent};

/// Horizontal track translation plus the duration to ease into it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackTransform {
    /// Translation in percent of the visible track width.
    pub translate_percent: f32,
    /// Set while a transition is animating.
    pub duration: Option<Duration>,
}

impl fmt::Display for TrackTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "translate3d({}%, 0, 0)", self.translate_percent)
    }
}

/// Fields of the projection the translation depends on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackInputs {
    pub items_per_page: usize,
    pub is_moving: bool,
    pub direction: Direction,
    pub move_percentage: f32,
    pub has_moved_from_start: bool,
    pub is_initial_next: bool,
}

impl<T> From<&DerivedView<T>> for TrackInputs {
    fn from(view: &DerivedView<T>) -> Self {
        Self {
            items_per_page: view.items_per_page,
            is_moving: view.is_moving,
            direction: view.direction,
            move_percentage: view.move_percentage,
            has_moved_from_start: view.has_moved_from_start,
            is_initial_next: view.is_initial_next,
        }
    }
}

/// Translation (percent) for the given inputs.
pub fn track_offset(inputs: &TrackInputs) -> f32 {
    let w = item_width_percent(inputs.items_per_page);
    let offset = if inputs.is_moving {
        match inputs.direction {
            Direction::Next if inputs.is_initial_next => inputs.move_percentage,
            Direction::Next => 100.0 + inputs.move_percentage + w,
            Direction::Prev => inputs.move_percentage + w,
        }
    } else if inputs.has_moved_from_start {
        100.0 + w
    } else {
        0.0
    };
    -offset
}

/// Transform for the renderer, easing over `animation` while moving.
pub fn track_transform<T>(
    view: &DerivedView<T>,
    animation: Duration,
) -> TrackTransform {
    let inputs = TrackInputs::from(view);
    TrackTransform {
        translate_percent: track_offset(&inputs),
        duration: inputs.is_moving.then_some(animation),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Carousel;

    const BUDGET: Duration = Duration::from_millis(750);

    #[test]
    fn first_next_slides_initial_window() {
        let mut c = Carousel::new((0..17).collect::<Vec<usize>>(), 5).unwrap();
        assert_eq!(track_transform(&c.derived(), BUDGET).translate_percent, 0.0);

        let t = c.move_next().unwrap();
        let moving = track_transform(&c.derived(), BUDGET);
        assert_eq!(moving.translate_percent, -100.0);
        assert_eq!(moving.duration, Some(BUDGET));

        c.commit(&t).unwrap();
        let rest = track_transform(&c.derived(), BUDGET);
        assert_eq!(rest.translate_percent, -120.0);
        assert_eq!(rest.duration, None);
    }

    #[test]
    fn steady_state_offsets_land_on_target_page() {
        let inputs = TrackInputs {
            items_per_page: 5,
            is_moving: true,
            direction: Direction::Next,
            move_percentage: 40.0,
            has_moved_from_start: true,
            is_initial_next: false,
        };
        assert_eq!(track_offset(&inputs), -160.0);

        let prev = TrackInputs {
            direction: Direction::Prev,
            move_percentage: 60.0,
            ..inputs
        };
        assert_eq!(track_offset(&prev), -80.0);

        let full_prev = TrackInputs {
            move_percentage: 0.0,
            ..prev
        };
        assert_eq!(track_offset(&full_prev), -20.0);
    }

    #[test]
    fn renders_css_translate() {
        let transform = TrackTransform {
            translate_percent: -120.0,
            duration: None,
        };
        assert_eq!(transform.to_string(), "translate3d(-120%, 0, 0)");
    }
}
