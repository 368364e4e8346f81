//! Responsive items-per-page provider
//!
//! Maps the viewport width through a breakpoint ladder and broadcasts the
//! resulting count to every row on the page. Rows only see a new value when
//! the count actually changes, not on every resize event.

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::debug;

/// One rung of the ladder: viewports at least `min_width` wide show `items`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Breakpoint {
    pub min_width: f32,
    pub items: usize,
}

impl Breakpoint {
    pub const fn new(min_width: f32, items: usize) -> Self {
        Self { min_width, items }
    }
}

/// Ordered breakpoint table (widest first).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Breakpoint>", into = "Vec<Breakpoint>")]
pub struct Breakpoints(Vec<Breakpoint>);

impl From<Vec<Breakpoint>> for Breakpoints {
    fn from(breakpoints: Vec<Breakpoint>) -> Self {
        Self::new(breakpoints)
    }
}

impl From<Breakpoints> for Vec<Breakpoint> {
    fn from(breakpoints: Breakpoints) -> Self {
        breakpoints.0
    }
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self::new(vec![
            Breakpoint::new(1400.0, 6),
            Breakpoint::new(1100.0, 5),
            Breakpoint::new(800.0, 4),
            Breakpoint::new(500.0, 3),
            Breakpoint::new(0.0, 2),
        ])
    }
}

impl Breakpoints {
    /// Builds a table; entries are sorted widest first and zero counts are
    /// raised to one.
    pub fn new(mut breakpoints: Vec<Breakpoint>) -> Self {
        for bp in &mut breakpoints {
            bp.items = bp.items.max(1);
        }
        breakpoints.sort_by(|a, b| b.min_width.total_cmp(&a.min_width));
        Self(breakpoints)
    }

    pub fn as_slice(&self) -> &[Breakpoint] {
        &self.0
    }

    /// Items per page for a viewport width. Widths below the narrowest
    /// breakpoint use its count; an empty table yields one item.
    pub fn items_for_width(&self, width: f32) -> usize {
        self.0
            .iter()
            .find(|bp| width >= bp.min_width)
            .or_else(|| self.0.last())
            .map(|bp| bp.items)
            .unwrap_or(1)
    }
}

/// Broadcasts items-per-page for the current viewport width.
#[derive(Debug)]
pub struct ResponsiveCount {
    breakpoints: Breakpoints,
    sender: watch::Sender<usize>,
}

impl ResponsiveCount {
    pub fn new(breakpoints: Breakpoints, initial_width: f32) -> Self {
        let initial = breakpoints.items_for_width(initial_width);
        let (sender, _) = watch::channel(initial);
        Self {
            breakpoints,
            sender,
        }
    }

    pub fn breakpoints(&self) -> &Breakpoints {
        &self.breakpoints
    }

    pub fn current(&self) -> usize {
        *self.sender.borrow()
    }

    /// Receiver for one row; starts at the current count.
    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.sender.subscribe()
    }

    /// Feed a viewport width. Returns true when the count changed and was
    /// broadcast.
    pub fn observe_width(&self, width: f32) -> bool {
        let items = self.breakpoints.items_for_width(width);
        let changed = self.sender.send_if_modified(|current| {
            if *current == items {
                false
            } else {
                *current = items;
                true
            }
        });
        if changed {
            debug!(width, items_per_page = items, "responsive count changed");
        }
        changed
    }
}
