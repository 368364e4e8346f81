//! Hover expansion for the visible page
//!
//! A hovered card scales up in place. Cards on the page edges grow inward
//! (the first from its left edge, the last from its right edge) so they are
//! never clipped by the viewport; everything else grows from its center.
//! Neighbours on the growing side slide away by the overflow.

use std::ops::Range;

use serde::Serialize;

use crate::positioning::{
    Placement, PlacementRequest, Positioner, Rect, Side, Size,
};
use crate::state::DerivedView;

/// Scale applied to the hovered card.
pub const DEFAULT_HOVER_SCALE: f32 = 1.5;

/// Gap between an expanded card and its preview panel, in pixels.
pub const PREVIEW_GAP: f32 = 8.0;

/// Anchor the hovered card scales from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformOrigin {
    Left,
    Center,
    Right,
}

/// Per-card hover instruction. `shift_percent` is a fraction of one card
/// width (`100.0` = one card).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SlotHover {
    pub scale: f32,
    pub shift_percent: f32,
    pub origin: TransformOrigin,
}

impl SlotHover {
    const REST: Self = Self {
        scale: 1.0,
        shift_percent: 0.0,
        origin: TransformOrigin::Center,
    };
}

/// Layout of a page of `visible` cards with `hovered` (a position within the
/// page) expanded by `scale`. Returns resting cards when nothing is hovered
/// or the position is off the page.
pub fn hover_layout(
    visible: usize,
    hovered: Option<usize>,
    scale: f32,
) -> Vec<SlotHover> {
    let mut layout = vec![SlotHover::REST; visible];
    let Some(hovered) = hovered.filter(|&h| h < visible) else {
        return layout;
    };

    let growth = (scale.max(1.0) - 1.0) * 100.0;
    let origin = if hovered == 0 {
        TransformOrigin::Left
    } else if hovered + 1 == visible {
        TransformOrigin::Right
    } else {
        TransformOrigin::Center
    };
    let (before, after) = match origin {
        TransformOrigin::Left => (0.0, growth),
        TransformOrigin::Right => (-growth, 0.0),
        TransformOrigin::Center => (-growth / 2.0, growth / 2.0),
    };

    for (position, slot) in layout.iter_mut().enumerate() {
        *slot = if position == hovered {
            SlotHover {
                scale,
                shift_percent: 0.0,
                origin,
            }
        } else {
            SlotHover {
                shift_percent: if position < hovered { before } else { after },
                ..SlotHover::REST
            }
        };
    }
    layout
}

/// Bounds of `card` once expanded by `hover` (pixels).
pub fn expanded_bounds(card: Rect, hover: &SlotHover) -> Rect {
    let width = card.width * hover.scale;
    let height = card.height * hover.scale;
    let x = match hover.origin {
        TransformOrigin::Left => card.x,
        TransformOrigin::Right => card.right() - width,
        TransformOrigin::Center => card.x - (width - card.width) / 2.0,
    };
    Rect::new(x, card.y - (height - card.height) / 2.0, width, height)
}

/// Place the preview panel for an expanded card, preferring the space
/// below it.
pub fn preview_placement<P: Positioner + ?Sized>(
    positioner: &P,
    card: Rect,
    hover: &SlotHover,
    panel: Size,
    viewport: Rect,
) -> Placement {
    positioner.position(&PlacementRequest {
        anchor: expanded_bounds(card, hover),
        panel,
        viewport,
        preferred: Side::Bottom,
        gap: PREVIEW_GAP,
    })
}

/// Window slots currently on screen for an idle row. `None` while a
/// transition is running, since hover is disabled mid-flight.
pub fn visible_slot_range<T>(view: &DerivedView<T>) -> Option<Range<usize>> {
    if view.is_moving {
        return None;
    }
    let start = if view.has_moved_from_start && view.show_controls {
        view.items_per_page + 1
    } else {
        0
    };
    let end = (start + view.items_per_page).min(view.window.len());
    Some(start.min(end)..end)
}
