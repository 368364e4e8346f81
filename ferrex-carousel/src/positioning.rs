//! Placement contract for floating preview panels
//!
//! Hover previews ask a [`Positioner`] where to put a panel next to the card
//! they expand from. The engine only depends on the trait; [`ViewportClamp`]
//! is the basic implementation used by default: it keeps the preferred side
//! when the panel fits, flips to the opposite side when that fits instead,
//! and finally clamps the panel into the viewport.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Where a panel should go, relative to the element it belongs to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementRequest {
    pub anchor: Rect,
    pub panel: Size,
    pub viewport: Rect,
    pub preferred: Side,
    /// Distance between anchor and panel.
    pub gap: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Placement {
    pub rect: Rect,
    pub side: Side,
    pub flipped: bool,
    /// True when the panel had to be shifted to stay inside the viewport.
    pub clamped: bool,
}

pub trait Positioner {
    fn position(&self, request: &PlacementRequest) -> Placement;
}

/// Flip-then-clamp placement.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewportClamp;

impl ViewportClamp {
    fn place_on(side: Side, request: &PlacementRequest) -> Rect {
        let a = request.anchor;
        let p = request.panel;
        let centered_x = a.x + (a.width - p.width) / 2.0;
        let centered_y = a.y + (a.height - p.height) / 2.0;
        let (x, y) = match side {
            Side::Top => (centered_x, a.y - request.gap - p.height),
            Side::Bottom => (centered_x, a.bottom() + request.gap),
            Side::Left => (a.x - request.gap - p.width, centered_y),
            Side::Right => (a.right() + request.gap, centered_y),
        };
        Rect::new(x, y, p.width, p.height)
    }

    fn clamp_into(rect: Rect, viewport: &Rect) -> Rect {
        let max_x = (viewport.right() - rect.width).max(viewport.x);
        let max_y = (viewport.bottom() - rect.height).max(viewport.y);
        Rect {
            x: rect.x.clamp(viewport.x, max_x),
            y: rect.y.clamp(viewport.y, max_y),
            ..rect
        }
    }
}

impl Positioner for ViewportClamp {
    fn position(&self, request: &PlacementRequest) -> Placement {
        let preferred = Self::place_on(request.preferred, request);
        if request.viewport.contains(&preferred) {
            return Placement {
                rect: preferred,
                side: request.preferred,
                flipped: false,
                clamped: false,
            };
        }

        let opposite_side = request.preferred.opposite();
        let opposite = Self::place_on(opposite_side, request);
        let (side, rect, flipped) = if request.viewport.contains(&opposite) {
            (opposite_side, opposite, true)
        } else {
            (request.preferred, preferred, false)
        };

        let clamped_rect = Self::clamp_into(rect, &request.viewport);
        Placement {
            rect: clamped_rect,
            side,
            flipped,
            clamped: clamped_rect != rect,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(anchor: Rect, preferred: Side) -> PlacementRequest {
        PlacementRequest {
            anchor,
            panel: Size {
                width: 300.0,
                height: 200.0,
            },
            viewport: Rect::new(0.0, 0.0, 1280.0, 720.0),
            preferred,
            gap: 8.0,
        }
    }

    #[test]
    fn keeps_preferred_side_when_it_fits() {
        let placed = ViewportClamp.position(&request(
            Rect::new(500.0, 300.0, 200.0, 120.0),
            Side::Bottom,
        ));
        assert_eq!(placed.side, Side::Bottom);
        assert!(!placed.flipped && !placed.clamped);
        assert_eq!(placed.rect, Rect::new(450.0, 428.0, 300.0, 200.0));
    }

    #[test]
    fn flips_when_preferred_side_overflows() {
        let placed = ViewportClamp.position(&request(
            Rect::new(500.0, 560.0, 200.0, 120.0),
            Side::Bottom,
        ));
        assert_eq!(placed.side, Side::Top);
        assert!(placed.flipped);
        assert_eq!(placed.rect.y, 352.0);
    }

    #[test]
    fn clamps_horizontally_at_viewport_edge() {
        let placed = ViewportClamp.position(&request(
            Rect::new(0.0, 300.0, 100.0, 120.0),
            Side::Bottom,
        ));
        assert!(placed.clamped);
        assert_eq!(placed.rect.x, 0.0);
        assert_eq!(placed.side, Side::Bottom);
    }
}
