use std::collections::HashSet;

use thiserror::Error;

use crate::models::CarouselSettings;

/// Animation budgets above this feel sluggish when paging quickly.
const SLOW_ANIMATION_MS: u64 = 2_000;

/// Past this many cards per page the posters become unreadable.
const CROWDED_PAGE: usize = 12;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigGuardRailError {
    #[error("animation_ms must be greater than zero")]
    ZeroAnimation,
    #[error("breakpoint table is empty")]
    NoBreakpoints,
    #[error("breakpoint at {min_width}px shows zero items")]
    ZeroItems { min_width: f32 },
    #[error("breakpoint width {min_width} must be a finite, non-negative number")]
    InvalidWidth { min_width: f32 },
    #[error("breakpoint width {min_width}px is listed more than once")]
    DuplicateWidth { min_width: f32 },
    #[error("swipe_threshold_px must be positive, got {0}")]
    InvalidSwipeThreshold(f32),
    #[error("hover_scale must be at least 1.0, got {0}")]
    InvalidHoverScale(f32),
}

#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint<S: Into<String>, H: Into<String>>(
        &mut self,
        message: S,
        hint: H,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

pub fn apply_guard_rails(
    settings: &CarouselSettings,
) -> Result<ConfigWarnings, ConfigGuardRailError> {
    let mut warnings = ConfigWarnings::default();

    if settings.animation_ms == 0 {
        return Err(ConfigGuardRailError::ZeroAnimation);
    }
    if settings.animation_ms > SLOW_ANIMATION_MS {
        warnings.push_with_hint(
            format!(
                "animation_ms is {}; rows stay locked for the whole transition",
                settings.animation_ms
            ),
            "Keep it in line with the track's CSS transition (750 by default)",
        );
    }

    validate_breakpoints(settings, &mut warnings)?;

    if !settings.swipe_threshold_px.is_finite()
        || settings.swipe_threshold_px <= 0.0
    {
        return Err(ConfigGuardRailError::InvalidSwipeThreshold(
            settings.swipe_threshold_px,
        ));
    }

    if !settings.hover_scale.is_finite() || settings.hover_scale < 1.0 {
        return Err(ConfigGuardRailError::InvalidHoverScale(
            settings.hover_scale,
        ));
    }

    Ok(warnings)
}

fn validate_breakpoints(
    settings: &CarouselSettings,
    warnings: &mut ConfigWarnings,
) -> Result<(), ConfigGuardRailError> {
    if settings.breakpoints.is_empty() {
        return Err(ConfigGuardRailError::NoBreakpoints);
    }

    let mut seen = HashSet::new();
    for bp in &settings.breakpoints {
        if !bp.min_width.is_finite() || bp.min_width < 0.0 {
            return Err(ConfigGuardRailError::InvalidWidth {
                min_width: bp.min_width,
            });
        }
        if !seen.insert(bp.min_width.to_bits()) {
            return Err(ConfigGuardRailError::DuplicateWidth {
                min_width: bp.min_width,
            });
        }
        if bp.items == 0 {
            return Err(ConfigGuardRailError::ZeroItems {
                min_width: bp.min_width,
            });
        }
        if bp.items > CROWDED_PAGE {
            warnings.push(format!(
                "breakpoint at {}px shows {} items per page",
                bp.min_width, bp.items
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferrex_carousel::Breakpoint;

    #[test]
    fn defaults_pass_without_warnings() {
        let warnings =
            apply_guard_rails(&CarouselSettings::default()).expect("valid");
        assert!(warnings.is_empty());
    }

    #[test]
    fn rejects_broken_tables() {
        let mut settings = CarouselSettings::default();
        settings.breakpoints.clear();
        assert_eq!(
            apply_guard_rails(&settings).unwrap_err(),
            ConfigGuardRailError::NoBreakpoints
        );

        settings.breakpoints =
            vec![Breakpoint::new(800.0, 4), Breakpoint::new(800.0, 3)];
        assert_eq!(
            apply_guard_rails(&settings).unwrap_err(),
            ConfigGuardRailError::DuplicateWidth { min_width: 800.0 }
        );

        settings.breakpoints = vec![Breakpoint::new(0.0, 0)];
        assert_eq!(
            apply_guard_rails(&settings).unwrap_err(),
            ConfigGuardRailError::ZeroItems { min_width: 0.0 }
        );

        settings.breakpoints = vec![Breakpoint::new(-1.0, 2)];
        assert!(matches!(
            apply_guard_rails(&settings),
            Err(ConfigGuardRailError::InvalidWidth { .. })
        ));
    }

    #[test]
    fn rejects_scalars_out_of_range() {
        let zero = CarouselSettings {
            animation_ms: 0,
            ..CarouselSettings::default()
        };
        assert_eq!(
            apply_guard_rails(&zero).unwrap_err(),
            ConfigGuardRailError::ZeroAnimation
        );

        let swipe = CarouselSettings {
            swipe_threshold_px: 0.0,
            ..CarouselSettings::default()
        };
        assert_eq!(
            apply_guard_rails(&swipe).unwrap_err(),
            ConfigGuardRailError::InvalidSwipeThreshold(0.0)
        );

        let shrink = CarouselSettings {
            hover_scale: 0.9,
            ..CarouselSettings::default()
        };
        assert_eq!(
            apply_guard_rails(&shrink).unwrap_err(),
            ConfigGuardRailError::InvalidHoverScale(0.9)
        );
    }

    #[test]
    fn warns_on_slow_or_crowded_rows() {
        let settings = CarouselSettings {
            animation_ms: 3_000,
            breakpoints: vec![
                Breakpoint::new(2560.0, 14),
                Breakpoint::new(0.0, 2),
            ],
            ..CarouselSettings::default()
        };
        let warnings = apply_guard_rails(&settings).expect("valid");
        assert_eq!(warnings.len(), 2);
        assert!(warnings.items[0].hint.is_some());
    }
}
