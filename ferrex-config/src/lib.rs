//! Carousel settings for Ferrex.
//!
//! Loads the row slider tuning (animation budget, commit trigger, responsive
//! breakpoints, swipe and hover parameters) from the environment or a TOML
//! or JSON file, and applies guard rails before the settings reach the
//! engine. The `ferrex-carousel-check` binary wraps both for operators.

pub mod models;
pub mod validation;

pub use models::{CarouselSettings, CarouselSettingsSource, CommitMode};
pub use validation::{
    ConfigGuardRailError, ConfigWarning, ConfigWarnings, apply_guard_rails,
};

/// Load settings from the environment and run the guard rails over them.
pub fn load_validated()
-> anyhow::Result<(CarouselSettings, CarouselSettingsSource, ConfigWarnings)> {
    let (settings, source) = CarouselSettings::load_from_env()?;
    let warnings = apply_guard_rails(&settings)?;
    Ok((settings, source, warnings))
}
