use anyhow::Context;
use ferrex_carousel::hover::DEFAULT_HOVER_SCALE;
use ferrex_carousel::swipe::{DEFAULT_SWIPE_THRESHOLD_PX, SwipeTracker};
use ferrex_carousel::{
    Breakpoint, Breakpoints, CommitTrigger, DEFAULT_ANIMATION_MS,
    ResponsiveCount,
};
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};

pub const CONFIG_PATH_VAR: &str = "FERREX_CAROUSEL_CONFIG_PATH";
pub const CONFIG_JSON_VAR: &str = "FERREX_CAROUSEL_CONFIG_JSON";

/// Looked up relative to the working directory, first match wins.
const DEFAULT_FILES: [&str; 4] = [
    "carousel.toml",
    "carousel.json",
    "config/carousel.toml",
    "config/carousel.json",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SettingsFormat {
    Toml,
    Json,
}

impl SettingsFormat {
    fn of(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Toml,
        }
    }
}

/// Source that produced the carousel settings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CarouselSettingsSource {
    #[default]
    Default,
    EnvPath(PathBuf),
    EnvInline,
    File(PathBuf),
}

/// How a row learns that its slide animation is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitMode {
    /// Commit after `animation_ms`, whether or not the renderer reported back.
    #[default]
    Timer,
    /// Commit when the renderer reports the end of the animation.
    AnimationEnd,
}

/// Tuning for every carousel row on a browse page.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CarouselSettings {
    /// Slide duration (ms). Must match the track's CSS transition or rows
    /// will snap before the animation ends.
    pub animation_ms: u64,
    /// What ends a transition; see [`CommitMode`].
    pub commit_trigger: CommitMode,
    /// Viewport width to items-per-page ladder. Order does not matter.
    pub breakpoints: Vec<Breakpoint>,
    /// Horizontal drag distance (px) before a touch drag pages the row.
    pub swipe_threshold_px: f32,
    /// Scale applied to a hovered card.
    pub hover_scale: f32,
}

impl Default for CarouselSettings {
    fn default() -> Self {
        Self {
            animation_ms: DEFAULT_ANIMATION_MS,
            commit_trigger: CommitMode::default(),
            breakpoints: Breakpoints::default().into(),
            swipe_threshold_px: DEFAULT_SWIPE_THRESHOLD_PX,
            hover_scale: DEFAULT_HOVER_SCALE,
        }
    }
}

impl CarouselSettings {
    /// Load carousel settings using environment variables.
    /// Evaluation order:
    /// 1) `$FERREX_CAROUSEL_CONFIG_PATH` (TOML or JSON file),
    /// 2) `$FERREX_CAROUSEL_CONFIG_JSON` (inline JSON),
    /// 3) the first of `carousel.toml`, `carousel.json`,
    ///    `config/carousel.toml`, `config/carousel.json` that exists,
    /// 4) defaults.
    pub fn load_from_env() -> anyhow::Result<(Self, CarouselSettingsSource)> {
        if let Ok(path_str) = env::var(CONFIG_PATH_VAR)
            && !path_str.trim().is_empty()
        {
            let path = PathBuf::from(path_str);
            let settings = Self::load_from_file(&path)?;
            return Ok((settings, CarouselSettingsSource::EnvPath(path)));
        }

        if let Ok(raw) = env::var(CONFIG_JSON_VAR)
            && !raw.trim().is_empty()
        {
            let parsed = Self::parse_json(&raw)
                .with_context(|| format!("failed to parse {CONFIG_JSON_VAR}"))?;
            return Ok((parsed, CarouselSettingsSource::EnvInline));
        }

        if let Some(path) = Self::find_default_file() {
            let settings = Self::load_from_file(&path)?;
            return Ok((settings, CarouselSettingsSource::File(path)));
        }

        Ok((Self::default(), CarouselSettingsSource::Default))
    }

    /// Read a settings file. `.json` files are parsed as JSON, anything
    /// else as TOML.
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path).with_context(|| {
            format!("failed to read carousel settings from {}", path.display())
        })?;
        let parsed = match SettingsFormat::of(path) {
            SettingsFormat::Json => Self::parse_json(&contents),
            SettingsFormat::Toml => Self::parse_toml(&contents),
        };
        parsed.with_context(|| {
            format!("invalid carousel settings {}", path.display())
        })
    }

    pub fn parse_toml(raw: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    pub fn parse_json(raw: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    fn find_default_file() -> Option<PathBuf> {
        DEFAULT_FILES.iter().map(PathBuf::from).find(|path| path.exists())
    }

    pub fn animation(&self) -> Duration {
        Duration::from_millis(self.animation_ms)
    }

    /// The commit trigger rows should be built with.
    pub fn commit_trigger(&self) -> CommitTrigger {
        match self.commit_trigger {
            CommitMode::Timer => CommitTrigger::Timer(self.animation()),
            CommitMode::AnimationEnd => CommitTrigger::AnimationEnd,
        }
    }

    pub fn to_breakpoints(&self) -> Breakpoints {
        Breakpoints::new(self.breakpoints.clone())
    }

    /// Responsive provider seeded with the current viewport width.
    pub fn responsive(&self, initial_width: f32) -> ResponsiveCount {
        ResponsiveCount::new(self.to_breakpoints(), initial_width)
    }

    pub fn swipe_tracker(&self) -> SwipeTracker {
        SwipeTracker::new(self.swipe_threshold_px)
    }
}
