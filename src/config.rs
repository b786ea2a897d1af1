//! Runtime configuration passed in by the bootstrap page.
//!
//! Every field has a default, so `start()` can be called with no config at
//! all, or with a partial JSON object overriding just a few knobs.

use serde::Deserialize;

use crate::error::AppError;

pub const DEFAULT_STORAGE_KEY: &str = "loveStoryState";
pub const DEFAULT_TICK_PERIOD_MS: u32 = 1000;
pub const DEFAULT_SCROLL_STEP_PX: i32 = 300;
pub const DEFAULT_PARTICLE_COUNT: usize = 50;
pub const DEFAULT_STICKY_NAV_THRESHOLD_PX: f64 = 50.0;
pub const DEFAULT_CELEBRATION_MARKER: &str = "\u{1F389}"; // 🎉
pub const DEFAULT_EXPORT_PREFIX: &str = "LoveStory";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    /// Key of the single snapshot entry in the host key-value store.
    pub storage_key: String,
    pub tick_period_ms: u32,
    /// Horizontal distance one gallery scroll step moves.
    pub scroll_step_px: i32,
    pub particle_count: usize,
    pub sticky_nav_threshold_px: f64,
    /// Shown in all four countdown fields once the anniversary has passed.
    pub celebration_marker: String,
    pub export_prefix: String,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            tick_period_ms: DEFAULT_TICK_PERIOD_MS,
            scroll_step_px: DEFAULT_SCROLL_STEP_PX,
            particle_count: DEFAULT_PARTICLE_COUNT,
            sticky_nav_threshold_px: DEFAULT_STICKY_NAV_THRESHOLD_PX,
            celebration_marker: DEFAULT_CELEBRATION_MARKER.to_string(),
            export_prefix: DEFAULT_EXPORT_PREFIX.to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Parse a (possibly partial) JSON config. Empty input yields defaults.
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self =
            serde_json::from_str(json).map_err(|e| AppError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.storage_key.is_empty() {
            return Err(AppError::Config("storageKey must not be empty".into()));
        }
        if self.tick_period_ms == 0 {
            return Err(AppError::Config("tickPeriodMs must be positive".into()));
        }
        Ok(())
    }

    /// Log level for the console logger; unknown names fall back to `Info`.
    pub fn level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}
