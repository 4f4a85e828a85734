use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cache::default_cache_path;
use crate::consts::{DEFAULT_BINARY_THRESHOLD, DEFAULT_DECAY, DEFAULT_MOVING_WINDOW};
use crate::detection::{ClassificationStrategy, Thresholds};
use crate::error::{Result, StrikeError};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DetectionConfig {
    pub input: PathBuf,
    #[serde(default)]
    pub thresholds: Thresholds,
    /// Derive thresholds from the analyzed frames instead of `thresholds`.
    #[serde(default)]
    pub auto_thresholds: bool,
    /// Grayscale cutoff (0.0..1.0) separating black from white pixels.
    #[serde(default = "default_binary_threshold")]
    pub binary_threshold: f64,
    /// Moving-window resolution; the window spans `moving_window / 2 + 1` frames.
    #[serde(default = "default_moving_window")]
    pub moving_window: usize,
    #[serde(default)]
    pub strategy: ClassificationStrategy,
    /// Stream-mode horizon, in reported detections, for duplicate suppression.
    #[serde(default = "default_decay")]
    pub decay: usize,
    #[serde(default)]
    pub cache: CacheConfig,
}

fn default_binary_threshold() -> f64 {
    DEFAULT_BINARY_THRESHOLD
}
fn default_moving_window() -> usize {
    DEFAULT_MOVING_WINDOW
}
fn default_decay() -> usize {
    DEFAULT_DECAY
}

impl DetectionConfig {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            thresholds: Thresholds::default(),
            auto_thresholds: false,
            binary_threshold: DEFAULT_BINARY_THRESHOLD,
            moving_window: DEFAULT_MOVING_WINDOW,
            strategy: ClassificationStrategy::default(),
            decay: DEFAULT_DECAY,
            cache: CacheConfig::default(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.moving_window == 0 {
            return Err(StrikeError::Config("moving_window must be positive".into()));
        }
        if self.decay == 0 {
            return Err(StrikeError::Config("decay must be positive".into()));
        }
        let values = [
            ("binary_threshold", self.binary_threshold),
            ("thresholds.brightness", self.thresholds.brightness),
            ("thresholds.color_difference", self.thresholds.color_difference),
            (
                "thresholds.binary_threshold_difference",
                self.thresholds.binary_threshold_difference,
            ),
        ];
        for (name, value) in values {
            if !value.is_finite() {
                return Err(StrikeError::Config(format!("{name} must be finite")));
            }
        }
        Ok(())
    }

    /// Cache location for this run, or `None` when caching is disabled.
    pub fn cache_path(&self) -> Option<PathBuf> {
        if !self.cache.enabled {
            return None;
        }
        Some(
            self.cache
                .path
                .clone()
                .unwrap_or_else(|| default_cache_path(Path::new(&self.input))),
        )
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CacheConfig {
    pub enabled: bool,
    /// Explicit cache file; defaults to `<input>.strike-cache`.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: None,
        }
    }
}
