use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use strike_core::consts::{
    DEFAULT_BINARY_DIFFERENCE_THRESHOLD, DEFAULT_BINARY_THRESHOLD, DEFAULT_BRIGHTNESS_THRESHOLD,
    DEFAULT_COLOR_DIFFERENCE_THRESHOLD, DEFAULT_DECAY, DEFAULT_MOVING_WINDOW,
};
use strike_core::detection::{ClassificationStrategy, Thresholds};
use strike_core::pipeline::config::{CacheConfig, DetectionConfig};

#[derive(Clone, ValueEnum)]
pub enum StrategyArg {
    MovingMean,
    GlobalMean,
    Zero,
}

impl From<&StrategyArg> for ClassificationStrategy {
    fn from(arg: &StrategyArg) -> Self {
        match arg {
            StrategyArg::MovingMean => Self::MovingMean,
            StrategyArg::GlobalMean => Self::GlobalMean,
            StrategyArg::Zero => Self::Zero,
        }
    }
}

/// Detection options shared by `detect` and `stream`.
#[derive(Args)]
pub struct DetectionArgs {
    /// Input SER file or image-sequence directory
    pub file: PathBuf,

    /// Detection config file (TOML); replaces the option flags below
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Brightness threshold above the baseline
    #[arg(long, default_value_t = DEFAULT_BRIGHTNESS_THRESHOLD)]
    pub brightness: f64,

    /// Color-difference threshold above the baseline
    #[arg(long, default_value_t = DEFAULT_COLOR_DIFFERENCE_THRESHOLD)]
    pub color: f64,

    /// Binary-threshold-difference threshold above the baseline
    #[arg(long, default_value_t = DEFAULT_BINARY_DIFFERENCE_THRESHOLD)]
    pub binary: f64,

    /// Derive thresholds from the analyzed video
    #[arg(long)]
    pub auto: bool,

    /// Grayscale cutoff used to binarize pixels (0-1)
    #[arg(long, default_value_t = DEFAULT_BINARY_THRESHOLD)]
    pub cutoff: f64,

    /// Moving-window resolution in frames
    #[arg(long, default_value_t = DEFAULT_MOVING_WINDOW)]
    pub window: usize,

    /// Baseline the thresholds are added to
    #[arg(long, value_enum, default_value = "moving-mean")]
    pub strategy: StrategyArg,

    /// Stream-mode duplicate suppression horizon
    #[arg(long, default_value_t = DEFAULT_DECAY)]
    pub decay: usize,

    /// Do not read or write the analysis cache
    #[arg(long)]
    pub no_cache: bool,

    /// Cache file location (default: <input>.strike-cache)
    #[arg(long)]
    pub cache: Option<PathBuf>,
}

impl DetectionArgs {
    pub fn build_config(&self) -> Result<DetectionConfig> {
        if let Some(ref config_path) = self.config {
            let contents = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read config {}", config_path.display()))?;
            let mut config: DetectionConfig =
                toml::from_str(&contents).context("Invalid detection config")?;
            config.input = self.file.clone();
            return Ok(config);
        }

        Ok(DetectionConfig {
            input: self.file.clone(),
            thresholds: Thresholds::new(self.brightness, self.color, self.binary),
            auto_thresholds: self.auto,
            binary_threshold: self.cutoff,
            moving_window: self.window,
            strategy: (&self.strategy).into(),
            decay: self.decay,
            cache: CacheConfig {
                enabled: !self.no_cache,
                path: self.cache.clone(),
            },
        })
    }
}
