use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_BINARY_DIFFERENCE_THRESHOLD, DEFAULT_BRIGHTNESS_THRESHOLD,
    DEFAULT_COLOR_DIFFERENCE_THRESHOLD,
};
use crate::statistics::{Signal, SignalStatistics};

/// Baseline that thresholds are added to before comparing a frame signal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassificationStrategy {
    /// Threshold above the moving-window mean at this frame.
    #[default]
    MovingMean,
    /// Threshold above the running mean of the whole history.
    GlobalMean,
    /// Threshold alone, zero baseline.
    Zero,
}

impl ClassificationStrategy {
    pub fn baseline(self, stats: &SignalStatistics) -> f64 {
        match self {
            Self::MovingMean => stats.moving_mean,
            Self::GlobalMean => stats.running_mean,
            Self::Zero => 0.0,
        }
    }
}

impl std::fmt::Display for ClassificationStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MovingMean => write!(f, "Moving Mean"),
            Self::GlobalMean => write!(f, "Global Mean"),
            Self::Zero => write!(f, "Zero Baseline"),
        }
    }
}

/// Per-signal detection thresholds, each conceptually in [0.0, 1.0].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub brightness: f64,
    pub color_difference: f64,
    pub binary_threshold_difference: f64,
}

impl Thresholds {
    pub fn new(brightness: f64, color_difference: f64, binary_threshold_difference: f64) -> Self {
        Self {
            brightness,
            color_difference,
            binary_threshold_difference,
        }
    }

    pub fn get(&self, signal: Signal) -> f64 {
        match signal {
            Signal::Brightness => self.brightness,
            Signal::ColorDifference => self.color_difference,
            Signal::BinaryThresholdDifference => self.binary_threshold_difference,
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            brightness: DEFAULT_BRIGHTNESS_THRESHOLD,
            color_difference: DEFAULT_COLOR_DIFFERENCE_THRESHOLD,
            binary_threshold_difference: DEFAULT_BINARY_DIFFERENCE_THRESHOLD,
        }
    }
}

impl std::fmt::Display for Thresholds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "brightness {:.4}, color {:.4}, binary {:.4}",
            self.brightness, self.color_difference, self.binary_threshold_difference
        )
    }
}
