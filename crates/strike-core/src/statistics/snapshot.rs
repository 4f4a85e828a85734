use crate::frame::Frame;

/// One of the three per-frame signals produced by the kernel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Signal {
    Brightness,
    ColorDifference,
    BinaryThresholdDifference,
}

impl Signal {
    pub const ALL: [Signal; 3] = [
        Signal::Brightness,
        Signal::ColorDifference,
        Signal::BinaryThresholdDifference,
    ];

    pub fn value(self, frame: &Frame) -> f64 {
        match self {
            Self::Brightness => frame.brightness(),
            Self::ColorDifference => frame.color_difference(),
            Self::BinaryThresholdDifference => frame.binary_threshold_difference(),
        }
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Brightness => write!(f, "Brightness"),
            Self::ColorDifference => write!(f, "Color Difference"),
            Self::BinaryThresholdDifference => write!(f, "Binary Threshold Difference"),
        }
    }
}

/// Running and moving descriptive statistics of a single signal.
///
/// Standard deviations are population deviations (divided by `n`).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SignalStatistics {
    pub running_mean: f64,
    pub running_stddev: f64,
    pub min: f64,
    pub max: f64,
    pub moving_mean: f64,
    pub moving_stddev: f64,
}

impl SignalStatistics {
    /// Statistics after observing a single value.
    pub fn first(value: f64) -> Self {
        Self {
            running_mean: value,
            running_stddev: 0.0,
            min: value,
            max: value,
            moving_mean: value,
            moving_stddev: 0.0,
        }
    }
}

/// Statistics of all three signals at one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StatisticsSnapshot {
    pub brightness: SignalStatistics,
    pub color_difference: SignalStatistics,
    pub binary_threshold_difference: SignalStatistics,
}

impl StatisticsSnapshot {
    pub fn signal(&self, signal: Signal) -> &SignalStatistics {
        match signal {
            Signal::Brightness => &self.brightness,
            Signal::ColorDifference => &self.color_difference,
            Signal::BinaryThresholdDifference => &self.binary_threshold_difference,
        }
    }
}
