use crate::frame::Frame;
use crate::statistics::{Signal, StatisticsSnapshot};

use super::config::{ClassificationStrategy, Thresholds};

/// Per-frame threshold classification of the three signals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClassificationElement {
    pub ordinal_number: u32,
    pub brightness_classified: bool,
    pub color_difference_classified: bool,
    pub binary_threshold_classified: bool,
}

impl ClassificationElement {
    /// All three signals passed their thresholds.
    pub fn is_full_match(&self) -> bool {
        self.brightness_classified
            && self.color_difference_classified
            && self.binary_threshold_classified
    }
}

/// A signal is classified when it exceeds `baseline + threshold`.
pub fn classify(
    frame: &Frame,
    snapshot: &StatisticsSnapshot,
    thresholds: &Thresholds,
    strategy: ClassificationStrategy,
) -> ClassificationElement {
    let passes = |signal: Signal| {
        let baseline = strategy.baseline(snapshot.signal(signal));
        signal.value(frame) > baseline + thresholds.get(signal)
    };
    ClassificationElement {
        ordinal_number: frame.ordinal_number(),
        brightness_classified: passes(Signal::Brightness),
        color_difference_classified: passes(Signal::ColorDifference),
        binary_threshold_classified: passes(Signal::BinaryThresholdDifference),
    }
}
