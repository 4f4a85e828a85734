use crate::frame::Frame;
use crate::ring_buffer::RingBuffer;

use super::snapshot::{Signal, SignalStatistics, StatisticsSnapshot};

/// Incremental running and moving statistics over a frame stream.
///
/// Every [`push`](Self::push) is O(1). The moving window covers the last
/// `moving_window / 2 + 1` frames, the newest one included.
#[derive(Clone, Debug)]
pub struct WindowedStatistics {
    window: RingBuffer<Frame>,
    count: u64,
    current: StatisticsSnapshot,
}

/// Window state shared by the three per-signal updates of one push.
#[derive(Clone, Copy, Debug)]
struct Step {
    count: u64,
    window_len: usize,
    evicted: Option<Frame>,
}

impl WindowedStatistics {
    /// # Panics
    /// Panics if `moving_window` is zero.
    pub fn new(moving_window: usize) -> Self {
        assert!(moving_window > 0, "moving window resolution must be positive");
        Self {
            window: RingBuffer::new(moving_window / 2 + 1),
            count: 0,
            current: StatisticsSnapshot::default(),
        }
    }

    /// Number of frames covered by the moving statistics once saturated.
    pub fn window_len(&self) -> usize {
        self.window.capacity()
    }

    /// Frames pushed so far.
    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn push(&mut self, frame: &Frame) {
        self.count += 1;
        let evicted = if self.window.is_saturated() {
            self.window.get_from_oldest(0).ok().copied()
        } else {
            None
        };
        let step = Step {
            count: self.count,
            window_len: self.window.live_count(),
            evicted,
        };
        let prev = self.current;

        let (brightness, (color_difference, binary_threshold_difference)) = rayon::join(
            || update(&prev.brightness, Signal::Brightness, frame, step),
            || {
                rayon::join(
                    || update(&prev.color_difference, Signal::ColorDifference, frame, step),
                    || {
                        update(
                            &prev.binary_threshold_difference,
                            Signal::BinaryThresholdDifference,
                            frame,
                            step,
                        )
                    },
                )
            },
        );

        self.current = StatisticsSnapshot {
            brightness,
            color_difference,
            binary_threshold_difference,
        };
        self.window.push(*frame);
    }

    /// Latest snapshot. All zeros before the first push.
    pub fn peek(&self) -> StatisticsSnapshot {
        self.current
    }
}

fn update(prev: &SignalStatistics, signal: Signal, frame: &Frame, step: Step) -> SignalStatistics {
    let x = signal.value(frame);
    if step.count == 1 {
        return SignalStatistics::first(x);
    }

    let (running_mean, running_stddev) =
        welford(prev.running_mean, prev.running_stddev, step.count as f64, x);

    let (moving_mean, moving_stddev) = match step.evicted {
        None => welford(
            prev.moving_mean,
            prev.moving_stddev,
            (step.window_len + 1) as f64,
            x,
        ),
        Some(old) => slide(
            prev.moving_mean,
            prev.moving_stddev,
            step.window_len as f64,
            x,
            signal.value(&old),
        ),
    };

    SignalStatistics {
        running_mean,
        running_stddev,
        min: prev.min.min(x),
        max: prev.max.max(x),
        moving_mean,
        moving_stddev,
    }
}

/// Fold `x` into a mean/stddev pair that covered `n - 1` values.
fn welford(mean: f64, stddev: f64, n: f64, x: f64) -> (f64, f64) {
    let next_mean = mean + (x - mean) / n;
    let variance = ((n - 1.0) * stddev * stddev + (x - mean) * (x - next_mean)) / n;
    (next_mean, variance.max(0.0).sqrt())
}

/// Replace `old` with `x` in a full window of `n` values.
fn slide(mean: f64, stddev: f64, n: f64, x: f64, old: f64) -> (f64, f64) {
    let next_mean = mean + (x - old) / n;
    let variance = stddev * stddev + (x - old) * (x - next_mean + old - mean) / n;
    (next_mean, variance.max(0.0).sqrt())
}
