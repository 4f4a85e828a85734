use std::collections::BTreeSet;

use tracing::debug;

use crate::consts::DETECTION_WINDOW;
use crate::decaying_set::DecayingSet;
use crate::error::{Result, StrikeError};
use crate::frame::Frame;
use crate::ring_buffer::RingBuffer;
use crate::statistics::StatisticsSnapshot;

use super::classify::{classify, ClassificationElement};
use super::config::{ClassificationStrategy, Thresholds};

/// Apply the bridging rule to four consecutive full-match flags.
///
/// Interior positions are rescued when enclosed by matches on both sides
/// within the window; the outer positions only confirm themselves.
pub fn smooth_window(matches: [bool; DETECTION_WINDOW]) -> [bool; DETECTION_WINDOW] {
    let [w0, w1, w2, w3] = matches;
    [
        w0,
        w1 || (w0 && w3) || (w0 && w2),
        w2 || (w1 && w3) || (w0 && w3),
        w3,
    ]
}

#[derive(Clone, Debug)]
enum Sink {
    /// Every confirmed 0-based index of the run.
    Batch(BTreeSet<usize>),
    /// Bounded record of already reported 0-based indices.
    Stream(DecayingSet<usize>),
}

/// Smooths noisy per-frame classifications into confirmed detections.
///
/// Frames are classified against the thresholds and kept in a window of
/// the last four classifications; [`smooth_window`] decides which of them
/// are confirmed. Indices reported to callers are 0-based.
#[derive(Clone, Debug)]
pub struct DetectionBuffer {
    thresholds: Thresholds,
    strategy: ClassificationStrategy,
    window: RingBuffer<ClassificationElement>,
    /// Most recently committed ordinals, checked before committing again.
    recent: RingBuffer<u32>,
    /// Ordinal of the last accepted element, 0 before the first.
    last_ordinal: u32,
    sink: Sink,
}

impl DetectionBuffer {
    /// Buffer for offline runs; read the result with [`resolve`](Self::resolve).
    pub fn new(thresholds: Thresholds, strategy: ClassificationStrategy) -> Self {
        Self::with_sink(thresholds, strategy, Sink::Batch(BTreeSet::new()))
    }

    /// Buffer for unbounded streams. Reported indices are remembered in a
    /// [`DecayingSet`] with the given `decay` instead of a growing set.
    ///
    /// # Panics
    /// Panics if `decay` is zero.
    pub fn streaming(
        thresholds: Thresholds,
        strategy: ClassificationStrategy,
        decay: usize,
    ) -> Self {
        Self::with_sink(thresholds, strategy, Sink::Stream(DecayingSet::new(decay)))
    }

    fn with_sink(thresholds: Thresholds, strategy: ClassificationStrategy, sink: Sink) -> Self {
        Self {
            thresholds,
            strategy,
            window: RingBuffer::new(DETECTION_WINDOW),
            recent: RingBuffer::new(DETECTION_WINDOW),
            last_ordinal: 0,
            sink,
        }
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn strategy(&self) -> ClassificationStrategy {
        self.strategy
    }

    /// Classify and buffer a frame.
    pub fn push(&mut self, frame: &Frame, snapshot: &StatisticsSnapshot) -> Result<()> {
        self.push_and_resolve(frame, snapshot).map(|_| ())
    }

    /// Classify and buffer a frame, returning the 0-based indices that
    /// became confirmed with this frame and were not reported before.
    pub fn push_and_resolve(
        &mut self,
        frame: &Frame,
        snapshot: &StatisticsSnapshot,
    ) -> Result<Vec<usize>> {
        let element = classify(frame, snapshot, &self.thresholds, self.strategy);
        self.push_classification(element)
    }

    /// Buffer an already computed classification.
    pub fn push_classification(&mut self, element: ClassificationElement) -> Result<Vec<usize>> {
        // Ordinals are 1-based, so an empty buffer expects at least 1
        if element.ordinal_number <= self.last_ordinal {
            return Err(StrikeError::OrdinalOutOfOrder {
                expected: self.last_ordinal.saturating_add(1),
                got: element.ordinal_number,
            });
        }
        self.last_ordinal = element.ordinal_number;
        self.window.push(element);

        let mut fresh = Vec::new();
        for ordinal in self.confirmed() {
            if self.recent.iter().any(|&o| o == ordinal) {
                continue;
            }
            self.recent.push(ordinal);
            let index = (ordinal - 1) as usize;
            match &mut self.sink {
                Sink::Batch(set) => {
                    if set.insert(index) {
                        fresh.push(index);
                    }
                }
                Sink::Stream(seen) => {
                    if !seen.contains(&index) {
                        seen.add(index);
                        fresh.push(index);
                    }
                }
            }
        }
        if !fresh.is_empty() {
            debug!(ordinal = element.ordinal_number, indices = ?fresh, "Detections confirmed");
        }
        Ok(fresh)
    }

    /// Ordinals in the current window that the smoothing rule confirms.
    fn confirmed(&self) -> Vec<u32> {
        if self.window.live_count() < DETECTION_WINDOW {
            return self
                .window
                .iter()
                .filter(|e| e.is_full_match())
                .map(|e| e.ordinal_number)
                .collect();
        }

        let elements: Vec<&ClassificationElement> = self.window.iter().collect();
        let flags = smooth_window([
            elements[0].is_full_match(),
            elements[1].is_full_match(),
            elements[2].is_full_match(),
            elements[3].is_full_match(),
        ]);
        elements
            .iter()
            .zip(flags)
            .filter(|(_, confirmed)| *confirmed)
            .map(|(e, _)| e.ordinal_number)
            .collect()
    }

    /// Confirmed 0-based frame indices in ascending order.
    ///
    /// In streaming mode only indices still remembered by the decaying set
    /// are returned.
    pub fn resolve(&self) -> Vec<usize> {
        match &self.sink {
            Sink::Batch(set) => set.iter().copied().collect(),
            Sink::Stream(seen) => {
                let mut values = seen.values();
                values.sort_unstable();
                values
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bridging_table() {
        assert_eq!(smooth_window([true, false, true, false]), [true, true, true, false]);
        assert_eq!(smooth_window([false, true, false, true]), [false, true, true, true]);
        assert_eq!(smooth_window([false, false, true, false]), [false, false, true, false]);
    }
}
