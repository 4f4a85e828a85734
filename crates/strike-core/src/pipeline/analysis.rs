use tracing::{debug, info};

use crate::consts::{AUTO_THRESHOLD_SIGMA, BYTES_PER_PIXEL};
use crate::detection::{DetectionBuffer, Thresholds};
use crate::error::{Result, StrikeError};
use crate::frame::{Frame, FrameCollection};
use crate::io::FrameSource;
use crate::kernel;
use crate::ring_buffer::RingBuffer;
use crate::statistics::{Signal, StatisticsSnapshot, WindowedStatistics};

use super::config::DetectionConfig;
use super::types::{DetectionReport, PipelineStage, ProgressReporter};

/// Pulls raw frames from a source and turns them into [`Frame`] records.
///
/// The current and previous pixel buffers live in a two-slot pre-saturated
/// ring and are overwritten in place, so no per-frame allocation happens
/// once both slots have grown to frame size.
pub(crate) struct FeatureStream<'a, S: FrameSource + ?Sized> {
    source: &'a mut S,
    pixels: RingBuffer<Vec<u8>>,
    frame_bytes: usize,
    ordinal: u32,
    binary_threshold: f64,
}

impl<'a, S: FrameSource + ?Sized> FeatureStream<'a, S> {
    pub(crate) fn new(source: &'a mut S, binary_threshold: f64) -> Result<Self> {
        let (width, height) = source.dimensions();
        let frame_bytes = width as usize * height as usize * BYTES_PER_PIXEL;
        if frame_bytes == 0 {
            return Err(StrikeError::InvalidDimensions { width, height });
        }
        Ok(Self {
            source,
            pixels: RingBuffer::saturated(vec![
                Vec::with_capacity(frame_bytes),
                Vec::with_capacity(frame_bytes),
            ]),
            frame_bytes,
            ordinal: 0,
            binary_threshold,
        })
    }

    pub(crate) fn len_hint(&self) -> Option<usize> {
        self.source.len_hint()
    }

    /// Analyze the next frame, or `None` at the end of the source.
    pub(crate) fn next_frame(&mut self) -> Result<Option<Frame>> {
        let slot = self.pixels.push_for_mutation();
        if !self.source.next_frame(slot)? {
            return Ok(None);
        }
        if slot.len() != self.frame_bytes {
            let (width, height) = self.source.dimensions();
            return Err(StrikeError::Source(format!(
                "frame {} has {} bytes, expected {} for {width}x{height} RGBA",
                self.ordinal + 1,
                slot.len(),
                self.frame_bytes
            )));
        }
        self.ordinal += 1;

        let current = self.pixels.get_from_newest(0)?;
        let previous = if self.ordinal > 1 {
            Some(self.pixels.get_from_newest(1)?.as_slice())
        } else {
            None
        };
        Ok(Some(kernel::extract(
            current,
            previous,
            self.ordinal,
            self.binary_threshold,
        )))
    }
}

/// Run the feature kernel over every frame of `source` and return the
/// locked collection.
pub fn analyze<S: FrameSource + ?Sized>(
    source: &mut S,
    binary_threshold: f64,
    reporter: &dyn ProgressReporter,
) -> Result<FrameCollection> {
    let mut stream = FeatureStream::new(source, binary_threshold)?;
    let hint = stream.len_hint();
    let mut collection = FrameCollection::with_capacity(hint.unwrap_or(0));

    reporter.begin_stage(PipelineStage::Analyzing, hint);
    let mut done = 0;
    while let Some(frame) = stream.next_frame()? {
        collection.push(frame)?;
        done += 1;
        reporter.advance(done);
    }
    reporter.finish_stage();

    collection.lock();
    info!(frames = done, "Frame analysis complete");
    Ok(collection)
}

/// One statistics snapshot per frame, in frame order.
///
/// # Panics
/// Panics if `moving_window` is zero.
pub fn compute_statistics(frames: &[Frame], moving_window: usize) -> Vec<StatisticsSnapshot> {
    let mut stats = WindowedStatistics::new(moving_window);
    frames
        .iter()
        .map(|frame| {
            stats.push(frame);
            stats.peek()
        })
        .collect()
}

/// Thresholds derived from the final running statistics: a fixed number
/// of running standard deviations per signal.
pub fn auto_thresholds(last: &StatisticsSnapshot) -> Thresholds {
    let derive = |signal: Signal| AUTO_THRESHOLD_SIGMA * last.signal(signal).running_stddev;
    Thresholds::new(
        derive(Signal::Brightness),
        derive(Signal::ColorDifference),
        derive(Signal::BinaryThresholdDifference),
    )
}

/// Classify and smooth an analyzed collection.
pub fn detect(
    collection: &FrameCollection,
    config: &DetectionConfig,
    reporter: &dyn ProgressReporter,
) -> Result<DetectionReport> {
    let frames = collection.get_all()?;

    reporter.begin_stage(PipelineStage::Statistics, Some(frames.len()));
    let snapshots = compute_statistics(frames, config.moving_window);
    reporter.finish_stage();

    let thresholds = match (config.auto_thresholds, snapshots.last()) {
        (true, Some(last)) => {
            let derived = auto_thresholds(last);
            debug!(thresholds = %derived, "Derived thresholds");
            derived
        }
        _ => config.thresholds,
    };

    reporter.begin_stage(PipelineStage::Detection, Some(frames.len()));
    let mut buffer = DetectionBuffer::new(thresholds, config.strategy);
    for (i, (frame, snapshot)) in frames.iter().zip(&snapshots).enumerate() {
        buffer.push(frame, snapshot)?;
        reporter.advance(i + 1);
    }
    reporter.finish_stage();

    Ok(DetectionReport {
        detected: buffer.resolve(),
        thresholds,
        frame_count: frames.len(),
        from_cache: false,
    })
}
