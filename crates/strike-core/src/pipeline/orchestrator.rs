use std::sync::Arc;

use tracing::{info, warn};

use crate::cache::{cache_checksum, load_if_fresh, store};
use crate::detection::DetectionBuffer;
use crate::error::{Result, StrikeError};
use crate::io::FrameSource;
use crate::statistics::WindowedStatistics;

use super::analysis::{analyze, detect, FeatureStream};
use super::config::DetectionConfig;
use super::types::{DetectionReport, PipelineStage, ProgressReporter, StreamSummary};

/// Analyze the whole source, then classify and smooth the frames.
///
/// A fresh cache file replaces the analysis; a stale or unreadable one is
/// ignored. After a fresh analysis the cache is rewritten when enabled.
pub fn run_batch<S: FrameSource + ?Sized>(
    config: &DetectionConfig,
    source: &mut S,
    reporter: Arc<dyn ProgressReporter>,
) -> Result<DetectionReport> {
    config.validate()?;
    let checksum = cache_checksum(config);
    let cache_path = config.cache_path();

    let cached = cache_path.as_deref().and_then(|path| {
        reporter.begin_stage(PipelineStage::LoadingCache, None);
        let loaded = load_if_fresh(path, &checksum);
        reporter.finish_stage();
        loaded
    });

    let from_cache = cached.is_some();
    let collection = match cached {
        Some(collection) => collection,
        None => {
            let collection = analyze(source, config.binary_threshold, reporter.as_ref())?;
            if let Some(path) = &cache_path {
                reporter.begin_stage(PipelineStage::WritingCache, None);
                if let Err(e) = store(path, &collection, &checksum) {
                    warn!(path = %path.display(), error = %e, "Failed to write cache");
                }
                reporter.finish_stage();
            }
            collection
        }
    };

    let mut report = detect(&collection, config, reporter.as_ref())?;
    report.from_cache = from_cache;
    info!(
        frames = report.frame_count,
        detections = report.detected.len(),
        from_cache,
        "Detection complete"
    );
    Ok(report)
}

/// Process the source frame by frame, calling `on_detection` with each
/// newly confirmed 0-based index as soon as it is resolved.
///
/// Memory stays bounded regardless of stream length: duplicate reports are
/// suppressed through a decaying set with the configured `decay`.
pub fn run_stream<S, F>(
    config: &DetectionConfig,
    source: &mut S,
    mut on_detection: F,
) -> Result<StreamSummary>
where
    S: FrameSource + ?Sized,
    F: FnMut(usize),
{
    config.validate()?;
    if config.auto_thresholds {
        return Err(StrikeError::Config(
            "auto thresholds need a full pass and are not available in stream mode".into(),
        ));
    }

    let mut stream = FeatureStream::new(source, config.binary_threshold)?;
    let mut stats = WindowedStatistics::new(config.moving_window);
    let mut buffer = DetectionBuffer::streaming(config.thresholds, config.strategy, config.decay);
    let mut summary = StreamSummary::default();

    while let Some(frame) = stream.next_frame()? {
        stats.push(&frame);
        let snapshot = stats.peek();
        for index in buffer.push_and_resolve(&frame, &snapshot)? {
            summary.detections_reported += 1;
            on_detection(index);
        }
        summary.frames_processed += 1;
    }

    info!(
        frames = summary.frames_processed,
        detections = summary.detections_reported,
        "Stream complete"
    );
    Ok(summary)
}
