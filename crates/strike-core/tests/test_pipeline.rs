mod common;

use std::sync::{Arc, Mutex};

use strike_core::error::StrikeError;
use strike_core::io::{open_source, FrameSource, ImageSequenceSource, MemorySource};
use strike_core::pipeline::config::DetectionConfig;
use strike_core::pipeline::{
    analyze, auto_thresholds, compute_statistics, detect, run_batch, run_stream, NoOpReporter,
    PipelineStage, ProgressReporter,
};

const W: u32 = 8;
const H: u32 = 6;

/// Flashes at 10 and 12 with a dark frame between them.
fn flicker_source() -> MemorySource {
    MemorySource::new(W, H, common::flash_sequence(W, H, 30, &[10, 12])).unwrap()
}

fn empty_source() -> MemorySource {
    MemorySource::new(W, H, Vec::new()).unwrap()
}

fn uncached_config() -> DetectionConfig {
    let mut config = DetectionConfig::new("flicker.ser");
    config.cache.enabled = false;
    config
}

#[derive(Default)]
struct RecordingReporter {
    stages: Mutex<Vec<PipelineStage>>,
}

impl RecordingReporter {
    fn stages(&self) -> Vec<PipelineStage> {
        self.stages.lock().unwrap().clone()
    }
}

impl ProgressReporter for RecordingReporter {
    fn begin_stage(&self, stage: PipelineStage, _total_items: Option<usize>) {
        self.stages.lock().unwrap().push(stage);
    }
}

#[test]
fn test_batch_detects_and_bridges_flicker() {
    let report = run_batch(&uncached_config(), &mut flicker_source(), Arc::new(NoOpReporter)).unwrap();
    assert_eq!(report.detected, vec![10, 11, 12]);
    assert_eq!(report.frame_count, 30);
    assert!(!report.from_cache);
}

#[test]
fn test_quiet_video_has_no_detections() {
    let mut source = MemorySource::new(W, H, common::flash_sequence(W, H, 25, &[])).unwrap();
    let report = run_batch(&uncached_config(), &mut source, Arc::new(NoOpReporter)).unwrap();
    assert!(report.detected.is_empty());
}

#[test]
fn test_stream_matches_batch() {
    let mut reported = Vec::new();
    let summary = run_stream(&uncached_config(), &mut flicker_source(), |i| reported.push(i)).unwrap();
    assert_eq!(reported, vec![10, 11, 12]);
    assert_eq!(summary.frames_processed, 30);
    assert_eq!(summary.detections_reported, 3);
}

#[test]
fn test_stream_and_batch_agree_on_busy_storm() {
    let flashes: Vec<usize> = (0..400).filter(|i| i % 37 == 5 || i % 37 == 7).collect();
    let frames = common::flash_sequence(W, H, 400, &flashes);

    let config = uncached_config();
    let mut batch_source = MemorySource::new(W, H, frames.clone()).unwrap();
    let batch = run_batch(&config, &mut batch_source, Arc::new(NoOpReporter)).unwrap();
    assert!(!batch.detected.is_empty());

    let mut streamed = Vec::new();
    let mut stream_source = MemorySource::new(W, H, frames).unwrap();
    run_stream(&config, &mut stream_source, |i| streamed.push(i)).unwrap();
    streamed.sort_unstable();
    assert_eq!(streamed, batch.detected);
}

#[test]
fn test_stream_rejects_auto_thresholds() {
    let mut config = uncached_config();
    config.auto_thresholds = true;
    let result = run_stream(&config, &mut flicker_source(), |_| {});
    assert!(matches!(result, Err(StrikeError::Config(_))));
}

#[test]
fn test_invalid_config_rejected() {
    let mut config = uncached_config();
    config.moving_window = 0;
    let result = run_batch(&config, &mut flicker_source(), Arc::new(NoOpReporter));
    assert!(matches!(result, Err(StrikeError::Config(_))));
}

#[test]
fn test_auto_thresholds_from_final_statistics() {
    let mut source = flicker_source();
    let collection = analyze(&mut source, 0.5, &NoOpReporter).unwrap();
    let frames = collection.get_all().unwrap();

    let mut config = uncached_config();
    config.auto_thresholds = true;
    let report = detect(&collection, &config, &NoOpReporter).unwrap();

    let snapshots = compute_statistics(frames, config.moving_window);
    let expected = auto_thresholds(snapshots.last().unwrap());
    assert_eq!(report.thresholds, expected);
    assert_eq!(
        expected.brightness,
        3.0 * snapshots.last().unwrap().brightness.running_stddev
    );
    assert!(expected.brightness > 0.0);
}

#[test]
fn test_cache_written_then_reused() {
    let dir = tempfile::tempdir().unwrap();
    let config = DetectionConfig::new(dir.path().join("storm.ser"));
    let cache_path = config.cache_path().unwrap();

    let reporter = Arc::new(RecordingReporter::default());
    let first = run_batch(&config, &mut flicker_source(), reporter.clone()).unwrap();
    assert!(!first.from_cache);
    assert!(cache_path.exists());
    assert_eq!(
        reporter.stages(),
        vec![
            PipelineStage::LoadingCache,
            PipelineStage::Analyzing,
            PipelineStage::WritingCache,
            PipelineStage::Statistics,
            PipelineStage::Detection,
        ]
    );

    // An empty source proves the frames come from the cache
    let reporter = Arc::new(RecordingReporter::default());
    let second = run_batch(&config, &mut empty_source(), reporter.clone()).unwrap();
    assert!(second.from_cache);
    assert_eq!(second.frame_count, 30);
    assert_eq!(second.detected, first.detected);
    assert_eq!(
        reporter.stages(),
        vec![
            PipelineStage::LoadingCache,
            PipelineStage::Statistics,
            PipelineStage::Detection,
        ]
    );
}

#[test]
fn test_stale_cache_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = DetectionConfig::new(dir.path().join("storm.ser"));
    run_batch(&config, &mut flicker_source(), Arc::new(NoOpReporter)).unwrap();

    config.binary_threshold = 0.25;
    let report = run_batch(&config, &mut empty_source(), Arc::new(NoOpReporter)).unwrap();
    assert!(!report.from_cache);
    assert_eq!(report.frame_count, 0);
}

#[test]
fn test_derived_thresholds_share_cache() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = DetectionConfig::new(dir.path().join("storm.ser"));
    config.auto_thresholds = true;
    run_batch(&config, &mut flicker_source(), Arc::new(NoOpReporter)).unwrap();

    config.thresholds.brightness = 0.9;
    let report = run_batch(&config, &mut empty_source(), Arc::new(NoOpReporter)).unwrap();
    assert!(report.from_cache);
}

#[test]
fn test_corrupt_cache_falls_back_to_analysis() {
    let dir = tempfile::tempdir().unwrap();
    let config = DetectionConfig::new(dir.path().join("storm.ser"));
    std::fs::write(config.cache_path().unwrap(), b"garbage").unwrap();

    let report = run_batch(&config, &mut flicker_source(), Arc::new(NoOpReporter)).unwrap();
    assert!(!report.from_cache);
    assert_eq!(report.detected, vec![10, 11, 12]);

    // The cache was rewritten
    let again = run_batch(&config, &mut empty_source(), Arc::new(NoOpReporter)).unwrap();
    assert!(again.from_cache);
}

struct ShortFrames;

impl FrameSource for ShortFrames {
    fn dimensions(&self) -> (u32, u32) {
        (4, 4)
    }

    fn next_frame(&mut self, buffer: &mut Vec<u8>) -> strike_core::error::Result<bool> {
        buffer.clear();
        buffer.resize(12, 0);
        Ok(true)
    }
}

#[test]
fn test_wrong_frame_size_is_an_error() {
    let result = analyze(&mut ShortFrames, 0.5, &NoOpReporter);
    assert!(matches!(result, Err(StrikeError::Source(_))));
}

#[test]
fn test_memory_source_validates_frames() {
    assert!(MemorySource::new(2, 2, vec![vec![0; 16], vec![0; 15]]).is_err());
    assert!(MemorySource::new(0, 2, Vec::new()).is_err());
}

fn write_png(path: &std::path::Path, width: u32, height: u32, rgb: [u8; 3]) {
    let raw = common::solid_frame(width, height, rgb);
    image::RgbaImage::from_raw(width, height, raw)
        .unwrap()
        .save(path)
        .unwrap();
}

#[test]
fn test_image_sequence_source() {
    let dir = tempfile::tempdir().unwrap();
    write_png(&dir.path().join("frame_002.png"), 4, 3, [255, 255, 255]);
    write_png(&dir.path().join("frame_001.png"), 4, 3, [0, 0, 0]);
    write_png(&dir.path().join("frame_003.png"), 4, 3, [0, 0, 0]);
    std::fs::write(dir.path().join("notes.txt"), b"ignored").unwrap();

    let mut source = open_source(dir.path()).unwrap();
    assert_eq!(source.kind(), "image sequence");
    assert_eq!(source.dimensions(), (4, 3));
    assert_eq!(source.len_hint(), Some(3));

    let collection = analyze(&mut source, 0.5, &NoOpReporter).unwrap();
    let frames = collection.get_all().unwrap();
    assert_eq!(frames.len(), 3);
    // Sorted by name: black, white, black
    assert_eq!(frames[0].brightness(), 0.0);
    assert_eq!(frames[1].binary_threshold_difference(), 1.0);
    assert_eq!(frames[2].binary_threshold_difference(), 1.0);
}

#[test]
fn test_image_sequence_size_mismatch() {
    let dir = tempfile::tempdir().unwrap();
    write_png(&dir.path().join("a.png"), 4, 3, [0, 0, 0]);
    write_png(&dir.path().join("b.png"), 3, 3, [0, 0, 0]);

    let mut source = ImageSequenceSource::open(dir.path()).unwrap();
    let result = analyze(&mut source, 0.5, &NoOpReporter);
    assert!(matches!(result, Err(StrikeError::Source(_))));
}

#[test]
fn test_empty_image_directory() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        ImageSequenceSource::open(dir.path()),
        Err(StrikeError::EmptySequence)
    ));
}
