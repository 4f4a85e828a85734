use crate::detection::Thresholds;

/// Pipeline processing stage, used for progress reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineStage {
    LoadingCache,
    Analyzing,
    Statistics,
    Detection,
    WritingCache,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LoadingCache => write!(f, "Loading cache"),
            Self::Analyzing => write!(f, "Analyzing frames"),
            Self::Statistics => write!(f, "Computing statistics"),
            Self::Detection => write!(f, "Detecting strikes"),
            Self::WritingCache => write!(f, "Writing cache"),
        }
    }
}

/// Thread-safe progress reporting for the pipeline.
///
/// All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    /// A new stage has started. `total_items` is the frame count, if known.
    fn begin_stage(&self, _stage: PipelineStage, _total_items: Option<usize>) {}

    /// `items_done` work items of the current stage have completed.
    fn advance(&self, _items_done: usize) {}

    /// The current stage is finished.
    fn finish_stage(&self) {}
}

pub struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}

/// Outcome of a batch run.
#[derive(Clone, Debug)]
pub struct DetectionReport {
    /// Confirmed 0-based frame indices, ascending.
    pub detected: Vec<usize>,
    /// Thresholds the frames were classified with.
    pub thresholds: Thresholds,
    pub frame_count: usize,
    /// The frame analysis was restored from the cache.
    pub from_cache: bool,
}

/// Outcome of a stream run.
#[derive(Clone, Debug, Default)]
pub struct StreamSummary {
    pub frames_processed: usize,
    pub detections_reported: usize,
}
