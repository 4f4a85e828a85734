pub mod analysis;
pub mod config;
mod orchestrator;
mod types;

pub use analysis::{analyze, auto_thresholds, compute_statistics, detect};
pub use orchestrator::{run_batch, run_stream};
pub use types::{DetectionReport, NoOpReporter, PipelineStage, ProgressReporter, StreamSummary};
