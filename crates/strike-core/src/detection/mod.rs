pub mod buffer;
pub mod classify;
pub mod config;

pub use buffer::{smooth_window, DetectionBuffer};
pub use classify::{classify, ClassificationElement};
pub use config::{ClassificationStrategy, Thresholds};
