pub mod snapshot;
pub mod windowed;

pub use snapshot::{Signal, SignalStatistics, StatisticsSnapshot};
pub use windowed::WindowedStatistics;
