use sha2::{Digest, Sha256};

use crate::consts::{CACHE_CHECKSUM_LEN, CACHE_VERSION};
use crate::detection::ClassificationStrategy;
use crate::pipeline::config::DetectionConfig;

/// Cache key for a run: SHA-256 over the options that shape the analysis,
/// truncated to the 20-byte cache field and hex encoded.
///
/// Thresholds only take part when they are configured by hand; derived
/// thresholds are recomputed from the cached frames on every run.
pub fn cache_checksum(config: &DetectionConfig) -> String {
    let mut hasher = Sha256::new();
    hasher.update(b"strike-cache");
    hasher.update([CACHE_VERSION]);
    hasher.update(config.input.to_string_lossy().as_bytes());
    hasher.update([0u8]);
    hasher.update(config.binary_threshold.to_le_bytes());
    hasher.update((config.moving_window as u64).to_le_bytes());
    hasher.update([strategy_tag(config.strategy)]);
    hasher.update([u8::from(config.auto_thresholds)]);
    if !config.auto_thresholds {
        hasher.update(config.thresholds.brightness.to_le_bytes());
        hasher.update(config.thresholds.color_difference.to_le_bytes());
        hasher.update(config.thresholds.binary_threshold_difference.to_le_bytes());
    }
    let digest = hasher.finalize();
    hex::encode(&digest[..CACHE_CHECKSUM_LEN])
}

fn strategy_tag(strategy: ClassificationStrategy) -> u8 {
    match strategy {
        ClassificationStrategy::MovingMean => 0,
        ClassificationStrategy::GlobalMean => 1,
        ClassificationStrategy::Zero => 2,
    }
}
