pub mod extract;
pub mod lightness;

pub use extract::{extract, extract_with_workers, worker_ranges};
pub use lightness::{binarize, fast_cbrt, grayscale, perceptual_lightness, srgb_to_linear};
