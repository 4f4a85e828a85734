/// ITU-R BT.601 luma coefficient for the red channel (binarization grayscale).
pub const LUMA_R: f64 = 0.299;

/// ITU-R BT.601 luma coefficient for the green channel.
pub const LUMA_G: f64 = 0.587;

/// ITU-R BT.601 luma coefficient for the blue channel.
pub const LUMA_B: f64 = 0.114;

/// Rec. 709 / sRGB relative luminance coefficient for linear red.
pub const LUMINANCE_R: f64 = 0.2126;

/// Rec. 709 / sRGB relative luminance coefficient for linear green.
pub const LUMINANCE_G: f64 = 0.7152;

/// Rec. 709 / sRGB relative luminance coefficient for linear blue.
pub const LUMINANCE_B: f64 = 0.0722;

/// CIE constant epsilon (216 / 24389): below this, lightness is linear in Y.
pub const CIE_EPSILON: f64 = 216.0 / 24389.0;

/// CIE constant kappa (24389 / 27).
pub const CIE_KAPPA: f64 = 24389.0 / 27.0;

/// Bytes per RGBA pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// Maximum summed per-channel delta of one pixel (255 per RGB channel).
pub const MAX_COLOR_DELTA: f64 = 255.0 * 3.0;

/// Number of classifications held by the detection smoothing window.
pub const DETECTION_WINDOW: usize = 4;

/// Fixed marker repeated between every field of the cache envelope.
pub const CACHE_MAGIC: [u8; 4] = *b"LTNG";

/// Current cache format version.
pub const CACHE_VERSION: u8 = 1;

/// Raw checksum length in the cache envelope (40 hex characters).
pub const CACHE_CHECKSUM_LEN: usize = 20;

/// Compression flag for a plain payload.
pub const CACHE_PLAIN: u8 = 0xF0;

/// Compression flag for a zlib payload.
pub const CACHE_COMPRESSED: u8 = 0xF1;

/// Size of one encoded frame record: u32 ordinal + three f64 signals.
pub const CACHE_RECORD_SIZE: usize = 4 + 8 * 3;

/// File extension appended to the input path for the default cache location.
pub const CACHE_EXTENSION: &str = "strike-cache";

/// Default moving-window resolution.
pub const DEFAULT_MOVING_WINDOW: usize = 20;

/// Default grayscale cutoff used to binarize pixels.
pub const DEFAULT_BINARY_THRESHOLD: f64 = 0.5;

/// Default stream-mode dedup horizon for the decaying set.
pub const DEFAULT_DECAY: usize = 256;

/// Default brightness threshold above the baseline.
pub const DEFAULT_BRIGHTNESS_THRESHOLD: f64 = 0.05;

/// Default color-difference threshold above the baseline.
pub const DEFAULT_COLOR_DIFFERENCE_THRESHOLD: f64 = 0.04;

/// Default binary-threshold-difference threshold above the baseline.
pub const DEFAULT_BINARY_DIFFERENCE_THRESHOLD: f64 = 0.02;

/// Number of running standard deviations used when thresholds are derived
/// from the analyzed data.
pub const AUTO_THRESHOLD_SIGMA: f64 = 3.0;
