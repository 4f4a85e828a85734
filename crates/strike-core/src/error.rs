use thiserror::Error;

#[derive(Error, Debug)]
pub enum StrikeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid SER file: {0}")]
    InvalidSer(String),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Frame index {index} out of range (total: {total})")]
    FrameIndexOutOfRange { index: usize, total: usize },

    #[error("Offset {offset} is not available (live elements: {live})")]
    OffsetOutOfRange { offset: usize, live: usize },

    #[error("Frame ordinal out of order: expected {expected}, got {got}")]
    OrdinalOutOfOrder { expected: u32, got: u32 },

    #[error("Frame collection is locked")]
    CollectionLocked,

    #[error("Frame collection is not locked")]
    CollectionNotLocked,

    #[error("Invalid cache file: {0}")]
    InvalidCache(String),

    #[error("Invalid checksum: {0}")]
    InvalidChecksum(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Frame source error: {0}")]
    Source(String),

    #[error("Empty frame sequence")]
    EmptySequence,
}

pub type Result<T> = std::result::Result<T, StrikeError>;
