use std::path::PathBuf;

use crate::error::{Result, StrikeError};

/// One analyzed video frame.
///
/// Signals are normalized to [0.0, 1.0]. The ordinal number is 1-based.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    ordinal_number: u32,
    brightness: f64,
    color_difference: f64,
    binary_threshold_difference: f64,
}

impl Frame {
    pub fn new(
        ordinal_number: u32,
        brightness: f64,
        color_difference: f64,
        binary_threshold_difference: f64,
    ) -> Self {
        Self {
            ordinal_number,
            brightness,
            color_difference,
            binary_threshold_difference,
        }
    }

    pub fn ordinal_number(&self) -> u32 {
        self.ordinal_number
    }

    /// 0-based position of the frame in its source sequence.
    pub fn index(&self) -> usize {
        self.ordinal_number.saturating_sub(1) as usize
    }

    pub fn brightness(&self) -> f64 {
        self.brightness
    }

    pub fn color_difference(&self) -> f64 {
        self.color_difference
    }

    pub fn binary_threshold_difference(&self) -> f64 {
        self.binary_threshold_difference
    }
}

/// Append-only, ordered sequence of frames.
///
/// Open collections accept pushes and reject reads; locked collections
/// reject pushes and accept reads. Locking cannot be undone.
#[derive(Clone, Debug, Default)]
pub struct FrameCollection {
    frames: Vec<Frame>,
    locked: bool,
}

impl FrameCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an open collection with storage pre-allocated for `capacity`
    /// frames. The collection still grows past the hint.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            frames: Vec::with_capacity(capacity),
            locked: false,
        }
    }

    /// Append a frame. Its ordinal number must be exactly `len + 1`.
    pub fn push(&mut self, frame: Frame) -> Result<()> {
        if self.locked {
            return Err(StrikeError::CollectionLocked);
        }
        let expected = self.frames.len() as u32 + 1;
        if frame.ordinal_number() != expected {
            return Err(StrikeError::OrdinalOutOfOrder {
                expected,
                got: frame.ordinal_number(),
            });
        }
        self.frames.push(frame);
        Ok(())
    }

    pub fn lock(&mut self) {
        self.locked = true;
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn count(&self) -> Result<usize> {
        self.ensure_locked()?;
        Ok(self.frames.len())
    }

    pub fn get_all(&self) -> Result<&[Frame]> {
        self.ensure_locked()?;
        Ok(&self.frames)
    }

    pub fn get(&self, index: usize) -> Result<&Frame> {
        let frames = self.get_all()?;
        frames.get(index).ok_or(StrikeError::FrameIndexOutOfRange {
            index,
            total: frames.len(),
        })
    }

    fn ensure_locked(&self) -> Result<()> {
        if self.locked {
            Ok(())
        } else {
            Err(StrikeError::CollectionNotLocked)
        }
    }
}

/// Color/Bayer mode of SER source data.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum ColorMode {
    Mono,
    BayerRGGB,
    BayerGRBG,
    BayerGBRG,
    BayerBGGR,
    RGB,
    BGR,
}

impl std::fmt::Display for ColorMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mono => write!(f, "Mono"),
            Self::BayerRGGB => write!(f, "Bayer RGGB"),
            Self::BayerGRBG => write!(f, "Bayer GRBG"),
            Self::BayerGBRG => write!(f, "Bayer GBRG"),
            Self::BayerBGGR => write!(f, "Bayer BGGR"),
            Self::RGB => write!(f, "RGB"),
            Self::BGR => write!(f, "BGR"),
        }
    }
}

/// Metadata about a frame source.
#[derive(Clone, Debug)]
pub struct SourceInfo {
    pub path: PathBuf,
    pub kind: String,
    pub total_frames: Option<usize>,
    pub width: u32,
    pub height: u32,
}
