use std::path::Path;

use crate::error::{Result, StrikeError};
use crate::frame::SourceInfo;

use super::image_sequence::ImageSequenceSource;
use super::ser::SerSource;

/// Supplier of raw RGBA frames (4 bytes per pixel, row-major).
pub trait FrameSource {
    /// Frame width and height in pixels.
    fn dimensions(&self) -> (u32, u32);

    /// Total number of frames, when the source knows it up front.
    fn len_hint(&self) -> Option<usize> {
        None
    }

    /// Short human-readable source type.
    fn kind(&self) -> &str {
        "frames"
    }

    /// Fill `buffer` with the next frame's RGBA bytes, resizing it as
    /// needed. Returns `Ok(false)` at the clean end of the sequence.
    fn next_frame(&mut self, buffer: &mut Vec<u8>) -> Result<bool>;
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn dimensions(&self) -> (u32, u32) {
        (**self).dimensions()
    }

    fn len_hint(&self) -> Option<usize> {
        (**self).len_hint()
    }

    fn kind(&self) -> &str {
        (**self).kind()
    }

    fn next_frame(&mut self, buffer: &mut Vec<u8>) -> Result<bool> {
        (**self).next_frame(buffer)
    }
}

/// Open `path` as a SER video (`.ser`) or an image-sequence directory.
pub fn open_source(path: &Path) -> Result<Box<dyn FrameSource>> {
    if path.is_dir() {
        return Ok(Box::new(ImageSequenceSource::open(path)?));
    }
    let is_ser = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("ser"));
    if is_ser {
        return Ok(Box::new(SerSource::open(path)?));
    }
    Err(StrikeError::Source(format!(
        "unsupported input {} (expected a .ser file or an image directory)",
        path.display()
    )))
}

pub fn source_info(path: &Path, source: &dyn FrameSource) -> SourceInfo {
    let (width, height) = source.dimensions();
    SourceInfo {
        path: path.to_path_buf(),
        kind: source.kind().to_string(),
        total_frames: source.len_hint(),
        width,
        height,
    }
}
