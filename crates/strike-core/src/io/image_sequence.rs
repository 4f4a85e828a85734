use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, StrikeError};

use super::source::FrameSource;

const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "tif", "tiff", "bmp"];

/// Directory of still images read in file-name order.
pub struct ImageSequenceSource {
    paths: Vec<PathBuf>,
    next: usize,
    width: u32,
    height: u32,
}

impl ImageSequenceSource {
    pub fn open(dir: &Path) -> Result<Self> {
        let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && is_image(p))
            .collect();
        paths.sort();

        let first = paths.first().ok_or(StrikeError::EmptySequence)?;
        let (width, height) = image::image_dimensions(first)?;
        if width == 0 || height == 0 {
            return Err(StrikeError::InvalidDimensions { width, height });
        }
        debug!(dir = %dir.display(), frames = paths.len(), "Opened image sequence");

        Ok(Self {
            paths,
            next: 0,
            width,
            height,
        })
    }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| IMAGE_EXTENSIONS.iter().any(|x| x.eq_ignore_ascii_case(e)))
}

impl FrameSource for ImageSequenceSource {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn len_hint(&self) -> Option<usize> {
        Some(self.paths.len())
    }

    fn kind(&self) -> &str {
        "image sequence"
    }

    fn next_frame(&mut self, buffer: &mut Vec<u8>) -> Result<bool> {
        let Some(path) = self.paths.get(self.next) else {
            return Ok(false);
        };
        let image = image::open(path)?.to_rgba8();
        if image.dimensions() != (self.width, self.height) {
            return Err(StrikeError::Source(format!(
                "{} is {}x{}, expected {}x{}",
                path.display(),
                image.width(),
                image.height(),
                self.width,
                self.height
            )));
        }
        buffer.clear();
        buffer.extend_from_slice(image.as_raw());
        self.next += 1;
        Ok(true)
    }
}
