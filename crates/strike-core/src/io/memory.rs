use std::collections::VecDeque;

use crate::consts::BYTES_PER_PIXEL;
use crate::error::{Result, StrikeError};

use super::source::FrameSource;

/// Frames held in memory, handed out in order.
#[derive(Clone, Debug)]
pub struct MemorySource {
    width: u32,
    height: u32,
    frames: VecDeque<Vec<u8>>,
    total: usize,
}

impl MemorySource {
    /// Every frame must hold exactly `width * height * 4` bytes.
    pub fn new(width: u32, height: u32, frames: Vec<Vec<u8>>) -> Result<Self> {
        let expected = width as usize * height as usize * BYTES_PER_PIXEL;
        if expected == 0 || frames.iter().any(|f| f.len() != expected) {
            return Err(StrikeError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            total: frames.len(),
            frames: frames.into(),
        })
    }
}

impl FrameSource for MemorySource {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn len_hint(&self) -> Option<usize> {
        Some(self.total)
    }

    fn kind(&self) -> &str {
        "memory"
    }

    fn next_frame(&mut self, buffer: &mut Vec<u8>) -> Result<bool> {
        match self.frames.pop_front() {
            Some(frame) => {
                buffer.clear();
                buffer.extend_from_slice(&frame);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
