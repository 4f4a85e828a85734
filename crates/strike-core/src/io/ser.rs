use std::fs::File;
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};
use memmap2::Mmap;

use crate::consts::BYTES_PER_PIXEL;
use crate::error::{Result, StrikeError};
use crate::frame::ColorMode;

use super::source::FrameSource;

pub const SER_HEADER_SIZE: usize = 178;
pub const SER_MAGIC: &[u8; 14] = b"LUCAM-RECORDER";

/// SER file header (178 bytes).
#[derive(Clone, Debug)]
pub struct SerHeader {
    pub color_id: i32,
    pub little_endian: bool,
    pub width: u32,
    pub height: u32,
    pub pixel_depth: u32,
    pub frame_count: u32,
}

impl SerHeader {
    /// Bytes per pixel plane (1 for 8-bit, 2 for 9-16 bit).
    pub fn bytes_per_pixel_plane(&self) -> usize {
        if self.pixel_depth <= 8 { 1 } else { 2 }
    }

    /// Number of planes per pixel (1 for mono/bayer, 3 for RGB/BGR).
    pub fn planes_per_pixel(&self) -> usize {
        match self.color_id {
            100 | 101 => 3,
            _ => 1,
        }
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Total bytes per frame, or `None` when it does not fit in `usize`.
    pub fn frame_byte_size(&self) -> Option<usize> {
        let pixels = (self.width as usize).checked_mul(self.height as usize)?;
        pixels.checked_mul(self.bytes_per_pixel_plane() * self.planes_per_pixel())
    }

    pub fn color_mode(&self) -> ColorMode {
        match self.color_id {
            8 => ColorMode::BayerRGGB,
            9 => ColorMode::BayerGRBG,
            10 => ColorMode::BayerGBRG,
            11 => ColorMode::BayerBGGR,
            100 => ColorMode::RGB,
            101 => ColorMode::BGR,
            _ => ColorMode::Mono,
        }
    }
}

/// Memory-mapped SER file reader.
pub struct SerReader {
    mmap: Mmap,
    pub header: SerHeader,
    frame_bytes: usize,
}

impl SerReader {
    /// Open a SER file and parse its header.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let mmap = unsafe { Mmap::map(&file)? };

        if mmap.len() < SER_HEADER_SIZE {
            return Err(StrikeError::InvalidSer(
                "File too small for SER header".into(),
            ));
        }

        if &mmap[0..14] != SER_MAGIC {
            return Err(StrikeError::InvalidSer(
                "Missing LUCAM-RECORDER magic".into(),
            ));
        }

        let header = parse_header(&mmap[..SER_HEADER_SIZE])?;

        let frame_bytes = header.frame_byte_size().ok_or_else(|| {
            StrikeError::InvalidSer(format!(
                "Frame size of {}x{} overflows",
                header.width, header.height
            ))
        })?;
        let expected_data_size = frame_bytes
            .checked_mul(header.frame_count as usize)
            .and_then(|data| data.checked_add(SER_HEADER_SIZE))
            .ok_or_else(|| {
                StrikeError::InvalidSer(format!(
                    "Data size of {} frames overflows",
                    header.frame_count
                ))
            })?;
        if mmap.len() < expected_data_size {
            return Err(StrikeError::InvalidSer(format!(
                "File truncated: expected at least {} bytes, got {}",
                expected_data_size,
                mmap.len()
            )));
        }

        Ok(Self {
            mmap,
            header,
            frame_bytes,
        })
    }

    pub fn frame_count(&self) -> usize {
        self.header.frame_count as usize
    }

    /// Raw bytes of a single frame, borrowed from the mapping.
    pub fn frame_raw(&self, index: usize) -> Result<&[u8]> {
        let count = self.frame_count();
        if index >= count {
            return Err(StrikeError::FrameIndexOutOfRange {
                index,
                total: count,
            });
        }
        let offset = SER_HEADER_SIZE + index * self.frame_bytes;
        let end = offset + self.frame_bytes;
        Ok(&self.mmap[offset..end])
    }

    /// Decode frame `index` into `buffer` as RGBA8.
    ///
    /// Mono and raw Bayer data are replicated into gray pixels; 16-bit
    /// samples are rescaled to 8 bits.
    pub fn read_frame_rgba(&self, index: usize, buffer: &mut Vec<u8>) -> Result<()> {
        let raw = self.frame_raw(index)?;
        let header = &self.header;
        let bps = header.bytes_per_pixel_plane();
        let planes = header.planes_per_pixel();
        let mode = header.color_mode();
        let max_val = ((1u32 << header.pixel_depth.clamp(1, 16)) - 1).max(1);
        let sample = |idx: usize| -> u8 {
            let v = if bps == 1 {
                raw[idx] as u32
            } else {
                let pair = [raw[idx], raw[idx + 1]];
                if header.little_endian {
                    u16::from_le_bytes(pair) as u32
                } else {
                    u16::from_be_bytes(pair) as u32
                }
            };
            ((v.min(max_val) * 255 + max_val / 2) / max_val) as u8
        };

        buffer.clear();
        buffer.reserve(header.pixel_count() * BYTES_PER_PIXEL);
        for pixel in 0..header.pixel_count() {
            let base = pixel * planes * bps;
            let (r, g, b) = match mode {
                ColorMode::RGB => (sample(base), sample(base + bps), sample(base + 2 * bps)),
                ColorMode::BGR => (sample(base + 2 * bps), sample(base + bps), sample(base)),
                _ => {
                    let v = sample(base);
                    (v, v, v)
                }
            };
            buffer.extend_from_slice(&[r, g, b, 255]);
        }
        Ok(())
    }
}

fn parse_header(buf: &[u8]) -> Result<SerHeader> {
    let mut cursor = std::io::Cursor::new(&buf[14..]); // skip magic

    let _lu_id = cursor.read_i32::<LittleEndian>()?;
    let color_id = cursor.read_i32::<LittleEndian>()?;
    let le_flag = cursor.read_i32::<LittleEndian>()?;
    let width = read_unsigned(&mut cursor, "width")?;
    let height = read_unsigned(&mut cursor, "height")?;
    let pixel_depth = read_unsigned(&mut cursor, "pixel depth")?;
    let frame_count = read_unsigned(&mut cursor, "frame count")?;

    if width == 0 || height == 0 {
        return Err(StrikeError::InvalidDimensions { width, height });
    }
    if pixel_depth == 0 || pixel_depth > 16 {
        return Err(StrikeError::InvalidSer(format!(
            "Unsupported pixel depth {pixel_depth}"
        )));
    }

    // Follow Siril's convention: 0 means little-endian.
    let little_endian = le_flag != 1;

    Ok(SerHeader {
        color_id,
        little_endian,
        width,
        height,
        pixel_depth,
        frame_count,
    })
}

/// Header fields are stored as `i32`; negative values are corrupt.
fn read_unsigned(cursor: &mut std::io::Cursor<&[u8]>, field: &str) -> Result<u32> {
    let value = cursor.read_i32::<LittleEndian>()?;
    u32::try_from(value)
        .map_err(|_| StrikeError::InvalidSer(format!("Negative {field} {value} in header")))
}

/// SER video as a [`FrameSource`].
pub struct SerSource {
    reader: SerReader,
    next: usize,
}

impl SerSource {
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self {
            reader: SerReader::open(path)?,
            next: 0,
        })
    }

    pub fn header(&self) -> &SerHeader {
        &self.reader.header
    }
}

impl FrameSource for SerSource {
    fn dimensions(&self) -> (u32, u32) {
        (self.reader.header.width, self.reader.header.height)
    }

    fn len_hint(&self) -> Option<usize> {
        Some(self.reader.frame_count())
    }

    fn kind(&self) -> &str {
        "SER video"
    }

    fn next_frame(&mut self, buffer: &mut Vec<u8>) -> Result<bool> {
        if self.next >= self.reader.frame_count() {
            return Ok(false);
        }
        self.reader.read_frame_rgba(self.next, buffer)?;
        self.next += 1;
        Ok(true)
    }
}
