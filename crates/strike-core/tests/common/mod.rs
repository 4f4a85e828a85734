use strike_core::io::ser::SER_HEADER_SIZE;

/// A `width` x `height` RGBA frame filled with one color.
pub fn solid_frame(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    let pixels = width as usize * height as usize;
    let mut buf = Vec::with_capacity(pixels * 4);
    for _ in 0..pixels {
        buf.extend_from_slice(&[rgb[0], rgb[1], rgb[2], 255]);
    }
    buf
}

/// Deterministic pseudo-random RGBA frame.
pub fn noise_frame(width: u32, height: u32, seed: u32) -> Vec<u8> {
    let mut state = seed.wrapping_mul(2_654_435_761).wrapping_add(1);
    let mut buf = Vec::with_capacity(width as usize * height as usize * 4);
    for _ in 0..width as usize * height as usize {
        for _ in 0..3 {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            buf.push((state >> 24) as u8);
        }
        buf.push(255);
    }
    buf
}

/// Dark frames with full-white flashes at the given 0-based indices.
pub fn flash_sequence(width: u32, height: u32, count: usize, flashes: &[usize]) -> Vec<Vec<u8>> {
    (0..count)
        .map(|i| {
            if flashes.contains(&i) {
                solid_frame(width, height, [255, 255, 255])
            } else {
                solid_frame(width, height, [20, 20, 20])
            }
        })
        .collect()
}

/// Build a SER header with configurable bit depth and color mode.
///
/// `color_id`: 0=MONO, 8=BAYER_RGGB, 100=RGB, 101=BGR
pub fn build_ser_header(
    width: u32,
    height: u32,
    bit_depth: u32,
    num_frames: usize,
    color_id: i32,
) -> Vec<u8> {
    let mut buf = Vec::with_capacity(SER_HEADER_SIZE);

    // Magic (14 bytes)
    buf.extend_from_slice(b"LUCAM-RECORDER");
    // LuID
    buf.extend_from_slice(&0i32.to_le_bytes());
    // ColorID
    buf.extend_from_slice(&color_id.to_le_bytes());
    // LittleEndian = 0 (little-endian per Siril convention)
    buf.extend_from_slice(&0i32.to_le_bytes());
    buf.extend_from_slice(&(width as i32).to_le_bytes());
    buf.extend_from_slice(&(height as i32).to_le_bytes());
    buf.extend_from_slice(&(bit_depth as i32).to_le_bytes());
    buf.extend_from_slice(&(num_frames as i32).to_le_bytes());
    // Observer, Instrument, Telescope (40 bytes each)
    buf.extend_from_slice(&[0u8; 120]);
    // DateTime, DateTimeUTC
    buf.extend_from_slice(&0u64.to_le_bytes());
    buf.extend_from_slice(&0u64.to_le_bytes());

    assert_eq!(buf.len(), SER_HEADER_SIZE);
    buf
}

/// Write bytes to a temporary file that lives as long as the handle.
pub fn write_temp(data: &[u8], suffix: &str) -> tempfile::NamedTempFile {
    use std::io::Write;
    let mut f = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("create temp file");
    f.write_all(data).expect("write data");
    f.flush().expect("flush");
    f
}
