mod common;

use strike_core::error::StrikeError;
use strike_core::io::{open_source, FrameSource, SerReader, SerSource};

fn ser_file(
    width: u32,
    height: u32,
    bit_depth: u32,
    color_id: i32,
    frames: &[Vec<u8>],
) -> tempfile::NamedTempFile {
    let mut data = common::build_ser_header(width, height, bit_depth, frames.len(), color_id);
    for frame in frames {
        data.extend_from_slice(frame);
    }
    common::write_temp(&data, ".ser")
}

fn read_all(source: &mut dyn FrameSource) -> Vec<Vec<u8>> {
    let mut out = Vec::new();
    let mut buffer = Vec::new();
    while source.next_frame(&mut buffer).unwrap() {
        out.push(buffer.clone());
    }
    out
}

#[test]
fn test_mono_replicated_to_rgba() {
    let file = ser_file(2, 1, 8, 0, &[vec![10, 200], vec![0, 255]]);
    let mut source = SerSource::open(file.path()).unwrap();
    assert_eq!(source.dimensions(), (2, 1));
    assert_eq!(source.len_hint(), Some(2));
    assert_eq!(source.kind(), "SER video");

    let frames = read_all(&mut source);
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0], vec![10, 10, 10, 255, 200, 200, 200, 255]);
    assert_eq!(frames[1], vec![0, 0, 0, 255, 255, 255, 255, 255]);
}

#[test]
fn test_rgb_and_bgr_channel_order() {
    let rgb = ser_file(1, 1, 8, 100, &[vec![1, 2, 3]]);
    let mut source = SerSource::open(rgb.path()).unwrap();
    assert_eq!(read_all(&mut source), vec![vec![1, 2, 3, 255]]);

    let bgr = ser_file(1, 1, 8, 101, &[vec![1, 2, 3]]);
    let mut source = SerSource::open(bgr.path()).unwrap();
    assert_eq!(read_all(&mut source), vec![vec![3, 2, 1, 255]]);
}

#[test]
fn test_sixteen_bit_rescaled() {
    let mut raw = Vec::new();
    for v in [0u16, 32768, 65535] {
        raw.extend_from_slice(&v.to_le_bytes());
    }
    let file = ser_file(3, 1, 16, 0, &[raw]);
    let mut source = SerSource::open(file.path()).unwrap();
    let frame = &read_all(&mut source)[0];
    assert_eq!(frame[0], 0);
    assert_eq!(frame[4], 128);
    assert_eq!(frame[8], 255);
}

#[test]
fn test_bayer_read_as_gray() {
    let file = ser_file(2, 2, 8, 8, &[vec![10, 20, 30, 40]]);
    let source = SerSource::open(file.path()).unwrap();
    assert_eq!(source.header().color_mode().to_string(), "Bayer RGGB");

    let reader = SerReader::open(file.path()).unwrap();
    let mut buffer = Vec::new();
    reader.read_frame_rgba(0, &mut buffer).unwrap();
    assert_eq!(&buffer[12..16], &[40, 40, 40, 255]);
    assert!(matches!(
        reader.read_frame_rgba(1, &mut buffer),
        Err(StrikeError::FrameIndexOutOfRange { index: 1, total: 1 })
    ));
}

#[test]
fn test_truncated_file_rejected() {
    let mut data = common::build_ser_header(4, 4, 8, 3, 0);
    data.extend_from_slice(&[0u8; 20]);
    let file = common::write_temp(&data, ".ser");
    assert!(matches!(
        SerSource::open(file.path()),
        Err(StrikeError::InvalidSer(_))
    ));
}

#[test]
fn test_negative_header_fields_rejected() {
    // -1 in the signed width and height fields
    let mut data = common::build_ser_header(u32::MAX, u32::MAX, 16, 1, 100);
    data.extend_from_slice(&[0u8; 64]);
    let file = common::write_temp(&data, ".ser");
    assert!(matches!(
        SerSource::open(file.path()),
        Err(StrikeError::InvalidSer(_))
    ));

    let mut data = common::build_ser_header(2, 2, 8, 1, 0);
    data[38..42].copy_from_slice(&(-5i32).to_le_bytes());
    data.extend_from_slice(&[0u8; 4]);
    let file = common::write_temp(&data, ".ser");
    assert!(matches!(
        SerSource::open(file.path()),
        Err(StrikeError::InvalidSer(_))
    ));
}

#[test]
fn test_oversized_frames_rejected() {
    let max = i32::MAX as u32;
    let mut data = common::build_ser_header(max, max, 16, 1, 100);
    data.extend_from_slice(&[0u8; 64]);
    let file = common::write_temp(&data, ".ser");
    assert!(matches!(
        SerSource::open(file.path()),
        Err(StrikeError::InvalidSer(_))
    ));

    let mut data = common::build_ser_header(max, 2, 16, i32::MAX as usize, 100);
    data.extend_from_slice(&[0u8; 64]);
    let file = common::write_temp(&data, ".ser");
    assert!(matches!(
        SerSource::open(file.path()),
        Err(StrikeError::InvalidSer(_))
    ));
}

#[test]
fn test_bad_magic_rejected() {
    let mut data = common::build_ser_header(1, 1, 8, 1, 0);
    data[0] = b'X';
    data.push(0);
    let file = common::write_temp(&data, ".ser");
    assert!(matches!(
        SerSource::open(file.path()),
        Err(StrikeError::InvalidSer(_))
    ));
}

#[test]
fn test_open_source_dispatch() {
    let file = ser_file(1, 1, 8, 0, &[vec![7]]);
    let source = open_source(file.path()).unwrap();
    assert_eq!(source.kind(), "SER video");

    let other = common::write_temp(b"not a video", ".avi");
    assert!(matches!(
        open_source(other.path()),
        Err(StrikeError::Source(_))
    ));
}
