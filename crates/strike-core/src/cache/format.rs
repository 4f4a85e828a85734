use std::io::{self, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;

use crate::consts::{
    CACHE_CHECKSUM_LEN, CACHE_COMPRESSED, CACHE_MAGIC, CACHE_PLAIN, CACHE_RECORD_SIZE,
    CACHE_VERSION,
};
use crate::error::{Result, StrikeError};
use crate::frame::{Frame, FrameCollection};

/// Payload encoding recorded in the cache envelope.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CacheCompression {
    #[default]
    Plain,
    Zlib,
}

impl CacheCompression {
    fn flag(self) -> u8 {
        match self {
            Self::Plain => CACHE_PLAIN,
            Self::Zlib => CACHE_COMPRESSED,
        }
    }
}

/// Write `collection` with a plain payload.
///
/// Layout (little-endian): magic, version, magic, 20-byte checksum, magic,
/// compression flag, magic, u32 payload length, magic, payload. The payload
/// is one 28-byte record per frame: u32 ordinal, then brightness, color
/// difference and binary threshold difference as f64.
pub fn export<W: Write>(writer: &mut W, collection: &FrameCollection, checksum: &str) -> Result<()> {
    export_with(writer, collection, checksum, CacheCompression::Plain)
}

/// Write `collection` with the given payload compression.
pub fn export_with<W: Write>(
    writer: &mut W,
    collection: &FrameCollection,
    checksum: &str,
    compression: CacheCompression,
) -> Result<()> {
    let raw_checksum = decode_checksum(checksum)?;
    let frames = collection.get_all()?;

    let mut payload = Vec::with_capacity(frames.len() * CACHE_RECORD_SIZE);
    for frame in frames {
        payload.write_u32::<LittleEndian>(frame.ordinal_number())?;
        payload.write_f64::<LittleEndian>(frame.brightness())?;
        payload.write_f64::<LittleEndian>(frame.color_difference())?;
        payload.write_f64::<LittleEndian>(frame.binary_threshold_difference())?;
    }

    let data = match compression {
        CacheCompression::Plain => payload,
        CacheCompression::Zlib => {
            let mut encoder = ZlibEncoder::new(Vec::new(), flate2::Compression::default());
            encoder.write_all(&payload)?;
            encoder.finish()?
        }
    };
    let length = u32::try_from(data.len())
        .map_err(|_| StrikeError::InvalidCache(format!("payload too large: {} bytes", data.len())))?;

    writer.write_all(&CACHE_MAGIC)?;
    writer.write_u8(CACHE_VERSION)?;
    writer.write_all(&CACHE_MAGIC)?;
    writer.write_all(&raw_checksum)?;
    writer.write_all(&CACHE_MAGIC)?;
    writer.write_u8(compression.flag())?;
    writer.write_all(&CACHE_MAGIC)?;
    writer.write_u32::<LittleEndian>(length)?;
    writer.write_all(&CACHE_MAGIC)?;
    writer.write_all(&data)?;
    writer.flush()?;
    Ok(())
}

/// Read a cache file back into a locked collection and its checksum
/// (lowercase hex).
///
/// Any magic mismatch, unknown version or compression flag, truncation or
/// malformed payload is rejected with [`StrikeError::InvalidCache`].
pub fn import<R: Read>(reader: &mut R) -> Result<(FrameCollection, String)> {
    let checksum = read_header(reader)?;

    let flag = truncated(reader.read_u8(), "compression flag")?;
    expect_magic(reader)?;
    let length = truncated(reader.read_u32::<LittleEndian>(), "payload length")?;
    expect_magic(reader)?;

    let mut data = Vec::new();
    reader
        .by_ref()
        .take(u64::from(length))
        .read_to_end(&mut data)?;
    if data.len() != length as usize {
        return Err(StrikeError::InvalidCache(format!(
            "payload truncated: expected {length} bytes, got {}",
            data.len()
        )));
    }

    let payload = match flag {
        CACHE_PLAIN => data,
        CACHE_COMPRESSED => {
            let mut inflated = Vec::new();
            ZlibDecoder::new(data.as_slice())
                .read_to_end(&mut inflated)
                .map_err(|e| StrikeError::InvalidCache(format!("corrupt compressed payload: {e}")))?;
            inflated
        }
        other => {
            return Err(StrikeError::InvalidCache(format!(
                "unknown compression flag 0x{other:02X}"
            )))
        }
    };

    Ok((decode_payload(&payload)?, checksum))
}

/// Read only the header and return the stored checksum (lowercase hex).
pub fn read_checksum<R: Read>(reader: &mut R) -> Result<String> {
    read_header(reader)
}

/// Compare the stored checksum with `expected` by reading only the header.
/// Unreadable headers and malformed `expected` strings compare unequal.
pub fn peek_checksum_equal<R: Read>(reader: &mut R, expected: &str) -> bool {
    match read_checksum(reader) {
        Ok(stored) => stored.eq_ignore_ascii_case(expected),
        Err(_) => false,
    }
}

fn read_header<R: Read>(reader: &mut R) -> Result<String> {
    expect_magic(reader)?;
    let version = truncated(reader.read_u8(), "version")?;
    if version != CACHE_VERSION {
        return Err(StrikeError::InvalidCache(format!(
            "unsupported version {version}"
        )));
    }
    expect_magic(reader)?;
    let mut raw = [0u8; CACHE_CHECKSUM_LEN];
    truncated(reader.read_exact(&mut raw), "checksum")?;
    expect_magic(reader)?;
    Ok(hex::encode(raw))
}

fn decode_payload(payload: &[u8]) -> Result<FrameCollection> {
    if payload.len() % CACHE_RECORD_SIZE != 0 {
        return Err(StrikeError::InvalidCache(format!(
            "payload length {} is not a multiple of {CACHE_RECORD_SIZE}",
            payload.len()
        )));
    }
    let mut collection = FrameCollection::with_capacity(payload.len() / CACHE_RECORD_SIZE);
    for mut record in payload.chunks_exact(CACHE_RECORD_SIZE) {
        let frame = Frame::new(
            record.read_u32::<LittleEndian>()?,
            record.read_f64::<LittleEndian>()?,
            record.read_f64::<LittleEndian>()?,
            record.read_f64::<LittleEndian>()?,
        );
        collection
            .push(frame)
            .map_err(|e| StrikeError::InvalidCache(e.to_string()))?;
    }
    collection.lock();
    Ok(collection)
}

fn decode_checksum(checksum: &str) -> Result<[u8; CACHE_CHECKSUM_LEN]> {
    let bytes =
        hex::decode(checksum).map_err(|e| StrikeError::InvalidChecksum(format!("{checksum}: {e}")))?;
    bytes.try_into().map_err(|b: Vec<u8>| {
        StrikeError::InvalidChecksum(format!(
            "expected {CACHE_CHECKSUM_LEN} bytes, got {}",
            b.len()
        ))
    })
}

fn expect_magic<R: Read>(reader: &mut R) -> Result<()> {
    let mut magic = [0u8; 4];
    truncated(reader.read_exact(&mut magic), "magic")?;
    if magic != CACHE_MAGIC {
        return Err(StrikeError::InvalidCache(format!(
            "bad magic {magic:02X?}"
        )));
    }
    Ok(())
}

/// Map an end-of-file while reading `field` to a data-integrity error.
fn truncated<T>(result: io::Result<T>, field: &str) -> Result<T> {
    result.map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => {
            StrikeError::InvalidCache(format!("truncated while reading {field}"))
        }
        _ => StrikeError::Io(e),
    })
}
