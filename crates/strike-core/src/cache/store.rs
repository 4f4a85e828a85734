use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::consts::CACHE_EXTENSION;
use crate::error::Result;
use crate::frame::FrameCollection;

use super::format::{export, import, read_checksum};

/// `<input>.strike-cache`, next to the input.
pub fn default_cache_path(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_os_string();
    name.push(".");
    name.push(CACHE_EXTENSION);
    PathBuf::from(name)
}

/// Load the cached collection at `path` if its checksum matches.
///
/// A missing, stale or unreadable cache yields `None`; the caller then
/// analyzes the source again.
pub fn load_if_fresh(path: &Path, checksum: &str) -> Option<FrameCollection> {
    if !path.exists() {
        debug!(path = %path.display(), "No cache file");
        return None;
    }

    let stored = File::open(path)
        .map_err(Into::into)
        .and_then(|file| read_checksum(&mut BufReader::new(file)));
    match stored {
        Ok(stored) if stored.eq_ignore_ascii_case(checksum) => {}
        Ok(stored) => {
            warn!(
                path = %path.display(),
                stored = %stored,
                expected = %checksum,
                "Cache checksum mismatch, re-analyzing"
            );
            return None;
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Unreadable cache header, re-analyzing");
            return None;
        }
    }

    let loaded = File::open(path)
        .map_err(Into::into)
        .and_then(|file| import(&mut BufReader::new(file)));
    match loaded {
        Ok((collection, _)) => {
            info!(path = %path.display(), "Loaded analysis from cache");
            Some(collection)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Unreadable cache file, re-analyzing");
            None
        }
    }
}

/// Write `collection` to `path`, replacing any previous cache.
///
/// The file is written next to `path` under a temporary name and renamed
/// into place, so a failed write leaves the previous cache untouched.
pub fn store(path: &Path, collection: &FrameCollection, checksum: &str) -> Result<()> {
    let mut partial = path.as_os_str().to_os_string();
    partial.push(".partial");
    let partial = PathBuf::from(partial);

    let written = write_cache(&partial, collection, checksum)
        .and_then(|()| std::fs::rename(&partial, path).map_err(Into::into));
    if written.is_err() {
        let _ = std::fs::remove_file(&partial);
    }
    written?;
    debug!(path = %path.display(), "Cache written");
    Ok(())
}

fn write_cache(path: &Path, collection: &FrameCollection, checksum: &str) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    export(&mut writer, collection, checksum)?;
    writer.flush()?;
    writer.get_ref().sync_all()?;
    Ok(())
}
