//! Tilemap and attribute map file I/O

use crate::format::codec::{decode, decode_split, encode_split};
use crate::format::{TilemapFormat, Tilemap};
use crate::io::error::{ConversionError, Result};
use log::warn;
use std::path::{Path, PathBuf};

/// An encoded output file waiting to be written
pub type PendingFile = (PathBuf, Vec<u8>);

/// Encode `tilemap` and write it, splitting attributes into `attrmap` if given
///
/// Nothing is written unless encoding succeeds, and a failed write removes
/// whatever this call already wrote.
///
/// # Errors
///
/// Returns the encoder's error, or `WriteFailure` for the file that could not
/// be written.
pub fn write_tilemap(
    path: &Path,
    attrmap: Option<&Path>,
    tilemap: &Tilemap,
    format: TilemapFormat,
) -> Result<()> {
    write_files(&encode_tilemap(path, attrmap, tilemap, format)?)
}

/// Encode `tilemap` into the files `write_tilemap` would create
///
/// # Errors
///
/// Returns the encoder's error.
pub fn encode_tilemap(
    path: &Path,
    attrmap: Option<&Path>,
    tilemap: &Tilemap,
    format: TilemapFormat,
) -> Result<Vec<PendingFile>> {
    match attrmap {
        Some(attr_path) => {
            let (ids, attrs) = encode_split(tilemap.cells(), format)?;
            Ok(vec![
                (path.to_path_buf(), ids),
                (attr_path.to_path_buf(), attrs),
            ])
        }
        None => Ok(vec![(path.to_path_buf(), tilemap.encode(format)?)]),
    }
}

/// Write every file in order, or none of them
///
/// If a write fails, the files written before it are removed again.
///
/// # Errors
///
/// Returns `WriteFailure` for the first file that could not be written.
pub fn write_files(files: &[PendingFile]) -> Result<()> {
    for (written, (path, bytes)) in files.iter().enumerate() {
        if let Err(err) = write_bytes(path, bytes) {
            for (done, _) in files.iter().take(written) {
                if let Err(remove_err) = std::fs::remove_file(done) {
                    warn!("Could not remove {}: {remove_err}", done.display());
                }
            }
            return Err(err);
        }
    }
    Ok(())
}

/// Read and decode a tilemap, with its attribute map if given
///
/// # Errors
///
/// Returns `ReadFailure` for unreadable files, or the decoder's error.
pub fn read_tilemap(
    path: &Path,
    attrmap: Option<&Path>,
    format: TilemapFormat,
    width: usize,
) -> Result<Tilemap> {
    let bytes = read_bytes(path)?;
    let cells = match attrmap {
        Some(attr_path) => decode_split(&bytes, &read_bytes(attr_path)?, format)?,
        None => decode(&bytes, format)?,
    };
    Tilemap::new(cells, width)
}

/// Write raw bytes, creating the parent directory if needed
///
/// # Errors
///
/// Returns `WriteFailure` naming `path` or its parent directory.
pub fn write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ConversionError::WriteFailure {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    std::fs::write(path, bytes).map_err(|e| ConversionError::WriteFailure {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Read a whole file
///
/// # Errors
///
/// Returns `ReadFailure` naming `path`.
pub fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| ConversionError::ReadFailure {
        path: path.to_path_buf(),
        source: e,
    })
}
