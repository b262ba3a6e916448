//! The native snapshot format: the record stream as `MessagePack`.
//!
//! A snapshot stores exactly what a reader would produce, so loading one goes
//! through the same builder and validation as any other format.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use neurite_builder::RawMorphology;
use neurite_foundation::{Error, ErrorKind, Result};

use crate::format::FileFormat;
use crate::registry::{FormatReader, FormatWriter};

/// Serializes a record stream to `MessagePack` bytes.
///
/// Uses named serialization to preserve struct field names.
///
/// # Errors
///
/// Returns `Serialization` if encoding fails.
pub fn to_bytes(raw: &RawMorphology) -> Result<Vec<u8>> {
    rmp_serde::to_vec_named(raw).map_err(|e| Error::new(ErrorKind::Serialization(e.to_string())))
}

/// Deserializes a record stream from `MessagePack` bytes.
///
/// # Errors
///
/// Returns `Serialization` if decoding fails.
pub fn from_bytes(bytes: &[u8]) -> Result<RawMorphology> {
    rmp_serde::from_slice(bytes).map_err(|e| Error::new(ErrorKind::Serialization(e.to_string())))
}

/// Writes a record stream to a snapshot file, replacing any existing file.
///
/// # Errors
///
/// Returns `Io` if the file cannot be created or written, or
/// `Serialization` if encoding fails.
pub fn save_to_file<P: AsRef<Path>>(raw: &RawMorphology, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .map_err(|e| Error::io(format!("failed to create file '{}': {e}", path.display())))?;
    let mut writer = BufWriter::new(file);
    let bytes = to_bytes(raw)?;
    writer
        .write_all(&bytes)
        .and_then(|()| writer.flush())
        .map_err(|e| Error::io(format!("failed to write to file '{}': {e}", path.display())))
}

/// Reads a record stream from a snapshot file.
///
/// # Errors
///
/// Returns `Io` if the file cannot be read, or `Serialization` if decoding
/// fails.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<RawMorphology> {
    let path = path.as_ref();
    let bytes = read_file(path)?;
    from_bytes(&bytes).map_err(|e| e.with_source(path.display().to_string()))
}

pub(crate) fn read_file(path: &Path) -> Result<Vec<u8>> {
    let file = File::open(path)
        .map_err(|e| Error::io(format!("failed to open file '{}': {e}", path.display())))?;
    let mut bytes = Vec::new();
    BufReader::new(file)
        .read_to_end(&mut bytes)
        .map_err(|e| Error::io(format!("failed to read file '{}': {e}", path.display())))?;
    Ok(bytes)
}

/// Reader and writer for [`FileFormat::Snapshot`].
#[derive(Copy, Clone, Debug, Default)]
pub struct SnapshotFormat;

impl FormatReader for SnapshotFormat {
    fn format(&self) -> FileFormat {
        FileFormat::Snapshot
    }

    fn read(&self, bytes: &[u8]) -> Result<RawMorphology> {
        from_bytes(bytes)
    }
}

impl FormatWriter for SnapshotFormat {
    fn format(&self) -> FileFormat {
        FileFormat::Snapshot
    }

    fn write(&self, raw: &RawMorphology) -> Result<Vec<u8>> {
        to_bytes(raw)
    }
}
