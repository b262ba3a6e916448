//! Pluggable format readers and writers.
//!
//! Byte-level decoding of SWC, ASC and H5 lives outside this crate: callers
//! register a [`FormatReader`] and [`FormatWriter`] per format. Only the
//! native snapshot format ships built in.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use neurite_builder::RawMorphology;
use neurite_foundation::{Error, Result};

use crate::format::FileFormat;
use crate::snapshot::SnapshotFormat;

/// Decodes bytes of one format into a record stream.
pub trait FormatReader: Send + Sync {
    /// The format this reader decodes.
    fn format(&self) -> FileFormat;

    /// Decodes `bytes`.
    ///
    /// # Errors
    ///
    /// Returns `RawData` (or `Serialization`) for malformed input.
    fn read(&self, bytes: &[u8]) -> Result<RawMorphology>;
}

/// Encodes a record stream into bytes of one format.
pub trait FormatWriter: Send + Sync {
    /// The format this writer encodes.
    fn format(&self) -> FileFormat;

    /// Encodes `raw`.
    ///
    /// # Errors
    ///
    /// Returns `Writer` (or `Serialization`) if the stream cannot be encoded.
    fn write(&self, raw: &RawMorphology) -> Result<Vec<u8>>;
}

/// Readers and writers by format.
#[derive(Clone)]
pub struct Registry {
    readers: BTreeMap<FileFormat, Arc<dyn FormatReader>>,
    writers: BTreeMap<FileFormat, Arc<dyn FormatWriter>>,
}

impl Registry {
    /// A registry with nothing registered.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            readers: BTreeMap::new(),
            writers: BTreeMap::new(),
        }
    }

    /// A registry with the built-in snapshot reader and writer.
    #[must_use]
    pub fn new() -> Self {
        Self::empty()
            .with_reader(SnapshotFormat)
            .with_writer(SnapshotFormat)
    }

    /// Builder method to register a reader, replacing any for its format.
    #[must_use]
    pub fn with_reader(mut self, reader: impl FormatReader + 'static) -> Self {
        self.register_reader(reader);
        self
    }

    /// Builder method to register a writer, replacing any for its format.
    #[must_use]
    pub fn with_writer(mut self, writer: impl FormatWriter + 'static) -> Self {
        self.register_writer(writer);
        self
    }

    /// Registers a reader, replacing any for its format.
    pub fn register_reader(&mut self, reader: impl FormatReader + 'static) {
        self.readers.insert(reader.format(), Arc::new(reader));
    }

    /// Registers a writer, replacing any for its format.
    pub fn register_writer(&mut self, writer: impl FormatWriter + 'static) {
        self.writers.insert(writer.format(), Arc::new(writer));
    }

    /// The reader for `format`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownFileType` if none is registered.
    pub fn reader(&self, format: FileFormat) -> Result<&dyn FormatReader> {
        self.readers
            .get(&format)
            .map(Arc::as_ref)
            .ok_or_else(|| Error::unknown_file_type(format!("no reader registered for {format}")))
    }

    /// The writer for `format`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownFileType` if none is registered.
    pub fn writer(&self, format: FileFormat) -> Result<&dyn FormatWriter> {
        self.writers
            .get(&format)
            .map(Arc::as_ref)
            .ok_or_else(|| Error::unknown_file_type(format!("no writer registered for {format}")))
    }

    /// Formats with a registered reader.
    pub fn readable(&self) -> impl Iterator<Item = FileFormat> + '_ {
        self.readers.keys().copied()
    }

    /// Formats with a registered writer.
    pub fn writable(&self) -> impl Iterator<Item = FileFormat> + '_ {
        self.writers.keys().copied()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("readers", &self.readers.keys().collect::<Vec<_>>())
            .field("writers", &self.writers.keys().collect::<Vec<_>>())
            .finish()
    }
}
