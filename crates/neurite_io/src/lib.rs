//! Format tags, reader/writer plumbing and the native snapshot format.
//!
//! This crate provides:
//! - [`FileFormat`] - Format tags with extension detection
//! - [`FormatCapabilities`] - What each format can store, checked before writing
//! - [`FormatReader`] / [`FormatWriter`] / [`Registry`] - Pluggable byte codecs
//! - [`to_records`] - A morphology back to the record stream it came from
//! - [`load_path`] / [`load_buffer`] / [`write_buffer`] / [`save_path`] - Entry points
//! - [`snapshot`] - The `MessagePack` snapshot format, always available
//!
//! Unknown format tags fail with `UnknownFileType` before any byte is read.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod capabilities;
pub mod export;
pub mod format;
pub mod load;
pub mod registry;
pub mod snapshot;

pub use capabilities::FormatCapabilities;
pub use export::to_records;
pub use format::FileFormat;
pub use load::{
    LoadOptions, load_buffer, load_buffer_with, load_path, load_path_with, save_path,
    save_path_with, write_buffer, write_buffer_with,
};
pub use registry::{FormatReader, FormatWriter, Registry};
pub use snapshot::SnapshotFormat;
