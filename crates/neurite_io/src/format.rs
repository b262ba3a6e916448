//! Format tags and extension detection.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use neurite_foundation::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::capabilities::FormatCapabilities;

/// A morphology file format.
///
/// Decoding SWC, ASC and H5 bytes is the job of readers registered in a
/// [`Registry`](crate::Registry); the tag only names the format and what it
/// can represent.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FileFormat {
    /// Tabular SWC.
    Swc,
    /// Neurolucida markup.
    Asc,
    /// Hierarchical HDF5.
    H5,
    /// Native `MessagePack` snapshot of the record stream.
    Snapshot,
}

impl FileFormat {
    /// Every format, in tag order.
    pub const ALL: [Self; 4] = [Self::Swc, Self::Asc, Self::H5, Self::Snapshot];

    /// Parses a format tag or extension, case-insensitively, with or
    /// without a leading dot.
    ///
    /// # Errors
    ///
    /// Returns `UnknownFileType` for anything else.
    pub fn from_tag(tag: &str) -> Result<Self> {
        let normalized = tag.trim().trim_start_matches('.').to_ascii_lowercase();
        match normalized.as_str() {
            "swc" => Ok(Self::Swc),
            "asc" => Ok(Self::Asc),
            "h5" | "hdf5" => Ok(Self::H5),
            "nmp" | "msgpack" | "snapshot" => Ok(Self::Snapshot),
            _ => Err(Error::unknown_file_type(tag)),
        }
    }

    /// Detects the format from a path's extension.
    ///
    /// # Errors
    ///
    /// Returns `UnknownFileType` if the path has no known extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| Error::unknown_file_type(path.display().to_string()))?;
        Self::from_tag(extension)
    }

    /// Canonical file extension, without the dot.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Swc => "swc",
            Self::Asc => "asc",
            Self::H5 => "h5",
            Self::Snapshot => "nmp",
        }
    }

    /// What the format can represent.
    #[must_use]
    pub fn capabilities(self) -> FormatCapabilities {
        match self {
            Self::Swc => FormatCapabilities::swc(),
            Self::Asc => FormatCapabilities::asc(),
            Self::H5 | Self::Snapshot => FormatCapabilities::all(),
        }
    }
}

impl FromStr for FileFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_tag(s)
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
