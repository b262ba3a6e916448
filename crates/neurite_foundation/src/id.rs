//! Section and sample identifiers.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifier of a raw input sample, as written in the source record stream.
pub type SampleId = i64;

/// Parent marker for samples that hang off nothing.
pub const ROOT_SAMPLE: SampleId = -1;

/// Identifier of a section in a morphology.
///
/// In an immutable view ids are dense: `0..n_sections`, assigned in
/// depth-first discovery order from the roots. In a mutable view ids are
/// allocated monotonically and never reused after deletion.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SectionId(pub u32);

impl SectionId {
    /// Creates a section id from its raw value.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the id as an index into dense per-section storage.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Builds an id from a dense storage index.
    ///
    /// # Panics
    ///
    /// Panics if `index` does not fit in `u32`.
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        Self(u32::try_from(index).expect("section index exceeds u32::MAX"))
    }
}

impl fmt::Debug for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SectionId({})", self.0)
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Section({})", self.0)
    }
}

/// Identifier of a section in a mitochondria overlay tree.
///
/// Lives in its own numbering space, independent of [`SectionId`].
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MitoSectionId(pub u32);

impl MitoSectionId {
    /// Creates a mito section id from its raw value.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the id as an index into dense per-section storage.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Builds an id from a dense storage index.
    ///
    /// # Panics
    ///
    /// Panics if `index` does not fit in `u32`.
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        Self(u32::try_from(index).expect("mito section index exceeds u32::MAX"))
    }
}

impl fmt::Debug for MitoSectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MitoSectionId({})", self.0)
    }
}

impl fmt::Display for MitoSectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MitoSection({})", self.0)
    }
}
