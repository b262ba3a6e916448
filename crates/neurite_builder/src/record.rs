//! The normalized record stream every format reader produces.
//!
//! Readers decode bytes into a [`RawMorphology`]; writers receive one back.
//! Records are kept exactly as read (radii, integer type codes, raw sample
//! ids) so that validation can report problems against the source.

use neurite_foundation::{CellFamily, MorphologyVersion, Point, ROOT_SAMPLE, SampleId, SectionId, SomaType};
use neurite_storage::ReticulumEntry;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One sample of the primary tree.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SampleRecord {
    /// Sample id, unique within the stream.
    pub id: SampleId,
    /// Integer section type code.
    pub type_code: i32,
    /// Position.
    pub point: Point,
    /// Radius (half the stored diameter).
    pub radius: f64,
    /// Perimeter, if the format carries one.
    pub perimeter: Option<f64>,
    /// Parent sample id, or [`ROOT_SAMPLE`].
    pub parent: SampleId,
    /// Forces a section boundary at this sample even when its parent has no
    /// other child of the same type.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "std::ops::Not::not"))]
    pub section_start: bool,
}

impl SampleRecord {
    /// Creates a record without perimeter.
    #[must_use]
    pub fn new(id: SampleId, type_code: i32, point: Point, radius: f64, parent: SampleId) -> Self {
        Self {
            id,
            type_code,
            point,
            radius,
            perimeter: None,
            parent,
            section_start: false,
        }
    }

    /// Sets the perimeter.
    #[must_use]
    pub fn with_perimeter(mut self, perimeter: f64) -> Self {
        self.perimeter = Some(perimeter);
        self
    }

    /// Marks the record as the first sample of its own section.
    #[must_use]
    pub fn starting_section(mut self) -> Self {
        self.section_start = true;
        self
    }

    /// Returns true if the record hangs off nothing.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent == ROOT_SAMPLE
    }

    /// The stored diameter.
    #[must_use]
    pub fn diameter(&self) -> f64 {
        self.radius * 2.0
    }
}

/// One point of the mitochondria overlay.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MitoRecord {
    /// Sample id, unique among mitochondrial records.
    pub id: SampleId,
    /// Section of the primary tree the point sits on.
    pub host: SectionId,
    /// Position along the host, in `[0, 1]`.
    pub relative_distance: f64,
    /// Diameter.
    pub diameter: f64,
    /// Parent mitochondrial sample id, or [`ROOT_SAMPLE`].
    pub parent: SampleId,
}

impl MitoRecord {
    /// Creates a record.
    #[must_use]
    pub fn new(
        id: SampleId,
        host: SectionId,
        relative_distance: f64,
        diameter: f64,
        parent: SampleId,
    ) -> Self {
        Self {
            id,
            host,
            relative_distance,
            diameter,
            parent,
        }
    }
}

/// A complete record stream.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawMorphology {
    /// Kind of cell described.
    pub family: CellFamily,
    /// Source format and version.
    pub version: MorphologyVersion,
    /// Declared soma shape; `Undefined` lets the builder infer it.
    pub soma_type: SomaType,
    /// Primary tree samples, in stream order.
    pub samples: Vec<SampleRecord>,
    /// Mitochondria samples, in stream order.
    pub mitochondria: Vec<MitoRecord>,
    /// Reticulum entries keyed by built section id.
    pub reticulum: Vec<ReticulumEntry>,
}

impl RawMorphology {
    /// Creates an empty stream for a cell family.
    #[must_use]
    pub fn new(family: CellFamily) -> Self {
        Self {
            family,
            ..Self::default()
        }
    }

    /// Builder method to set the source version.
    #[must_use]
    pub fn with_version(mut self, version: MorphologyVersion) -> Self {
        self.version = version;
        self
    }

    /// Builder method to declare the soma shape.
    #[must_use]
    pub fn with_soma_type(mut self, soma_type: SomaType) -> Self {
        self.soma_type = soma_type;
        self
    }

    /// Builder method to append samples.
    #[must_use]
    pub fn with_samples(mut self, samples: impl IntoIterator<Item = SampleRecord>) -> Self {
        self.samples.extend(samples);
        self
    }

    /// Appends one sample.
    pub fn push_sample(&mut self, sample: SampleRecord) {
        self.samples.push(sample);
    }

    /// Appends one mitochondrial sample.
    pub fn push_mito(&mut self, record: MitoRecord) {
        self.mitochondria.push(record);
    }

    /// Returns true if the stream has no samples at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty() && self.mitochondria.is_empty()
    }
}
