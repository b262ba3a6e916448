//! Type tags for sections, somata and cell families.
//!
//! Ordinary morphologies (neurons, glia) and vasculature share the same tree
//! machinery but number their section types differently. [`SectionTag`] is the
//! closed seam between them: it has exactly two implementors,
//! [`SectionType`] and [`VasculatureSectionType`].

use std::fmt;
use std::hash::Hash;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::SectionType {}
    impl Sealed for super::VasculatureSectionType {}
}

// =============================================================================
// Section Tag
// =============================================================================

/// A section type enumeration usable as the tag of a tree.
///
/// Sealed: implemented only by [`SectionType`] and [`VasculatureSectionType`].
pub trait SectionTag:
    sealed::Sealed + Copy + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// Cell families whose records are tagged with this enumeration.
    const FAMILIES: &'static [CellFamily];

    /// Decodes an integer type code from a raw record.
    fn from_code(code: i32) -> Option<Self>;

    /// Encodes this tag as its integer type code.
    fn code(self) -> i32;

    /// Returns true if samples of this type describe the soma.
    fn is_soma(self) -> bool;

    /// Returns true for the catch-all "undefined" tag.
    fn is_undefined(self) -> bool;

    /// Position of this tag in NEURON's canonical neurite ordering.
    ///
    /// Lower values sort first.
    fn neuron_order(self) -> u32 {
        u32::try_from(self.code()).unwrap_or(u32::MAX)
    }
}

// =============================================================================
// Section Type
// =============================================================================

/// Section type of neuron and glia morphologies.
///
/// Codes follow the SWC convention: 0 undefined, 1 soma, 2 axon,
/// 3 basal dendrite, 4 apical dendrite, 5..=19 custom.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SectionType {
    /// Type code 0.
    Undefined,
    /// Type code 1; never the type of a built section.
    Soma,
    /// Type code 2.
    Axon,
    /// Type code 3.
    BasalDendrite,
    /// Type code 4.
    ApicalDendrite,
    /// Type codes 5 to 19.
    Custom(u8),
}

impl SectionType {
    /// Glia perivascular process (shares code 2 with [`SectionType::Axon`]).
    pub const GLIA_PERIVASCULAR_PROCESS: SectionType = SectionType::Axon;
    /// Glia process (shares code 3 with [`SectionType::BasalDendrite`]).
    pub const GLIA_PROCESS: SectionType = SectionType::BasalDendrite;
    /// Highest custom type code accepted.
    pub const MAX_CUSTOM: u8 = 19;
}

impl SectionTag for SectionType {
    const FAMILIES: &'static [CellFamily] = &[CellFamily::Neuron, CellFamily::Glia];

    fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Undefined),
            1 => Some(Self::Soma),
            2 => Some(Self::Axon),
            3 => Some(Self::BasalDendrite),
            4 => Some(Self::ApicalDendrite),
            5..=19 => u8::try_from(code).ok().map(Self::Custom),
            _ => None,
        }
    }

    fn code(self) -> i32 {
        match self {
            Self::Undefined => 0,
            Self::Soma => 1,
            Self::Axon => 2,
            Self::BasalDendrite => 3,
            Self::ApicalDendrite => 4,
            Self::Custom(code) => i32::from(code),
        }
    }

    fn is_soma(self) -> bool {
        self == Self::Soma
    }

    fn is_undefined(self) -> bool {
        self == Self::Undefined
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => write!(f, "undefined"),
            Self::Soma => write!(f, "soma"),
            Self::Axon => write!(f, "axon"),
            Self::BasalDendrite => write!(f, "basal_dendrite"),
            Self::ApicalDendrite => write!(f, "apical_dendrite"),
            Self::Custom(code) => write!(f, "custom{code}"),
        }
    }
}

// =============================================================================
// Vasculature Section Type
// =============================================================================

/// Section type of vasculature morphologies.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum VasculatureSectionType {
    /// Type code 0.
    Undefined,
    /// Type code 1.
    Vein,
    /// Type code 2.
    Artery,
    /// Type code 3.
    Venule,
    /// Type code 4.
    Arteriole,
    /// Type code 5.
    VenousCapillary,
    /// Type code 6.
    ArterialCapillary,
    /// Type code 7.
    Transitional,
}

impl SectionTag for VasculatureSectionType {
    const FAMILIES: &'static [CellFamily] = &[CellFamily::Vasculature];

    fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Undefined),
            1 => Some(Self::Vein),
            2 => Some(Self::Artery),
            3 => Some(Self::Venule),
            4 => Some(Self::Arteriole),
            5 => Some(Self::VenousCapillary),
            6 => Some(Self::ArterialCapillary),
            7 => Some(Self::Transitional),
            _ => None,
        }
    }

    fn code(self) -> i32 {
        match self {
            Self::Undefined => 0,
            Self::Vein => 1,
            Self::Artery => 2,
            Self::Venule => 3,
            Self::Arteriole => 4,
            Self::VenousCapillary => 5,
            Self::ArterialCapillary => 6,
            Self::Transitional => 7,
        }
    }

    fn is_soma(self) -> bool {
        false
    }

    fn is_undefined(self) -> bool {
        self == Self::Undefined
    }
}

impl fmt::Display for VasculatureSectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Undefined => "undefined",
            Self::Vein => "vein",
            Self::Artery => "artery",
            Self::Venule => "venule",
            Self::Arteriole => "arteriole",
            Self::VenousCapillary => "venous_capillary",
            Self::ArterialCapillary => "arterial_capillary",
            Self::Transitional => "transitional",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Soma Type
// =============================================================================

/// How the soma's points are interpreted geometrically.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SomaType {
    /// No soma, or a soma whose shape could not be determined.
    #[default]
    Undefined,
    /// A sphere described by one point and its diameter.
    SinglePoint,
    /// NeuroMorpho's three-point representation of a cylinder.
    ThreePointCylinders,
    /// A chain of cylinders between consecutive points.
    Cylinders,
    /// A closed contour in a plane.
    SimpleContour,
}

impl fmt::Display for SomaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Undefined => "undefined",
            Self::SinglePoint => "single_point",
            Self::ThreePointCylinders => "three_point_cylinders",
            Self::Cylinders => "cylinders",
            Self::SimpleContour => "simple_contour",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Cell Family
// =============================================================================

/// The kind of cell a morphology describes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CellFamily {
    /// Neuron: soma plus neurites.
    #[default]
    Neuron,
    /// Glial cell: like a neuron, but every sample carries a perimeter.
    Glia,
    /// Vascular segment: no soma, many roots.
    Vasculature,
}

impl CellFamily {
    /// Returns true if morphologies of this family may have a soma.
    #[must_use]
    pub fn has_soma(self) -> bool {
        !matches!(self, Self::Vasculature)
    }

    /// Returns true if every sample must carry a perimeter.
    #[must_use]
    pub fn requires_perimeters(self) -> bool {
        matches!(self, Self::Glia)
    }

    /// Returns true if several disconnected root groups are expected.
    #[must_use]
    pub fn allows_multiple_trees(self) -> bool {
        matches!(self, Self::Vasculature)
    }
}

impl fmt::Display for CellFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Neuron => write!(f, "neuron"),
            Self::Glia => write!(f, "glia"),
            Self::Vasculature => write!(f, "vasculature"),
        }
    }
}

// =============================================================================
// Morphology Version
// =============================================================================

/// Format name and version of the source a morphology was read from.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MorphologyVersion {
    /// Format name, e.g. `"swc"` or `"h5"`.
    pub format: String,
    /// Major version.
    pub major: u32,
    /// Minor version.
    pub minor: u32,
}

impl MorphologyVersion {
    /// Creates a version descriptor.
    #[must_use]
    pub fn new(format: impl Into<String>, major: u32, minor: u32) -> Self {
        Self {
            format: format.into(),
            major,
            minor,
        }
    }

    /// Version of morphologies assembled in memory rather than read.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new("memory", 1, 0)
    }
}

impl Default for MorphologyVersion {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl fmt::Display for MorphologyVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} v{}.{}", self.format, self.major, self.minor)
    }
}
