//! Advisory records: warnings and annotations.
//!
//! Warnings never abort an operation. Whether a warning is surfaced at all is
//! decided by the diagnostics policy of the caller; annotations are kept on the
//! built morphology regardless of policy.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::id::{SampleId, SectionId};

// =============================================================================
// Log Level
// =============================================================================

/// Severity of a diagnostic message, most severe first.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LogLevel {
    /// Only errors.
    Error,
    /// Errors and warnings.
    #[default]
    Warning,
    /// Informational messages as well.
    Info,
    /// Everything.
    Debug,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
        }
    }
}

// =============================================================================
// Warning Kind
// =============================================================================

/// Categories of advisory conditions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WarningKind {
    /// A section has exactly one child section.
    OnlyChild,
    /// Two consecutive points of a section coincide.
    ZeroLengthSegment,
    /// Radius grows moving away from the root.
    NonMonotonicRadius,
    /// A sample has a zero diameter.
    ZeroDiameter,
    /// A section uses the undefined type.
    UndefinedSectionType,
    /// A neuron without a soma.
    NoSomaFound,
    /// A root sample is not attached to the soma although one exists.
    DisconnectedNeurite,
    /// A three-point soma does not follow the NeuroMorpho convention.
    SomaNonConform,
    /// Several disconnected root groups, tolerated by policy.
    MultipleTrees,
    /// Writing a morphology without a soma.
    WriteNoSoma,
    /// Writing a morphology without sections.
    WriteEmptyMorphology,
    /// Target format drops the mitochondria overlay.
    MitochondriaWriteNotSupported,
}

impl WarningKind {
    /// All warning kinds, in declaration order.
    pub const ALL: &'static [WarningKind] = &[
        Self::OnlyChild,
        Self::ZeroLengthSegment,
        Self::NonMonotonicRadius,
        Self::ZeroDiameter,
        Self::UndefinedSectionType,
        Self::NoSomaFound,
        Self::DisconnectedNeurite,
        Self::SomaNonConform,
        Self::MultipleTrees,
        Self::WriteNoSoma,
        Self::WriteEmptyMorphology,
        Self::MitochondriaWriteNotSupported,
    ];
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::OnlyChild => "only-child",
            Self::ZeroLengthSegment => "zero-length-segment",
            Self::NonMonotonicRadius => "non-monotonic-radius",
            Self::ZeroDiameter => "zero-diameter",
            Self::UndefinedSectionType => "undefined-section-type",
            Self::NoSomaFound => "no-soma-found",
            Self::DisconnectedNeurite => "disconnected-neurite",
            Self::SomaNonConform => "soma-non-conform",
            Self::MultipleTrees => "multiple-trees",
            Self::WriteNoSoma => "write-no-soma",
            Self::WriteEmptyMorphology => "write-empty-morphology",
            Self::MitochondriaWriteNotSupported => "mitochondria-write-not-supported",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Warning
// =============================================================================

/// A single advisory message.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Warning {
    /// Category of the condition.
    pub kind: WarningKind,
    /// Severity at which the message is surfaced.
    pub level: LogLevel,
    /// Human-readable description.
    pub message: String,
    /// Source file or buffer name, if known.
    pub source: Option<String>,
    /// Section the warning refers to, if any.
    pub section: Option<SectionId>,
    /// Raw sample the warning refers to, if any.
    pub sample: Option<SampleId>,
}

impl Warning {
    /// Creates a warning-level message of the given kind.
    #[must_use]
    pub fn new(kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            level: LogLevel::Warning,
            message: message.into(),
            source: None,
            section: None,
            sample: None,
        }
    }

    /// Sets the severity.
    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Sets the source name.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the section the warning refers to.
    #[must_use]
    pub fn with_section(mut self, section: SectionId) -> Self {
        self.section = Some(section);
        self
    }

    /// Sets the sample the warning refers to.
    #[must_use]
    pub fn with_sample(mut self, sample: SampleId) -> Self {
        self.sample = Some(sample);
        self
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

// =============================================================================
// Annotation
// =============================================================================

/// Category of a structural curiosity recorded on a morphology.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AnnotationType {
    /// The section has exactly one child section.
    SingleChild,
    /// Two consecutive points of the section coincide.
    ZeroLengthSegment,
    /// The section's radius increases away from the root.
    NonMonotonicRadius,
}

impl AnnotationType {
    /// The warning kind raised alongside annotations of this type.
    #[must_use]
    pub fn warning_kind(self) -> WarningKind {
        match self {
            Self::SingleChild => WarningKind::OnlyChild,
            Self::ZeroLengthSegment => WarningKind::ZeroLengthSegment,
            Self::NonMonotonicRadius => WarningKind::NonMonotonicRadius,
        }
    }
}

impl fmt::Display for AnnotationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SingleChild => write!(f, "single child"),
            Self::ZeroLengthSegment => write!(f, "zero-length segment"),
            Self::NonMonotonicRadius => write!(f, "non-monotonic radius"),
        }
    }
}

/// A position-anchored note attached to a section.
///
/// Annotations do not affect topology.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Annotation {
    /// What was found.
    pub kind: AnnotationType,
    /// Section the note is anchored to.
    pub section: SectionId,
    /// Index of the anchoring point within the section, if the note is
    /// about a single point.
    pub point: Option<usize>,
    /// Raw sample id of the anchoring point, if known.
    pub sample: Option<SampleId>,
    /// Free-form details.
    pub details: String,
}

impl Annotation {
    /// Creates an annotation anchored to a whole section.
    #[must_use]
    pub fn new(kind: AnnotationType, section: SectionId, details: impl Into<String>) -> Self {
        Self {
            kind,
            section,
            point: None,
            sample: None,
            details: details.into(),
        }
    }

    /// Anchors the annotation to a point of the section.
    #[must_use]
    pub fn at_point(mut self, point: usize) -> Self {
        self.point = Some(point);
        self
    }

    /// Records the raw sample id of the anchoring point.
    #[must_use]
    pub fn with_sample(mut self, sample: SampleId) -> Self {
        self.sample = Some(sample);
        self
    }

    /// Builds the advisory warning that accompanies this annotation.
    #[must_use]
    pub fn to_warning(&self) -> Warning {
        let mut warning = Warning::new(
            self.kind.warning_kind(),
            format!("{}: {} ({})", self.section, self.kind, self.details),
        )
        .with_section(self.section);
        if let Some(sample) = self.sample {
            warning = warning.with_sample(sample);
        }
        warning
    }
}
