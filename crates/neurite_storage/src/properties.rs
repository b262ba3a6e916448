//! The flat point table and topology graph of a morphology.
//!
//! [`Properties`] is the array-of-structures storage behind the immutable
//! view: one contiguous table of samples, a [`Forest`] mapping each section
//! onto a range of it, and per-section type tags. It is only ever created
//! through [`PropertiesBuilder`], which validates everything at `finish`.

use neurite_foundation::{
    Annotation, CellFamily, Error, MorphologyVersion, Point, Result, SectionId, SectionTag,
    SomaType,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::forest::Forest;
use crate::point_level::PointLevel;
use crate::reticulum::EndoplasmicReticulum;

// =============================================================================
// Soma Data
// =============================================================================

/// Points and shape of the soma.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SomaData {
    /// How the points are interpreted.
    pub soma_type: SomaType,
    /// Soma sample positions.
    pub points: Vec<Point>,
    /// Soma sample diameters.
    pub diameters: Vec<f64>,
}

impl SomaData {
    /// Creates soma data.
    ///
    /// # Errors
    ///
    /// Returns `Soma` if the columns disagree in length or a declared shape
    /// has no points.
    pub fn new(soma_type: SomaType, points: Vec<Point>, diameters: Vec<f64>) -> Result<Self> {
        if points.len() != diameters.len() {
            return Err(Error::soma(format!(
                "{} soma points but {} diameters",
                points.len(),
                diameters.len()
            )));
        }
        if points.is_empty() && soma_type != SomaType::Undefined {
            return Err(Error::soma(format!(
                "soma declared as {soma_type} has no points"
            )));
        }
        Ok(Self {
            soma_type,
            points,
            diameters,
        })
    }

    /// No soma.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true if the soma has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

// =============================================================================
// Properties
// =============================================================================

/// Validated storage of a morphology.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Properties<T> {
    pub(crate) forest: Forest<SectionId>,
    pub(crate) section_types: Vec<T>,
    pub(crate) points: PointLevel,
    pub(crate) soma: SomaData,
    pub(crate) family: CellFamily,
    pub(crate) version: MorphologyVersion,
    pub(crate) annotations: Vec<Annotation>,
    pub(crate) reticulum: EndoplasmicReticulum,
}

impl<T: SectionTag> Properties<T> {
    /// Creates a builder for a morphology of the given family.
    #[must_use]
    pub fn builder(family: CellFamily) -> PropertiesBuilder<T> {
        PropertiesBuilder::new(family)
    }

    /// The topology graph.
    #[must_use]
    pub fn forest(&self) -> &Forest<SectionId> {
        &self.forest
    }

    /// Per-section type tags, indexed by section id.
    #[must_use]
    pub fn section_types(&self) -> &[T] {
        &self.section_types
    }

    /// The flat point table.
    #[must_use]
    pub fn point_level(&self) -> &PointLevel {
        &self.points
    }

    /// The soma.
    #[must_use]
    pub fn soma(&self) -> &SomaData {
        &self.soma
    }

    /// Cell family.
    #[must_use]
    pub fn family(&self) -> CellFamily {
        self.family
    }

    /// Source format and version.
    #[must_use]
    pub fn version(&self) -> &MorphologyVersion {
        &self.version
    }

    /// Annotations recorded while building.
    #[must_use]
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Endoplasmic reticulum entries.
    #[must_use]
    pub fn reticulum(&self) -> &EndoplasmicReticulum {
        &self.reticulum
    }
}

// =============================================================================
// Properties Builder
// =============================================================================

/// Accumulates sections in id order and validates them into [`Properties`].
///
/// Sections must be pushed parent first: the id returned by
/// [`push_section`](Self::push_section) is the next dense id.
#[derive(Clone, Debug)]
pub struct PropertiesBuilder<T> {
    parents: Vec<Option<SectionId>>,
    offsets: Vec<usize>,
    section_types: Vec<T>,
    points: PointLevel,
    sections_with_perimeters: usize,
    soma: SomaData,
    family: CellFamily,
    version: MorphologyVersion,
    annotations: Vec<Annotation>,
    reticulum: EndoplasmicReticulum,
}

impl<T: SectionTag> PropertiesBuilder<T> {
    /// Creates an empty builder.
    #[must_use]
    pub fn new(family: CellFamily) -> Self {
        Self {
            parents: Vec::new(),
            offsets: vec![0],
            section_types: Vec::new(),
            points: PointLevel::default(),
            sections_with_perimeters: 0,
            soma: SomaData::empty(),
            family,
            version: MorphologyVersion::in_memory(),
            annotations: Vec::new(),
            reticulum: EndoplasmicReticulum::new(),
        }
    }

    /// Appends a section and returns its id.
    pub fn push_section(
        &mut self,
        parent: Option<SectionId>,
        section_type: T,
        level: &PointLevel,
    ) -> SectionId {
        let id = SectionId::from_index(self.parents.len());
        self.parents.push(parent);
        self.section_types.push(section_type);
        if level.has_perimeters() {
            self.sections_with_perimeters += 1;
        }
        self.points.extend(level);
        self.offsets.push(self.points.len());
        id
    }

    /// Number of sections pushed so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    /// Returns true if no section was pushed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    /// Sets the soma.
    #[must_use]
    pub fn with_soma(mut self, soma: SomaData) -> Self {
        self.soma = soma;
        self
    }

    /// Sets the soma in place.
    pub fn set_soma(&mut self, soma: SomaData) {
        self.soma = soma;
    }

    /// Sets the source version.
    #[must_use]
    pub fn with_version(mut self, version: MorphologyVersion) -> Self {
        self.version = version;
        self
    }

    /// Sets the source version in place.
    pub fn set_version(&mut self, version: MorphologyVersion) {
        self.version = version;
    }

    /// Records an annotation.
    pub fn annotate(&mut self, annotation: Annotation) {
        self.annotations.push(annotation);
    }

    /// Sets the reticulum entries.
    pub fn set_reticulum(&mut self, reticulum: EndoplasmicReticulum) {
        self.reticulum = reticulum;
    }

    /// Validates and produces the properties.
    ///
    /// # Errors
    ///
    /// - `IdSequence` if a section was pushed before its parent.
    /// - `RawData` for empty sections, mixed perimeter presence, a family the
    ///   tag type cannot describe, a vasculature soma, missing glia perimeters
    ///   or reticulum entries on unknown sections.
    pub fn finish(self) -> Result<Properties<T>> {
        if !T::FAMILIES.contains(&self.family) {
            return Err(Error::raw_data(format!(
                "{} morphologies cannot use these section types",
                self.family
            )));
        }
        if !self.family.has_soma() && !self.soma.is_empty() {
            return Err(Error::raw_data(format!(
                "{} morphologies have no soma",
                self.family
            )));
        }
        let n = self.parents.len();
        if self.sections_with_perimeters != 0 && self.sections_with_perimeters != n {
            return Err(Error::raw_data(
                "perimeters must be given for every sample or for none",
            ));
        }
        if self.family.requires_perimeters() && n > 0 && self.sections_with_perimeters == 0 {
            return Err(Error::raw_data(format!(
                "{} samples must carry perimeters",
                self.family
            )));
        }

        let forest = Forest::new(self.parents, self.offsets)?;
        self.reticulum.validate(|s| forest.contains(s))?;

        tracing::trace!(
            sections = forest.len(),
            points = forest.n_points(),
            family = %self.family,
            "properties assembled"
        );

        Ok(Properties {
            forest,
            section_types: self.section_types,
            points: self.points,
            soma: self.soma,
            family: self.family,
            version: self.version,
            annotations: self.annotations,
            reticulum: self.reticulum,
        })
    }
}
