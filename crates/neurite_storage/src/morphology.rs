//! The immutable, query-optimized view of a morphology.
//!
//! A [`Morphology`] shares its [`Properties`] through an `Arc`, so clones are
//! O(1) and views can be handed to other threads freely. Ids are dense
//! (`0..n_sections`) and every id returned by one query resolves in all the
//! others.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use neurite_foundation::{
    Annotation, CellFamily, Error, MorphologyVersion, Point, Result, SectionId, SectionTag,
    SectionType, VasculatureSectionType,
};

use crate::iter::{BreadthFirst, DepthFirst, Topology, Upstream};
use crate::mitochondria::Mitochondria;
use crate::properties::Properties;
use crate::reticulum::EndoplasmicReticulum;
use crate::section::Section;
use crate::soma::Soma;

/// An immutable morphology.
#[derive(Clone, Debug)]
pub struct Morphology<T: SectionTag = SectionType> {
    properties: Arc<Properties<T>>,
    mitochondria: Mitochondria,
    stamp: u64,
}

/// A vascular morphology.
pub type Vasculature = Morphology<VasculatureSectionType>;

impl<T: SectionTag> Morphology<T> {
    /// Wraps validated properties, without mitochondria.
    #[must_use]
    pub fn from_properties(properties: Properties<T>) -> Self {
        let stamp = topology_stamp(&properties);
        Self {
            properties: Arc::new(properties),
            mitochondria: Mitochondria::empty(),
            stamp,
        }
    }

    /// An empty morphology of the given family.
    ///
    /// # Errors
    ///
    /// Returns `RawData` if the family cannot use this section type.
    pub fn empty(family: CellFamily) -> Result<Self> {
        Ok(Self::from_properties(Properties::builder(family).finish()?))
    }

    /// Attaches a mitochondria overlay.
    ///
    /// # Errors
    ///
    /// Returns `SectionNotFound` if a mitochondrial point references a section
    /// this morphology does not have.
    pub fn with_mitochondria(mut self, mitochondria: Mitochondria) -> Result<Self> {
        let forest = &self.properties.forest;
        if let Some(&host) = mitochondria
            .properties()
            .point_level()
            .section_ids
            .iter()
            .find(|&&host| !forest.contains(host))
        {
            return Err(Error::section_not_found(host));
        }
        self.mitochondria = mitochondria.attached_to(self.stamp);
        Ok(self)
    }

    /// The underlying storage.
    #[must_use]
    pub fn properties(&self) -> &Properties<T> {
        &self.properties
    }

    // -------------------------------------------------------------------------
    // Topology
    // -------------------------------------------------------------------------

    /// Sections without a parent section, in id order.
    #[must_use]
    pub fn root_sections(&self) -> &[SectionId] {
        self.properties.forest.roots()
    }

    /// All section ids, ascending.
    pub fn sections(&self) -> impl ExactSizeIterator<Item = SectionId> + '_ {
        self.properties.forest.ids()
    }

    /// A handle onto one section.
    ///
    /// # Errors
    ///
    /// Returns `SectionNotFound` if the id does not resolve.
    pub fn section(&self, id: SectionId) -> Result<Section<'_, T>> {
        self.properties.forest.check(id, Error::section_not_found)?;
        Ok(Section::new(self, id))
    }

    /// Parent of a section, `None` for roots.
    ///
    /// # Errors
    ///
    /// Returns `SectionNotFound` if the id does not resolve.
    pub fn parent(&self, id: SectionId) -> Result<Option<SectionId>> {
        self.properties.forest.check(id, Error::section_not_found)?;
        Ok(self.properties.forest.parent(id))
    }

    /// Children of a section, in stored order.
    ///
    /// # Errors
    ///
    /// Returns `SectionNotFound` if the id does not resolve.
    pub fn children(&self, id: SectionId) -> Result<&[SectionId]> {
        self.properties.forest.check(id, Error::section_not_found)?;
        Ok(self.properties.forest.children(id))
    }

    /// Points of a section.
    ///
    /// # Errors
    ///
    /// Returns `SectionNotFound` if the id does not resolve.
    pub fn points(&self, id: SectionId) -> Result<&[Point]> {
        Ok(self.section(id)?.points())
    }

    /// Type of a section.
    ///
    /// # Errors
    ///
    /// Returns `SectionNotFound` if the id does not resolve.
    pub fn section_type(&self, id: SectionId) -> Result<T> {
        Ok(self.section(id)?.section_type())
    }

    /// The soma.
    #[must_use]
    pub fn soma(&self) -> Soma<'_> {
        Soma::new(&self.properties.soma)
    }

    // -------------------------------------------------------------------------
    // Flat tables
    // -------------------------------------------------------------------------

    /// Number of sections.
    #[must_use]
    pub fn n_sections(&self) -> usize {
        self.properties.forest.len()
    }

    /// Number of samples in all sections (shared branch points counted per
    /// section).
    #[must_use]
    pub fn n_points(&self) -> usize {
        self.properties.forest.n_points()
    }

    /// All section samples, section after section.
    #[must_use]
    pub fn all_points(&self) -> &[Point] {
        &self.properties.points.points
    }

    /// All section diameters, parallel to [`all_points`](Self::all_points).
    #[must_use]
    pub fn all_diameters(&self) -> &[f64] {
        &self.properties.points.diameters
    }

    /// All section perimeters, parallel to [`all_points`](Self::all_points), or empty.
    #[must_use]
    pub fn all_perimeters(&self) -> &[f64] {
        &self.properties.points.perimeters
    }

    /// Start offset of each section in the flat tables, plus the end offset.
    #[must_use]
    pub fn section_offsets(&self) -> &[usize] {
        self.properties.forest.offsets()
    }

    /// Per-section types, indexed by id.
    #[must_use]
    pub fn section_types(&self) -> &[T] {
        &self.properties.section_types
    }

    // -------------------------------------------------------------------------
    // Metadata and overlays
    // -------------------------------------------------------------------------

    /// Cell family.
    #[must_use]
    pub fn cell_family(&self) -> CellFamily {
        self.properties.family
    }

    /// Source format and version.
    #[must_use]
    pub fn version(&self) -> &MorphologyVersion {
        &self.properties.version
    }

    /// Annotations recorded while building.
    #[must_use]
    pub fn annotations(&self) -> &[Annotation] {
        &self.properties.annotations
    }

    /// The mitochondria overlay (empty if none).
    #[must_use]
    pub fn mitochondria(&self) -> &Mitochondria {
        &self.mitochondria
    }

    /// Endoplasmic reticulum entries.
    #[must_use]
    pub fn endoplasmic_reticulum(&self) -> &EndoplasmicReticulum {
        &self.properties.reticulum
    }

    /// Fingerprint of the section structure (parents, types, point counts).
    ///
    /// Overlays keyed by section id are valid for a morphology only while the
    /// stamps match.
    #[must_use]
    pub fn topology_stamp(&self) -> u64 {
        self.stamp
    }

    /// Returns true if both views hold the same sections, points, soma and
    /// mitochondria. Annotations and version are ignored.
    #[must_use]
    pub fn same_structure(&self, other: &Self) -> bool {
        let (a, b) = (&*self.properties, &*other.properties);
        a.forest == b.forest
            && a.section_types == b.section_types
            && a.points == b.points
            && a.soma == b.soma
            && a.family == b.family
            && a.reticulum == b.reticulum
            && self.mitochondria.properties() == other.mitochondria.properties()
    }

    // -------------------------------------------------------------------------
    // Traversal
    // -------------------------------------------------------------------------

    /// Depth-first traversal of the whole morphology.
    #[must_use]
    pub fn depth_first(&self) -> DepthFirst<'_, Self> {
        DepthFirst::from_roots(self)
    }

    /// Breadth-first traversal of the whole morphology.
    #[must_use]
    pub fn breadth_first(&self) -> BreadthFirst<'_, Self> {
        BreadthFirst::from_roots(self)
    }

    /// Walks from a section up to its root.
    ///
    /// # Errors
    ///
    /// Returns `SectionNotFound` if the id does not resolve.
    pub fn upstream(&self, id: SectionId) -> Result<Upstream<'_, Self>> {
        self.properties.forest.check(id, Error::section_not_found)?;
        Ok(Upstream::new(self, id))
    }

    /// Cached depth-first order.
    #[must_use]
    pub fn depth_first_order(&self) -> &[SectionId] {
        self.properties.forest.depth_first_order()
    }

    /// Cached breadth-first order.
    #[must_use]
    pub fn breadth_first_order(&self) -> &[SectionId] {
        self.properties.forest.breadth_first_order()
    }
}

impl<T: SectionTag> Topology for Morphology<T> {
    type Id = SectionId;

    fn roots(&self) -> &[SectionId] {
        self.properties.forest.roots()
    }

    fn parent_of(&self, id: SectionId) -> Option<SectionId> {
        self.properties.forest.parent(id)
    }

    fn children_of(&self, id: SectionId) -> &[SectionId] {
        self.properties.forest.children(id)
    }
}

fn topology_stamp<T: SectionTag>(properties: &Properties<T>) -> u64 {
    let mut hasher = DefaultHasher::new();
    let forest = &properties.forest;
    for id in forest.ids() {
        forest.parent(id).hash(&mut hasher);
        properties.section_types[id.index()].code().hash(&mut hasher);
        forest.range(id).len().hash(&mut hasher);
    }
    hasher.finish()
}
