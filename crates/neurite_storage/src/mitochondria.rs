//! The mitochondria overlay of an immutable morphology.
//!
//! Mitochondria form their own forest, with their own id space, whose points
//! sit on sections of the primary tree at relative positions. The overlay
//! remembers the topology stamp of the morphology it was attached to; once
//! that morphology's ids are renumbered, the overlay must be remapped (the
//! edit layer's `freeze` does this) before it is meaningful again.

use std::sync::Arc;

use neurite_foundation::{Error, MitoSectionId, Point, Result, SectionId, SectionTag};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::forest::Forest;
use crate::iter::{BreadthFirst, DepthFirst, Topology, Upstream};
use crate::morphology::Morphology;
use crate::point_level::MitoPointLevel;

/// Validated storage of a mitochondria overlay.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MitoProperties {
    forest: Forest<MitoSectionId>,
    points: MitoPointLevel,
}

impl MitoProperties {
    /// No mitochondria.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            forest: Forest::empty(),
            points: MitoPointLevel::default(),
        }
    }

    /// Builds the overlay from sections given parent first.
    ///
    /// # Errors
    ///
    /// - `IdSequence` if a section precedes its parent.
    /// - `RawData` if a section has no points.
    pub fn from_sections(sections: Vec<(Option<MitoSectionId>, MitoPointLevel)>) -> Result<Self> {
        let mut parents = Vec::with_capacity(sections.len());
        let mut offsets = Vec::with_capacity(sections.len() + 1);
        let mut points = MitoPointLevel::default();
        offsets.push(0);
        for (parent, level) in &sections {
            parents.push(*parent);
            points.extend(level);
            offsets.push(points.len());
        }
        Ok(Self {
            forest: Forest::new(parents, offsets)?,
            points,
        })
    }

    /// The topology graph.
    #[must_use]
    pub fn forest(&self) -> &Forest<MitoSectionId> {
        &self.forest
    }

    /// The flat point table.
    #[must_use]
    pub fn point_level(&self) -> &MitoPointLevel {
        &self.points
    }
}

/// An immutable mitochondria overlay.
#[derive(Clone, Debug)]
pub struct Mitochondria {
    properties: Arc<MitoProperties>,
    host_stamp: Option<u64>,
}

impl Mitochondria {
    /// Wraps validated properties, not yet attached to any morphology.
    #[must_use]
    pub fn new(properties: MitoProperties) -> Self {
        Self {
            properties: Arc::new(properties),
            host_stamp: None,
        }
    }

    /// No mitochondria.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(MitoProperties::empty())
    }

    pub(crate) fn attached_to(mut self, stamp: u64) -> Self {
        self.host_stamp = Some(stamp);
        self
    }

    /// The underlying storage.
    #[must_use]
    pub fn properties(&self) -> &MitoProperties {
        &self.properties
    }

    /// Returns true if there are no mitochondrial sections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.forest.is_empty()
    }

    /// Number of mitochondrial sections.
    #[must_use]
    pub fn n_sections(&self) -> usize {
        self.properties.forest.len()
    }

    /// Returns true if the overlay may be interpreted against `morphology`.
    ///
    /// An empty overlay is valid for anything; otherwise the overlay must
    /// have been attached to a morphology with the same topology stamp.
    #[must_use]
    pub fn is_valid_for<T: SectionTag>(&self, morphology: &Morphology<T>) -> bool {
        self.is_empty() || self.host_stamp == Some(morphology.topology_stamp())
    }

    /// Fails unless [`is_valid_for`](Self::is_valid_for) holds.
    ///
    /// # Errors
    ///
    /// Returns `RawData` if the overlay refers to another topology.
    pub fn validate_against<T: SectionTag>(&self, morphology: &Morphology<T>) -> Result<()> {
        if self.is_valid_for(morphology) {
            Ok(())
        } else {
            Err(Error::raw_data(
                "mitochondria refer to a different section numbering; remap them first",
            ))
        }
    }

    /// Mitochondrial sections without a parent, in id order.
    #[must_use]
    pub fn root_sections(&self) -> &[MitoSectionId] {
        self.properties.forest.roots()
    }

    /// All mitochondrial section ids, ascending.
    pub fn sections(&self) -> impl ExactSizeIterator<Item = MitoSectionId> + '_ {
        self.properties.forest.ids()
    }

    /// A handle onto one mitochondrial section.
    ///
    /// # Errors
    ///
    /// Returns `MitoSectionNotFound` if the id does not resolve.
    pub fn section(&self, id: MitoSectionId) -> Result<MitoSection<'_>> {
        self.properties
            .forest
            .check(id, Error::mito_section_not_found)?;
        Ok(MitoSection {
            mitochondria: self,
            id,
        })
    }

    /// Parent of a mitochondrial section.
    ///
    /// # Errors
    ///
    /// Returns `MitoSectionNotFound` if the id does not resolve.
    pub fn parent(&self, id: MitoSectionId) -> Result<Option<MitoSectionId>> {
        Ok(self.section(id)?.parent())
    }

    /// Children of a mitochondrial section.
    ///
    /// # Errors
    ///
    /// Returns `MitoSectionNotFound` if the id does not resolve.
    pub fn children(&self, id: MitoSectionId) -> Result<&[MitoSectionId]> {
        Ok(self.section(id)?.children())
    }

    /// Returns true if any mitochondrial point sits on `host`.
    #[must_use]
    pub fn touches(&self, host: SectionId) -> bool {
        self.properties.points.section_ids.contains(&host)
    }

    /// Depth-first traversal of all mitochondria.
    #[must_use]
    pub fn depth_first(&self) -> DepthFirst<'_, Self> {
        DepthFirst::from_roots(self)
    }

    /// Breadth-first traversal of all mitochondria.
    #[must_use]
    pub fn breadth_first(&self) -> BreadthFirst<'_, Self> {
        BreadthFirst::from_roots(self)
    }

    /// Walks from a mitochondrial section up to its root.
    ///
    /// # Errors
    ///
    /// Returns `MitoSectionNotFound` if the id does not resolve.
    pub fn upstream(&self, id: MitoSectionId) -> Result<Upstream<'_, Self>> {
        self.section(id)?;
        Ok(Upstream::new(self, id))
    }
}

impl Default for Mitochondria {
    fn default() -> Self {
        Self::empty()
    }
}

impl Topology for Mitochondria {
    type Id = MitoSectionId;

    fn roots(&self) -> &[MitoSectionId] {
        self.properties.forest.roots()
    }

    fn parent_of(&self, id: MitoSectionId) -> Option<MitoSectionId> {
        self.properties.forest.parent(id)
    }

    fn children_of(&self, id: MitoSectionId) -> &[MitoSectionId] {
        self.properties.forest.children(id)
    }
}

/// A section of a [`Mitochondria`] overlay.
#[derive(Copy, Clone, Debug)]
pub struct MitoSection<'a> {
    mitochondria: &'a Mitochondria,
    id: MitoSectionId,
}

impl<'a> MitoSection<'a> {
    /// The mitochondrial section id.
    #[must_use]
    pub fn id(&self) -> MitoSectionId {
        self.id
    }

    /// Parent mitochondrial section.
    #[must_use]
    pub fn parent(&self) -> Option<MitoSectionId> {
        self.mitochondria.properties.forest.parent(self.id)
    }

    /// Child mitochondrial sections.
    #[must_use]
    pub fn children(&self) -> &'a [MitoSectionId] {
        self.mitochondria.properties.forest.children(self.id)
    }

    /// Returns true if the section has no parent.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent().is_none()
    }

    /// Number of points.
    #[must_use]
    pub fn n_points(&self) -> usize {
        self.mitochondria.properties.forest.range(self.id).len()
    }

    /// Host section of each point.
    #[must_use]
    pub fn neurite_section_ids(&self) -> &'a [SectionId] {
        let range = self.mitochondria.properties.forest.range(self.id);
        &self.mitochondria.properties.points.section_ids[range]
    }

    /// Relative position of each point along its host section.
    #[must_use]
    pub fn relative_path_lengths(&self) -> &'a [f64] {
        let range = self.mitochondria.properties.forest.range(self.id);
        &self.mitochondria.properties.points.relative_path_lengths[range]
    }

    /// Diameter of each point.
    #[must_use]
    pub fn diameters(&self) -> &'a [f64] {
        let range = self.mitochondria.properties.forest.range(self.id);
        &self.mitochondria.properties.points.diameters[range]
    }

    /// Absolute positions of the points, interpolated along their hosts.
    ///
    /// # Errors
    ///
    /// Returns `RawData` if the overlay is not valid for `morphology`.
    pub fn positions<T: SectionTag>(&self, morphology: &Morphology<T>) -> Result<Vec<Point>> {
        self.mitochondria.validate_against(morphology)?;
        self.neurite_section_ids()
            .iter()
            .zip(self.relative_path_lengths())
            .map(|(&host, &relative)| Ok(morphology.section(host)?.point_at(relative)))
            .collect()
    }

    /// Depth-first traversal of the subtree rooted here.
    #[must_use]
    pub fn depth_first(&self) -> DepthFirst<'a, Mitochondria> {
        DepthFirst::new(self.mitochondria, [self.id])
    }

    /// This section, its parent, and so on up to the root.
    #[must_use]
    pub fn upstream(&self) -> Upstream<'a, Mitochondria> {
        Upstream::new(self.mitochondria, self.id)
    }
}
