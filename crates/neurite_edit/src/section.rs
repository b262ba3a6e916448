//! Nodes of the mutable view.

use std::sync::Arc;

use neurite_foundation::{Point, SectionId};
use neurite_storage::PointLevel;

/// A section of a [`MutMorphology`](crate::MutMorphology).
///
/// Points live behind an `Arc`, so snapshots share them until one side
/// writes.
#[derive(Clone, Debug, PartialEq)]
pub struct MutSection<T> {
    pub(crate) parent: Option<SectionId>,
    pub(crate) children: Vec<SectionId>,
    pub(crate) section_type: T,
    pub(crate) points: Arc<PointLevel>,
}

impl<T: Copy> MutSection<T> {
    pub(crate) fn new(parent: Option<SectionId>, section_type: T, points: PointLevel) -> Self {
        Self {
            parent,
            children: Vec::new(),
            section_type,
            points: Arc::new(points),
        }
    }

    /// Parent section, `None` for roots.
    #[must_use]
    pub fn parent(&self) -> Option<SectionId> {
        self.parent
    }

    /// Children in stored order.
    #[must_use]
    pub fn children(&self) -> &[SectionId] {
        &self.children
    }

    /// Returns true if the section has no parent section.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Section type.
    #[must_use]
    pub fn section_type(&self) -> T {
        self.section_type
    }

    /// Samples.
    #[must_use]
    pub fn point_level(&self) -> &PointLevel {
        &self.points
    }

    /// Sample positions.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points.points
    }

    /// Sample diameters.
    #[must_use]
    pub fn diameters(&self) -> &[f64] {
        &self.points.diameters
    }

    /// Sample perimeters, or empty.
    #[must_use]
    pub fn perimeters(&self) -> &[f64] {
        &self.points.perimeters
    }

    /// Arc length along the samples.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.points().windows(2).map(|w| w[0].distance(w[1])).sum()
    }

    pub(crate) fn points_mut(&mut self) -> &mut PointLevel {
        Arc::make_mut(&mut self.points)
    }
}
