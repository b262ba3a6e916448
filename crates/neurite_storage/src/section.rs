//! Borrowed handle onto one section of an immutable morphology.

use std::fmt;
use std::ops::Range;

use neurite_foundation::{Point, SectionId, SectionTag};

use crate::iter::{BreadthFirst, DepthFirst, Upstream};
use crate::morphology::Morphology;

/// A section of a [`Morphology`].
///
/// Handles are only created for ids that resolve, so every accessor is
/// infallible.
#[derive(Copy, Clone)]
pub struct Section<'a, T: SectionTag> {
    morphology: &'a Morphology<T>,
    id: SectionId,
}

impl<'a, T: SectionTag> Section<'a, T> {
    pub(crate) fn new(morphology: &'a Morphology<T>, id: SectionId) -> Self {
        Self { morphology, id }
    }

    /// The section id.
    #[must_use]
    pub fn id(&self) -> SectionId {
        self.id
    }

    /// The section type.
    #[must_use]
    pub fn section_type(&self) -> T {
        self.morphology.properties().section_types()[self.id.index()]
    }

    /// Parent section, or `None` for roots.
    #[must_use]
    pub fn parent(&self) -> Option<Section<'a, T>> {
        self.morphology
            .properties()
            .forest()
            .parent(self.id)
            .map(|p| Section::new(self.morphology, p))
    }

    /// Child section ids in stored order.
    #[must_use]
    pub fn children(&self) -> &'a [SectionId] {
        self.morphology.properties().forest().children(self.id)
    }

    /// Returns true if the section has no parent section.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.morphology.properties().forest().parent(self.id).is_none()
    }

    /// Rows of the flat point table covered by this section.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.morphology.properties().forest().range(self.id)
    }

    /// Sample positions.
    #[must_use]
    pub fn points(&self) -> &'a [Point] {
        &self.morphology.properties().point_level().points[self.range()]
    }

    /// Sample diameters.
    #[must_use]
    pub fn diameters(&self) -> &'a [f64] {
        &self.morphology.properties().point_level().diameters[self.range()]
    }

    /// Sample perimeters, empty if the morphology has none.
    #[must_use]
    pub fn perimeters(&self) -> &'a [f64] {
        let perimeters = &self.morphology.properties().point_level().perimeters;
        if perimeters.is_empty() {
            &[]
        } else {
            &perimeters[self.range()]
        }
    }

    /// Number of samples.
    #[must_use]
    pub fn n_points(&self) -> usize {
        self.range().len()
    }

    /// Arc length along the samples.
    ///
    /// Children start on the last sample of their parent, so summing the
    /// lengths of a path of sections gives the path length.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.points().windows(2).map(|w| w[0].distance(w[1])).sum()
    }

    /// Position at a fraction of the arc length, clamped to `[0, 1]`.
    #[must_use]
    pub fn point_at(&self, relative: f64) -> Point {
        interpolate(self.points(), relative)
    }

    /// Total path length from the start of the root section to the end of
    /// this one.
    #[must_use]
    pub fn path_length(&self) -> f64 {
        self.upstream()
            .map(|id| Section::new(self.morphology, id).length())
            .sum()
    }

    /// Depth-first traversal of the subtree rooted here.
    #[must_use]
    pub fn depth_first(&self) -> DepthFirst<'a, Morphology<T>> {
        DepthFirst::new(self.morphology, [self.id])
    }

    /// Breadth-first traversal of the subtree rooted here.
    #[must_use]
    pub fn breadth_first(&self) -> BreadthFirst<'a, Morphology<T>> {
        BreadthFirst::new(self.morphology, [self.id])
    }

    /// This section, its parent, and so on up to the root.
    #[must_use]
    pub fn upstream(&self) -> Upstream<'a, Morphology<T>> {
        Upstream::new(self.morphology, self.id)
    }
}

/// Linear interpolation at a fraction of a polyline's arc length.
pub(crate) fn interpolate(points: &[Point], relative: f64) -> Point {
    let Some(&first) = points.first() else {
        return Point::origin();
    };
    let total: f64 = points.windows(2).map(|w| w[0].distance(w[1])).sum();
    if total <= 0.0 {
        return first;
    }
    let mut remaining = relative.clamp(0.0, 1.0) * total;
    for w in points.windows(2) {
        let segment = w[0].distance(w[1]);
        if remaining <= segment {
            if segment <= 0.0 {
                return w[0];
            }
            return w[0] + (w[1] - w[0]) * (remaining / segment);
        }
        remaining -= segment;
    }
    points[points.len() - 1]
}

impl<T: SectionTag> fmt::Debug for Section<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Section")
            .field("id", &self.id)
            .field("type", &self.section_type())
            .field("n_points", &self.n_points())
            .finish()
    }
}

impl<T: SectionTag> fmt::Display for Section<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {} points)", self.id, self.section_type(), self.n_points())
    }
}

impl<T: SectionTag> PartialEq for Section<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.morphology, other.morphology) && self.id == other.id
    }
}
