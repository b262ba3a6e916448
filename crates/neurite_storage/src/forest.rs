//! Dense topology graph shared by every tree in a morphology.
//!
//! A [`Forest`] owns the section identity and parent/children structure plus
//! the offsets that map each section onto its slice of a flat point table.
//! The primary tree and the mitochondria overlay are both forests, differing
//! only in their id type.

use std::collections::VecDeque;
use std::fmt;
use std::hash::Hash;
use std::ops::Range;

use neurite_foundation::{Error, MitoSectionId, Result, SectionId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::iter::Topology;

/// An id usable as a dense forest index.
pub trait ForestId:
    Copy + Eq + Ord + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// Builds the id for a dense index.
    fn from_index(index: usize) -> Self;

    /// Returns the dense index of this id.
    fn index(self) -> usize;
}

impl ForestId for SectionId {
    fn from_index(index: usize) -> Self {
        SectionId::from_index(index)
    }

    fn index(self) -> usize {
        SectionId::index(self)
    }
}

impl ForestId for MitoSectionId {
    fn from_index(index: usize) -> Self {
        MitoSectionId::from_index(index)
    }

    fn index(self) -> usize {
        MitoSectionId::index(self)
    }
}

/// Validated parent/children structure over dense ids `0..len`.
///
/// # Invariants
/// - Every parent id is smaller than its child's id, so the structure is
///   acyclic and every section is reachable from exactly one root.
/// - Every section covers a non-empty, contiguous range of the point table;
///   ranges are ordered by id and tile the table without gaps.
/// - Children and roots are stored in ascending id order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Forest<I> {
    offsets: Vec<usize>,
    parents: Vec<Option<I>>,
    children: Vec<Vec<I>>,
    roots: Vec<I>,
    depth_first: Vec<I>,
    breadth_first: Vec<I>,
}

impl<I: ForestId> Forest<I> {
    /// Builds a forest from per-section parents and point offsets.
    ///
    /// `offsets` has one entry per section plus a final end offset.
    ///
    /// # Errors
    ///
    /// - `IdSequence` if a parent does not precede its child.
    /// - `RawData` if offsets are malformed or a section has no points.
    pub fn new(parents: Vec<Option<I>>, offsets: Vec<usize>) -> Result<Self> {
        if offsets.len() != parents.len() + 1 {
            return Err(Error::raw_data(format!(
                "expected {} section offsets, got {}",
                parents.len() + 1,
                offsets.len()
            )));
        }
        if offsets[0] != 0 {
            return Err(Error::raw_data("first section offset must be 0"));
        }

        let mut children = vec![Vec::new(); parents.len()];
        let mut roots = Vec::new();
        for (index, parent) in parents.iter().enumerate() {
            let id = I::from_index(index);
            if offsets[index + 1] <= offsets[index] {
                return Err(Error::raw_data(format!("{id} has no points")));
            }
            match parent {
                None => roots.push(id),
                Some(parent) if parent.index() < index => children[parent.index()].push(id),
                Some(parent) => {
                    return Err(Error::id_sequence(format!(
                        "{id} does not follow its parent {parent}"
                    )));
                }
            }
        }

        let mut forest = Self {
            offsets,
            parents,
            children,
            roots,
            depth_first: Vec::new(),
            breadth_first: Vec::new(),
        };
        forest.depth_first = crate::iter::DepthFirst::from_roots(&forest).collect();
        forest.breadth_first = crate::iter::BreadthFirst::from_roots(&forest).collect();
        Ok(forest)
    }

    /// An empty forest.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            offsets: vec![0],
            parents: Vec::new(),
            children: Vec::new(),
            roots: Vec::new(),
            depth_first: Vec::new(),
            breadth_first: Vec::new(),
        }
    }

    /// Number of sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    /// Returns true if the forest has no sections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    /// Returns true if `id` names a section of this forest.
    #[must_use]
    pub fn contains(&self, id: I) -> bool {
        id.index() < self.parents.len()
    }

    /// Checks that `id` names a section, with a caller-supplied error.
    ///
    /// # Errors
    ///
    /// Returns `missing(id)` if the id is out of range.
    pub fn check(&self, id: I, missing: impl FnOnce(I) -> Error) -> Result<()> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(missing(id))
        }
    }

    /// Parent of a section (`None` for roots and unknown ids).
    #[must_use]
    pub fn parent(&self, id: I) -> Option<I> {
        self.parents.get(id.index()).copied().flatten()
    }

    /// Children of a section (empty for leaves and unknown ids).
    #[must_use]
    pub fn children(&self, id: I) -> &[I] {
        self.children.get(id.index()).map_or(&[][..], Vec::as_slice)
    }

    /// Root sections in id order.
    #[must_use]
    pub fn roots(&self) -> &[I] {
        &self.roots
    }

    /// Range of point-table rows covered by a section (empty for unknown ids).
    #[must_use]
    pub fn range(&self, id: I) -> Range<usize> {
        let index = id.index();
        if index < self.parents.len() {
            self.offsets[index]..self.offsets[index + 1]
        } else {
            0..0
        }
    }

    /// Section offsets, one per section plus the end offset.
    #[must_use]
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// Total number of point-table rows covered.
    #[must_use]
    pub fn n_points(&self) -> usize {
        self.offsets.last().copied().unwrap_or(0)
    }

    /// Cached pre-order depth-first order of the whole forest.
    #[must_use]
    pub fn depth_first_order(&self) -> &[I] {
        &self.depth_first
    }

    /// Cached breadth-first order of the whole forest.
    #[must_use]
    pub fn breadth_first_order(&self) -> &[I] {
        &self.breadth_first
    }

    /// Iterates all ids in ascending order.
    pub fn ids(&self) -> impl ExactSizeIterator<Item = I> + '_ {
        (0..self.parents.len()).map(I::from_index)
    }

    /// Depth of a section (roots have depth 0).
    #[must_use]
    pub fn depth(&self, id: I) -> usize {
        crate::iter::Upstream::new(self, id).count().saturating_sub(1)
    }

    /// Number of sections in each root's subtree, in root order.
    #[must_use]
    pub fn tree_sizes(&self) -> Vec<usize> {
        let mut sizes = Vec::with_capacity(self.roots.len());
        let mut queue = VecDeque::new();
        for &root in &self.roots {
            let mut size = 0;
            queue.push_back(root);
            while let Some(id) = queue.pop_front() {
                size += 1;
                queue.extend(self.children(id).iter().copied());
            }
            sizes.push(size);
        }
        sizes
    }
}

impl<I: ForestId> Topology for Forest<I> {
    type Id = I;

    fn roots(&self) -> &[I] {
        &self.roots
    }

    fn parent_of(&self, id: I) -> Option<I> {
        self.parent(id)
    }

    fn children_of(&self, id: I) -> &[I] {
        self.children(id)
    }
}
