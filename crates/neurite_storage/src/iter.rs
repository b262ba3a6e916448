//! Traversal over any tree.
//!
//! Traversals are lazy, finite and restartable (clone the iterator, or ask the
//! view for a fresh one). They borrow the tree for their whole lifetime, so the
//! tree cannot be edited mid-traversal: the order is fixed by the state at the
//! start. To edit while walking a mutable tree, walk a snapshot of it.

use std::collections::VecDeque;
use std::fmt;

/// Read access to a forest's structure.
///
/// Implemented by both the immutable and the mutable views, and by the
/// mitochondria overlays.
pub trait Topology {
    /// Identifier of a node.
    type Id: Copy + Eq + fmt::Debug;

    /// Root nodes, in stored order.
    fn roots(&self) -> &[Self::Id];

    /// Parent of a node, or `None` for roots and unknown ids.
    fn parent_of(&self, id: Self::Id) -> Option<Self::Id>;

    /// Children of a node in stored order; empty for leaves and unknown ids.
    fn children_of(&self, id: Self::Id) -> &[Self::Id];
}

// =============================================================================
// Depth First
// =============================================================================

/// Pre-order depth-first traversal, children visited in stored order.
pub struct DepthFirst<'a, G: Topology + ?Sized> {
    graph: &'a G,
    stack: Vec<G::Id>,
}

impl<'a, G: Topology + ?Sized> DepthFirst<'a, G> {
    /// Traverses the subtrees below each start node, in order.
    pub fn new(graph: &'a G, start: impl IntoIterator<Item = G::Id>) -> Self {
        let mut stack: Vec<_> = start.into_iter().collect();
        stack.reverse();
        Self { graph, stack }
    }

    /// Traverses the whole forest.
    pub fn from_roots(graph: &'a G) -> Self {
        Self::new(graph, graph.roots().iter().copied())
    }
}

impl<G: Topology + ?Sized> Clone for DepthFirst<'_, G> {
    fn clone(&self) -> Self {
        Self {
            graph: self.graph,
            stack: self.stack.clone(),
        }
    }
}

impl<G: Topology + ?Sized> Iterator for DepthFirst<'_, G> {
    type Item = G::Id;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.graph.children_of(id).iter().rev().copied());
        Some(id)
    }
}

// =============================================================================
// Breadth First
// =============================================================================

/// Level-order traversal, children visited in stored order.
pub struct BreadthFirst<'a, G: Topology + ?Sized> {
    graph: &'a G,
    queue: VecDeque<G::Id>,
}

impl<'a, G: Topology + ?Sized> BreadthFirst<'a, G> {
    /// Traverses the subtrees below each start node, level by level.
    pub fn new(graph: &'a G, start: impl IntoIterator<Item = G::Id>) -> Self {
        Self {
            graph,
            queue: start.into_iter().collect(),
        }
    }

    /// Traverses the whole forest.
    pub fn from_roots(graph: &'a G) -> Self {
        Self::new(graph, graph.roots().iter().copied())
    }
}

impl<G: Topology + ?Sized> Clone for BreadthFirst<'_, G> {
    fn clone(&self) -> Self {
        Self {
            graph: self.graph,
            queue: self.queue.clone(),
        }
    }
}

impl<G: Topology + ?Sized> Iterator for BreadthFirst<'_, G> {
    type Item = G::Id;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.queue.pop_front()?;
        self.queue
            .extend(self.graph.children_of(id).iter().copied());
        Some(id)
    }
}

// =============================================================================
// Upstream
// =============================================================================

/// Walks from a node to its root: the node, its parent, and so on.
pub struct Upstream<'a, G: Topology + ?Sized> {
    graph: &'a G,
    current: Option<G::Id>,
}

impl<'a, G: Topology + ?Sized> Upstream<'a, G> {
    /// Starts at `start` (included).
    pub fn new(graph: &'a G, start: G::Id) -> Self {
        Self {
            graph,
            current: Some(start),
        }
    }
}

impl<G: Topology + ?Sized> Clone for Upstream<'_, G> {
    fn clone(&self) -> Self {
        Self {
            graph: self.graph,
            current: self.current,
        }
    }
}

impl<G: Topology + ?Sized> Iterator for Upstream<'_, G> {
    type Item = G::Id;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.graph.parent_of(id);
        Some(id)
    }
}
