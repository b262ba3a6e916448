//! Monotonic id allocation with tombstones.
//!
//! Ids handed out by an allocator are never reused: once a section is
//! deleted its id stays dead, so a stale id can never silently name a
//! different section.

use std::marker::PhantomData;

use neurite_storage::ForestId;

/// Allocates ids `0, 1, 2, ...` and tracks how many are live.
#[derive(Clone, Debug)]
pub struct IdAllocator<I> {
    next: usize,
    live: usize,
    _id: PhantomData<I>,
}

impl<I: ForestId> Default for IdAllocator<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: ForestId> IdAllocator<I> {
    /// Creates an allocator whose first id is 0.
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    /// Creates an allocator for a view whose ids `0..next` are all live.
    #[must_use]
    pub fn starting_at(next: usize) -> Self {
        Self {
            next,
            live: next,
            _id: PhantomData,
        }
    }

    /// Allocates a fresh id.
    pub fn allocate(&mut self) -> I {
        let id = I::from_index(self.next);
        self.next += 1;
        self.live += 1;
        id
    }

    /// Records that `count` ids died.
    pub fn release(&mut self, count: usize) {
        self.live = self.live.saturating_sub(count);
    }

    /// Returns true if `id` was allocated by this allocator.
    #[must_use]
    pub fn was_allocated(&self, id: I) -> bool {
        id.index() < self.next
    }

    /// Number of live ids.
    #[must_use]
    pub fn live(&self) -> usize {
        self.live
    }

    /// Number of ids ever allocated.
    #[must_use]
    pub fn allocated(&self) -> usize {
        self.next
    }

    /// Number of dead ids.
    #[must_use]
    pub fn tombstones(&self) -> usize {
        self.next - self.live
    }
}
