//! The mutable, edit-optimized view of a morphology.
//!
//! This crate provides:
//! - [`MutMorphology`] - Id-owned tree with insertion, deletion, merging and
//!   point mutation; every edit is atomic
//! - [`MutMitochondria`] - Editable mitochondria overlay
//! - [`DeletePolicy`] - What non-recursive deletion does with children
//! - [`Modifiers`] - Load-time simplifications
//!
//! Conversion from an immutable view keeps ids; [`MutMorphology::freeze`]
//! renumbers live sections densely in depth-first order.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ids;
pub mod mitochondria;
pub mod modifiers;
pub mod morphology;
pub mod policy;
pub mod section;

pub use ids::IdAllocator;
pub use mitochondria::{MutMitoSection, MutMitochondria};
pub use modifiers::Modifiers;
pub use morphology::MutMorphology;
pub use policy::DeletePolicy;
pub use section::MutSection;
