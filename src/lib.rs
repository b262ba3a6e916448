//! Neurite - Morphology trees for neurons, glia and vasculature
//!
//! This crate re-exports all layers of the neurite system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 4: neurite_io          - Format tags, registry, snapshot, load/save entry points
//! Layer 3: neurite_edit        - Mutable view, atomic edits, modifiers
//! Layer 2: neurite_builder     - Record streams to validated morphologies
//! Layer 1: neurite_storage     - Point tables, topology, immutable views, traversal
//!          neurite_diagnostics - Warning policy, sinks, formatting
//! Layer 0: neurite_foundation  - Core types (SectionId, Point, SectionType, Error)
//! ```

pub use neurite_builder as builder;
pub use neurite_diagnostics as diagnostics;
pub use neurite_edit as edit;
pub use neurite_foundation as foundation;
pub use neurite_io as io;
pub use neurite_storage as storage;
