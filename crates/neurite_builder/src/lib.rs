//! Building validated morphologies from normalized record streams.
//!
//! This crate provides:
//! - [`RawMorphology`] / [`SampleRecord`] / [`MitoRecord`] - The normalized input stream
//! - [`BuildOptions`] - Strictness and multiple-tree handling
//! - [`build`] - Records to an immutable [`Morphology`](neurite_storage::Morphology)
//! - [`build_mitochondria`] - Records to a mitochondria overlay on a finished tree
//!
//! Building is all-or-nothing: any fatal condition yields a typed error and
//! no tree. Advisory conditions are reported to the caller's
//! [`Diagnostics`](neurite_diagnostics::Diagnostics) context and recorded as
//! annotations where they are anchored to a section.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod chain;
pub mod mito;
pub mod neurite;
pub mod options;
pub mod record;
pub mod soma;

pub use mito::build_mitochondria;
pub use neurite::build;
pub use options::{BuildOptions, MultipleTrees, Strictness};
pub use record::{MitoRecord, RawMorphology, SampleRecord};
pub use soma::resolve_soma;
