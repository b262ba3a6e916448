//! Point tables, topology graphs, immutable morphology views and traversal.
//!
//! This crate provides:
//! - [`Forest`] - Dense, validated parent/children structure shared by all trees
//! - [`PointLevel`] / [`MitoPointLevel`] - Per-section point data
//! - [`Properties`] - The flat point table plus topology of a morphology
//! - [`Morphology`] - Immutable, cheaply clonable query view
//! - [`Mitochondria`] - Immutable organelle overlay referencing a morphology
//! - [`DepthFirst`], [`BreadthFirst`], [`Upstream`] - Traversal over any [`Topology`]

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod forest;
pub mod iter;
pub mod mitochondria;
pub mod morphology;
pub mod point_level;
pub mod properties;
pub mod reticulum;
pub mod section;
pub mod soma;

pub use forest::{Forest, ForestId};
pub use iter::{BreadthFirst, DepthFirst, Topology, Upstream};
pub use mitochondria::{MitoProperties, MitoSection, Mitochondria};
pub use morphology::{Morphology, Vasculature};
pub use point_level::{MitoPointLevel, PointLevel};
pub use properties::{Properties, PropertiesBuilder, SomaData};
pub use reticulum::{EndoplasmicReticulum, ReticulumEntry};
pub use section::Section;
pub use soma::Soma;
