//! Core identifiers, points, type tags, warnings and errors for neurite.
//!
//! This crate provides:
//! - [`SectionId`] / [`MitoSectionId`] - Dense section identifiers
//! - [`Point`] - Sample positions with approximate comparison
//! - [`SectionType`], [`VasculatureSectionType`], [`SomaType`], [`CellFamily`] - Type tags
//! - [`Warning`] / [`Annotation`] - Advisory records raised while building
//! - [`Error`] - Typed failures with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod id;
pub mod point;
pub mod types;
pub mod warning;

pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use id::{MitoSectionId, ROOT_SAMPLE, SampleId, SectionId};
pub use point::{EPSILON, Point};
pub use types::{
    CellFamily, MorphologyVersion, SectionTag, SectionType, SomaType, VasculatureSectionType,
};
pub use warning::{Annotation, AnnotationType, LogLevel, Warning, WarningKind};
