//! Integration tests for Layer 2: Builder
//!
//! Tests for building morphologies from record streams: sectioning, soma
//! resolution, fatal errors and the mitochondria overlay.

mod errors;
mod mitochondria;
mod sections;
mod soma;

use neurite_builder::{BuildOptions, RawMorphology, SampleRecord, build};
use neurite_diagnostics::{BufferSink, Diagnostics, DiagnosticsPolicy};
use neurite_foundation::{CellFamily, Point, Result, SampleId};
use neurite_storage::Morphology;

pub const SOMA: i32 = 1;
pub const AXON: i32 = 2;
pub const BASAL: i32 = 3;
pub const APICAL: i32 = 4;

/// A sample on the z axis.
pub fn sample(id: SampleId, type_code: i32, z: f64, radius: f64, parent: SampleId) -> SampleRecord {
    SampleRecord::new(id, type_code, Point::new(0.0, 0.0, z), radius, parent)
}

pub fn neuron(samples: Vec<SampleRecord>) -> RawMorphology {
    RawMorphology::new(CellFamily::Neuron).with_samples(samples)
}

/// Builds with default options, capturing every surfaced warning.
pub fn build_capturing(raw: &RawMorphology) -> (Result<Morphology>, BufferSink) {
    let buffer = BufferSink::new();
    let mut diagnostics = Diagnostics::new(DiagnosticsPolicy::new(), buffer.clone());
    (build(raw, &BuildOptions::default(), &mut diagnostics), buffer)
}
