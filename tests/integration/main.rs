//! Integration tests across all layers
//!
//! These go through the `neurite` facade: records are encoded, loaded,
//! edited, written back and loaded again.

mod codec;

use neurite::builder::{RawMorphology, SampleRecord};
use neurite::foundation::{CellFamily, Point, ROOT_SAMPLE};
use neurite::io::Registry;

pub use codec::TextSwc;

/// The built-in registry plus the plain-text SWC codec.
pub fn registry() -> Registry {
    Registry::new().with_reader(TextSwc).with_writer(TextSwc)
}

/// Soma, a forked basal dendrite and a two-sample axon.
pub fn cell() -> RawMorphology {
    RawMorphology::new(CellFamily::Neuron).with_samples(vec![
        SampleRecord::new(1, 1, Point::origin(), 1.0, ROOT_SAMPLE),
        SampleRecord::new(2, 3, Point::new(0.0, 0.0, 1.0), 0.5, 1),
        SampleRecord::new(3, 3, Point::new(0.0, 0.0, 2.0), 0.5, 2),
        SampleRecord::new(4, 3, Point::new(1.0, 0.0, 2.5), 0.25, 3),
        SampleRecord::new(5, 3, Point::new(-1.0, 0.0, 2.5), 0.25, 3),
        SampleRecord::new(6, 2, Point::new(0.0, 0.0, -1.0), 0.5, 1),
        SampleRecord::new(7, 2, Point::new(0.0, 0.0, -2.0), 0.5, 6),
    ])
}

/// A unique path under the system temp directory.
pub fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("neurite_it_{}_{name}", std::process::id()))
}
