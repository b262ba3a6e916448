//! Integration tests for fatal build errors
//!
//! Every fatal condition yields a typed error and no tree.

use neurite_builder::{BuildOptions, MultipleTrees, build};
use neurite_diagnostics::Diagnostics;
use neurite_foundation::{ErrorKind, ROOT_SAMPLE, SectionType, SomaType};

use crate::{AXON, BASAL, SOMA, build_capturing, neuron, sample};

// =============================================================================
// Sample References
// =============================================================================

#[test]
fn parent_defined_later_is_missing() {
    let raw = neuron(vec![
        sample(1, SOMA, 0.0, 1.0, ROOT_SAMPLE),
        sample(2, AXON, 1.0, 0.5, 3),
        sample(3, AXON, 2.0, 0.5, 1),
    ]);
    let (result, buffer) = build_capturing(&raw);
    let err = result.unwrap_err();
    assert_eq!(err.kind, ErrorKind::MissingParent { sample: 2, parent: 3 });
    assert!(buffer.is_empty());
}

#[test]
fn undefined_parent_is_missing() {
    let raw = neuron(vec![
        sample(1, SOMA, 0.0, 1.0, ROOT_SAMPLE),
        sample(2, AXON, 1.0, 0.5, 1),
        sample(3, AXON, 2.0, 0.5, 99),
    ]);
    let err = build_capturing(&raw).0.unwrap_err();
    assert_eq!(err.kind, ErrorKind::MissingParent { sample: 3, parent: 99 });
}

#[test]
fn duplicate_sample_id() {
    let raw = neuron(vec![
        sample(1, SOMA, 0.0, 1.0, ROOT_SAMPLE),
        sample(2, AXON, 1.0, 0.5, 1),
        sample(2, AXON, 2.0, 0.5, 1),
    ]);
    let err = build_capturing(&raw).0.unwrap_err();
    assert!(matches!(err.kind, ErrorKind::IdSequence(_)));
    assert_eq!(err.context.and_then(|c| c.sample), Some(2));
}

#[test]
fn self_parent_is_id_sequence() {
    let raw = neuron(vec![sample(1, SOMA, 0.0, 1.0, ROOT_SAMPLE), sample(2, AXON, 1.0, 0.5, 2)]);
    let err = build_capturing(&raw).0.unwrap_err();
    assert!(matches!(err.kind, ErrorKind::IdSequence(_)));
}

// =============================================================================
// Soma
// =============================================================================

#[test]
fn declared_soma_with_zero_points() {
    for declared in [SomaType::SinglePoint, SomaType::ThreePointCylinders, SomaType::SimpleContour] {
        let raw = neuron(vec![
            sample(1, BASAL, 0.0, 1.0, ROOT_SAMPLE),
            sample(2, BASAL, 1.0, 1.0, 1),
            sample(3, BASAL, 2.0, 1.0, 2),
        ])
        .with_soma_type(declared);
        let err = build_capturing(&raw).0.unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Soma(_)), "{declared}");
    }
}

#[test]
fn disconnected_somata() {
    let raw = neuron(vec![
        sample(1, SOMA, 0.0, 1.0, ROOT_SAMPLE),
        sample(2, SOMA, 5.0, 1.0, ROOT_SAMPLE),
    ]);
    let err = build_capturing(&raw).0.unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Soma(_)));
}

#[test]
fn contour_with_two_points() {
    let raw = neuron(vec![sample(1, SOMA, 0.0, 1.0, ROOT_SAMPLE), sample(2, SOMA, 1.0, 1.0, 1)])
        .with_soma_type(SomaType::SimpleContour);
    let err = build_capturing(&raw).0.unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Soma(_)));
}

// =============================================================================
// Raw Data
// =============================================================================

#[test]
fn negative_radius() {
    let raw = neuron(vec![sample(1, SOMA, 0.0, -1.0, ROOT_SAMPLE)]);
    let err = build_capturing(&raw).0.unwrap_err();
    assert!(matches!(err.kind, ErrorKind::RawData(_)));
}

#[test]
fn non_finite_coordinate() {
    let raw = neuron(vec![sample(1, SOMA, f64::NAN, 1.0, ROOT_SAMPLE)]);
    let err = build_capturing(&raw).0.unwrap_err();
    assert!(matches!(err.kind, ErrorKind::RawData(_)));
    assert_eq!(err.context.and_then(|c| c.sample), Some(1));
}

#[test]
fn mixed_perimeters() {
    let raw = neuron(vec![
        sample(1, SOMA, 0.0, 1.0, ROOT_SAMPLE).with_perimeter(2.0),
        sample(2, AXON, 1.0, 0.5, 1),
    ]);
    let err = build_capturing(&raw).0.unwrap_err();
    assert!(matches!(err.kind, ErrorKind::RawData(_)));
}

#[test]
fn rejected_multiple_trees() {
    let raw = neuron(vec![
        sample(1, AXON, 0.0, 1.0, ROOT_SAMPLE),
        sample(2, AXON, 1.0, 1.0, 1),
        sample(3, BASAL, 5.0, 1.0, ROOT_SAMPLE),
        sample(4, BASAL, 6.0, 1.0, 3),
        sample(5, BASAL, 9.0, 1.0, ROOT_SAMPLE),
    ]);
    let options = BuildOptions::new().with_multiple_trees(MultipleTrees::Reject);
    let err = build::<SectionType>(&raw, &options, &mut Diagnostics::silent()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::MultipleTrees { roots: 3 });
}

#[test]
fn errors_carry_the_source() {
    let raw = neuron(vec![sample(1, SOMA, 0.0, 1.0, ROOT_SAMPLE), sample(2, AXON, 1.0, 0.5, 8)]);
    let options = BuildOptions::new().with_source("pyramidal.swc");
    let err = build::<SectionType>(&raw, &options, &mut Diagnostics::silent()).unwrap_err();
    let context = err.context.unwrap();
    assert_eq!(context.source.as_deref(), Some("pyramidal.swc"));
}
