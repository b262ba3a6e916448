//! Integration tests for soma resolution
//!
//! Tests type inference from point counts, the three-point convention and
//! contour somata.

use std::f64::consts::PI;

use neurite_builder::{BuildOptions, SampleRecord, build};
use neurite_diagnostics::Diagnostics;
use neurite_foundation::{ErrorKind, Point, ROOT_SAMPLE, SectionType, SomaType, WarningKind};

use crate::{AXON, SOMA, build_capturing, neuron, sample};

fn three_point(offset: f64) -> Vec<SampleRecord> {
    vec![
        SampleRecord::new(1, SOMA, Point::origin(), 1.0, ROOT_SAMPLE),
        SampleRecord::new(2, SOMA, Point::new(0.0, -offset, 0.0), 1.0, 1),
        SampleRecord::new(3, SOMA, Point::new(0.0, offset, 0.0), 1.0, 1),
        sample(4, AXON, 2.0, 0.5, 1),
        sample(5, AXON, 3.0, 0.5, 4),
    ]
}

#[test]
fn single_point_soma_surface() {
    let raw = neuron(vec![sample(1, SOMA, 0.0, 2.0, ROOT_SAMPLE)]);
    let m = build_capturing(&raw).0.unwrap();
    let soma = m.soma();
    assert_eq!(soma.soma_type(), SomaType::SinglePoint);
    assert_eq!(soma.diameters(), &[4.0]);
    assert!((soma.surface() - 4.0 * PI * 4.0).abs() < 1e-9);
    assert_eq!(soma.center(), Some(Point::origin()));
}

#[test]
fn conforming_three_point_soma() {
    let (m, buffer) = build_capturing(&neuron(three_point(1.0)));
    let m = m.unwrap();
    assert_eq!(m.soma().soma_type(), SomaType::ThreePointCylinders);
    assert_eq!(m.soma().points().len(), 3);
    assert!(buffer.is_empty());
}

#[test]
fn non_conforming_three_point_soma() {
    let (m, buffer) = build_capturing(&neuron(three_point(3.0)));
    assert_eq!(m.unwrap().soma().soma_type(), SomaType::Cylinders);
    assert_eq!(buffer.warnings()[0].kind, WarningKind::SomaNonConform);

    let err = build::<SectionType>(&neuron(three_point(3.0)), &BuildOptions::strict(), &mut Diagnostics::silent())
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Soma(_)));
}

#[test]
fn contour_soma() {
    let raw = neuron(vec![
        SampleRecord::new(1, SOMA, Point::new(1.0, 0.0, 0.0), 0.1, ROOT_SAMPLE),
        SampleRecord::new(2, SOMA, Point::new(0.0, 1.0, 0.0), 0.1, 1),
        SampleRecord::new(3, SOMA, Point::new(-1.0, 0.0, 0.0), 0.1, 2),
        SampleRecord::new(4, SOMA, Point::new(0.0, -1.0, 0.0), 0.1, 3),
        sample(5, AXON, 1.0, 0.5, 1),
        sample(6, AXON, 2.0, 0.5, 5),
    ])
    .with_soma_type(SomaType::SimpleContour);
    let m = build_capturing(&raw).0.unwrap();
    let soma = m.soma();
    assert_eq!(soma.soma_type(), SomaType::SimpleContour);
    assert!(soma.center().unwrap().approx_eq(Point::origin()));
    assert!((soma.max_distance() - 1.0).abs() < 1e-9);
    assert!((soma.surface() - 4.0 * PI).abs() < 1e-9);
}

#[test]
fn declared_single_point_with_many_points() {
    let raw = neuron(vec![sample(1, SOMA, 0.0, 1.0, ROOT_SAMPLE), sample(2, SOMA, 1.0, 1.0, 1)])
        .with_soma_type(SomaType::SinglePoint);
    let err = build_capturing(&raw).0.unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Soma(_)));
}

#[test]
fn no_soma_warns() {
    let raw = neuron(vec![sample(1, AXON, 0.0, 1.0, ROOT_SAMPLE), sample(2, AXON, 1.0, 1.0, 1)]);
    let (m, buffer) = build_capturing(&raw);
    assert!(m.unwrap().soma().is_empty());
    assert_eq!(buffer.warnings()[0].kind, WarningKind::NoSomaFound);
}
