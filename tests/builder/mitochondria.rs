//! Integration tests for the mitochondria overlay
//!
//! Tests overlay chaining and validation against the finished tree.

use neurite_builder::{BuildOptions, MitoRecord, build, build_mitochondria};
use neurite_diagnostics::Diagnostics;
use neurite_foundation::{ErrorKind, MitoSectionId, Point, ROOT_SAMPLE, SectionId, SectionType};
use neurite_storage::Morphology;

use crate::{BASAL, SOMA, neuron, sample};

fn host() -> Morphology {
    let raw = neuron(vec![
        sample(1, SOMA, 0.0, 1.0, ROOT_SAMPLE),
        sample(2, BASAL, 1.0, 0.5, 1),
        sample(3, BASAL, 3.0, 0.5, 2),
        sample(4, BASAL, 4.0, 0.5, 3),
        sample(5, BASAL, 5.0, 0.5, 3),
    ]);
    build::<SectionType>(&raw, &BuildOptions::default(), &mut Diagnostics::silent()).unwrap()
}

#[test]
fn overlay_built_with_tree() {
    let mut raw = neuron(vec![
        sample(1, SOMA, 0.0, 1.0, ROOT_SAMPLE),
        sample(2, BASAL, 1.0, 0.5, 1),
        sample(3, BASAL, 3.0, 0.5, 2),
    ]);
    raw.push_mito(MitoRecord::new(1, SectionId::new(0), 0.0, 0.2, ROOT_SAMPLE));
    raw.push_mito(MitoRecord::new(2, SectionId::new(0), 0.5, 0.2, 1));

    let m = build::<SectionType>(&raw, &BuildOptions::default(), &mut Diagnostics::silent()).unwrap();
    let mito = m.mitochondria();
    assert_eq!(mito.n_sections(), 1);
    let section = mito.section(MitoSectionId::new(0)).unwrap();
    assert_eq!(section.n_points(), 2);
    let positions = section.positions(&m).unwrap();
    assert!(positions[0].approx_eq(Point::new(0.0, 0.0, 1.0)));
    assert!(positions[1].approx_eq(Point::new(0.0, 0.0, 2.0)));
}

#[test]
fn overlay_branches() {
    let records = [
        MitoRecord::new(1, SectionId::new(0), 0.3, 0.1, ROOT_SAMPLE),
        MitoRecord::new(2, SectionId::new(0), 0.9, 0.1, 1),
        MitoRecord::new(3, SectionId::new(1), 0.4, 0.1, 2),
        MitoRecord::new(4, SectionId::new(2), 0.4, 0.1, 2),
    ];
    let m = build_mitochondria(host(), &records).unwrap();
    let mito = m.mitochondria();
    assert_eq!(mito.root_sections(), &[MitoSectionId::new(0)]);
    let children = mito.children(MitoSectionId::new(0)).unwrap();
    assert_eq!(children.len(), 2);
    for &child in children {
        assert_eq!(mito.parent(child).unwrap(), Some(MitoSectionId::new(0)));
    }
    assert!(mito.touches(SectionId::new(2)));
    assert_eq!(mito.depth_first().count(), 3);
}

#[test]
fn overlay_rejects_missing_host() {
    let records = [MitoRecord::new(1, SectionId::new(7), 0.5, 0.1, ROOT_SAMPLE)];
    let err = build_mitochondria(host(), &records).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::RawData(_)));
}

#[test]
fn overlay_rejects_duplicate_ids() {
    let records = [
        MitoRecord::new(1, SectionId::new(0), 0.5, 0.1, ROOT_SAMPLE),
        MitoRecord::new(1, SectionId::new(0), 0.6, 0.1, ROOT_SAMPLE),
    ];
    let err = build_mitochondria(host(), &records).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::IdSequence(_)));
}

#[test]
fn overlay_ids_are_independent() {
    let records = [MitoRecord::new(1, SectionId::new(1), 0.5, 0.1, ROOT_SAMPLE)];
    let m = build_mitochondria(host(), &records).unwrap();
    assert_eq!(m.mitochondria().n_sections(), 1);
    assert_eq!(m.n_sections(), 3);
}
