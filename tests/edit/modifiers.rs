//! Integration tests for load-time modifiers

use neurite_builder::{BuildOptions, MitoRecord, RawMorphology, SampleRecord, build};
use neurite_diagnostics::Diagnostics;
use neurite_edit::Modifiers;
use neurite_foundation::{CellFamily, Point, ROOT_SAMPLE, SectionId, SectionType, SomaType};
use neurite_storage::Morphology;

fn id(raw: u32) -> SectionId {
    SectionId::new(raw)
}

/// Contour soma, a forked basal tree listed first, then a three-point axon.
fn cell() -> Morphology {
    built(&records())
}

fn built(raw: &RawMorphology) -> Morphology {
    build::<SectionType>(raw, &BuildOptions::default(), &mut Diagnostics::silent()).unwrap()
}

fn records() -> RawMorphology {
    RawMorphology::new(CellFamily::Neuron)
        .with_soma_type(SomaType::SimpleContour)
        .with_samples(vec![
            SampleRecord::new(1, 1, Point::new(1.0, 0.0, 0.0), 0.1, ROOT_SAMPLE),
            SampleRecord::new(2, 1, Point::new(0.0, 1.0, 0.0), 0.1, 1),
            SampleRecord::new(3, 1, Point::new(-1.0, 0.0, 0.0), 0.1, 2),
            SampleRecord::new(4, 1, Point::new(0.0, -1.0, 0.0), 0.1, 3),
            SampleRecord::new(10, 3, Point::new(0.0, 0.0, 1.0), 0.5, 1),
            SampleRecord::new(11, 3, Point::new(0.0, 0.0, 2.0), 0.5, 10),
            SampleRecord::new(12, 3, Point::new(1.0, 0.0, 2.0), 0.4, 11),
            SampleRecord::new(13, 3, Point::new(-1.0, 0.0, 2.0), 0.4, 11),
            SampleRecord::new(20, 2, Point::new(0.0, 0.0, -1.0), 0.5, 1),
            SampleRecord::new(21, 2, Point::new(0.0, 0.0, -2.0), 0.5, 20),
            SampleRecord::new(22, 2, Point::new(0.0, 0.0, -3.0), 0.5, 21),
        ])
}

#[test]
fn no_modifiers_is_identity() {
    let original = cell();
    let same = Modifiers::new().apply(&original).unwrap();
    assert!(Modifiers::new().is_empty());
    assert!(same.same_structure(&original));
}

#[test]
fn nrn_order_puts_axon_first() {
    let original = cell();
    assert_eq!(original.section_type(original.root_sections()[0]).unwrap(), SectionType::BasalDendrite);

    let ordered = Modifiers::new().with_nrn_order(true).apply(&original).unwrap();
    assert_eq!(ordered.section_type(id(0)).unwrap(), SectionType::Axon);
    assert_eq!(ordered.points(id(0)).unwrap().len(), 3);
    assert_eq!(ordered.children(id(1)).unwrap(), &[id(2), id(3)]);
}

#[test]
fn no_duplicates_drops_shared_points() {
    let trimmed = Modifiers::new().with_no_duplicates(true).apply(&cell()).unwrap();
    assert_eq!(trimmed.points(id(1)).unwrap(), &[Point::new(1.0, 0.0, 2.0)]);
    assert_eq!(trimmed.points(id(0)).unwrap().len(), 2);
    assert_eq!(trimmed.n_points(), 7);
}

#[test]
fn two_points_sections_keep_endpoints() {
    let reduced = Modifiers::new().with_two_points_sections(true).apply(&cell()).unwrap();
    assert_eq!(reduced.points(id(3)).unwrap(), &[Point::new(0.0, 0.0, -1.0), Point::new(0.0, 0.0, -3.0)]);
    assert_eq!(reduced.n_points(), 8);
}

#[test]
fn soma_sphere_replaces_contour() {
    let sphere = Modifiers::new().with_soma_sphere(true).apply(&cell()).unwrap();
    let soma = sphere.soma();
    assert_eq!(soma.soma_type(), SomaType::SinglePoint);
    assert_eq!(soma.points(), &[Point::origin()]);
    assert!((soma.diameters()[0] - 2.0).abs() < 1e-12);
    assert_eq!(sphere.n_sections(), 4);
}

#[test]
fn modifiers_combine() {
    let both = Modifiers::new()
        .with_nrn_order(true)
        .with_no_duplicates(true)
        .apply(&cell())
        .unwrap();
    assert_eq!(both.section_type(id(0)).unwrap(), SectionType::Axon);
    assert_eq!(both.points(id(2)).unwrap(), &[Point::new(1.0, 0.0, 2.0)]);
}

#[test]
fn point_dropping_modifiers_keep_mitochondria_fractions() {
    let mut raw = records();
    raw.push_mito(MitoRecord::new(1, id(0), 0.25, 0.1, ROOT_SAMPLE));
    raw.push_mito(MitoRecord::new(2, id(1), 0.5, 0.1, 1));
    let original = built(&raw);

    for modifiers in [
        Modifiers::new().with_no_duplicates(true),
        Modifiers::new().with_two_points_sections(true),
    ] {
        let out = modifiers.apply(&original).unwrap();
        assert_eq!(out.mitochondria().properties(), original.mitochondria().properties());
    }
}
