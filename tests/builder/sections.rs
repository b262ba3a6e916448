//! Integration tests for sectioning
//!
//! Tests how samples chain into sections, branch point duplication, and the
//! advisories raised along the way.

use neurite_builder::{BuildOptions, RawMorphology, SampleRecord, build};
use neurite_diagnostics::Diagnostics;
use neurite_foundation::{
    AnnotationType, CellFamily, Point, ROOT_SAMPLE, SectionId, SectionType, SomaType,
    VasculatureSectionType, WarningKind,
};

use crate::{APICAL, AXON, BASAL, SOMA, build_capturing, neuron, sample};

// =============================================================================
// Sectioning
// =============================================================================

#[test]
fn end_to_end_minimal_neuron() {
    let raw = neuron(vec![
        sample(1, SOMA, 0.0, 1.0, ROOT_SAMPLE),
        sample(2, AXON, 1.0, 0.5, 1),
        sample(3, AXON, 2.0, 0.5, 2),
    ]);
    let (m, buffer) = build_capturing(&raw);
    let m = m.unwrap();

    assert_eq!(m.soma().points(), &[Point::origin()]);
    assert_eq!(m.soma().soma_type(), SomaType::SinglePoint);
    assert_eq!(m.n_sections(), 1);

    let axon = m.section(m.root_sections()[0]).unwrap();
    assert_eq!(axon.section_type(), SectionType::Axon);
    assert_eq!(axon.n_points(), 2);
    assert!(axon.children().is_empty());
    assert!(axon.is_root());
    assert!(axon.parent().is_none());

    assert_eq!(m.depth_first().collect::<Vec<_>>(), vec![axon.id()]);
    assert!(buffer.is_empty());
}

#[test]
fn bifurcation_duplicates_branch_point() {
    let raw = neuron(vec![
        sample(1, SOMA, 0.0, 1.0, ROOT_SAMPLE),
        sample(2, APICAL, 1.0, 0.5, 1),
        sample(3, APICAL, 2.0, 0.5, 2),
        SampleRecord::new(4, APICAL, Point::new(1.0, 0.0, 3.0), 0.4, 3),
        SampleRecord::new(5, APICAL, Point::new(-1.0, 0.0, 3.0), 0.4, 3),
    ]);
    let m = build_capturing(&raw).0.unwrap();
    assert_eq!(m.n_sections(), 3);

    let trunk = SectionId::new(0);
    assert_eq!(m.children(trunk).unwrap().len(), 2);
    for &child in m.children(trunk).unwrap() {
        assert_eq!(m.parent(child).unwrap(), Some(trunk));
        assert_eq!(m.points(child).unwrap()[0], Point::new(0.0, 0.0, 2.0));
        assert_eq!(m.points(child).unwrap().len(), 2);
    }
    // Root sections keep only their own samples.
    assert_eq!(m.points(trunk).unwrap().len(), 2);
}

#[test]
fn sections_follow_stream_order_depth_first() {
    let raw = neuron(vec![
        sample(1, SOMA, 0.0, 1.0, ROOT_SAMPLE),
        sample(2, BASAL, 1.0, 0.5, 1),
        sample(3, AXON, -1.0, 0.5, 1),
        sample(4, BASAL, 2.0, 0.5, 2),
        sample(5, BASAL, 3.0, 0.5, 4),
        sample(6, BASAL, 4.0, 0.5, 4),
    ]);
    let m = build_capturing(&raw).0.unwrap();
    let order: Vec<SectionId> = m.depth_first().collect();
    assert_eq!(order, m.depth_first_order());
    assert_eq!(order.len(), m.n_sections());
    assert_eq!(m.root_sections().len(), 2);
    assert_eq!(m.section_type(m.root_sections()[1]).unwrap(), SectionType::Axon);
}

#[test]
fn type_change_splits_and_annotates() {
    let raw = neuron(vec![
        sample(1, SOMA, 0.0, 1.0, ROOT_SAMPLE),
        sample(2, AXON, 1.0, 0.5, 1),
        sample(3, AXON, 2.0, 0.5, 2),
        sample(4, BASAL, 3.0, 0.5, 3),
    ]);
    let (m, buffer) = build_capturing(&raw);
    let m = m.unwrap();
    assert_eq!(m.n_sections(), 2);
    assert_eq!(m.annotations().len(), 1);
    assert_eq!(m.annotations()[0].kind, AnnotationType::SingleChild);
    assert_eq!(m.annotations()[0].section, SectionId::new(0));
    assert_eq!(buffer.warnings()[0].kind, WarningKind::OnlyChild);
    assert_eq!(buffer.warnings()[0].section, Some(SectionId::new(0)));
}

#[test]
fn disconnected_neurite_warns() {
    let raw = neuron(vec![
        sample(1, SOMA, 0.0, 1.0, ROOT_SAMPLE),
        sample(2, AXON, 1.0, 0.5, 1),
        sample(3, BASAL, 9.0, 0.5, ROOT_SAMPLE),
        sample(4, BASAL, 10.0, 0.5, 3),
    ]);
    let (m, buffer) = build_capturing(&raw);
    assert_eq!(m.unwrap().root_sections().len(), 2);
    let kinds: Vec<_> = buffer.warnings().into_iter().map(|w| w.kind).collect();
    assert!(kinds.contains(&WarningKind::DisconnectedNeurite));
}

#[test]
fn undefined_type_is_advisory_unless_strict() {
    let raw = neuron(vec![sample(1, SOMA, 0.0, 1.0, ROOT_SAMPLE), sample(2, 0, 1.0, 0.5, 1)]);
    let (m, buffer) = build_capturing(&raw);
    assert_eq!(m.unwrap().section_type(SectionId::new(0)).unwrap(), SectionType::Undefined);
    assert_eq!(buffer.warnings()[0].kind, WarningKind::UndefinedSectionType);

    assert!(build::<SectionType>(&raw, &BuildOptions::strict(), &mut Diagnostics::silent()).is_err());
}

#[test]
fn custom_types_are_kept() {
    let raw = neuron(vec![sample(1, SOMA, 0.0, 1.0, ROOT_SAMPLE), sample(2, 12, 1.0, 0.5, 1)]);
    let m = build_capturing(&raw).0.unwrap();
    assert_eq!(m.section_type(SectionId::new(0)).unwrap(), SectionType::Custom(12));
}

// =============================================================================
// Cell Families
// =============================================================================

#[test]
fn vasculature_forest() {
    let raw = RawMorphology::new(CellFamily::Vasculature).with_samples(vec![
        sample(1, 2, 0.0, 3.0, ROOT_SAMPLE),
        sample(2, 2, 1.0, 3.0, 1),
        sample(3, 4, 2.0, 2.0, 2),
        sample(4, 1, 20.0, 3.0, ROOT_SAMPLE),
        sample(5, 1, 21.0, 3.0, 4),
    ]);
    let m = build::<VasculatureSectionType>(&raw, &BuildOptions::default(), &mut Diagnostics::silent())
        .unwrap();
    assert_eq!(m.root_sections().len(), 2);
    assert_eq!(m.n_sections(), 3);
    assert!(m.soma().is_empty());
    let types: Vec<_> = m.depth_first().map(|s| m.section_type(s).unwrap()).collect();
    assert_eq!(
        types,
        vec![
            VasculatureSectionType::Artery,
            VasculatureSectionType::Arteriole,
            VasculatureSectionType::Vein
        ]
    );
}

#[test]
fn glia_keeps_perimeters() {
    let raw = RawMorphology::new(CellFamily::Glia).with_samples(vec![
        sample(1, SOMA, 0.0, 1.0, ROOT_SAMPLE).with_perimeter(6.0),
        sample(2, BASAL, 1.0, 0.5, 1).with_perimeter(3.0),
        sample(3, BASAL, 2.0, 0.5, 2).with_perimeter(2.5),
    ]);
    let m = build_capturing(&raw).0.unwrap();
    let section = m.section(SectionId::new(0)).unwrap();
    assert_eq!(section.perimeters(), &[3.0, 2.5]);
    assert_eq!(m.cell_family(), CellFamily::Glia);
}
