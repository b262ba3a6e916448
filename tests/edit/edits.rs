//! Integration tests for edits on the mutable view
//!
//! Every edit either applies completely or leaves the tree untouched.

use neurite_edit::{DeletePolicy, MutMorphology};
use neurite_foundation::{ErrorKind, Point, SectionId, SectionType};
use neurite_storage::PointLevel;

use crate::{neuron, segment};

fn id(raw: u32) -> SectionId {
    SectionId::new(raw)
}

// =============================================================================
// Appending
// =============================================================================

#[test]
fn append_to_deleted_section_fails_cleanly() {
    let mut view = MutMorphology::from_morphology(&neuron());
    view.delete_section(id(1), false).unwrap();
    let before = view.snapshot();

    let err = view
        .append_section(Some(id(1)), SectionType::BasalDendrite, segment([1.0, 0.0, 2.0], [2.0, 0.0, 2.0]))
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::SectionBuilder(_)));
    assert!(err.to_string().contains("was deleted"));

    assert_eq!(view.n_sections(), before.n_sections());
    for s in before.sections() {
        assert_eq!(view.section(s).unwrap().points(), before.section(s).unwrap().points());
        assert_eq!(view.children(s).unwrap(), before.children(s).unwrap());
    }
    assert_eq!(view.ids().allocated(), before.ids().allocated());
}

#[test]
fn append_to_unknown_section() {
    let mut view = MutMorphology::from_morphology(&neuron());
    let err = view
        .append_section(Some(id(40)), SectionType::Axon, segment([0.0; 3], [1.0, 0.0, 0.0]))
        .unwrap_err();
    assert!(err.to_string().contains("does not exist"));
}

#[test]
fn appended_section_must_continue_parent() {
    let mut view = MutMorphology::from_morphology(&neuron());
    let err = view
        .append_section(Some(id(3)), SectionType::Axon, segment([5.0, 5.0, 5.0], [6.0, 5.0, 5.0]))
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::SectionBuilder(_)));

    let child = view
        .append_section(Some(id(3)), SectionType::Axon, segment([0.0, 0.0, -2.0], [0.0, 1.0, -2.0]))
        .unwrap();
    assert_eq!(view.parent(child).unwrap(), Some(id(3)));
    assert_eq!(view.children(id(3)).unwrap(), &[child]);
}

#[test]
fn roots_need_no_continuity() {
    let mut view = MutMorphology::from_morphology(&neuron());
    let root = view
        .append_root_section(SectionType::ApicalDendrite, segment([9.0, 9.0, 9.0], [9.0, 9.0, 10.0]))
        .unwrap();
    assert!(view.root_sections().contains(&root));
}

#[test]
fn soma_type_and_empty_points_rejected() {
    let mut view = MutMorphology::from_morphology(&neuron());
    assert!(view.append_root_section(SectionType::Soma, segment([0.0; 3], [1.0, 0.0, 0.0])).is_err());
    assert!(view.append_root_section(SectionType::Axon, PointLevel::default()).is_err());
    assert_eq!(view.n_sections(), 4);
}

#[test]
fn new_ids_are_never_reused() {
    let mut view = MutMorphology::from_morphology(&neuron());
    view.delete_section(id(3), true).unwrap();
    let fresh = view
        .append_root_section(SectionType::Axon, segment([0.0; 3], [0.0, 0.0, -1.0]))
        .unwrap();
    assert_eq!(fresh, id(4));
    assert_eq!(view.ids().tombstones(), 1);
}

// =============================================================================
// Deleting
// =============================================================================

#[test]
fn reparent_moves_children_up() {
    let mut view = MutMorphology::from_morphology(&neuron());
    assert_eq!(view.delete_policy(), DeletePolicy::Reparent);
    view.delete_section(id(0), false).unwrap();

    // The trunk was a root, so its children become roots in its place.
    assert_eq!(view.root_sections(), &[id(1), id(2), id(3)]);
    assert_eq!(view.parent(id(1)).unwrap(), None);
    assert!(view.section(id(0)).is_err());
}

#[test]
fn reparent_bridges_to_grandparent() {
    let mut view = MutMorphology::from_morphology(&neuron());
    let middle = view
        .append_section(Some(id(1)), SectionType::BasalDendrite, segment([1.0, 0.0, 2.0], [2.0, 0.0, 2.0]))
        .unwrap();
    let leaf = view
        .append_section(Some(middle), SectionType::BasalDendrite, segment([2.0, 0.0, 2.0], [3.0, 0.0, 2.0]))
        .unwrap();

    view.delete_section(middle, false).unwrap();
    assert_eq!(view.parent(leaf).unwrap(), Some(id(1)));
    assert_eq!(view.children(id(1)).unwrap(), &[leaf]);
    let points = view.section(leaf).unwrap().points();
    assert_eq!(points[0], Point::new(1.0, 0.0, 2.0));
    assert_eq!(points.len(), 3);
}

#[test]
fn reject_policy_refuses_non_leaves() {
    let mut view = MutMorphology::from_morphology(&neuron()).with_delete_policy(DeletePolicy::Reject);
    let err = view.delete_section(id(0), false).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::SectionBuilder(_)));
    assert_eq!(view.n_sections(), 4);

    // Leaves and recursive deletes are unaffected by the policy.
    view.delete_section(id(1), false).unwrap();
    view.delete_section(id(0), true).unwrap();
    assert_eq!(view.root_sections(), &[id(3)]);
}

#[test]
fn recursive_delete_removes_subtree() {
    let mut view = MutMorphology::from_morphology(&neuron());
    view.delete_section(id(0), true).unwrap();
    assert_eq!(view.n_sections(), 1);
    for dead in [id(0), id(1), id(2)] {
        assert!(!view.contains(dead));
    }
    assert_eq!(view.ids().tombstones(), 3);
}

#[test]
fn delete_twice_fails() {
    let mut view = MutMorphology::from_morphology(&neuron());
    view.delete_section(id(2), false).unwrap();
    let err = view.delete_section(id(2), false).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::SectionBuilder(_)));
}

// =============================================================================
// Merging and Points
// =============================================================================

#[test]
fn merge_single_child() {
    let mut view = MutMorphology::from_morphology(&neuron());
    view.delete_section(id(2), false).unwrap();
    let into = view.merge_into_parent(id(1)).unwrap();
    assert_eq!(into, id(0));
    let points = view.section(id(0)).unwrap().points();
    assert_eq!(
        points,
        &[Point::new(0.0, 0.0, 1.0), Point::new(0.0, 0.0, 2.0), Point::new(1.0, 0.0, 2.0)]
    );
    assert!(view.children(id(0)).unwrap().is_empty());
}

#[test]
fn merge_needs_only_child() {
    let mut view = MutMorphology::from_morphology(&neuron());
    assert!(view.merge_into_parent(id(1)).is_err());
    assert!(view.merge_into_parent(id(0)).is_err());
}

#[test]
fn remove_unifurcations_counts_merges() {
    let mut view = MutMorphology::from_morphology(&neuron());
    let a = view
        .append_section(Some(id(3)), SectionType::Axon, segment([0.0, 0.0, -2.0], [0.0, 0.0, -3.0]))
        .unwrap();
    view.append_section(Some(a), SectionType::Axon, segment([0.0, 0.0, -3.0], [0.0, 0.0, -4.0]))
        .unwrap();
    assert_eq!(view.remove_unifurcations().unwrap(), 2);
    assert_eq!(view.section(id(3)).unwrap().points().len(), 4);
    assert_eq!(view.n_sections(), 4);
}

#[test]
fn append_points_to_leaf_only() {
    let mut view = MutMorphology::from_morphology(&neuron());
    let extra = PointLevel::without_perimeters(vec![Point::new(2.0, 0.0, 2.0)], vec![0.3]).unwrap();
    view.append_points(id(1), &extra).unwrap();
    assert_eq!(view.section(id(1)).unwrap().points().len(), 3);
    assert!(view.append_points(id(0), &extra).is_err());
}

#[test]
fn set_points_keeps_continuity() {
    let mut view = MutMorphology::from_morphology(&neuron());
    let moved = segment([0.0, 0.0, 1.0], [0.0, 0.0, 5.0]);
    let err = view.set_points(id(0), moved).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::SectionBuilder(_)));

    view.set_points(id(0), segment([0.0, 0.0, 0.5], [0.0, 0.0, 2.0])).unwrap();
    assert_eq!(view.section(id(0)).unwrap().points()[0], Point::new(0.0, 0.0, 0.5));
}

// =============================================================================
// Iteration
// =============================================================================

#[test]
fn edit_while_walking_a_snapshot() {
    let mut view = MutMorphology::from_morphology(&neuron());
    let walk = view.snapshot();
    for s in walk.depth_first() {
        if view.section(s).is_ok_and(|sec| sec.children().is_empty()) {
            view.delete_section(s, false).unwrap();
        }
    }
    assert_eq!(view.n_sections(), 1);
    assert_eq!(walk.n_sections(), 4);
}
