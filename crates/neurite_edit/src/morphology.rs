//! The mutable view: an id-owned tree with atomic edits.
//!
//! Sections live in a persistent ordered map keyed by [`SectionId`]. Ids are
//! allocated monotonically and never reused, so deleting a section leaves a
//! tombstone rather than a hole that a later append could fill.
//!
//! Every edit runs against a working copy and is committed only if it
//! succeeds. Copies share structure, so a failed edit costs little and a
//! [`snapshot`](MutMorphology::snapshot) is cheap.
//!
//! # Continuity
//!
//! The first point of a section whose parent is a section must coincide
//! (within [`EPSILON`](neurite_foundation::EPSILON)) with the parent's last
//! point. Children of the soma are exempt. Edits that would break this fail.

use std::collections::HashMap;

use im::OrdMap;
use neurite_foundation::{
    Annotation, AnnotationType, CellFamily, Error, MitoSectionId, MorphologyVersion, Point,
    Result, SectionId, SectionTag, SectionType,
};
use neurite_storage::{
    BreadthFirst, DepthFirst, EndoplasmicReticulum, MitoPointLevel, Mitochondria, Morphology,
    PointLevel, Properties, ReticulumEntry, SomaData, Topology, Upstream,
};

use crate::ids::IdAllocator;
use crate::mitochondria::MutMitochondria;
use crate::policy::DeletePolicy;
use crate::section::MutSection;

/// A morphology that can be edited in place.
///
/// Obtain one with [`MutMorphology::new`] or
/// [`MutMorphology::from_morphology`], edit it, then
/// [`freeze`](Self::freeze) it back into an immutable [`Morphology`].
///
/// Traversals borrow the view, so it cannot be edited while one is in
/// progress. To edit while walking, walk a [`snapshot`](Self::snapshot):
///
/// ```ignore
/// for id in view.snapshot().depth_first() {
///     if should_drop(id) {
///         view.delete_section(id, true)?;
///     }
/// }
/// ```
#[derive(Clone, Debug)]
pub struct MutMorphology<T: SectionTag = SectionType> {
    sections: OrdMap<SectionId, MutSection<T>>,
    roots: Vec<SectionId>,
    ids: IdAllocator<SectionId>,
    soma: SomaData,
    family: CellFamily,
    version: MorphologyVersion,
    annotations: Vec<Annotation>,
    reticulum: EndoplasmicReticulum,
    mitochondria: MutMitochondria,
    policy: DeletePolicy,
}

impl<T: SectionTag> Default for MutMorphology<T> {
    fn default() -> Self {
        Self::new(T::FAMILIES[0])
    }
}

impl<T: SectionTag> MutMorphology<T> {
    /// Creates an empty morphology of the given family.
    #[must_use]
    pub fn new(family: CellFamily) -> Self {
        Self {
            sections: OrdMap::new(),
            roots: Vec::new(),
            ids: IdAllocator::new(),
            soma: SomaData::empty(),
            family,
            version: MorphologyVersion::in_memory(),
            annotations: Vec::new(),
            reticulum: EndoplasmicReticulum::new(),
            mitochondria: MutMitochondria::new(),
            policy: DeletePolicy::default(),
        }
    }

    /// Copies an immutable morphology. Section ids are kept.
    #[must_use]
    pub fn from_morphology(morphology: &Morphology<T>) -> Self {
        let forest = morphology.properties().forest();
        let level = morphology.properties().point_level();
        let mut sections = OrdMap::new();
        for id in forest.ids() {
            let range = forest.range(id);
            let points = PointLevel {
                points: level.points[range.clone()].to_vec(),
                diameters: level.diameters[range.clone()].to_vec(),
                perimeters: if level.has_perimeters() {
                    level.perimeters[range].to_vec()
                } else {
                    Vec::new()
                },
            };
            let mut section = MutSection::new(forest.parent(id), morphology.section_types()[id.index()], points);
            section.children = forest.children(id).to_vec();
            sections.insert(id, section);
        }

        tracing::debug!(sections = forest.len(), "mutable view created");
        Self {
            sections,
            roots: forest.roots().to_vec(),
            ids: IdAllocator::starting_at(forest.len()),
            soma: morphology.properties().soma().clone(),
            family: morphology.cell_family(),
            version: morphology.version().clone(),
            annotations: morphology.annotations().to_vec(),
            reticulum: morphology.endoplasmic_reticulum().clone(),
            mitochondria: MutMitochondria::from_mitochondria(morphology.mitochondria()),
            policy: DeletePolicy::default(),
        }
    }

    /// Sets the deletion policy.
    #[must_use]
    pub fn with_delete_policy(mut self, policy: DeletePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the deletion policy in place.
    pub fn set_delete_policy(&mut self, policy: DeletePolicy) {
        self.policy = policy;
    }

    /// Current deletion policy.
    #[must_use]
    pub fn delete_policy(&self) -> DeletePolicy {
        self.policy
    }

    // --- Queries ---

    /// A live section.
    ///
    /// # Errors
    ///
    /// Returns `SectionNotFound` for unknown or deleted ids.
    pub fn section(&self, id: SectionId) -> Result<&MutSection<T>> {
        self.sections
            .get(&id)
            .ok_or_else(|| Error::section_not_found(id))
    }

    /// Returns true if `id` names a live section.
    #[must_use]
    pub fn contains(&self, id: SectionId) -> bool {
        self.sections.contains_key(&id)
    }

    /// Root sections in stored order.
    #[must_use]
    pub fn root_sections(&self) -> &[SectionId] {
        &self.roots
    }

    /// Live section ids, ascending.
    pub fn sections(&self) -> impl Iterator<Item = SectionId> + '_ {
        self.sections.keys().copied()
    }

    /// Parent of a section.
    ///
    /// # Errors
    ///
    /// Returns `SectionNotFound` for unknown or deleted ids.
    pub fn parent(&self, id: SectionId) -> Result<Option<SectionId>> {
        Ok(self.section(id)?.parent)
    }

    /// Children of a section.
    ///
    /// # Errors
    ///
    /// Returns `SectionNotFound` for unknown or deleted ids.
    pub fn children(&self, id: SectionId) -> Result<&[SectionId]> {
        Ok(self.section(id)?.children())
    }

    /// Number of live sections.
    #[must_use]
    pub fn n_sections(&self) -> usize {
        self.sections.len()
    }

    /// Returns true if there are no live sections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// The id allocator, for inspecting live and dead ids.
    #[must_use]
    pub fn ids(&self) -> &IdAllocator<SectionId> {
        &self.ids
    }

    /// Soma description.
    #[must_use]
    pub fn soma(&self) -> &SomaData {
        &self.soma
    }

    /// Replaces the soma.
    ///
    /// # Errors
    ///
    /// Returns `SectionBuilder` when the family has no soma.
    pub fn set_soma(&mut self, soma: SomaData) -> Result<()> {
        if !self.family.has_soma() && !soma.is_empty() {
            return Err(Error::section_builder(format!(
                "{} morphologies have no soma",
                self.family
            )));
        }
        self.soma = soma;
        Ok(())
    }

    /// Cell family.
    #[must_use]
    pub fn cell_family(&self) -> CellFamily {
        self.family
    }

    /// Source format and version.
    #[must_use]
    pub fn version(&self) -> &MorphologyVersion {
        &self.version
    }

    /// Replaces the source version.
    pub fn set_version(&mut self, version: MorphologyVersion) {
        self.version = version;
    }

    /// Annotations on live sections.
    #[must_use]
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Endoplasmic reticulum entries.
    #[must_use]
    pub fn endoplasmic_reticulum(&self) -> &EndoplasmicReticulum {
        &self.reticulum
    }

    /// Adds or replaces the reticulum entry of a section.
    ///
    /// # Errors
    ///
    /// Returns `SectionBuilder` if the section is not live.
    pub fn set_reticulum_entry(&mut self, entry: ReticulumEntry) -> Result<()> {
        self.require_live(entry.section, "attach reticulum to")?;
        self.reticulum.insert(entry);
        Ok(())
    }

    /// Mitochondria overlay.
    #[must_use]
    pub fn mitochondria(&self) -> &MutMitochondria {
        &self.mitochondria
    }

    // --- Traversal ---

    /// Depth-first pre-order over the whole forest.
    #[must_use]
    pub fn depth_first(&self) -> DepthFirst<'_, Self> {
        DepthFirst::from_roots(self)
    }

    /// Breadth-first order over the whole forest.
    #[must_use]
    pub fn breadth_first(&self) -> BreadthFirst<'_, Self> {
        BreadthFirst::from_roots(self)
    }

    /// Walks from a section up to its root.
    ///
    /// # Errors
    ///
    /// Returns `SectionNotFound` for unknown or deleted ids.
    pub fn upstream(&self, id: SectionId) -> Result<Upstream<'_, Self>> {
        self.section(id)?;
        Ok(Upstream::new(self, id))
    }

    /// An independent copy of the current state.
    ///
    /// Copies share structure with the original until either side is edited.
    #[must_use]
    pub fn snapshot(&self) -> Self {
        self.clone()
    }

    // --- Edits ---

    /// Appends a root section.
    ///
    /// # Errors
    ///
    /// See [`append_section`](Self::append_section).
    pub fn append_root_section(&mut self, section_type: T, points: PointLevel) -> Result<SectionId> {
        self.append_section(None, section_type, points)
    }

    /// Appends a section under `parent`, or as a new root.
    ///
    /// # Errors
    ///
    /// Returns `SectionBuilder` if the parent is not live, fewer than two
    /// points are given, the type is the soma type, the first point breaks continuity
    /// with the parent or perimeter presence differs from the rest of the
    /// tree. Nothing changes on failure.
    pub fn append_section(
        &mut self,
        parent: Option<SectionId>,
        section_type: T,
        points: PointLevel,
    ) -> Result<SectionId> {
        self.transaction("append_section", |m| {
            if section_type.is_soma() {
                return Err(Error::section_builder("soma samples belong to the soma, not a section"));
            }
            check_section_points(&points)?;
            m.check_perimeters(&points, None)?;
            if let Some(parent) = parent {
                m.require_live(parent, "append to")?;
                m.check_continuity(parent, &points)?;
            }

            let id = m.ids.allocate();
            match parent {
                Some(parent) => {
                    if let Some(p) = m.sections.get_mut(&parent) {
                        p.children.push(id);
                    }
                }
                None => m.roots.push(id),
            }
            m.sections.insert(id, MutSection::new(parent, section_type, points));
            tracing::debug!(section = %id, parent = ?parent, "section appended");
            Ok(id)
        })
    }

    /// Deletes a section.
    ///
    /// A recursive delete removes the whole subtree. A non-recursive delete
    /// of a section with children follows the [`DeletePolicy`].
    ///
    /// # Errors
    ///
    /// Returns `SectionBuilder` if the section is not live, the policy
    /// rejects the delete or a removed section hosts mitochondria.
    pub fn delete_section(&mut self, id: SectionId, recursive: bool) -> Result<()> {
        self.transaction("delete_section", |m| {
            let section = m.require_live(id, "delete")?.clone();
            if !recursive && !section.children.is_empty() && m.policy == DeletePolicy::Reject {
                return Err(Error::section_builder(format!(
                    "cannot delete {id}: it has {} children",
                    section.children.len()
                )));
            }

            let removed: Vec<SectionId> = if recursive {
                DepthFirst::new(&*m, [id]).collect()
            } else {
                vec![id]
            };
            if m.mitochondria.touches_any(&removed) {
                return Err(Error::section_builder(format!(
                    "cannot delete {id}: mitochondria would be orphaned"
                )));
            }

            let orphans = if recursive { Vec::new() } else { section.children.clone() };
            for &child in &orphans {
                m.reattach(child, section.parent)?;
            }
            m.replace_in_siblings(id, section.parent, &orphans);

            for dead in &removed {
                m.sections.remove(dead);
                m.reticulum.remove(*dead);
            }
            m.annotations.retain(|a| !removed.contains(&a.section));
            m.ids.release(removed.len());
            tracing::debug!(section = %id, removed = removed.len(), reparented = orphans.len(), "section deleted");
            Ok(())
        })
    }

    /// Merges a section into its parent.
    ///
    /// The parent must have this section as its only child and the same
    /// type. The child's points are appended to the parent's (its duplicated
    /// first point dropped), its children become the parent's children and
    /// its reticulum entry is added into the parent's. Mitochondria hosted on
    /// either section are rescaled to positions along the merged section.
    ///
    /// # Errors
    ///
    /// Returns `SectionBuilder` if the section is not live, is a root, has
    /// siblings or differs in type from its parent.
    pub fn merge_into_parent(&mut self, id: SectionId) -> Result<SectionId> {
        self.transaction("merge_into_parent", |m| {
            let child = m.require_live(id, "merge")?.clone();
            let parent_id = child
                .parent
                .ok_or_else(|| Error::section_builder(format!("cannot merge root {id}")))?;
            let parent = m.section(parent_id)?.clone();
            if parent.children.len() != 1 {
                return Err(Error::section_builder(format!(
                    "cannot merge {id}: {parent_id} has {} children",
                    parent.children.len()
                )));
            }
            if parent.section_type != child.section_type {
                return Err(Error::section_builder(format!(
                    "cannot merge {id}: {} differs from parent type {}",
                    child.section_type, parent.section_type
                )));
            }

            let mut merged = parent.point_level().clone();
            let mut tail = child.point_level().clone();
            let duplicated = match (merged.last(), tail.first()) {
                (Some(last), Some(first)) => last.approx_eq(first) && tail.len() > 1,
                _ => false,
            };
            if duplicated {
                tail.remove_first();
            }
            let offset = merged.len();
            merged.extend(&tail);

            let parent_length = parent.length();
            let child_length = child.length();
            let total = polyline_length(&merged.points);
            let child_start = total - child_length;
            m.mitochondria.remap_points(|host, r| {
                if total <= 0.0 {
                    (if host == id { parent_id } else { host }, r)
                } else if host == id {
                    (parent_id, ((child_start + r * child_length) / total).clamp(0.0, 1.0))
                } else if host == parent_id {
                    (parent_id, (r * parent_length / total).clamp(0.0, 1.0))
                } else {
                    (host, r)
                }
            });

            if let Some(entry) = m.reticulum.remove(id) {
                let summed = match m.reticulum.get(parent_id) {
                    Some(p) => ReticulumEntry {
                        section: parent_id,
                        volume: p.volume + entry.volume,
                        surface_area: p.surface_area + entry.surface_area,
                        filament_count: p.filament_count + entry.filament_count,
                    },
                    None => ReticulumEntry { section: parent_id, ..entry },
                };
                m.reticulum.insert(summed);
            }

            let shift = offset - usize::from(duplicated);
            m.annotations.retain(|a| !(a.section == parent_id && a.kind == AnnotationType::SingleChild));
            for annotation in &mut m.annotations {
                if annotation.section == id {
                    annotation.section = parent_id;
                    annotation.point = annotation.point.map(|p| p + shift);
                }
            }

            for grandchild in &child.children {
                if let Some(g) = m.sections.get_mut(grandchild) {
                    g.parent = Some(parent_id);
                }
            }
            if let Some(p) = m.sections.get_mut(&parent_id) {
                p.children.clone_from(&child.children);
                p.points = merged.into();
            }
            m.sections.remove(&id);
            m.ids.release(1);
            tracing::debug!(section = %id, into = %parent_id, "section merged into parent");
            Ok(parent_id)
        })
    }

    /// Appends points to the end of a leaf section.
    ///
    /// # Errors
    ///
    /// Returns `SectionBuilder` if the section is not live, has children,
    /// `points` is empty or perimeter presence differs.
    pub fn append_points(&mut self, id: SectionId, points: &PointLevel) -> Result<()> {
        self.transaction("append_points", |m| {
            check_not_empty(points)?;
            let section = m.require_live(id, "append points to")?;
            if !section.children.is_empty() {
                return Err(Error::section_builder(format!(
                    "cannot extend {id}: its children start at its last point"
                )));
            }
            if section.point_level().has_perimeters() != points.has_perimeters() {
                return Err(perimeter_mismatch());
            }
            if let Some(s) = m.sections.get_mut(&id) {
                s.points_mut().extend(points);
            }
            tracing::debug!(section = %id, added = points.len(), "points appended");
            Ok(())
        })
    }

    /// Replaces the points of a section.
    ///
    /// # Errors
    ///
    /// Returns `SectionBuilder` if the section is not live, `points` has
    /// fewer than two entries, the first point breaks continuity with the parent, the last
    /// point breaks continuity with a child or perimeter presence differs.
    pub fn set_points(&mut self, id: SectionId, points: PointLevel) -> Result<()> {
        self.transaction("set_points", |m| {
            check_section_points(&points)?;
            let section = m.require_live(id, "set points of")?.clone();
            m.check_perimeters(&points, Some(id))?;
            if let Some(parent) = section.parent {
                m.check_continuity(parent, &points)?;
            }
            let last = points.last();
            for child in &section.children {
                let first = m.section(*child)?.point_level().first();
                if !matches!((last, first), (Some(l), Some(f)) if l.approx_eq(f)) {
                    return Err(Error::section_builder(format!(
                        "new points of {id} do not end where {child} starts"
                    )));
                }
            }
            if let Some(s) = m.sections.get_mut(&id) {
                *s.points_mut() = points;
            }
            tracing::debug!(section = %id, "points replaced");
            Ok(())
        })
    }

    /// Merges every section that is the single child of a same-typed parent.
    ///
    /// Returns the number of merges.
    ///
    /// # Errors
    ///
    /// Propagates the first failing merge; nothing changes in that case.
    pub fn remove_unifurcations(&mut self) -> Result<usize> {
        self.transaction("remove_unifurcations", |m| {
            let order: Vec<SectionId> = m.snapshot().depth_first().collect();
            let mut merged = 0;
            for id in order {
                let Some(section) = m.sections.get(&id) else { continue };
                let Some(parent) = section.parent.and_then(|p| m.sections.get(&p)) else { continue };
                if parent.children.len() == 1 && parent.section_type == section.section_type {
                    m.merge_into_parent(id)?;
                    merged += 1;
                }
            }
            tracing::debug!(merged, "unifurcations removed");
            Ok(merged)
        })
    }

    // --- Mitochondria ---

    /// Appends a mitochondrial section.
    ///
    /// # Errors
    ///
    /// Returns `SectionBuilder` if a host section is not live, the parent
    /// mitochondrial section does not exist or `points` is empty.
    pub fn append_mito_section(
        &mut self,
        parent: Option<MitoSectionId>,
        points: MitoPointLevel,
    ) -> Result<MitoSectionId> {
        if let Some(host) = points.section_ids.iter().find(|h| !self.contains(**h)) {
            return Err(Error::section_builder(format!(
                "mitochondria cannot be hosted by missing {host}"
            )));
        }
        let id = self.mitochondria.append(parent, points)?;
        tracing::debug!(section = %id, "mitochondrial section appended");
        Ok(id)
    }

    /// Deletes a mitochondrial section, or its whole subtree when
    /// `recursive`. Children of a non-recursively deleted section move to
    /// its parent.
    ///
    /// # Errors
    ///
    /// Returns `SectionBuilder` if the section does not exist.
    pub fn delete_mito_section(&mut self, id: MitoSectionId, recursive: bool) -> Result<()> {
        self.mitochondria.delete(id, recursive)?;
        tracing::debug!(section = %id, recursive, "mitochondrial section deleted");
        Ok(())
    }

    // --- Conversion ---

    /// Produces an immutable morphology.
    ///
    /// Live sections are renumbered densely in depth-first pre-order;
    /// annotations, reticulum entries and mitochondria hosts follow.
    ///
    /// # Errors
    ///
    /// Fails with the same errors as assembling a morphology from scratch,
    /// for example missing glia perimeters.
    pub fn freeze(&self) -> Result<Morphology<T>> {
        let order: Vec<SectionId> = self.depth_first().collect();
        let renamed: HashMap<SectionId, SectionId> = order
            .iter()
            .enumerate()
            .map(|(index, &old)| (old, SectionId::from_index(index)))
            .collect();
        let rename = |id: SectionId| renamed.get(&id).copied();

        let mut builder = Properties::<T>::builder(self.family)
            .with_soma(self.soma.clone())
            .with_version(self.version.clone());
        for old in &order {
            let section = self.section(*old)?;
            builder.push_section(section.parent.and_then(rename), section.section_type, section.point_level());
        }
        for annotation in &self.annotations {
            if let Some(section) = rename(annotation.section) {
                builder.annotate(Annotation { section, ..annotation.clone() });
            }
        }
        builder.set_reticulum(self.reticulum.remap(rename));

        let mut morphology = Morphology::from_properties(builder.finish()?);
        if !self.mitochondria.is_empty() {
            let mito = self.mitochondria.to_properties(rename)?;
            morphology = morphology.with_mitochondria(Mitochondria::new(mito))?;
        }
        tracing::debug!(
            sections = morphology.n_sections(),
            tombstones = self.ids.tombstones(),
            "mutable view frozen"
        );
        Ok(morphology)
    }

    // --- Internals ---

    /// Applies `f` to every live section without continuity checks.
    pub(crate) fn update_sections(&mut self, mut f: impl FnMut(&mut MutSection<T>)) {
        let ids: Vec<SectionId> = self.sections.keys().copied().collect();
        for id in ids {
            if let Some(section) = self.sections.get_mut(&id) {
                f(section);
            }
        }
    }

    pub(crate) fn roots_mut(&mut self) -> &mut Vec<SectionId> {
        &mut self.roots
    }

    fn transaction<R>(&mut self, operation: &'static str, edit: impl FnOnce(&mut Self) -> Result<R>) -> Result<R> {
        let mut working = self.clone();
        match edit(&mut working) {
            Ok(value) => {
                *self = working;
                Ok(value)
            }
            Err(error) => {
                tracing::debug!(operation, error = %error, "edit rejected");
                Err(error)
            }
        }
    }

    fn require_live(&self, id: SectionId, action: &str) -> Result<&MutSection<T>> {
        self.sections.get(&id).ok_or_else(|| {
            let state = if self.ids.was_allocated(id) { "was deleted" } else { "does not exist" };
            Error::section_builder(format!("cannot {action} {id}: it {state}"))
        })
    }

    fn check_continuity(&self, parent: SectionId, points: &PointLevel) -> Result<()> {
        let last = self.section(parent)?.point_level().last();
        match (last, points.first()) {
            (Some(last), Some(first)) if last.approx_eq(first) => Ok(()),
            _ => Err(Error::section_builder(format!(
                "section must start at the last point of {parent}"
            ))),
        }
    }

    fn check_perimeters(&self, points: &PointLevel, except: Option<SectionId>) -> Result<()> {
        let existing = self
            .sections
            .iter()
            .find(|(id, _)| Some(**id) != except)
            .map(|(_, s)| s.point_level().has_perimeters());
        match existing {
            Some(has) if has != points.has_perimeters() => Err(perimeter_mismatch()),
            _ => Ok(()),
        }
    }

    /// Moves `child` under `new_parent`, bridging the gap left by its old
    /// parent when the new parent is a section.
    fn reattach(&mut self, child: SectionId, new_parent: Option<SectionId>) -> Result<()> {
        let bridge = match new_parent {
            Some(p) => self.section(p)?.point_level().last(),
            None => None,
        };
        let Some(section) = self.sections.get_mut(&child) else {
            return Err(Error::internal(format!("{child} vanished while reattaching")));
        };
        section.parent = new_parent;
        let Some(bridge) = bridge else { return Ok(()) };
        let old_length = section.length();
        let points = section.points_mut();
        let Some(first) = points.first() else { return Ok(()) };
        if first.approx_eq(bridge) {
            return Ok(());
        }
        let diameter = points.diameters.first().copied().unwrap_or_default();
        let perimeter = points.perimeters.first().copied();
        points.prepend(bridge, diameter, perimeter);

        // Hosted mitochondria keep their place on the old points.
        let bridge_length = bridge.distance(first);
        let total = old_length + bridge_length;
        if total > 0.0 {
            self.mitochondria.remap_points(|host, r| {
                if host == child {
                    (host, ((bridge_length + r * old_length) / total).clamp(0.0, 1.0))
                } else {
                    (host, r)
                }
            });
        }
        Ok(())
    }

    /// Puts `replacements` where `id` sat among its siblings.
    fn replace_in_siblings(&mut self, id: SectionId, parent: Option<SectionId>, replacements: &[SectionId]) {
        let siblings = match parent {
            Some(p) => self.sections.get_mut(&p).map(|s| &mut s.children),
            None => Some(&mut self.roots),
        };
        if let Some(siblings) = siblings {
            if let Some(pos) = siblings.iter().position(|&s| s == id) {
                siblings.splice(pos..=pos, replacements.iter().copied());
            }
        }
    }
}

impl<T: SectionTag> Topology for MutMorphology<T> {
    type Id = SectionId;

    fn roots(&self) -> &[SectionId] {
        &self.roots
    }

    fn parent_of(&self, id: SectionId) -> Option<SectionId> {
        self.sections.get(&id).and_then(|s| s.parent)
    }

    fn children_of(&self, id: SectionId) -> &[SectionId] {
        self.sections
            .get(&id)
            .map_or(&[][..], |s| s.children.as_slice())
    }
}

impl<T: SectionTag> From<&Morphology<T>> for MutMorphology<T> {
    fn from(morphology: &Morphology<T>) -> Self {
        Self::from_morphology(morphology)
    }
}

fn check_not_empty(points: &PointLevel) -> Result<()> {
    if points.is_empty() {
        Err(Error::section_builder("no points given"))
    } else {
        Ok(())
    }
}

fn check_section_points(points: &PointLevel) -> Result<()> {
    if points.len() < 2 {
        Err(Error::section_builder(format!(
            "a section needs at least two points, got {}",
            points.len()
        )))
    } else {
        Ok(())
    }
}

fn perimeter_mismatch() -> Error {
    Error::section_builder("perimeters must be given for every section or for none")
}

fn polyline_length(points: &[Point]) -> f64 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}
