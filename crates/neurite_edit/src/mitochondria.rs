//! The editable mitochondria overlay.

use im::OrdMap;
use neurite_foundation::{Error, MitoSectionId, Result, SectionId};
use neurite_storage::{DepthFirst, MitoPointLevel, MitoProperties, Mitochondria, Topology, Upstream};

use crate::ids::IdAllocator;

/// A section of a [`MutMitochondria`] overlay.
#[derive(Clone, Debug, PartialEq)]
pub struct MutMitoSection {
    pub(crate) parent: Option<MitoSectionId>,
    pub(crate) children: Vec<MitoSectionId>,
    pub(crate) points: MitoPointLevel,
}

impl MutMitoSection {
    /// Parent mitochondrial section.
    #[must_use]
    pub fn parent(&self) -> Option<MitoSectionId> {
        self.parent
    }

    /// Child mitochondrial sections.
    #[must_use]
    pub fn children(&self) -> &[MitoSectionId] {
        &self.children
    }

    /// Points of the section.
    #[must_use]
    pub fn points(&self) -> &MitoPointLevel {
        &self.points
    }
}

/// Editable mitochondria, with ids allocated like the primary tree's.
#[derive(Clone, Debug, Default)]
pub struct MutMitochondria {
    sections: OrdMap<MitoSectionId, MutMitoSection>,
    roots: Vec<MitoSectionId>,
    ids: IdAllocator<MitoSectionId>,
}

impl MutMitochondria {
    /// Empty overlay.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies an immutable overlay, keeping its ids.
    #[must_use]
    pub fn from_mitochondria(mitochondria: &Mitochondria) -> Self {
        let forest = mitochondria.properties().forest();
        let level = mitochondria.properties().point_level();
        let mut sections = OrdMap::new();
        for id in forest.ids() {
            let range = forest.range(id);
            let points = MitoPointLevel {
                section_ids: level.section_ids[range.clone()].to_vec(),
                relative_path_lengths: level.relative_path_lengths[range.clone()].to_vec(),
                diameters: level.diameters[range].to_vec(),
            };
            sections.insert(
                id,
                MutMitoSection {
                    parent: forest.parent(id),
                    children: forest.children(id).to_vec(),
                    points,
                },
            );
        }
        Self {
            sections,
            roots: forest.roots().to_vec(),
            ids: IdAllocator::starting_at(forest.len()),
        }
    }

    /// Returns true if there are no mitochondrial sections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Number of live mitochondrial sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Root sections in stored order.
    #[must_use]
    pub fn root_sections(&self) -> &[MitoSectionId] {
        &self.roots
    }

    /// Live section ids, ascending.
    pub fn sections(&self) -> impl Iterator<Item = MitoSectionId> + '_ {
        self.sections.keys().copied()
    }

    /// A live section.
    ///
    /// # Errors
    ///
    /// Returns `MitoSectionNotFound` for unknown or deleted ids.
    pub fn section(&self, id: MitoSectionId) -> Result<&MutMitoSection> {
        self.sections
            .get(&id)
            .ok_or_else(|| Error::mito_section_not_found(id))
    }

    /// Returns true if any point sits on one of `hosts`.
    #[must_use]
    pub fn touches_any(&self, hosts: &[SectionId]) -> bool {
        self.sections
            .values()
            .any(|s| s.points.section_ids.iter().any(|h| hosts.contains(h)))
    }

    /// Depth-first traversal.
    #[must_use]
    pub fn depth_first(&self) -> DepthFirst<'_, Self> {
        DepthFirst::from_roots(self)
    }

    /// Walks from a section up to its root.
    ///
    /// # Errors
    ///
    /// Returns `MitoSectionNotFound` for unknown or deleted ids.
    pub fn upstream(&self, id: MitoSectionId) -> Result<Upstream<'_, Self>> {
        self.section(id)?;
        Ok(Upstream::new(self, id))
    }

    pub(crate) fn append(
        &mut self,
        parent: Option<MitoSectionId>,
        points: MitoPointLevel,
    ) -> Result<MitoSectionId> {
        if points.is_empty() {
            return Err(Error::section_builder("mitochondrial section needs points"));
        }
        if let Some(parent) = parent {
            if !self.sections.contains_key(&parent) {
                return Err(Error::section_builder(format!(
                    "cannot append to {parent}: it does not exist"
                )));
            }
        }
        let id = self.ids.allocate();
        match parent {
            Some(parent) => {
                if let Some(p) = self.sections.get_mut(&parent) {
                    p.children.push(id);
                }
            }
            None => self.roots.push(id),
        }
        self.sections.insert(
            id,
            MutMitoSection {
                parent,
                children: Vec::new(),
                points,
            },
        );
        Ok(id)
    }

    pub(crate) fn delete(&mut self, id: MitoSectionId, recursive: bool) -> Result<()> {
        let section = self
            .sections
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::section_builder(format!("cannot delete {id}: it does not exist")))?;

        let removed: Vec<MitoSectionId> = if recursive {
            DepthFirst::new(&*self, [id]).collect()
        } else {
            vec![id]
        };
        let kept_children = if recursive { Vec::new() } else { section.children.clone() };

        let siblings = match section.parent {
            Some(parent) => self.sections.get_mut(&parent).map(|p| &mut p.children),
            None => Some(&mut self.roots),
        };
        if let Some(siblings) = siblings {
            if let Some(pos) = siblings.iter().position(|&s| s == id) {
                siblings.splice(pos..=pos, kept_children.iter().copied());
            }
        }
        for child in &kept_children {
            if let Some(c) = self.sections.get_mut(child) {
                c.parent = section.parent;
            }
        }
        for dead in &removed {
            self.sections.remove(dead);
        }
        self.ids.release(removed.len());
        Ok(())
    }

    /// Rewrites every point's host and relative position.
    pub(crate) fn remap_points(&mut self, map: impl Fn(SectionId, f64) -> (SectionId, f64)) {
        let ids: Vec<_> = self.sections.keys().copied().collect();
        for id in ids {
            if let Some(section) = self.sections.get_mut(&id) {
                let points = &mut section.points;
                for (host, relative) in points
                    .section_ids
                    .iter_mut()
                    .zip(points.relative_path_lengths.iter_mut())
                {
                    (*host, *relative) = map(*host, *relative);
                }
            }
        }
    }

    /// Flattens live sections in depth-first order, renaming hosts.
    pub(crate) fn to_properties(
        &self,
        host: impl Fn(SectionId) -> Option<SectionId>,
    ) -> Result<MitoProperties> {
        let order: Vec<MitoSectionId> = self.depth_first().collect();
        let mut renamed = std::collections::HashMap::with_capacity(order.len());
        for (index, &old) in order.iter().enumerate() {
            renamed.insert(old, MitoSectionId::from_index(index));
        }

        let mut sections = Vec::with_capacity(order.len());
        for old in &order {
            let section = self.section(*old)?;
            let mut points = section.points.clone();
            for h in &mut points.section_ids {
                *h = host(*h).ok_or_else(|| {
                    Error::section_builder(format!("mitochondria reference deleted {h}"))
                })?;
            }
            let parent = section.parent.and_then(|p| renamed.get(&p).copied());
            sections.push((parent, points));
        }
        MitoProperties::from_sections(sections)
    }
}

impl Topology for MutMitochondria {
    type Id = MitoSectionId;

    fn roots(&self) -> &[MitoSectionId] {
        &self.roots
    }

    fn parent_of(&self, id: MitoSectionId) -> Option<MitoSectionId> {
        self.sections.get(&id).and_then(|s| s.parent)
    }

    fn children_of(&self, id: MitoSectionId) -> &[MitoSectionId] {
        self.sections
            .get(&id)
            .map_or(&[][..], |s| s.children.as_slice())
    }
}
