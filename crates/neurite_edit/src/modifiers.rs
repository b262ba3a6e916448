//! Simplifications applied to a morphology as it is loaded.

use neurite_foundation::{Point, Result, SectionTag, SomaType};
use neurite_storage::{Morphology, SomaData};

use crate::morphology::MutMorphology;

/// Load-time modifiers. All are off by default.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Drop the first point of every section whose parent is a section.
    ///
    /// The result no longer starts children where their parents end, and a
    /// two-point child keeps a single point. Writing it and loading it back
    /// restores the dropped points, since the builder duplicates branch
    /// points. Mitochondria keep their relative path lengths.
    pub no_duplicates: bool,
    /// Reorder root sections by type: axon, basal, apical, then others.
    pub nrn_order: bool,
    /// Keep only the first and last point of each section.
    ///
    /// Mitochondria keep their relative path lengths, which then measure
    /// along the straightened section.
    pub two_points_sections: bool,
    /// Replace the soma by a single-point sphere of equal mean radius.
    pub soma_sphere: bool,
}

impl Modifiers {
    /// No modification.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables duplicate removal.
    #[must_use]
    pub fn with_no_duplicates(mut self, on: bool) -> Self {
        self.no_duplicates = on;
        self
    }

    /// Enables or disables NEURON root ordering.
    #[must_use]
    pub fn with_nrn_order(mut self, on: bool) -> Self {
        self.nrn_order = on;
        self
    }

    /// Enables or disables two-point sections.
    #[must_use]
    pub fn with_two_points_sections(mut self, on: bool) -> Self {
        self.two_points_sections = on;
        self
    }

    /// Enables or disables the spherical soma.
    #[must_use]
    pub fn with_soma_sphere(mut self, on: bool) -> Self {
        self.soma_sphere = on;
        self
    }

    /// Returns true if no modifier is enabled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Returns a modified copy of `morphology`.
    ///
    /// With no modifier enabled the input is returned as is (a cheap clone).
    ///
    /// # Errors
    ///
    /// Returns the error of re-freezing the modified tree.
    pub fn apply<T: SectionTag>(&self, morphology: &Morphology<T>) -> Result<Morphology<T>> {
        if self.is_empty() {
            return Ok(morphology.clone());
        }
        let mut view = MutMorphology::from_morphology(morphology);

        if self.no_duplicates {
            view.update_sections(|section| {
                if section.parent.is_some() && section.points.len() > 1 {
                    section.points_mut().remove_first();
                }
            });
        }
        if self.two_points_sections {
            view.update_sections(|section| section.points_mut().keep_endpoints());
        }
        if self.nrn_order {
            let mut roots = view.root_sections().to_vec();
            roots.sort_by_key(|id| view.section(*id).map_or(u32::MAX, |s| s.section_type().neuron_order()));
            *view.roots_mut() = roots;
        }
        if self.soma_sphere {
            if let Some(sphere) = sphere(view.soma())? {
                view.set_soma(sphere)?;
            }
        }

        tracing::debug!(modifiers = ?self, "modifiers applied");
        view.freeze()
    }
}

/// The single-point sphere standing in for `soma`, or `None` without points.
fn sphere(soma: &SomaData) -> Result<Option<SomaData>> {
    let Some(center) = Point::centroid(&soma.points) else {
        return Ok(None);
    };
    #[allow(clippy::cast_precision_loss)]
    let mean = soma.points.iter().map(|p| p.distance(center)).sum::<f64>() / soma.points.len() as f64;
    let radius = if mean > 0.0 {
        mean
    } else {
        soma.diameters.iter().copied().fold(0.0, f64::max) / 2.0
    };
    SomaData::new(SomaType::SinglePoint, vec![center], vec![2.0 * radius]).map(Some)
}
