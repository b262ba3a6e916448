//! What each format can represent, and re-validation before writing.

use neurite_diagnostics::Diagnostics;
use neurite_foundation::{Error, Result, SectionTag, SomaType, WarningKind};
use neurite_storage::Morphology;

/// Features a format can store.
///
/// Writers re-validate a morphology against these before encoding it:
/// features the format cannot express either fail with a `Writer` error or,
/// for the mitochondria overlay, are dropped with a warning.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FormatCapabilities {
    /// Mitochondria overlay.
    pub mitochondria: bool,
    /// Per-sample perimeters.
    pub perimeters: bool,
    /// A simple-contour soma.
    pub contour_soma: bool,
    /// The soma, if any, must be a simple contour.
    pub requires_contour_soma: bool,
    /// Sections whose only child has the same type. Formats claiming this
    /// must keep [`SampleRecord::section_start`] marks.
    ///
    /// [`SampleRecord::section_start`]: neurite_builder::SampleRecord::section_start
    pub single_child_sections: bool,
    /// Several root sections with no soma to join them.
    pub multiple_roots_without_soma: bool,
}

impl FormatCapabilities {
    /// Stores everything.
    #[must_use]
    pub fn all() -> Self {
        Self {
            mitochondria: true,
            perimeters: true,
            contour_soma: true,
            requires_contour_soma: false,
            single_child_sections: true,
            multiple_roots_without_soma: true,
        }
    }

    /// SWC: one tree of point samples.
    #[must_use]
    pub fn swc() -> Self {
        Self {
            mitochondria: false,
            perimeters: false,
            contour_soma: false,
            requires_contour_soma: false,
            single_child_sections: false,
            multiple_roots_without_soma: false,
        }
    }

    /// ASC: contour somata only.
    #[must_use]
    pub fn asc() -> Self {
        Self {
            mitochondria: false,
            perimeters: false,
            requires_contour_soma: true,
            ..Self::all()
        }
    }

    /// Builder method for the mitochondria flag.
    #[must_use]
    pub fn with_mitochondria(mut self, supported: bool) -> Self {
        self.mitochondria = supported;
        self
    }

    /// Builder method for the perimeters flag.
    #[must_use]
    pub fn with_perimeters(mut self, supported: bool) -> Self {
        self.perimeters = supported;
        self
    }

    /// Checks that `morphology` can be written with these capabilities.
    ///
    /// Advisories go to `diagnostics`: `WriteEmptyMorphology` when there is
    /// nothing to write, `WriteNoSoma` for a soma-bearing family without a
    /// soma and `MitochondriaWriteNotSupported` when the overlay will be
    /// dropped.
    ///
    /// # Errors
    ///
    /// Returns `Writer` for perimeters, soma shapes, single-child sections or
    /// soma-less forests the format cannot express.
    pub fn check<T: SectionTag>(
        &self,
        format: &str,
        morphology: &Morphology<T>,
        diagnostics: &mut Diagnostics,
    ) -> Result<()> {
        let soma = morphology.soma();
        if morphology.n_sections() == 0 && soma.is_empty() {
            diagnostics.warn(
                WarningKind::WriteEmptyMorphology,
                format!("writing an empty morphology to {format}"),
            );
            return Ok(());
        }

        if soma.is_empty() {
            if morphology.cell_family().has_soma() {
                diagnostics.warn(WarningKind::WriteNoSoma, format!("writing to {format} without a soma"));
            }
        } else if soma.soma_type() == SomaType::SimpleContour && !self.contour_soma {
            return Err(Error::writer(format!("{format} cannot store a contour soma")));
        } else if self.requires_contour_soma && soma.soma_type() != SomaType::SimpleContour {
            return Err(Error::writer(format!(
                "{format} requires a contour soma, found {}",
                soma.soma_type()
            )));
        }

        if !self.perimeters && !morphology.all_perimeters().is_empty() {
            return Err(Error::writer(format!("{format} cannot store perimeters")));
        }

        if !self.multiple_roots_without_soma
            && soma.is_empty()
            && morphology.root_sections().len() > 1
            && !morphology.cell_family().allows_multiple_trees()
        {
            return Err(Error::writer(format!(
                "{format} cannot store {} root sections without a soma",
                morphology.root_sections().len()
            )));
        }

        if !self.single_child_sections {
            for id in morphology.sections() {
                let children = morphology.children(id)?;
                if let [only] = children {
                    if morphology.section_type(*only)? == morphology.section_type(id)? {
                        return Err(Error::writer(format!(
                            "{id} has a single child of the same type, which {format} cannot \
                             represent; merge unifurcations first"
                        )));
                    }
                }
            }
        }

        if !self.mitochondria && !morphology.mitochondria().is_empty() {
            diagnostics.warn(
                WarningKind::MitochondriaWriteNotSupported,
                format!("{format} cannot store mitochondria; they are dropped"),
            );
        }
        Ok(())
    }
}

impl Default for FormatCapabilities {
    fn default() -> Self {
        Self::all()
    }
}
