//! Building the mitochondria overlay on a finished primary tree.

use neurite_foundation::{Error, ErrorContext, MitoSectionId, Result, SectionTag};
use neurite_storage::{MitoPointLevel, MitoProperties, Mitochondria, Morphology};

use crate::chain::{SampleGraph, chain};
use crate::record::MitoRecord;

/// Builds the mitochondria described by `records` and attaches them to
/// `morphology`.
///
/// Mitochondrial samples chain into sections exactly like neurite samples,
/// except that there is no soma and no type to split on.
///
/// # Errors
///
/// - `IdSequence` / `MissingParent` for broken sample references.
/// - `RawData` for relative distances outside `[0, 1]`, invalid diameters
///   or hosts that are not sections of `morphology`.
pub fn build_mitochondria<T: SectionTag>(
    morphology: Morphology<T>,
    records: &[MitoRecord],
) -> Result<Morphology<T>> {
    for record in records {
        let invalid = if !(0.0..=1.0).contains(&record.relative_distance) {
            Some(format!(
                "relative distance {} is outside [0, 1]",
                record.relative_distance
            ))
        } else if !record.diameter.is_finite() || record.diameter < 0.0 {
            Some(format!("diameter {} is invalid", record.diameter))
        } else if record.host.index() >= morphology.n_sections() {
            Some(format!("host {} does not exist", record.host))
        } else {
            None
        };
        if let Some(message) = invalid {
            return Err(Error::raw_data(format!(
                "mitochondrial sample {}: {message}",
                record.id
            ))
            .with_context(ErrorContext::new().with_sample(record.id)));
        }
    }

    let graph = SampleGraph::link(records.iter().map(|r| (r.id, r.parent)))?;
    let roots: Vec<usize> = (0..graph.len())
        .filter(|&i| graph.parents[i].is_none())
        .collect();
    let chains = chain(&graph, &roots, |_| true, |_, _| true);

    let mut sections = Vec::with_capacity(chains.len());
    for link in &chains {
        let picked = link.samples.iter().map(|&i| &records[i]);
        let level = MitoPointLevel::new(
            picked.clone().map(|r| r.host).collect(),
            picked.clone().map(|r| r.relative_distance).collect(),
            picked.map(|r| r.diameter).collect(),
        )?;
        sections.push((link.parent.map(MitoSectionId::from_index), level));
    }

    let mitochondria = Mitochondria::new(MitoProperties::from_sections(sections)?);
    tracing::debug!(
        sections = mitochondria.n_sections(),
        roots = mitochondria.root_sections().len(),
        "mitochondria built"
    );
    morphology.with_mitochondria(mitochondria)
}
