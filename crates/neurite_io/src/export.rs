//! Flattening a morphology back into the record stream a writer consumes.

use std::collections::HashMap;

use neurite_builder::{MitoRecord, RawMorphology, SampleRecord};
use neurite_foundation::{ROOT_SAMPLE, SampleId, SectionId, SectionTag, SectionType};
use neurite_storage::Morphology;

/// Produces the record stream that rebuilds `morphology`.
///
/// Soma samples come first, chained to each other. Sections follow in
/// depth-first order; a section's first point is omitted when it repeats its
/// parent section's last point, since the builder duplicates it back. Sample
/// ids are dense, starting at 1. Root sections hang off the first soma
/// sample, or are roots themselves without a soma. The first sample of an
/// only child is marked with [`SampleRecord::starting_section`], so the
/// builder keeps the split instead of chaining it into its parent.
///
/// Building the result yields the same topology and section ids, so
/// reticulum entries and mitochondria hosts carry over unchanged.
#[must_use]
pub fn to_records<T: SectionTag>(morphology: &Morphology<T>) -> RawMorphology {
    let mut raw = RawMorphology::new(morphology.cell_family())
        .with_version(morphology.version().clone())
        .with_soma_type(morphology.soma().soma_type());
    let mut next: SampleId = 1;

    let soma = morphology.soma();
    let mut previous = ROOT_SAMPLE;
    for (point, diameter) in soma.points().iter().zip(soma.diameters()) {
        raw.push_sample(SampleRecord::new(next, SectionType::Soma.code(), *point, diameter / 2.0, previous));
        previous = next;
        next += 1;
    }
    let soma_anchor = if soma.is_empty() { ROOT_SAMPLE } else { 1 };

    let mut last_sample: HashMap<SectionId, SampleId> = HashMap::new();
    for &id in morphology.depth_first_order() {
        let Ok(section) = morphology.section(id) else { continue };
        let parent = section.parent().map(|p| p.id());
        let mut split = section.parent().is_some_and(|p| p.children().len() == 1);
        let mut link = parent.and_then(|p| last_sample.get(&p).copied()).unwrap_or(soma_anchor);
        let code = section.section_type().code();

        let points = section.points();
        let skip = match parent.and_then(|p| morphology.points(p).ok()).and_then(<[_]>::last) {
            Some(last) => points.len() > 1 && points[0].approx_eq(*last),
            None => false,
        };
        let perimeters = section.perimeters();
        for (i, point) in points.iter().enumerate().skip(usize::from(skip)) {
            let mut record = SampleRecord::new(next, code, *point, section.diameters()[i] / 2.0, link);
            if let Some(&perimeter) = perimeters.get(i) {
                record = record.with_perimeter(perimeter);
            }
            if std::mem::take(&mut split) {
                record = record.starting_section();
            }
            raw.push_sample(record);
            link = next;
            next += 1;
        }
        last_sample.insert(id, link);
    }

    let mitochondria = morphology.mitochondria();
    let mut next_mito: SampleId = 1;
    let mut last_mito = HashMap::new();
    for id in mitochondria.depth_first() {
        let Ok(section) = mitochondria.section(id) else { continue };
        let mut link = section
            .parent()
            .and_then(|p| last_mito.get(&p).copied())
            .unwrap_or(ROOT_SAMPLE);
        let columns = section
            .neurite_section_ids()
            .iter()
            .zip(section.relative_path_lengths())
            .zip(section.diameters());
        for ((host, relative), diameter) in columns {
            raw.push_mito(MitoRecord::new(next_mito, *host, *relative, *diameter, link));
            link = next_mito;
            next_mito += 1;
        }
        last_mito.insert(id, link);
    }

    raw.reticulum = morphology.endoplasmic_reticulum().entries().to_vec();
    tracing::debug!(
        samples = raw.samples.len(),
        mitochondria = raw.mitochondria.len(),
        "records exported"
    );
    raw
}
