//! Building the primary tree.
//!
//! The build runs in fixed stages, each of which may fail:
//!
//! 1. numeric validation of every record (`RawData`)
//! 2. linking samples to parents (`IdSequence`, `MissingParent`)
//! 3. soma extraction and shape resolution (`Soma`)
//! 4. chaining neurite samples into sections
//! 5. the forest check (`MultipleTrees`)
//! 6. advisory checks, reported through the diagnostics context
//! 7. assembling the point table, then the mitochondria overlay
//!
//! Nothing is returned unless every stage succeeds.

use neurite_diagnostics::Diagnostics;
use neurite_foundation::{
    Annotation, AnnotationType, EPSILON, Error, ErrorContext, Result, SampleId, SectionId,
    SectionTag, SomaType, Warning, WarningKind,
};
use neurite_storage::{EndoplasmicReticulum, Morphology, PointLevel, Properties};

use crate::chain::{SampleGraph, chain};
use crate::mito::build_mitochondria;
use crate::options::{BuildOptions, MultipleTrees};
use crate::record::{RawMorphology, SampleRecord};
use crate::soma::resolve_soma;

/// Builds an immutable morphology from a record stream.
///
/// # Errors
///
/// - `RawData` for malformed numbers, unknown type codes, mixed perimeters,
///   a family the tag type cannot describe, and in strict mode undefined
///   section types or zero diameters.
/// - `IdSequence` / `MissingParent` for broken sample references.
/// - `Soma` for inconsistent somata.
/// - `MultipleTrees` when configured to reject several trees.
/// - Any overlay error from [`build_mitochondria`].
pub fn build<T: SectionTag>(
    raw: &RawMorphology,
    options: &BuildOptions,
    diagnostics: &mut Diagnostics,
) -> Result<Morphology<T>> {
    let result = build_inner(raw, options, diagnostics);
    match (&options.source, result) {
        (Some(source), Err(err)) => Err(err.with_source(source.clone())),
        (_, result) => result,
    }
}

fn build_inner<T: SectionTag>(
    raw: &RawMorphology,
    options: &BuildOptions,
    diagnostics: &mut Diagnostics,
) -> Result<Morphology<T>> {
    tracing::debug!(
        samples = raw.samples.len(),
        family = %raw.family,
        source = ?options.source,
        "building morphology"
    );
    if !T::FAMILIES.contains(&raw.family) {
        return Err(Error::raw_data(format!(
            "{} morphologies cannot use these section types",
            raw.family
        )));
    }

    let tags = validate_records::<T>(raw, options, diagnostics)?;
    let graph = SampleGraph::link(raw.samples.iter().map(|s| (s.id, s.parent)))?;

    // Soma.
    let is_soma = |i: usize| tags[i].is_soma();
    let mut soma_points = Vec::new();
    let mut soma_diameters = Vec::new();
    let mut soma_roots = 0;
    for (i, sample) in raw.samples.iter().enumerate() {
        if !is_soma(i) {
            continue;
        }
        match graph.parents[i] {
            None => soma_roots += 1,
            Some(p) if !is_soma(p) => {
                return Err(sample_error(
                    Error::soma(format!(
                        "soma sample {} has neurite sample {} as parent",
                        sample.id, raw.samples[p].id
                    )),
                    sample.id,
                ));
            }
            Some(_) => {}
        }
        soma_points.push(sample.point);
        soma_diameters.push(sample.diameter());
    }
    if soma_roots > 1 && raw.soma_type != SomaType::SimpleContour {
        return Err(Error::soma(format!("found {soma_roots} disconnected somata")));
    }
    let has_soma = !soma_points.is_empty();
    let soma = resolve_soma(raw.soma_type, soma_points, soma_diameters, options, diagnostics)?;

    // Sections.
    let starts: Vec<usize> = (0..graph.len())
        .filter(|&i| !is_soma(i) && graph.parents[i].is_none_or(is_soma))
        .collect();
    for &i in &starts {
        if has_soma && graph.parents[i].is_none() {
            diagnostics.report(
                Warning::new(
                    WarningKind::DisconnectedNeurite,
                    format!("sample {} starts a neurite not attached to the soma", raw.samples[i].id),
                )
                .with_sample(raw.samples[i].id),
            );
        }
    }
    let chains = chain(&graph, &starts, |i| !is_soma(i), |p, c| {
        tags[p] == tags[c] && !raw.samples[c].section_start
    });

    // Forest check.
    if !has_soma && starts.len() > 1 && !raw.family.allows_multiple_trees() {
        match options.multiple_trees {
            MultipleTrees::Reject => return Err(Error::multiple_trees(starts.len())),
            MultipleTrees::Warn => {
                diagnostics.warn(
                    WarningKind::MultipleTrees,
                    format!("{} disconnected trees without a soma", starts.len()),
                );
            }
        }
    }
    if !has_soma && raw.family.has_soma() && !chains.is_empty() {
        diagnostics.warn(WarningKind::NoSomaFound, "no soma found");
    }

    // Point table.
    let mut builder = Properties::<T>::builder(raw.family);
    let mut sample_ids: Vec<Vec<Option<SampleId>>> = Vec::with_capacity(chains.len());
    let mut levels: Vec<PointLevel> = Vec::with_capacity(chains.len());
    for link in &chains {
        let mut level = PointLevel::default();
        let mut ids = Vec::with_capacity(link.samples.len() + 1);
        // Children of a section repeat its last sample as their first point.
        if let Some(&branch) = link.parent.and_then(|p| chains[p].samples.last()) {
            push_sample(&mut level, &raw.samples[branch]);
            ids.push(None);
        }
        for &i in &link.samples {
            push_sample(&mut level, &raw.samples[i]);
            ids.push(Some(raw.samples[i].id));
        }
        let parent = link.parent.map(SectionId::from_index);
        builder.push_section(parent, tags[link.samples[0]], &level);
        levels.push(level);
        sample_ids.push(ids);
    }

    // Advisory checks.
    let mut n_children = vec![0usize; chains.len()];
    for parent in chains.iter().filter_map(|c| c.parent) {
        n_children[parent] += 1;
    }
    for (index, (level, ids)) in levels.iter().zip(&sample_ids).enumerate() {
        let id = SectionId::from_index(index);
        for annotation in advisories(id, level, ids, n_children[index]) {
            diagnostics.report(annotation.to_warning());
            builder.annotate(annotation);
        }
    }

    builder.set_soma(soma);
    builder.set_version(raw.version.clone());
    builder.set_reticulum(EndoplasmicReticulum::from_entries(raw.reticulum.clone())?);
    let morphology = Morphology::from_properties(builder.finish()?);

    tracing::debug!(
        sections = morphology.n_sections(),
        roots = morphology.root_sections().len(),
        soma = %morphology.soma().soma_type(),
        "morphology built"
    );

    if raw.mitochondria.is_empty() {
        Ok(morphology)
    } else {
        build_mitochondria(morphology, &raw.mitochondria)
    }
}

fn push_sample(level: &mut PointLevel, sample: &SampleRecord) {
    level.points.push(sample.point);
    level.diameters.push(sample.diameter());
    if let Some(perimeter) = sample.perimeter {
        level.perimeters.push(perimeter);
    }
}

fn sample_error(err: Error, sample: SampleId) -> Error {
    err.with_context(ErrorContext::new().with_sample(sample))
}

/// Decodes type codes and checks numbers, returning the tag of every sample.
fn validate_records<T: SectionTag>(
    raw: &RawMorphology,
    options: &BuildOptions,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<T>> {
    let with_perimeter = raw.samples.iter().filter(|s| s.perimeter.is_some()).count();
    if with_perimeter != 0 && with_perimeter != raw.samples.len() {
        return Err(Error::raw_data(
            "perimeters must be given for every sample or for none",
        ));
    }
    if raw.family.requires_perimeters() && with_perimeter == 0 && !raw.samples.is_empty() {
        return Err(Error::raw_data(format!(
            "{} samples must carry perimeters",
            raw.family
        )));
    }

    let mut tags = Vec::with_capacity(raw.samples.len());
    for sample in &raw.samples {
        let Some(tag) = T::from_code(sample.type_code) else {
            return Err(sample_error(
                Error::raw_data(format!(
                    "unknown section type {} on sample {}",
                    sample.type_code, sample.id
                )),
                sample.id,
            ));
        };
        if !sample.point.is_finite() {
            return Err(sample_error(
                Error::raw_data(format!("sample {} has a non-finite coordinate", sample.id)),
                sample.id,
            ));
        }
        if !sample.radius.is_finite() || sample.radius < 0.0 {
            return Err(sample_error(
                Error::raw_data(format!("sample {} has radius {}", sample.id, sample.radius)),
                sample.id,
            ));
        }
        if let Some(perimeter) = sample.perimeter.filter(|p| !p.is_finite() || *p < 0.0) {
            return Err(sample_error(
                Error::raw_data(format!("sample {} has perimeter {perimeter}", sample.id)),
                sample.id,
            ));
        }

        if tag.is_undefined() {
            let message = format!("sample {} has an undefined section type", sample.id);
            if options.is_strict() {
                return Err(sample_error(Error::raw_data(message), sample.id));
            }
            diagnostics.report(
                Warning::new(WarningKind::UndefinedSectionType, message).with_sample(sample.id),
            );
        }
        if sample.radius == 0.0 {
            let message = format!("sample {} has zero diameter", sample.id);
            if options.is_strict() {
                return Err(sample_error(Error::raw_data(message), sample.id));
            }
            diagnostics
                .report(Warning::new(WarningKind::ZeroDiameter, message).with_sample(sample.id));
        }
        tags.push(tag);
    }
    Ok(tags)
}

/// Annotations for one built section.
fn advisories(
    id: SectionId,
    level: &PointLevel,
    samples: &[Option<SampleId>],
    n_children: usize,
) -> Vec<Annotation> {
    let mut found = Vec::new();
    if n_children == 1 {
        found.push(Annotation::new(
            AnnotationType::SingleChild,
            id,
            "section has a single child section",
        ));
    }
    let anchor = |annotation: Annotation, point: usize| {
        let annotation = annotation.at_point(point);
        match samples.get(point).copied().flatten() {
            Some(sample) => annotation.with_sample(sample),
            None => annotation,
        }
    };
    for (i, w) in level.points.windows(2).enumerate() {
        if w[0].approx_eq(w[1]) {
            found.push(anchor(
                Annotation::new(
                    AnnotationType::ZeroLengthSegment,
                    id,
                    format!("points {i} and {} coincide", i + 1),
                ),
                i + 1,
            ));
        }
    }
    if let Some(i) = level
        .diameters
        .windows(2)
        .position(|w| w[1] > w[0] + EPSILON)
    {
        found.push(anchor(
            Annotation::new(
                AnnotationType::NonMonotonicRadius,
                id,
                format!("diameter grows from {} to {}", level.diameters[i], level.diameters[i + 1]),
            ),
            i + 1,
        ));
    }
    found
}
