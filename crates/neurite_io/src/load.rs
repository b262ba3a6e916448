//! Entry points: loading from paths or buffers and writing back out.
//!
//! The `*_with` functions take an explicit [`Diagnostics`] context. The
//! plain variants are the outermost entry points: they build one from the
//! process-wide policy with [`Diagnostics::from_global`].

use std::path::Path;

use neurite_builder::{BuildOptions, build};
use neurite_diagnostics::Diagnostics;
use neurite_edit::Modifiers;
use neurite_foundation::{Error, Result, SectionTag};
use neurite_storage::Morphology;

use crate::export::to_records;
use crate::format::FileFormat;
use crate::registry::Registry;
use crate::snapshot::read_file;

/// Configuration of a load.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Build configuration.
    pub build: BuildOptions,
    /// Simplifications applied after building.
    pub modifiers: Modifiers,
}

impl LoadOptions {
    /// Default options: permissive build, no modifiers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Strict build, no modifiers.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            build: BuildOptions::strict(),
            modifiers: Modifiers::default(),
        }
    }

    /// Builder method to set the build options.
    #[must_use]
    pub fn with_build(mut self, build: BuildOptions) -> Self {
        self.build = build;
        self
    }

    /// Builder method to set the modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

// =============================================================================
// Loading
// =============================================================================

/// Loads a morphology from a file, detecting the format from its extension.
///
/// # Errors
///
/// Returns `UnknownFileType` before reading anything if the extension is not
/// a known format or has no reader; otherwise `Io`, reader errors, or any
/// build error.
pub fn load_path<T: SectionTag>(
    path: impl AsRef<Path>,
    registry: &Registry,
    options: &LoadOptions,
) -> Result<Morphology<T>> {
    load_path_with(path, registry, options, &mut Diagnostics::from_global())
}

/// [`load_path`] with an explicit diagnostics context.
///
/// # Errors
///
/// See [`load_path`].
pub fn load_path_with<T: SectionTag>(
    path: impl AsRef<Path>,
    registry: &Registry,
    options: &LoadOptions,
    diagnostics: &mut Diagnostics,
) -> Result<Morphology<T>> {
    let path = path.as_ref();
    let format = FileFormat::from_path(path)?;
    registry.reader(format)?;

    let source = path.display().to_string();
    let bytes = read_file(path)?;
    let mut options = options.clone();
    if options.build.source.is_none() {
        options.build.source = Some(source.clone());
    }
    diagnostics.set_source(Some(source));
    load_buffer_with(&bytes, format, registry, &options, diagnostics)
}

/// Loads a morphology from bytes of the format named by `tag`.
///
/// # Errors
///
/// Returns `UnknownFileType` before decoding if `tag` is not a known format
/// or has no reader; otherwise reader or build errors.
pub fn load_buffer<T: SectionTag>(
    bytes: &[u8],
    tag: &str,
    registry: &Registry,
    options: &LoadOptions,
) -> Result<Morphology<T>> {
    let format = FileFormat::from_tag(tag)?;
    load_buffer_with(bytes, format, registry, options, &mut Diagnostics::from_global())
}

/// Loads a morphology from bytes of a known format.
///
/// # Errors
///
/// See [`load_buffer`].
pub fn load_buffer_with<T: SectionTag>(
    bytes: &[u8],
    format: FileFormat,
    registry: &Registry,
    options: &LoadOptions,
    diagnostics: &mut Diagnostics,
) -> Result<Morphology<T>> {
    let reader = registry.reader(format)?;
    let raw = reader.read(bytes).map_err(|e| match &options.build.source {
        Some(source) => e.with_source(source.clone()),
        None => e,
    })?;
    tracing::debug!(%format, samples = raw.samples.len(), "records decoded");

    let morphology = build::<T>(&raw, &options.build, diagnostics)?;
    options.modifiers.apply(&morphology)
}

// =============================================================================
// Writing
// =============================================================================

/// Encodes a morphology in the format named by `tag`.
///
/// # Errors
///
/// Returns `UnknownFileType` for unknown tags or formats without a writer,
/// `Writer` when the format cannot represent the morphology, or writer
/// errors.
pub fn write_buffer<T: SectionTag>(
    morphology: &Morphology<T>,
    tag: &str,
    registry: &Registry,
) -> Result<Vec<u8>> {
    let format = FileFormat::from_tag(tag)?;
    write_buffer_with(morphology, format, registry, &mut Diagnostics::from_global())
}

/// Encodes a morphology, re-validating it against the format's
/// capabilities first.
///
/// Mitochondria are dropped (with a warning) for formats that cannot store
/// them.
///
/// # Errors
///
/// See [`write_buffer`].
pub fn write_buffer_with<T: SectionTag>(
    morphology: &Morphology<T>,
    format: FileFormat,
    registry: &Registry,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<u8>> {
    let writer = registry.writer(format)?;
    let capabilities = format.capabilities();
    capabilities.check(format.extension(), morphology, diagnostics)?;

    let mut raw = to_records(morphology);
    if !capabilities.mitochondria {
        raw.mitochondria.clear();
    }
    let bytes = writer.write(&raw)?;
    tracing::debug!(%format, bytes = bytes.len(), "morphology encoded");
    Ok(bytes)
}

/// Writes a morphology to a file, choosing the format from the extension.
///
/// # Errors
///
/// See [`write_buffer`]; `Io` if the file cannot be written.
pub fn save_path<T: SectionTag>(
    morphology: &Morphology<T>,
    path: impl AsRef<Path>,
    registry: &Registry,
) -> Result<()> {
    save_path_with(morphology, path, registry, &mut Diagnostics::from_global())
}

/// [`save_path`] with an explicit diagnostics context.
///
/// # Errors
///
/// See [`save_path`].
pub fn save_path_with<T: SectionTag>(
    morphology: &Morphology<T>,
    path: impl AsRef<Path>,
    registry: &Registry,
    diagnostics: &mut Diagnostics,
) -> Result<()> {
    let path = path.as_ref();
    let format = FileFormat::from_path(path)?;
    diagnostics.set_source(Some(path.display().to_string()));
    let bytes = write_buffer_with(morphology, format, registry, diagnostics)?;
    std::fs::write(path, bytes)
        .map_err(|e| Error::io(format!("failed to write file '{}': {e}", path.display())))
}
