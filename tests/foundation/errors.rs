//! Integration tests for Error types
//!
//! Tests error construction, display, context, and error kinds.

use neurite_foundation::{Error, ErrorContext, ErrorKind, MitoSectionId, SectionId};

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn error_missing_parent() {
    let err = Error::missing_parent(2, 7);
    assert_eq!(err.kind, ErrorKind::MissingParent { sample: 2, parent: 7 });
    let msg = format!("{err}");
    assert!(msg.contains('2') && msg.contains('7'));
}

#[test]
fn error_id_sequence() {
    let err = Error::id_sequence("sample 4 defined twice");
    assert!(matches!(err.kind, ErrorKind::IdSequence(_)));
    assert!(format!("{err}").contains("sample 4 defined twice"));
}

#[test]
fn error_section_not_found() {
    let err = Error::section_not_found(SectionId::new(42));
    assert!(matches!(err.kind, ErrorKind::SectionNotFound(_)));
    assert!(format!("{err}").contains("42"));
}

#[test]
fn error_mito_section_not_found() {
    let err = Error::mito_section_not_found(MitoSectionId::new(3));
    assert!(matches!(err.kind, ErrorKind::MitoSectionNotFound(_)));
    assert_eq!(err.kind.name(), "SectionNotFound");
}

#[test]
fn error_multiple_trees() {
    let err = Error::multiple_trees(3);
    assert_eq!(err.kind, ErrorKind::MultipleTrees { roots: 3 });
    assert!(format!("{err}").contains('3'));
}

// =============================================================================
// Error Categories
// =============================================================================

#[test]
fn structural_errors() {
    assert!(Error::soma("two somata").kind.is_structural());
    assert!(Error::missing_parent(1, 0).kind.is_structural());
    assert!(Error::id_sequence("cycle").kind.is_structural());
    assert!(!Error::raw_data("nan").kind.is_structural());
    assert!(!Error::writer("contour").kind.is_structural());
    assert!(!Error::unknown_file_type("obj").kind.is_structural());
}

#[test]
fn category_names() {
    assert_eq!(Error::soma("x").kind.name(), "SomaError");
    assert_eq!(Error::section_builder("x").kind.name(), "SectionBuilderError");
    assert_eq!(Error::raw_data("x").kind.name(), "RawDataError");
    assert_eq!(Error::unknown_file_type("x").kind.name(), "UnknownFileType");
}

// =============================================================================
// Error Context
// =============================================================================

#[test]
fn error_with_context() {
    let ctx = ErrorContext::new()
        .with_source("cell.swc")
        .with_line(12)
        .with_sample(5);
    let err = Error::raw_data("negative radius").with_context(ctx);

    let ctx = err.context.as_ref().unwrap();
    assert_eq!(ctx.source.as_deref(), Some("cell.swc"));
    assert_eq!(ctx.line, Some(12));
    assert_eq!(ctx.sample, Some(5));
}

#[test]
fn with_source_keeps_sample() {
    let err = Error::missing_parent(2, 7)
        .with_context(ErrorContext::new().with_sample(2))
        .with_source("cell.h5");
    let ctx = err.context.unwrap();
    assert_eq!(ctx.sample, Some(2));
    assert_eq!(ctx.source.as_deref(), Some("cell.h5"));
}

#[test]
fn context_display() {
    let ctx = ErrorContext::new().with_source("cell.swc").with_line(3).with_sample(9);
    let text = ctx.to_string();
    assert!(text.contains("cell.swc:3"));
    assert!(text.contains("sample 9"));
}
