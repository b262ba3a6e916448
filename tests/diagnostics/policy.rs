//! Integration tests for diagnostics policies
//!
//! Tests suppression, level filtering and the process-wide default.

use neurite_diagnostics::{
    BufferSink, Diagnostics, DiagnosticsPolicy, Outcome, global_policy, reset_global_policy,
    set_ignored_warning, set_log_level, set_maximum_warnings,
};
use neurite_foundation::{LogLevel, Warning, WarningKind};

// =============================================================================
// Policy Filters
// =============================================================================

#[test]
fn suppressed_kind_is_dropped() {
    let buffer = BufferSink::new();
    let policy = DiagnosticsPolicy::new().suppress(WarningKind::OnlyChild);
    let mut diagnostics = Diagnostics::new(policy, buffer.clone());

    assert_eq!(diagnostics.warn(WarningKind::OnlyChild, "one child"), Outcome::Suppressed);
    assert_eq!(diagnostics.warn(WarningKind::ZeroDiameter, "zero"), Outcome::Surfaced);
    assert_eq!(buffer.len(), 1);
    assert_eq!(diagnostics.stats().suppressed, 1);
}

#[test]
fn quiet_policy_filters_warnings() {
    let buffer = BufferSink::new();
    let mut diagnostics = Diagnostics::new(DiagnosticsPolicy::quiet(), buffer.clone());

    assert_eq!(diagnostics.warn(WarningKind::NoSomaFound, "no soma"), Outcome::Filtered);
    let error = Warning::new(WarningKind::NoSomaFound, "no soma").with_level(LogLevel::Error);
    assert_eq!(diagnostics.report(error), Outcome::Surfaced);
    assert_eq!(buffer.len(), 1);
}

#[test]
fn debug_messages_need_verbose() {
    let message = || Warning::new(WarningKind::ZeroLengthSegment, "coincide").with_level(LogLevel::Debug);

    let mut default = Diagnostics::new(DiagnosticsPolicy::new(), BufferSink::new());
    assert_eq!(default.report(message()), Outcome::Filtered);

    let mut verbose = Diagnostics::new(DiagnosticsPolicy::verbose(), BufferSink::new());
    assert_eq!(verbose.report(message()), Outcome::Surfaced);
}

#[test]
fn would_surface_tracks_cap() {
    let mut diagnostics = Diagnostics::new(DiagnosticsPolicy::new().with_max_warnings(1), BufferSink::new());
    assert!(diagnostics.would_surface(WarningKind::OnlyChild, LogLevel::Warning));
    diagnostics.warn(WarningKind::OnlyChild, "first");
    assert!(!diagnostics.would_surface(WarningKind::OnlyChild, LogLevel::Warning));
    assert_eq!(diagnostics.warn(WarningKind::OnlyChild, "second"), Outcome::Elided);
}

#[test]
fn source_is_attached() {
    let buffer = BufferSink::new();
    let mut diagnostics = Diagnostics::new(DiagnosticsPolicy::new(), buffer.clone()).with_source("cell.asc");
    diagnostics.warn(WarningKind::WriteNoSoma, "no soma");
    assert_eq!(buffer.warnings()[0].source.as_deref(), Some("cell.asc"));
}

// =============================================================================
// Process-wide Default
// =============================================================================

// The only test in this binary that touches the global policy.
#[test]
fn global_policy_is_snapshotted() {
    reset_global_policy();
    set_maximum_warnings(Some(2));
    set_ignored_warning(WarningKind::OnlyChild, true);
    set_log_level(LogLevel::Info);

    let context = Diagnostics::from_global();
    assert_eq!(context.policy().max_warnings, Some(2));
    assert!(context.policy().is_suppressed(WarningKind::OnlyChild));

    set_maximum_warnings(None);
    set_ignored_warning(WarningKind::OnlyChild, false);
    assert_eq!(context.policy().max_warnings, Some(2));
    assert_eq!(global_policy().max_warnings, None);
    assert!(!global_policy().is_suppressed(WarningKind::OnlyChild));
    assert_eq!(global_policy().log_level, LogLevel::Info);

    reset_global_policy();
    assert_eq!(global_policy(), DiagnosticsPolicy::default());
}
