//! Integration tests for diagnostic sinks
//!
//! Tests pull buffers, stream redirection and formatting.

use neurite_diagnostics::{
    BufferSink, DiagnosticFormatter, DiagnosticRecord, DiagnosticSink, Diagnostics,
    DiagnosticsPolicy, HumanFormatter, NullSink, StreamSink,
};
use neurite_foundation::{SectionId, Warning, WarningKind};

fn record(id: u64, warning: Warning) -> DiagnosticRecord {
    DiagnosticRecord { id, warning }
}

#[test]
fn buffer_drain_empties() {
    let buffer = BufferSink::new();
    let mut diagnostics = Diagnostics::new(DiagnosticsPolicy::new(), buffer.clone());
    diagnostics.warn(WarningKind::OnlyChild, "a");
    diagnostics.warn(WarningKind::OnlyChild, "b");

    let drained = buffer.drain();
    assert_eq!(drained.len(), 2);
    assert_eq!(drained[0].warning.message, "a");
    assert!(buffer.is_empty());
}

#[test]
fn buffer_capacity_keeps_newest() {
    let buffer = BufferSink::with_capacity(2);
    let mut diagnostics = Diagnostics::new(DiagnosticsPolicy::new(), buffer.clone());
    for message in ["a", "b", "c"] {
        diagnostics.warn(WarningKind::ZeroDiameter, message);
    }
    let messages: Vec<String> = buffer.warnings().into_iter().map(|w| w.message).collect();
    assert_eq!(messages, vec!["b".to_string(), "c".to_string()]);
}

#[test]
fn stream_sink_writes_lines() {
    let mut sink = StreamSink::new(Vec::new());
    sink.emit(&record(
        0,
        Warning::new(WarningKind::ZeroDiameter, "zero diameter").with_sample(4),
    ));
    sink.emit(&record(1, Warning::new(WarningKind::NoSomaFound, "no soma found")));
    let text = String::from_utf8(sink.into_inner()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("(sample 4)"));
    assert!(lines[1].contains("[no-soma-found]"));
}

#[test]
fn formatter_with_ids_and_sections() {
    let formatter = HumanFormatter::new().with_ids();
    let text = formatter.format(&record(
        7,
        Warning::new(WarningKind::OnlyChild, "one child").with_section(SectionId::new(3)),
    ));
    assert!(text.starts_with("[0007] "));
    assert!(text.contains("Section(3)"));
    assert!(text.ends_with("warning [only-child] one child"));
}

#[test]
fn null_sink_still_counts() {
    let mut diagnostics = Diagnostics::new(DiagnosticsPolicy::new(), NullSink);
    diagnostics.warn(WarningKind::OnlyChild, "x");
    assert_eq!(diagnostics.stats().surfaced, 1);
    assert_eq!(diagnostics.stats().reported(), 1);
}
