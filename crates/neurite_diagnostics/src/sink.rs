//! Destinations for surfaced diagnostics.
//!
//! A sink receives every message the policy lets through. Hosts pick the
//! destination: keep records in memory and pull them later ([`BufferSink`]),
//! redirect text into any writer ([`StreamSink`]), forward to `tracing`
//! ([`TracingSink`]) or discard them ([`NullSink`]).

use std::collections::VecDeque;
use std::io::Write;
use std::sync::Arc;

use neurite_foundation::{LogLevel, Warning};
use parking_lot::Mutex;

use crate::format::{DiagnosticFormatter, HumanFormatter};

/// A surfaced diagnostic with its emission sequence number.
#[derive(Clone, Debug, PartialEq)]
pub struct DiagnosticRecord {
    /// Sequence number within the emitting context, starting at 0.
    pub id: u64,
    /// The message.
    pub warning: Warning,
}

/// A destination for surfaced diagnostics.
pub trait DiagnosticSink: Send {
    /// Receives one surfaced record.
    fn emit(&mut self, record: &DiagnosticRecord);
}

// =============================================================================
// Buffer Sink
// =============================================================================

/// In-memory sink that the host pulls records from.
///
/// Clones share the same buffer, so a host can keep one handle while the
/// other is moved into a [`Diagnostics`](crate::Diagnostics) context. The
/// buffer keeps at most `capacity` records, discarding the oldest.
#[derive(Clone, Debug)]
pub struct BufferSink {
    records: Arc<Mutex<VecDeque<DiagnosticRecord>>>,
    capacity: usize,
}

impl BufferSink {
    /// Creates a buffer with the default capacity (10000 records).
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(10_000)
    }

    /// Creates a buffer holding at most `capacity` records.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Arc::new(Mutex::new(VecDeque::with_capacity(capacity.min(1024)))),
            capacity,
        }
    }

    /// Returns a copy of the buffered records, oldest first.
    #[must_use]
    pub fn records(&self) -> Vec<DiagnosticRecord> {
        self.records.lock().iter().cloned().collect()
    }

    /// Removes and returns all buffered records, oldest first.
    pub fn drain(&self) -> Vec<DiagnosticRecord> {
        self.records.lock().drain(..).collect()
    }

    /// Returns the buffered warnings, oldest first.
    #[must_use]
    pub fn warnings(&self) -> Vec<Warning> {
        self.records
            .lock()
            .iter()
            .map(|r| r.warning.clone())
            .collect()
    }

    /// Number of buffered records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    /// Returns true if nothing is buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Clears all buffered records.
    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl Default for BufferSink {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosticSink for BufferSink {
    fn emit(&mut self, record: &DiagnosticRecord) {
        let mut records = self.records.lock();
        records.push_back(record.clone());
        while records.len() > self.capacity {
            records.pop_front();
        }
    }
}

// =============================================================================
// Stream Sink
// =============================================================================

/// Writes formatted records, one per line, into any writer.
///
/// Write failures are ignored: diagnostics must never abort the operation
/// that produced them.
pub struct StreamSink<W: Write + Send> {
    writer: W,
    formatter: HumanFormatter,
}

impl<W: Write + Send> StreamSink<W> {
    /// Creates a sink writing into `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            formatter: HumanFormatter::new(),
        }
    }

    /// Builder method to replace the formatter.
    #[must_use]
    pub fn with_formatter(mut self, formatter: HumanFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Consumes the sink and returns the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl StreamSink<std::io::Stderr> {
    /// A sink writing to standard error.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }
}

impl<W: Write + Send> DiagnosticSink for StreamSink<W> {
    fn emit(&mut self, record: &DiagnosticRecord) {
        let line = self.formatter.format(record);
        let _ = writeln!(self.writer, "{line}");
    }
}

// =============================================================================
// Tracing Sink
// =============================================================================

/// Forwards records to the `tracing` ecosystem at the matching level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&mut self, record: &DiagnosticRecord) {
        let w = &record.warning;
        let section = w.section.map(|s| s.0);
        match w.level {
            LogLevel::Error => {
                tracing::error!(
                    kind = %w.kind,
                    section = ?section,
                    sample = ?w.sample,
                    source = ?w.source,
                    "{}",
                    w.message
                );
            }
            LogLevel::Warning => {
                tracing::warn!(
                    kind = %w.kind,
                    section = ?section,
                    sample = ?w.sample,
                    source = ?w.source,
                    "{}",
                    w.message
                );
            }
            LogLevel::Info => {
                tracing::info!(
                    kind = %w.kind,
                    section = ?section,
                    sample = ?w.sample,
                    source = ?w.source,
                    "{}",
                    w.message
                );
            }
            LogLevel::Debug => {
                tracing::debug!(
                    kind = %w.kind,
                    section = ?section,
                    sample = ?w.sample,
                    source = ?w.source,
                    "{}",
                    w.message
                );
            }
        }
    }
}

// =============================================================================
// Null Sink
// =============================================================================

/// Discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn emit(&mut self, _record: &DiagnosticRecord) {}
}
