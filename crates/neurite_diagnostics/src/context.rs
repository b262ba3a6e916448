//! The diagnostics context threaded through builders and writers.

use std::fmt;

use neurite_foundation::{LogLevel, Warning, WarningKind};

use crate::policy::{DiagnosticsPolicy, global_policy};
use crate::sink::{DiagnosticRecord, DiagnosticSink, NullSink, TracingSink};

/// What happened to a reported message.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Delivered to the sink.
    Surfaced,
    /// Dropped because its kind is suppressed.
    Suppressed,
    /// Dropped by the log level filter.
    Filtered,
    /// Dropped because the warning cap was reached.
    Elided,
}

/// Counters of what a context did with reported messages.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DiagnosticStats {
    /// Messages delivered to the sink.
    pub surfaced: usize,
    /// Messages dropped because their kind is suppressed.
    pub suppressed: usize,
    /// Messages dropped by the level filter.
    pub filtered: usize,
    /// Messages dropped because the cap was reached.
    pub elided: usize,
}

impl DiagnosticStats {
    /// Total number of reported messages.
    #[must_use]
    pub fn reported(&self) -> usize {
        self.surfaced + self.suppressed + self.filtered + self.elided
    }
}

/// Policy snapshot plus sink for one logical operation.
///
/// The policy is copied in at construction: changing the process-wide policy
/// afterwards does not affect a context that already exists. The warning cap
/// counts surfaced messages of this context only; past the cap, messages are
/// silently dropped, never escalated.
pub struct Diagnostics {
    policy: DiagnosticsPolicy,
    sink: Box<dyn DiagnosticSink>,
    stats: DiagnosticStats,
    source: Option<String>,
    next_id: u64,
}

impl Diagnostics {
    /// Creates a context with an explicit policy and sink.
    pub fn new(policy: DiagnosticsPolicy, sink: impl DiagnosticSink + 'static) -> Self {
        Self {
            policy,
            sink: Box::new(sink),
            stats: DiagnosticStats::default(),
            source: None,
            next_id: 0,
        }
    }

    /// Creates a context from the process-wide policy, forwarding to `tracing`.
    ///
    /// Intended for outermost entry points only.
    #[must_use]
    pub fn from_global() -> Self {
        Self::new(global_policy(), TracingSink)
    }

    /// Creates a context with the default policy that discards everything.
    #[must_use]
    pub fn silent() -> Self {
        Self::new(DiagnosticsPolicy::default(), NullSink)
    }

    /// Builder method to name the source attached to every message.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets or clears the source name attached to subsequent messages.
    pub fn set_source(&mut self, source: Option<String>) {
        self.source = source;
    }

    /// The policy snapshot this context applies.
    #[must_use]
    pub fn policy(&self) -> &DiagnosticsPolicy {
        &self.policy
    }

    /// Counters of reported messages so far.
    #[must_use]
    pub fn stats(&self) -> DiagnosticStats {
        self.stats
    }

    /// Returns true if a message of this kind and level would currently be
    /// surfaced. Callers may skip building expensive messages otherwise.
    #[must_use]
    pub fn would_surface(&self, kind: WarningKind, level: LogLevel) -> bool {
        !self.policy.is_suppressed(kind) && self.policy.allows(level) && !self.cap_reached()
    }

    /// Reports an advisory message.
    pub fn report(&mut self, mut warning: Warning) -> Outcome {
        if self.policy.is_suppressed(warning.kind) {
            self.stats.suppressed += 1;
            return Outcome::Suppressed;
        }
        if !self.policy.allows(warning.level) {
            self.stats.filtered += 1;
            return Outcome::Filtered;
        }
        if self.cap_reached() {
            self.stats.elided += 1;
            return Outcome::Elided;
        }

        if warning.source.is_none() {
            warning.source.clone_from(&self.source);
        }
        let record = DiagnosticRecord {
            id: self.next_id,
            warning,
        };
        self.next_id += 1;
        self.stats.surfaced += 1;
        self.sink.emit(&record);
        Outcome::Surfaced
    }

    /// Reports a warning-level message of the given kind.
    pub fn warn(&mut self, kind: WarningKind, message: impl Into<String>) -> Outcome {
        self.report(Warning::new(kind, message))
    }

    fn cap_reached(&self) -> bool {
        self.policy
            .max_warnings
            .is_some_and(|max| self.stats.surfaced >= max)
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::silent()
    }
}

impl fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostics")
            .field("policy", &self.policy)
            .field("stats", &self.stats)
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}
