//! Warning policy, sinks and formatting for neurite.
//!
//! This crate provides:
//! - [`DiagnosticsPolicy`] - Log level, suppressed kinds and a warning cap
//! - [`Diagnostics`] - The per-operation context threaded into builders and writers
//! - [`DiagnosticSink`] - Push destinations: [`BufferSink`] (pull), [`StreamSink`], [`TracingSink`]
//! - Process-wide defaults ([`global_policy`], [`set_maximum_warnings`], ...)
//!
//! Builders and writers never read the process-wide policy themselves; only
//! [`Diagnostics::from_global`] does, at the outermost entry point.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod context;
pub mod format;
pub mod policy;
pub mod sink;

pub use context::{DiagnosticStats, Diagnostics, Outcome};
pub use format::{DiagnosticFormatter, HumanFormatter};
pub use policy::{
    DiagnosticsPolicy, global_policy, reset_global_policy, set_global_policy,
    set_ignored_warning, set_log_level, set_maximum_warnings,
};
pub use sink::{BufferSink, DiagnosticRecord, DiagnosticSink, NullSink, StreamSink, TracingSink};
