//! Diagnostics policy and its process-wide default.

use std::collections::HashSet;
use std::sync::OnceLock;

use neurite_foundation::{LogLevel, WarningKind};
use parking_lot::RwLock;

/// Decides which advisory messages are surfaced.
///
/// The default shows every warning kind at [`LogLevel::Warning`] and applies
/// no cap.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DiagnosticsPolicy {
    /// Messages less severe than this level are dropped.
    pub log_level: LogLevel,
    /// Warning kinds that are never surfaced.
    pub suppressed: HashSet<WarningKind>,
    /// Maximum number of messages surfaced per operation (`None` = unlimited).
    pub max_warnings: Option<usize>,
}

impl DiagnosticsPolicy {
    /// Creates the default policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A policy that only lets errors through.
    #[must_use]
    pub fn quiet() -> Self {
        Self {
            log_level: LogLevel::Error,
            ..Self::default()
        }
    }

    /// A policy that surfaces everything, including debug messages.
    #[must_use]
    pub fn verbose() -> Self {
        Self {
            log_level: LogLevel::Debug,
            ..Self::default()
        }
    }

    /// Builder method to set the log level.
    #[must_use]
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    /// Builder method to cap the number of surfaced messages.
    #[must_use]
    pub fn with_max_warnings(mut self, max: usize) -> Self {
        self.max_warnings = Some(max);
        self
    }

    /// Builder method to remove the cap.
    #[must_use]
    pub fn unlimited(mut self) -> Self {
        self.max_warnings = None;
        self
    }

    /// Builder method to suppress a warning kind.
    #[must_use]
    pub fn suppress(mut self, kind: WarningKind) -> Self {
        self.suppressed.insert(kind);
        self
    }

    /// Suppresses (`ignore = true`) or re-enables a warning kind.
    pub fn set_ignored(&mut self, kind: WarningKind, ignore: bool) {
        if ignore {
            self.suppressed.insert(kind);
        } else {
            self.suppressed.remove(&kind);
        }
    }

    /// Returns true if the kind is suppressed.
    #[must_use]
    pub fn is_suppressed(&self, kind: WarningKind) -> bool {
        self.suppressed.contains(&kind)
    }

    /// Returns true if messages of `level` pass the level filter.
    #[must_use]
    pub fn allows(&self, level: LogLevel) -> bool {
        level <= self.log_level
    }
}

// =============================================================================
// Process-wide default
// =============================================================================

static GLOBAL_POLICY: OnceLock<RwLock<DiagnosticsPolicy>> = OnceLock::new();

fn global() -> &'static RwLock<DiagnosticsPolicy> {
    GLOBAL_POLICY.get_or_init(|| RwLock::new(DiagnosticsPolicy::default()))
}

/// Returns a snapshot of the process-wide policy.
///
/// Later changes to the global policy do not affect the returned value.
#[must_use]
pub fn global_policy() -> DiagnosticsPolicy {
    global().read().clone()
}

/// Replaces the process-wide policy. Last writer wins.
pub fn set_global_policy(policy: DiagnosticsPolicy) {
    *global().write() = policy;
}

/// Restores the process-wide policy to its defaults.
pub fn reset_global_policy() {
    set_global_policy(DiagnosticsPolicy::default());
}

/// Sets the process-wide warning cap (`None` = unlimited).
pub fn set_maximum_warnings(max: Option<usize>) {
    global().write().max_warnings = max;
}

/// Suppresses or re-enables a warning kind process-wide.
pub fn set_ignored_warning(kind: WarningKind, ignore: bool) {
    global().write().set_ignored(kind, ignore);
}

/// Sets the process-wide log level.
pub fn set_log_level(level: LogLevel) {
    global().write().log_level = level;
}
