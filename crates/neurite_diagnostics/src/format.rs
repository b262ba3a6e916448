//! Text formatting of diagnostic records.

use std::fmt::Write;

use crate::sink::DiagnosticRecord;

/// Trait for formatting diagnostic records.
pub trait DiagnosticFormatter {
    /// Formats a single record to a string.
    fn format(&self, record: &DiagnosticRecord) -> String;

    /// Formats multiple records, one per line.
    fn format_many(&self, records: &[DiagnosticRecord]) -> String {
        records
            .iter()
            .map(|r| self.format(r))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Formats records in human-readable form.
///
/// ```text
/// cell.swc (sample 12): warning [zero-diameter] sample 12 has zero diameter
/// ```
#[derive(Clone, Debug, Default)]
pub struct HumanFormatter {
    /// Whether to prefix records with their sequence number.
    pub show_ids: bool,
}

impl HumanFormatter {
    /// Creates a new human formatter with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to show sequence numbers.
    #[must_use]
    pub fn with_ids(mut self) -> Self {
        self.show_ids = true;
        self
    }
}

impl DiagnosticFormatter for HumanFormatter {
    fn format(&self, record: &DiagnosticRecord) -> String {
        let warning = &record.warning;
        let mut out = String::new();

        if self.show_ids {
            let _ = write!(out, "[{:04}] ", record.id);
        }

        let mut located = false;
        if let Some(source) = &warning.source {
            let _ = write!(out, "{source}");
            located = true;
        }
        if let Some(sample) = warning.sample {
            if located {
                out.push(' ');
            }
            let _ = write!(out, "(sample {sample})");
            located = true;
        } else if let Some(section) = warning.section {
            if located {
                out.push(' ');
            }
            let _ = write!(out, "({section})");
            located = true;
        }
        if located {
            out.push_str(": ");
        }

        let _ = write!(
            out,
            "{} [{}] {}",
            warning.level, warning.kind, warning.message
        );
        out
    }
}
