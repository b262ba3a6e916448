//! Error types for the neurite system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//! Every failure is fatal for the operation that raised it; advisory
//! conditions travel as [`Warning`](crate::Warning) values instead.

use std::fmt;

use thiserror::Error;

use crate::id::{MitoSectionId, SampleId, SectionId};

/// Result alias used throughout neurite.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for neurite operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Sets the source name on the context, creating one if needed.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        let context = self.context.take().unwrap_or_default();
        self.context = Some(context.with_source(source));
        self
    }

    /// Creates an id sequence error (duplicate, cyclic or self-referential ids).
    #[must_use]
    pub fn id_sequence(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::IdSequence(message.into()))
    }

    /// Creates a missing parent error.
    #[must_use]
    pub fn missing_parent(sample: SampleId, parent: SampleId) -> Self {
        Self::new(ErrorKind::MissingParent { sample, parent })
            .with_context(ErrorContext::new().with_sample(sample))
    }

    /// Creates a multiple trees error.
    #[must_use]
    pub fn multiple_trees(roots: usize) -> Self {
        Self::new(ErrorKind::MultipleTrees { roots })
    }

    /// Creates a soma error.
    #[must_use]
    pub fn soma(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Soma(message.into()))
    }

    /// Creates a raw data error.
    #[must_use]
    pub fn raw_data(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RawData(message.into()))
    }

    /// Creates a section builder error.
    #[must_use]
    pub fn section_builder(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SectionBuilder(message.into()))
    }

    /// Creates an unknown file type error.
    #[must_use]
    pub fn unknown_file_type(tag: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownFileType(tag.into()))
    }

    /// Creates a writer error.
    #[must_use]
    pub fn writer(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Writer(message.into()))
    }

    /// Creates a section not found error.
    #[must_use]
    pub fn section_not_found(id: SectionId) -> Self {
        Self::new(ErrorKind::SectionNotFound(id))
    }

    /// Creates a mito section not found error.
    #[must_use]
    pub fn mito_section_not_found(id: MitoSectionId) -> Self {
        Self::new(ErrorKind::MitoSectionNotFound(id))
    }

    /// Creates an I/O error.
    #[must_use]
    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Io(message.into()))
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ErrorKind {
    /// Duplicate, cyclic or self-referential sample ids.
    #[error("id sequence error: {0}")]
    IdSequence(String),

    /// A record's parent id is never defined.
    #[error("missing parent: sample {sample} references undefined parent {parent}")]
    MissingParent {
        /// The sample whose parent is missing.
        sample: SampleId,
        /// The parent id that could not be resolved.
        parent: SampleId,
    },

    /// More than one disconnected root group.
    #[error("multiple trees: found {roots} disconnected root groups without a soma")]
    MultipleTrees {
        /// Number of root groups found.
        roots: usize,
    },

    /// Soma point count or type mismatch, or multiple somas.
    #[error("soma error: {0}")]
    Soma(String),

    /// Malformed numeric input.
    #[error("raw data error: {0}")]
    RawData(String),

    /// Invalid structural edit request on the mutable view.
    #[error("section builder error: {0}")]
    SectionBuilder(String),

    /// Unrecognized declared or inferred format.
    #[error("unknown file type: {0}")]
    UnknownFileType(String),

    /// Tree not serializable to the requested format.
    #[error("writer error: {0}")]
    Writer(String),

    /// Section id does not resolve in this view.
    #[error("section not found: {0}")]
    SectionNotFound(SectionId),

    /// Mito section id does not resolve in this view.
    #[error("mito section not found: {0}")]
    MitoSectionNotFound(MitoSectionId),

    /// I/O failure while reading or writing a file.
    #[error("I/O error: {0}")]
    Io(String),

    /// Encoding or decoding of a record stream failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

impl ErrorKind {
    /// Returns true for failures caused by the structure of the input tree.
    #[must_use]
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::IdSequence(_)
                | Self::MissingParent { .. }
                | Self::MultipleTrees { .. }
                | Self::Soma(_)
        )
    }

    /// Short stable name of the category, used in diagnostics output.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::IdSequence(_) => "IdSequenceError",
            Self::MissingParent { .. } => "MissingParentError",
            Self::MultipleTrees { .. } => "MultipleTrees",
            Self::Soma(_) => "SomaError",
            Self::RawData(_) => "RawDataError",
            Self::SectionBuilder(_) => "SectionBuilderError",
            Self::UnknownFileType(_) => "UnknownFileType",
            Self::Writer(_) => "WriterError",
            Self::SectionNotFound(_) | Self::MitoSectionNotFound(_) => "SectionNotFound",
            Self::Io(_) => "IoError",
            Self::Serialization(_) => "SerializationError",
            Self::Internal(_) => "InternalError",
        }
    }
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorContext {
    /// Source file or buffer name.
    pub source: Option<String>,
    /// Sample id the failure refers to.
    pub sample: Option<SampleId>,
    /// Line number in source, when the reader tracked one.
    pub line: Option<usize>,
    /// Stack of operations that led to the failure, outermost last.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source name.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the sample id.
    #[must_use]
    pub fn with_sample(mut self, sample: SampleId) -> Self {
        self.sample = Some(sample);
        self
    }

    /// Sets the line number.
    #[must_use]
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "in {source}")?;
            if let Some(line) = self.line {
                write!(f, ":{line}")?;
            }
        }
        if let Some(sample) = self.sample {
            if self.source.is_some() {
                write!(f, " ")?;
            }
            write!(f, "(sample {sample})")?;
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  in {frame}")?;
            }
        }
        Ok(())
    }
}
