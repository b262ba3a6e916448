//! Build configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How much a build tolerates.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Strictness {
    /// Reject only corrupt structures; discouraged ones are reported.
    #[default]
    Permissive,
    /// Also reject undefined section types, zero diameters and
    /// non-conforming three-point somata.
    Strict,
}

/// What to do with several disconnected root groups and no soma.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MultipleTrees {
    /// Report a warning and keep every tree.
    #[default]
    Warn,
    /// Fail with a `MultipleTrees` error.
    Reject,
}

/// Configuration of one build.
///
/// Families that expect several trees (vasculature) never trigger the
/// multiple-trees check.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BuildOptions {
    /// Tolerance level.
    pub strictness: Strictness,
    /// Handling of disconnected root groups.
    pub multiple_trees: MultipleTrees,
    /// Name of the source, attached to errors.
    pub source: Option<String>,
}

impl BuildOptions {
    /// Default options: permissive, multiple trees reported.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Strict options: strict, multiple trees rejected.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            strictness: Strictness::Strict,
            multiple_trees: MultipleTrees::Reject,
            source: None,
        }
    }

    /// Builder method to set the strictness.
    #[must_use]
    pub fn with_strictness(mut self, strictness: Strictness) -> Self {
        self.strictness = strictness;
        self
    }

    /// Builder method to set multiple-trees handling.
    #[must_use]
    pub fn with_multiple_trees(mut self, multiple_trees: MultipleTrees) -> Self {
        self.multiple_trees = multiple_trees;
        self
    }

    /// Builder method to name the source.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Returns true in strict mode.
    #[must_use]
    pub fn is_strict(&self) -> bool {
        self.strictness == Strictness::Strict
    }
}
