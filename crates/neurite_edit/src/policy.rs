//! Deletion policy.

/// What a non-recursive delete does with the children of a non-leaf section.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum DeletePolicy {
    /// Attach the children to the deleted section's parent, in its place.
    ///
    /// If that parent is a section, each child gets the parent's last point
    /// prepended (when it differs from the child's first point) so that
    /// continuity still holds. Mitochondria hosted on such a child are
    /// rescaled to stay on the same physical spot. If the deleted section
    /// was a root, its children become roots.
    #[default]
    Reparent,
    /// Refuse to delete sections that have children.
    Reject,
}
