//! Tag vocabulary record.

use serde::{Deserialize, Serialize};

/// Stable identifier for a tag.
///
/// Opaque to the core; the caller mints it through an [`crate::id::IdGenerator`].
pub type TagId = String;

/// One entry of the global tag vocabulary.
///
/// Identity is `id`. `label` is mutable display text and carries no
/// uniqueness constraint of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Stable global id that notes use to reference this tag.
    pub id: TagId,
    /// Display text shown in pickers and badges.
    pub label: String,
}

impl Tag {
    /// Builds a tag from a caller-minted id and a label.
    pub fn new(id: impl Into<TagId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}
