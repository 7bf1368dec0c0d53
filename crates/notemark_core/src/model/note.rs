//! Note records: stored shape and derived view.

use crate::model::tag::{Tag, TagId};
use serde::{Deserialize, Serialize};

/// Stable identifier for a note.
///
/// Opaque to the core; freshly generated on create and never changed.
pub type NoteId = String;

/// Persisted note shape. References tags by id only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Stable global id assigned at creation.
    pub id: NoteId,
    /// Display title. May be empty; input validation is a caller concern.
    pub title: String,
    /// Raw markdown body.
    pub markdown: String,
    /// Referenced tag ids in attachment order. Entries pointing at a tag
    /// that no longer exists stay in place and resolve to nothing.
    #[serde(rename = "tagIds")]
    pub tag_ids: Vec<TagId>,
}

/// Note with its tag ids resolved against the current vocabulary.
///
/// Derived on demand; never persisted or cached across mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteWithTags {
    /// Id of the underlying stored note.
    pub id: NoteId,
    /// Title of the underlying stored note.
    pub title: String,
    /// Markdown body of the underlying stored note.
    pub markdown: String,
    /// Resolved tags in vocabulary order, not `tag_ids` order.
    pub tags: Vec<Tag>,
}

/// Caller-supplied fields for note create/update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub markdown: String,
    /// Tags to attach; only their ids are persisted on the note.
    pub tags: Vec<Tag>,
}

impl Note {
    /// Resolves this note against `vocabulary`.
    ///
    /// The result keeps vocabulary iteration order and silently drops ids
    /// that no longer resolve.
    pub fn with_tags(&self, vocabulary: &[Tag]) -> NoteWithTags {
        NoteWithTags {
            id: self.id.clone(),
            title: self.title.clone(),
            markdown: self.markdown.clone(),
            tags: vocabulary
                .iter()
                .filter(|tag| self.tag_ids.contains(&tag.id))
                .cloned()
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Note, Tag};

    #[test]
    fn note_serialization_uses_expected_wire_fields() {
        let note = Note {
            id: "n1".to_string(),
            title: "A".to_string(),
            markdown: "body".to_string(),
            tag_ids: vec!["t1".to_string(), "t2".to_string()],
        };

        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(json["id"], "n1");
        assert_eq!(json["title"], "A");
        assert_eq!(json["markdown"], "body");
        assert_eq!(json["tagIds"][0], "t1");
        assert_eq!(json["tagIds"][1], "t2");

        let decoded: Note = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, note);
    }

    #[test]
    fn with_tags_follows_vocabulary_order_and_drops_dangling_ids() {
        let vocabulary = vec![
            Tag::new("t1", "work"),
            Tag::new("t2", "home"),
            Tag::new("t3", "urgent"),
        ];
        let note = Note {
            id: "n1".to_string(),
            title: String::new(),
            markdown: String::new(),
            tag_ids: vec!["t3".to_string(), "missing".to_string(), "t1".to_string()],
        };

        let view = note.with_tags(&vocabulary);
        assert_eq!(view.tags, vec![Tag::new("t1", "work"), Tag::new("t3", "urgent")]);
    }
}
