//! Note/tag relational service.
//!
//! # Responsibility
//! - Own the persisted note and tag collections; all mutation goes through
//!   this service.
//! - Derive the note-with-resolved-tags view on demand.
//! - Derive plain-text markdown excerpts for list rendering.
//!
//! # Invariants
//! - Note and tag ids never change once assigned.
//! - The derived view is recomputed from current state on every call and
//!   resolves tags in vocabulary order.
//! - Deleting a tag leaves referencing notes' `tag_ids` untouched; dangling
//!   ids resolve to nothing.

use crate::collection::PersistentCollection;
use crate::id::IdGenerator;
use crate::model::note::{Note, NoteDraft, NoteId, NoteWithTags};
use crate::model::tag::Tag;
use crate::store::{KeyValueStore, NOTES_KEY, TAGS_KEY};
use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;

static MARKDOWN_IMAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[[^\]]*]\(([^)]+)\)").expect("valid image regex"));
static MARKDOWN_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid link regex"));
static MARKDOWN_SYMBOL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[\*_`#>~\-\[\]\(\)!]+"#).expect("valid markdown symbol regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

const EXCERPT_MAX_CHARS: usize = 120;

/// Relational store over the note and tag collections.
///
/// Owns the durable store plus both persistent collections. The presentation
/// layer calls these operations and renders the returned data; it never
/// mutates collections directly.
///
/// Operations are synchronous and infallible: reference-by-id misses are
/// silent no-ops, and write-through failures degrade durability without
/// surfacing to the caller.
pub struct NoteService<S: KeyValueStore, G: IdGenerator> {
    store: S,
    ids: G,
    notes: PersistentCollection<Note>,
    tags: PersistentCollection<Tag>,
}

impl<S: KeyValueStore, G: IdGenerator> NoteService<S, G> {
    /// Loads both collections from `store` and takes ownership of it.
    ///
    /// First run seeds both keys with empty sequences.
    pub fn new(mut store: S, ids: G) -> Self {
        let notes = PersistentCollection::load(&mut store, NOTES_KEY, Vec::new());
        let tags = PersistentCollection::load(&mut store, TAGS_KEY, Vec::new());
        Self {
            store,
            ids,
            notes,
            tags,
        }
    }

    /// Stored notes in insertion order.
    pub fn notes(&self) -> &[Note] {
        self.notes.items()
    }

    /// Tag vocabulary in insertion order.
    pub fn tags(&self) -> &[Tag] {
        self.tags.items()
    }

    /// Mints a fresh unique id from the injected generator.
    ///
    /// Callers use this to build tags before [`Self::add_tag`].
    pub fn generate_id(&mut self) -> String {
        self.ids.generate()
    }

    /// Notes joined with their resolved tags, recomputed from current state.
    ///
    /// Resolution follows vocabulary order, and ids referencing a deleted
    /// tag drop out of the result without being purged from the note.
    pub fn notes_with_tags(&self) -> Vec<NoteWithTags> {
        let vocabulary = self.tags.items();
        self.notes
            .items()
            .iter()
            .map(|note| note.with_tags(vocabulary))
            .collect()
    }

    /// Creates a note from `draft` under a freshly generated id, appended
    /// after the existing notes. Returns the new id.
    ///
    /// Empty titles and bodies are permitted; input validation is a
    /// presentation concern.
    pub fn create_note(&mut self, draft: NoteDraft) -> NoteId {
        let id = self.ids.generate();
        let note = Note {
            id: id.clone(),
            title: draft.title,
            markdown: draft.markdown,
            tag_ids: draft.tags.into_iter().map(|tag| tag.id).collect(),
        };
        self.notes.update(&mut self.store, |notes| notes.push(note));
        id
    }

    /// Replaces the matching note's fields in place, keeping its id and
    /// position in the sequence. Unknown ids are ignored.
    pub fn update_note(&mut self, id: &str, draft: NoteDraft) {
        self.notes.update(&mut self.store, |notes| {
            if let Some(note) = notes.iter_mut().find(|note| note.id == id) {
                note.title = draft.title;
                note.markdown = draft.markdown;
                note.tag_ids = draft.tags.into_iter().map(|tag| tag.id).collect();
            }
        });
    }

    /// Removes the matching note. Unknown ids are ignored.
    pub fn delete_note(&mut self, id: &str) {
        self.notes
            .update(&mut self.store, |notes| notes.retain(|note| note.id != id));
    }

    /// Appends `tag` to the vocabulary.
    ///
    /// The caller supplies the id and is responsible for minting it uniquely
    /// (see [`Self::generate_id`]). A colliding id is appended as given and
    /// logged.
    pub fn add_tag(&mut self, tag: Tag) {
        if self.tags.items().iter().any(|existing| existing.id == tag.id) {
            warn!(
                "event=tag_add module=service status=duplicate id={}",
                tag.id
            );
        }
        self.tags.update(&mut self.store, |tags| tags.push(tag));
    }

    /// Replaces the label of the matching tag. Unknown ids are ignored.
    ///
    /// Notes referencing the tag see the new label through the derived view
    /// without being touched themselves.
    pub fn update_tag_label(&mut self, id: &str, label: impl Into<String>) {
        let label = label.into();
        self.tags.update(&mut self.store, |tags| {
            if let Some(tag) = tags.iter_mut().find(|tag| tag.id == id) {
                tag.label = label;
            }
        });
    }

    /// Removes the matching tag from the vocabulary. Unknown ids are ignored.
    ///
    /// No cascade: notes keep the removed id in `tag_ids` and the derived
    /// view simply stops resolving it.
    pub fn delete_tag(&mut self, id: &str) {
        self.tags
            .update(&mut self.store, |tags| tags.retain(|tag| tag.id != id));
    }
}

/// Derives a plain-text excerpt from a note's markdown for list rendering.
///
/// Rules:
/// - markdown images are dropped entirely;
/// - links collapse to their text;
/// - markup symbols are stripped and whitespace collapsed;
/// - the first 120 chars are retained, `None` when nothing remains.
pub fn derive_markdown_excerpt(markdown: &str) -> Option<String> {
    let without_images = MARKDOWN_IMAGE_RE.replace_all(markdown, " ");
    let without_links = MARKDOWN_LINK_RE.replace_all(&without_images, "$1");
    let without_symbols = MARKDOWN_SYMBOL_RE.replace_all(&without_links, " ");
    let collapsed = WHITESPACE_RE.replace_all(&without_symbols, " ");
    let trimmed = collapsed.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.chars().take(EXCERPT_MAX_CHARS).collect())
    }
}
