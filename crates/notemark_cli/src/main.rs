//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `notemark_core` linkage.
//! - Exercise one create/list round against an in-memory store.

use notemark_core::{MemoryKeyValueStore, NoteDraft, NoteService, Tag, UuidIdGenerator};

fn main() {
    println!("notemark_core ping={}", notemark_core::ping());
    println!("notemark_core version={}", notemark_core::core_version());

    let mut service = NoteService::new(MemoryKeyValueStore::new(), UuidIdGenerator);
    let tag_id = service.generate_id();
    service.add_tag(Tag::new(tag_id.clone(), "smoke"));
    let note_id = service.create_note(NoteDraft {
        title: "smoke".to_string(),
        markdown: "in-memory smoke note".to_string(),
        tags: vec![Tag::new(tag_id, "smoke")],
    });

    let listed = service.notes_with_tags();
    let resolved_tags: usize = listed.iter().map(|note| note.tags.len()).sum();
    println!("notemark_core smoke note_id={note_id} notes={} tags={resolved_tags}", listed.len());
}
