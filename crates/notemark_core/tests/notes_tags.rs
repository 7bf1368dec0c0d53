use notemark_core::{
    MemoryKeyValueStore, NoteDraft, NoteService, SequentialIdGenerator, Tag,
};

fn service() -> NoteService<MemoryKeyValueStore, SequentialIdGenerator> {
    NoteService::new(MemoryKeyValueStore::new(), SequentialIdGenerator::new("n"))
}

fn draft(title: &str, markdown: &str, tags: &[Tag]) -> NoteDraft {
    NoteDraft {
        title: title.to_string(),
        markdown: markdown.to_string(),
        tags: tags.to_vec(),
    }
}

#[test]
fn created_note_stores_tag_ids_and_resolves_them() {
    let mut service = service();
    service.add_tag(Tag::new("t1", "work"));
    service.create_note(draft("A", "x", &[Tag::new("t1", "work")]));

    let notes = service.notes();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].id, "n-1");
    assert_eq!(notes[0].tag_ids, vec!["t1".to_string()]);

    let listed = service.notes_with_tags();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].tags, vec![Tag::new("t1", "work")]);
}

#[test]
fn tag_relabel_is_visible_through_derived_view() {
    let mut service = service();
    service.add_tag(Tag::new("t1", "work"));
    service.create_note(draft("A", "x", &[Tag::new("t1", "work")]));

    service.update_tag_label("t1", "personal");

    let listed = service.notes_with_tags();
    assert_eq!(listed[0].tags, vec![Tag::new("t1", "personal")]);
    // The stored note itself is untouched by the relabel.
    assert_eq!(service.notes()[0].tag_ids, vec!["t1".to_string()]);
}

#[test]
fn tag_delete_keeps_note_reference_but_resolves_to_nothing() {
    let mut service = service();
    service.add_tag(Tag::new("t1", "work"));
    service.create_note(draft("A", "x", &[Tag::new("t1", "work")]));

    service.delete_tag("t1");

    assert!(service.tags().is_empty());
    assert_eq!(service.notes()[0].tag_ids, vec!["t1".to_string()]);
    assert!(service.notes_with_tags()[0].tags.is_empty());
}

#[test]
fn delete_note_removes_exactly_the_matching_note() {
    let mut service = service();
    service.create_note(draft("first", "", &[]));
    service.create_note(draft("second", "", &[]));
    service.create_note(draft("third", "", &[]));

    service.delete_note("n-1");

    let remaining: Vec<&str> = service.notes().iter().map(|note| note.id.as_str()).collect();
    assert_eq!(remaining, vec!["n-2", "n-3"]);
}

#[test]
fn derived_view_resolves_tags_in_vocabulary_order() {
    let mut service = service();
    service.add_tag(Tag::new("t1", "work"));
    service.add_tag(Tag::new("t2", "home"));
    service.add_tag(Tag::new("t3", "urgent"));
    // Attachment order deliberately differs from vocabulary order.
    service.create_note(draft(
        "A",
        "",
        &[Tag::new("t3", "urgent"), Tag::new("t1", "work")],
    ));

    let listed = service.notes_with_tags();
    assert_eq!(
        listed[0].tags,
        vec![Tag::new("t1", "work"), Tag::new("t3", "urgent")]
    );
}

#[test]
fn update_note_preserves_id_and_position() {
    let mut service = service();
    service.add_tag(Tag::new("t1", "work"));
    service.create_note(draft("first", "", &[]));
    service.create_note(draft("second", "old body", &[]));
    service.create_note(draft("third", "", &[]));

    service.update_note("n-2", draft("renamed", "new body", &[Tag::new("t1", "work")]));

    let ids: Vec<&str> = service.notes().iter().map(|note| note.id.as_str()).collect();
    assert_eq!(ids, vec!["n-1", "n-2", "n-3"]);

    let updated = &service.notes()[1];
    assert_eq!(updated.title, "renamed");
    assert_eq!(updated.markdown, "new body");
    assert_eq!(updated.tag_ids, vec!["t1".to_string()]);
}

#[test]
fn missing_ids_leave_collections_untouched() {
    let mut service = service();
    service.add_tag(Tag::new("t1", "work"));
    service.create_note(draft("A", "x", &[Tag::new("t1", "work")]));

    let notes_before = service.notes().to_vec();
    let tags_before = service.tags().to_vec();
    let view_before = service.notes_with_tags();

    service.update_note("nonexistent", draft("B", "y", &[]));
    service.delete_note("nonexistent");
    service.update_tag_label("nonexistent", "renamed");
    service.delete_tag("nonexistent");

    assert_eq!(service.notes(), notes_before.as_slice());
    assert_eq!(service.tags(), tags_before.as_slice());
    assert_eq!(service.notes_with_tags(), view_before);
}

#[test]
fn tag_vocabulary_keeps_unique_ids_across_add_delete_sequences() {
    let mut service = service();
    service.add_tag(Tag::new("t1", "work"));
    service.add_tag(Tag::new("t2", "home"));
    service.add_tag(Tag::new("t3", "urgent"));
    service.delete_tag("t2");
    service.add_tag(Tag::new("t4", "later"));

    let ids: Vec<&str> = service.tags().iter().map(|tag| tag.id.as_str()).collect();
    assert_eq!(ids, vec!["t1", "t3", "t4"]);
    for (index, id) in ids.iter().enumerate() {
        assert!(!ids[index + 1..].contains(id), "duplicate tag id {id}");
    }
}

#[test]
fn empty_title_and_markdown_are_permitted() {
    let mut service = service();
    let id = service.create_note(draft("", "", &[]));

    assert_eq!(service.notes()[0].id, id);
    assert_eq!(service.notes()[0].title, "");
    assert_eq!(service.notes()[0].markdown, "");
}

#[test]
fn duplicate_tag_ids_on_a_note_are_not_deduplicated() {
    let mut service = service();
    service.add_tag(Tag::new("t1", "work"));
    service.create_note(draft(
        "A",
        "",
        &[Tag::new("t1", "work"), Tag::new("t1", "work")],
    ));

    assert_eq!(
        service.notes()[0].tag_ids,
        vec!["t1".to_string(), "t1".to_string()]
    );
    // The derived view walks the vocabulary, so the tag still appears once.
    assert_eq!(service.notes_with_tags()[0].tags, vec![Tag::new("t1", "work")]);
}
