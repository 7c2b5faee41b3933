//! Facade CRUD behavior.

use super::*;

#[test]
fn test_create_then_list_contains_once() {
    let book = ephemeral();
    book.create("a", json!({"first": "Ada"})).unwrap();

    let listed = book.list().unwrap();
    assert_eq!(
        listed.iter().filter(|c| c.object_id.as_str() == "a").count(),
        1
    );
}

#[test]
fn test_duplicate_create_conflicts() {
    let book = ephemeral();
    book.create("a", json!({"first": "Ada"})).unwrap();

    let err = book.create("a", json!({"first": "Twin"})).unwrap_err();
    assert!(err.is_conflict());
    assert_eq!(err.status(), 400);
    assert_eq!(book.ping().unwrap(), 1);
}

#[test]
fn test_create_requires_payload_and_id() {
    let book = ephemeral();
    assert!(book.create("", json!({"first": "Ada"})).unwrap_err().is_invalid_input());
    assert!(book.create("a", json!({})).unwrap_err().is_invalid_input());
    assert!(book.create("a", json!(["x"])).unwrap_err().is_invalid_input());
    assert!(book.list().unwrap().is_empty());
}

#[test]
fn test_add_generates_id_and_timestamp() {
    let book = ephemeral();
    let a = book.add(draft("Ada", "Lovelace")).unwrap();
    let b = book.add(draft("Grace", "Hopper")).unwrap();

    assert_ne!(a.object_id, b.object_id);
    assert!(a.created_at.is_some());
    assert_eq!(book.get(a.object_id.as_str()).unwrap(), Some(a));
}

#[test]
fn test_update_unknown_leaves_store_unchanged() {
    let book = ephemeral();
    book.create("a", json!({"first": "Ada"})).unwrap();
    let before = book.list().unwrap();

    let err = book
        .update("nope", ContactPatch::new().favorite(true))
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(book.list().unwrap(), before);
}

#[test]
fn test_favorite_patch_changes_only_favorite() {
    let book = ephemeral();
    let created = book
        .create(
            "a",
            json!({"first": "Ada", "last": "Lovelace", "notes": "n", "twitter": "@ada", "team": "engines"}),
        )
        .unwrap();

    let updated = book.update("a", ContactPatch::new().favorite(true)).unwrap();

    let mut expected = created;
    expected.favorite = Some(true);
    assert_eq!(updated, expected);
}

#[test]
fn test_delete_then_delete_again() {
    let book = ephemeral();
    let created = book.create("a", json!({"first": "Ada"})).unwrap();

    assert_eq!(book.delete("a").unwrap(), created);
    assert!(book.delete("a").unwrap_err().is_not_found());
    assert!(book.get("a").unwrap().is_none());
}

#[test]
fn test_ids_are_case_sensitive() {
    let book = ephemeral();
    book.create("Ada", json!({"first": "Ada"})).unwrap();
    book.create("ada", json!({"first": "ada"})).unwrap();
    assert_eq!(book.list().unwrap().len(), 2);
    assert!(book.get("ADA").unwrap().is_none());
}

#[test]
fn test_unknown_members_survive_round_trip() {
    let book = ephemeral();
    book.create("a", json!({"first": "Ada", "company": {"name": "AE"}}))
        .unwrap();
    let stored = book.get("a").unwrap().unwrap();
    assert_eq!(stored.extra["company"], json!({"name": "AE"}));
}

proptest::proptest! {
    #[test]
    fn prop_patch_keeps_absent_fields(
        first in "[A-Za-z]{1,8}",
        notes in "[a-z ]{0,16}",
        new_last in "[A-Za-z]{1,8}",
    ) {
        let book = ephemeral();
        book.create("p", json!({"first": first, "notes": notes})).unwrap();
        let updated = book.update("p", ContactPatch::new().last(new_last.clone())).unwrap();

        proptest::prop_assert_eq!(updated.first.as_deref(), Some(first.as_str()));
        proptest::prop_assert_eq!(updated.notes.as_deref(), Some(notes.as_str()));
        proptest::prop_assert_eq!(updated.last.as_deref(), Some(new_last.as_str()));
    }
}
