//! Restart behavior against the store file.

use super::*;
use tempfile::tempdir;

fn mutate(book: &Rolodex) {
    book.create("a", json!({"first": "Ada", "createdAt": 1})).unwrap();
    book.create("b", json!({"first": "Grace", "createdAt": 2})).unwrap();
    book.create("c", json!({"first": "Alan", "createdAt": 3})).unwrap();
    book.update("a", ContactPatch::new().last("Lovelace")).unwrap();
    book.delete("b").unwrap();
}

#[test]
fn test_async_reopen_reproduces_collection() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data").join("data.json");

    let expected = {
        let book = on_disk(&path, DurabilityMode::Async);
        mutate(&book);
        book.close().unwrap();
        book.list().unwrap()
    };

    let reopened = on_disk(&path, DurabilityMode::Async);
    assert_eq!(reopened.list().unwrap(), expected);
}

#[test]
fn test_strict_reopen_without_close() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.json");

    let expected = {
        let book = on_disk(&path, DurabilityMode::Strict);
        mutate(&book);
        book.list().unwrap()
    };

    let reopened = on_disk(&path, DurabilityMode::Strict);
    assert_eq!(reopened.list().unwrap(), expected);
}

#[test]
fn test_file_is_pretty_printed_array() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.json");
    let book = on_disk(&path, DurabilityMode::Strict);
    book.create("a", json!({"first": "Ada", "createdAt": 7})).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("[\n  {"));
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value, json!([{"objectID": "a", "createdAt": 7, "first": "Ada"}]));
}

#[test]
fn test_hand_written_file_is_loaded() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.json");
    std::fs::write(
        &path,
        r#"[{"objectID": "x1", "first": "Edsger", "favorite": true, "legacy": 1}]"#,
    )
    .unwrap();

    let book = on_disk(&path, DurabilityMode::Async);
    let x = book.get("x1").unwrap().unwrap();
    assert!(x.is_favorite());
    assert_eq!(x.extra["legacy"], json!(1));
}

#[test]
fn test_no_durability_writes_nothing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.json");
    let book = on_disk(&path, DurabilityMode::None);
    book.create("a", json!({"first": "Ada"})).unwrap();
    book.flush().unwrap();

    assert!(!path.exists());
    assert!(book.path().is_none());
}

#[test]
fn test_writer_stats_after_flush() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.json");
    let book = on_disk(&path, DurabilityMode::Async);
    for i in 0..20 {
        book.create(&format!("c{}", i), json!({"first": "x"})).unwrap();
    }
    book.flush().unwrap();

    let stats = book.writer_stats();
    assert_eq!(stats.submitted, 20);
    assert_eq!(stats.failed, 0);
    assert!(stats.written >= 1);
}
