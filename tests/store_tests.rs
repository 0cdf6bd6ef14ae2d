//! Saved AP file behavior across load, upsert and rewrite.

use ollama_remote::storage::{
    join_for_display, parse_entries, serialize_entries, ApEntry, ApRecord, ApStore, UpsertOutcome,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use tempfile::TempDir;

fn store_with(contents: Option<&str>) -> (TempDir, ApStore) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("SavedAPs.txt");
    if let Some(contents) = contents {
        std::fs::write(&path, contents).unwrap();
    }
    (dir, ApStore::new(path))
}

#[test]
fn test_home_work_summary() {
    let (_dir, store) = store_with(Some("Home//pw1\r\nWork//pw2\r\n\r\n"));
    let records = store.records().unwrap();
    assert_eq!(join_for_display(&records), "Home, Work");
}

#[test]
fn test_missing_file_is_empty() {
    let (_dir, store) = store_with(None);
    assert!(!store.exists());
    assert!(store.load_all().unwrap().is_empty());
    assert_eq!(join_for_display(&store.records().unwrap()), "");
}

#[test]
fn test_upsert_creates_file() {
    let (_dir, store) = store_with(None);
    assert_eq!(store.upsert("Cafe", "latte").unwrap(), UpsertOutcome::Inserted);
    assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "Cafe//latte\n");
}

#[test]
fn test_upsert_keeps_raw_lines_in_place() {
    let (_dir, store) = store_with(Some("# hand edited\nHome//pw1\n"));
    store.upsert("Home", "pw9").unwrap();

    assert_eq!(
        std::fs::read_to_string(store.path()).unwrap(),
        "# hand edited\nHome//pw9\n"
    );
    let entries = store.load_all().unwrap();
    assert_eq!(entries[0], ApEntry::Raw("# hand edited".to_string()));
    assert_eq!(store.records().unwrap().len(), 1);
}

#[test]
fn test_upsert_collapses_duplicate_ssids() {
    let (_dir, store) = store_with(Some("Home//a\nWork//b\nHome//c\n"));
    assert_eq!(store.upsert("Home", "d").unwrap(), UpsertOutcome::Updated);
    assert_eq!(
        std::fs::read_to_string(store.path()).unwrap(),
        "Home//d\nWork//b\n"
    );
}

#[test]
fn test_upsert_updates_middle_record_in_place() {
    let (_dir, store) = store_with(Some("A//1\nB//2\nC//3\n"));
    assert_eq!(store.upsert("B", "9").unwrap(), UpsertOutcome::Updated);
    assert_eq!(
        std::fs::read_to_string(store.path()).unwrap(),
        "A//1\nB//9\nC//3\n"
    );
}

#[test]
fn test_padded_upsert_keeps_one_line_per_ssid() {
    let (_dir, store) = store_with(None);
    assert_eq!(store.upsert(" Home", "pw ").unwrap(), UpsertOutcome::Inserted);
    assert_eq!(store.upsert(" Home", "pw ").unwrap(), UpsertOutcome::Updated);
    assert_eq!(store.upsert("Home", "pw2").unwrap(), UpsertOutcome::Updated);

    assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "Home//pw2\n");
    assert_eq!(
        store.records().unwrap(),
        vec![ApRecord::new("Home", "pw2").unwrap()]
    );
}

#[test]
fn test_password_may_contain_separator() {
    let (_dir, store) = store_with(None);
    store.upsert("Lab", "x//y").unwrap();
    assert_eq!(
        store.records().unwrap(),
        vec![ApRecord::new("Lab", "x//y").unwrap()]
    );
}

#[test]
fn test_latin1_file_is_readable() {
    let (_dir, store) = store_with(None);
    // "Caf\xe9" is not UTF-8; each byte maps to one char.
    std::fs::write(store.path(), b"Caf\xe9//pw\n").unwrap();
    assert_eq!(join_for_display(&store.records().unwrap()), "Caf\u{e9}");
}

fn ssid() -> impl Strategy<Value = String> {
    "[ \r\n]{0,2}[A-Za-z0-9_-][A-Za-z0-9 _-]{0,14}[A-Za-z0-9_-][ \r\n]{0,2}"
}

fn password() -> impl Strategy<Value = String> {
    // SSIDs never end in '/', so a password may start with or contain "//".
    "[ ]{0,2}[A-Za-z0-9!@#/ ]{1,16}[ ]{0,2}"
}

proptest! {
    #[test]
    fn prop_serialized_records_parse_back(
        pairs in prop::collection::vec((ssid(), password()), 0..8)
    ) {
        let entries: Vec<ApEntry> = pairs
            .iter()
            .map(|(s, p)| ApEntry::Record(ApRecord::new(s.as_str(), p.as_str()).unwrap()))
            .collect();
        prop_assert_eq!(parse_entries(&serialize_entries(&entries)), entries);
    }

    #[test]
    fn prop_stored_record_reads_back_equal(s in ssid(), p in password()) {
        let (_dir, store) = store_with(None);
        let record = ApRecord::new(s.as_str(), p.as_str()).unwrap();
        store.upsert(&s, &p).unwrap();
        prop_assert_eq!(store.records().unwrap(), vec![record]);
    }

    #[test]
    fn prop_upsert_is_idempotent(s in ssid(), p in password()) {
        let (_dir, store) = store_with(Some("Home//pw1\nWork//pw2\n"));
        store.upsert(&s, &p).unwrap();
        let once = std::fs::read_to_string(store.path()).unwrap();
        prop_assert_eq!(store.upsert(&s, &p).unwrap(), UpsertOutcome::Updated);
        prop_assert_eq!(std::fs::read_to_string(store.path()).unwrap(), once);
    }
}
