//! File-backed best-score persistence tests.

use pairs_engine::score::{BestScoreLedger, BestScoreStore, JsonFileStore, LedgerError};

#[test]
fn test_missing_file_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::open(dir.path().join("scores.json")).unwrap();

    assert_eq!(store.load("BestScore0").unwrap(), None);
    assert_eq!(BestScoreLedger::new(store).best_score(0), 0);
}

#[test]
fn test_scores_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("scores.json");

    let mut ledger = BestScoreLedger::new(JsonFileStore::open(&path).unwrap());
    assert!(ledger.record(0, 1500));
    assert!(ledger.record(2, 900));
    drop(ledger);

    let reopened = BestScoreLedger::new(JsonFileStore::open(&path).unwrap());
    assert_eq!(reopened.best_score(0), 1500);
    assert_eq!(reopened.best_score(1), 0);
    assert_eq!(reopened.best_score(2), 900);
}

#[test]
fn test_file_format_is_key_value_object() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scores.json");

    let mut store = JsonFileStore::open(&path).unwrap();
    store.store("BestScore3", 42).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed["BestScore3"], 42);
}

#[test]
fn test_improvement_rules_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scores.json");
    std::fs::write(&path, r#"{"BestScore0": 500}"#).unwrap();

    let mut ledger = BestScoreLedger::new(JsonFileStore::open(&path).unwrap());
    assert!(!ledger.record(0, 450));
    assert_eq!(ledger.best_score(0), 500);

    assert!(ledger.record(0, 600));
    assert_eq!(ledger.best_score(0), 600);

    let reopened = JsonFileStore::open(&path).unwrap();
    assert_eq!(reopened.load("BestScore0").unwrap(), Some(600));
}

#[test]
fn test_corrupt_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scores.json");
    std::fs::write(&path, "not json").unwrap();

    assert!(matches!(JsonFileStore::open(&path), Err(LedgerError::Serialize(_))));
}
