mod common;

use std::fs;

use common::{draft, json_ledger, ledger_over, reopen, scratch_dir};
use expense_ledger::{
    storage::{load_records_from_path, save_records_to_path, ExpenseStore, JsonStorage},
    Ledger, SortKey, StorageError,
};

fn tmp_path_for(path: &std::path::Path) -> std::path::PathBuf {
    let mut tmp = path.to_path_buf();
    tmp.set_extension("json.tmp");
    tmp
}

#[test]
fn restart_sees_the_same_collection() {
    let (mut ledger, path) = json_ledger();
    ledger.add(draft("Coffee", 25.5, "Gıda", "2024-06-15")).unwrap();
    ledger.add(draft("Bus", 10.0, "Ulaşım", "2024-06-14")).unwrap();
    ledger.add(draft("Water bill", 310.75, "Fatura", "2024-06-01")).unwrap();
    let removed = ledger.records()[1].id;
    ledger.remove(removed);

    let restarted = reopen(&path);
    assert_eq!(restarted.records(), ledger.records());
    assert_eq!(restarted.list(SortKey::Highest), ledger.list(SortKey::Highest));
}

#[test]
fn slot_uses_the_flat_record_shape() {
    let (mut ledger, path) = json_ledger();
    let added = ledger
        .add(draft("Coffee", 25.5, "Gıda", "2024-06-15"))
        .unwrap()
        .into_value();

    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let entry = &raw[0];
    assert_eq!(entry["id"].as_u64(), Some(added.id.get()));
    assert_eq!(entry["description"], "Coffee");
    assert_eq!(entry["amount"].as_f64(), Some(25.5));
    assert_eq!(entry["category"], "Gıda");
    assert_eq!(entry["date"], "2024-06-15");
}

#[test]
fn missing_slot_loads_empty() {
    let storage = JsonStorage::with_default_slot(scratch_dir());
    assert!(storage.read().unwrap().is_empty());

    let mut ledger = ledger_over(Box::new(storage));
    let report = ledger.load();
    assert_eq!(report.loaded, 0);
    assert!(report.recovered.is_none());
}

#[test]
fn corrupt_slot_starts_empty_and_stays_usable() {
    let storage = JsonStorage::with_default_slot(scratch_dir());
    fs::create_dir_all(storage.path().parent().unwrap()).unwrap();
    fs::write(storage.path(), "{ not json").unwrap();
    let path = storage.path().to_path_buf();

    let mut ledger = ledger_over(Box::new(storage));
    let report = ledger.load();
    assert!(matches!(report.recovered, Some(StorageError::Read { .. })));
    assert!(ledger.is_empty());

    ledger.add(draft("Coffee", 25.5, "Gıda", "2024-06-15")).unwrap();
    assert_eq!(load_records_from_path(&path).unwrap().len(), 1);
}

#[test]
fn unreadable_records_are_treated_as_corrupt() {
    let storage = JsonStorage::with_default_slot(scratch_dir());
    fs::create_dir_all(storage.path().parent().unwrap()).unwrap();
    fs::write(
        storage.path(),
        r#"[{"id": 1, "description": "x", "amount": 1.0, "category": "Kira", "date": "2024-01-01"}]"#,
    )
    .unwrap();
    assert!(matches!(storage.read(), Err(StorageError::Read { .. })));
}

#[test]
fn failed_write_keeps_the_change_in_memory() {
    let dir = scratch_dir();
    let slot = dir.join("slot.json");
    // A directory in place of the staging file makes every write fail.
    fs::create_dir_all(tmp_path_for(&slot)).unwrap();

    let mut ledger = ledger_over(Box::new(JsonStorage::at_path(&slot)));
    let outcome = ledger
        .add(draft("Coffee", 25.5, "Gıda", "2024-06-15"))
        .expect("validation passes");
    assert!(matches!(outcome.warning, Some(StorageError::Write { .. })));
    assert_eq!(ledger.len(), 1);
    assert!(!slot.exists());
}

#[test]
fn atomic_save_failure_preserves_original_file() {
    let (mut ledger, path) = json_ledger();
    ledger.add(draft("Coffee", 25.5, "Gıda", "2024-06-15")).unwrap();
    let original = fs::read_to_string(&path).unwrap();

    fs::create_dir_all(tmp_path_for(&path)).unwrap();
    let outcome = ledger.add(draft("Bus", 10.0, "Ulaşım", "2024-06-15")).unwrap();
    assert!(!outcome.is_saved());
    assert_eq!(fs::read_to_string(&path).unwrap(), original);
}

#[test]
fn path_helpers_round_trip() {
    let (mut ledger, _path) = json_ledger();
    ledger.add(draft("Cinema", 80.0, "Eğlence", "2024-05-20")).unwrap();
    let target = scratch_dir().join("copy.json");
    save_records_to_path(ledger.records(), &target).unwrap();
    assert_eq!(load_records_from_path(&target).unwrap(), ledger.records());
}

#[test]
fn open_reads_the_slot_with_the_system_clock() {
    let (mut ledger, path) = json_ledger();
    ledger.add(draft("Bread", 5.5, "Gıda", "2024-01-01")).unwrap();
    ledger.add(draft("Bus", 10.0, "Ulaşım", "2024-01-02")).unwrap();

    let (opened, report) = Ledger::open(Box::new(JsonStorage::at_path(&path)));
    assert_eq!(report.loaded, 2);
    assert!(report.warnings.is_empty());
    assert_eq!(opened.aggregates().total, 15.5);
}
