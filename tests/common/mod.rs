#![allow(dead_code)]

use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
};

use chrono::NaiveDate;
use expense_ledger::{
    core::FixedClock,
    storage::{ExpenseStore, JsonStorage, MemoryStore},
    ExpenseDraft, Ledger,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

/// A unique directory that outlives the calling test.
pub fn scratch_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    path
}

/// Ledger over an in-memory slot, with the clock pinned to [`today`].
pub fn memory_ledger() -> (Ledger, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let ledger = ledger_over(Box::new(store.clone()));
    (ledger, store)
}

/// Ledger over a JSON slot in a fresh directory. Returns the slot file path too.
pub fn json_ledger() -> (Ledger, PathBuf) {
    let storage = JsonStorage::with_default_slot(scratch_dir());
    let path = storage.path().to_path_buf();
    (reopen(&path), path)
}

/// A second ledger reading the same JSON slot, as after an application restart.
pub fn reopen(path: &std::path::Path) -> Ledger {
    let mut ledger = ledger_over(Box::new(JsonStorage::at_path(path)));
    ledger.load();
    ledger
}

pub fn ledger_over(store: Box<dyn ExpenseStore>) -> Ledger {
    Ledger::new(store, Arc::new(FixedClock::on(today())))
}

pub fn draft(description: &str, amount: f64, category: &str, date: &str) -> ExpenseDraft {
    ExpenseDraft::new(description)
        .amount(amount)
        .category(category)
        .date(date)
}
