use std::{
    collections::HashSet,
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};

use chrono::NaiveDate;

use crate::{
    core::{Clock, SystemClock},
    domain::{ExpenseDraft, ExpenseId, ExpenseRecord},
    errors::{StorageError, ValidationError},
    storage::{write_export, ExpenseStore},
};

use super::{
    ids::IdGenerator,
    sort::{sort_records, SortKey},
    summary::{summarize, Aggregates},
    validation::{validate, ValidationRules},
};

/// Result of a mutation: the value plus a warning when the change could not be saved.
///
/// The in-memory change stands either way.
#[derive(Debug)]
pub struct Persisted<T> {
    pub value: T,
    pub warning: Option<StorageError>,
}

impl<T> Persisted<T> {
    pub fn is_saved(&self) -> bool {
        self.warning.is_none()
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

/// Outcome of reading the durable slot at startup.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub loaded: usize,
    /// Set when the slot could not be read or parsed; the ledger starts empty instead.
    pub recovered: Option<StorageError>,
    pub warnings: Vec<String>,
}

/// Owns the expense collection and keeps the durable slot in sync with it.
pub struct Ledger {
    records: Vec<ExpenseRecord>,
    store: Box<dyn ExpenseStore>,
    clock: Arc<dyn Clock>,
    ids: IdGenerator,
    rules: ValidationRules,
}

impl fmt::Debug for Ledger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ledger")
            .field("records", &self.records.len())
            .field("store", &self.store.describe())
            .field("rules", &self.rules)
            .finish()
    }
}

impl Ledger {
    /// Empty ledger over `store`. Call [`Ledger::load`] to pick up saved data.
    pub fn new(store: Box<dyn ExpenseStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            records: Vec::new(),
            store,
            clock,
            ids: IdGenerator::default(),
            rules: ValidationRules::default(),
        }
    }

    /// Ledger over `store` using the system clock, with saved data already loaded.
    pub fn open(store: Box<dyn ExpenseStore>) -> (Self, LoadReport) {
        Self::open_with(store, Arc::new(SystemClock), ValidationRules::default())
    }

    pub fn open_with(
        store: Box<dyn ExpenseStore>,
        clock: Arc<dyn Clock>,
        rules: ValidationRules,
    ) -> (Self, LoadReport) {
        let mut ledger = Self::new(store, clock).with_rules(rules);
        let report = ledger.load();
        (ledger, report)
    }

    pub fn with_rules(mut self, rules: ValidationRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn set_rules(&mut self, rules: ValidationRules) {
        self.rules = rules;
    }

    pub fn rules(&self) -> &ValidationRules {
        &self.rules
    }

    /// Replaces the in-memory collection with the stored one.
    ///
    /// Never fails: unreadable or corrupt storage leaves the ledger empty and is noted in
    /// the report.
    pub fn load(&mut self) -> LoadReport {
        let mut report = LoadReport::default();
        let stored = match self.store.read() {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(slot = %self.store.describe(), error = %err, "starting with an empty ledger");
                report.recovered = Some(err);
                Vec::new()
            }
        };

        let mut seen = HashSet::new();
        let mut records = Vec::with_capacity(stored.len());
        for record in stored {
            if seen.insert(record.id) {
                records.push(record);
            } else {
                tracing::warn!(id = %record.id, "dropping duplicate expense id");
                report
                    .warnings
                    .push(format!("duplicate expense id {} ignored", record.id));
            }
        }

        self.ids = IdGenerator::seeded(&records);
        self.records = records;
        report.loaded = self.records.len();
        tracing::debug!(count = report.loaded, "expenses loaded");
        report
    }

    /// Writes the whole collection to the durable slot.
    pub fn persist(&self) -> Result<(), StorageError> {
        self.store.write(&self.records)
    }

    fn commit<T>(&self, value: T) -> Persisted<T> {
        let warning = match self.persist() {
            Ok(()) => None,
            Err(err) => {
                tracing::warn!(slot = %self.store.describe(), error = %err, "changes kept in memory only");
                Some(err)
            }
        };
        Persisted { value, warning }
    }

    /// Validates `draft`, appends it under a fresh id and saves the collection.
    pub fn add(&mut self, draft: ExpenseDraft) -> Result<Persisted<ExpenseRecord>, ValidationError> {
        let valid = validate(&draft, self.today(), &self.rules)?;
        let record = ExpenseRecord {
            id: self.ids.next(self.clock.now()),
            description: valid.description,
            amount: valid.amount,
            category: valid.category,
            date: valid.date,
        };
        self.records.push(record.clone());
        tracing::info!(id = %record.id, amount = record.amount, category = %record.category, "expense added");
        Ok(self.commit(record))
    }

    /// Removes the expense with `id`. Unknown ids are a no-op and nothing is written.
    pub fn remove(&mut self, id: ExpenseId) -> Persisted<bool> {
        let before = self.records.len();
        self.records.retain(|record| record.id != id);
        if self.records.len() == before {
            tracing::debug!(id = %id, "no expense to remove");
            return Persisted {
                value: false,
                warning: None,
            };
        }
        tracing::info!(id = %id, "expense removed");
        self.commit(true)
    }

    /// Drops every expense and saves the empty collection. Returns how many were dropped.
    pub fn clear(&mut self) -> Persisted<usize> {
        let dropped = self.records.len();
        self.records.clear();
        tracing::info!(count = dropped, "ledger cleared");
        self.commit(dropped)
    }

    /// Snapshot of every expense in `key` order.
    pub fn list(&self, key: SortKey) -> Vec<ExpenseRecord> {
        let mut records = self.records.clone();
        sort_records(&mut records, key);
        tracing::debug!(count = records.len(), order = %key, "expenses listed");
        records
    }

    pub fn aggregates(&self) -> Aggregates {
        summarize(&self.records)
    }

    /// Writes the full collection as indented JSON to `<dir>/<prefix>_<today>.json`.
    pub fn export(&self, dir: &Path, prefix: &str) -> Result<PathBuf, StorageError> {
        let path = write_export(&self.records, dir, prefix, self.today())?;
        tracing::info!(path = %path.display(), count = self.records.len(), "expenses exported");
        Ok(path)
    }

    /// Expenses in insertion order.
    pub fn records(&self) -> &[ExpenseRecord] {
        &self.records
    }

    pub fn get(&self, id: ExpenseId) -> Option<&ExpenseRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::FixedClock, domain::Category, storage::MemoryStore};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn ledger_with(store: Arc<MemoryStore>) -> Ledger {
        Ledger::new(Box::new(store), Arc::new(FixedClock::on(today())))
    }

    fn draft(description: &str, amount: f64, category: &str) -> ExpenseDraft {
        ExpenseDraft::new(description)
            .amount(amount)
            .category(category)
            .on(today())
    }

    #[test]
    fn add_persists_every_mutation() {
        let store = Arc::new(MemoryStore::new());
        let mut ledger = ledger_with(store.clone());

        let first = ledger.add(draft("Coffee", 25.5, "Gıda")).expect("valid");
        assert!(first.is_saved());
        let second = ledger.add(draft("Bus", 10.0, "Ulaşım")).expect("valid");
        assert!(second.value.id > first.value.id);
        assert_eq!(store.write_count(), 2);

        let stored: Vec<ExpenseRecord> = serde_json::from_str(&store.raw().unwrap()).unwrap();
        assert_eq!(stored, ledger.records());
    }

    #[test]
    fn rejected_add_writes_nothing() {
        let store = Arc::new(MemoryStore::new());
        let mut ledger = ledger_with(store.clone());
        let err = ledger
            .add(draft("Coffee", 0.0, "Gıda"))
            .expect_err("zero amount");
        assert_eq!(err, ValidationError::NonPositiveAmount(0.0));
        assert!(ledger.is_empty());
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn remove_unknown_id_is_a_silent_no_op() {
        let store = Arc::new(MemoryStore::new());
        let mut ledger = ledger_with(store.clone());
        let outcome = ledger.remove(ExpenseId::new(99));
        assert!(!outcome.value);
        assert!(outcome.warning.is_none());
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn write_failure_is_a_warning_not_a_rollback() {
        let store = Arc::new(MemoryStore::new());
        let mut ledger = ledger_with(store.clone());
        store.fail_writes(Some("quota exceeded"));

        let outcome = ledger.add(draft("Fatura", 120.0, "Fatura")).expect("valid");
        assert!(matches!(outcome.warning, Some(StorageError::Write { .. })));
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.aggregates().category(Category::Bills).count, 1);
    }

    #[test]
    fn load_drops_duplicate_ids() {
        let raw = r#"[
            {"id": 5, "description": "a", "amount": 1.0, "category": "Diğer", "date": "2024-01-01"},
            {"id": 5, "description": "b", "amount": 2.0, "category": "Diğer", "date": "2024-01-02"}
        ]"#;
        let store = Arc::new(MemoryStore::with_raw(raw));
        let mut ledger = ledger_with(store);
        let report = ledger.load();
        assert_eq!(report.loaded, 1);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(ledger.records()[0].description, "a");
    }

    #[test]
    fn ids_continue_after_loaded_records() {
        let far_future_id = 9_000_000_000_000u64;
        let raw = format!(
            r#"[{{"id": {far_future_id}, "description": "a", "amount": 1.0, "category": "Gıda", "date": "2024-01-01"}}]"#
        );
        let store = Arc::new(MemoryStore::with_raw(raw));
        let mut ledger = ledger_with(store);
        ledger.load();
        let added = ledger.add(draft("b", 2.0, "Gıda")).expect("valid");
        assert_eq!(added.value.id.get(), far_future_id + 1);
    }

    #[test]
    fn remove_and_clear_keep_memory_changes_when_saving_fails() {
        let store = Arc::new(MemoryStore::new());
        let mut ledger = ledger_with(store.clone());
        let kept = ledger.add(draft("Coffee", 25.5, "Gıda")).expect("valid").value;
        ledger.add(draft("Bus", 10.0, "Ulaşım")).expect("valid");
        store.fail_writes(Some("disk full"));

        let removed = ledger.remove(kept.id);
        assert!(removed.value);
        assert!(matches!(removed.warning, Some(StorageError::Write { .. })));
        assert_eq!(ledger.len(), 1);

        let cleared = ledger.clear();
        assert_eq!(cleared.value, 1);
        assert!(!cleared.is_saved());
        assert!(ledger.is_empty());
        assert_eq!(store.write_count(), 2);
    }

    #[test]
    fn oversized_amounts_are_rejected_before_totals_overflow() {
        let store = Arc::new(MemoryStore::new());
        let mut ledger = ledger_with(store);
        ledger.add(draft("Ev", 900_000_000_000.0, "Gıda")).expect("valid");
        let err = ledger.add(draft("Ev", 1e308, "Gıda")).expect_err("too large");
        assert_eq!(err.field(), "amount");

        let aggregates = ledger.aggregates();
        assert!(aggregates.total.is_finite());
        assert_eq!(aggregates.category(Category::Food).percentage, 100.0);
    }
}
