use std::sync::{Mutex, MutexGuard};

use crate::{domain::ExpenseRecord, errors::StorageError};

use super::{ExpenseStore, Result};

#[derive(Debug, Default)]
struct Slot {
    contents: Option<String>,
    fail_writes: Option<String>,
    writes: usize,
}

/// In-process slot that keeps the serialized JSON text, like a browser key-value store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Mutex<Slot>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with raw text, valid or not.
    pub fn with_raw(contents: impl Into<String>) -> Self {
        let store = Self::new();
        store.lock().contents = Some(contents.into());
        store
    }

    /// Makes every following write fail with `reason`; `None` restores normal writes.
    pub fn fail_writes(&self, reason: Option<&str>) {
        self.lock().fail_writes = reason.map(str::to_string);
    }

    /// Raw slot contents, if anything was ever stored.
    pub fn raw(&self) -> Option<String> {
        self.lock().contents.clone()
    }

    /// Number of successful writes.
    pub fn write_count(&self) -> usize {
        self.lock().writes
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ExpenseStore for MemoryStore {
    fn read(&self) -> Result<Vec<ExpenseRecord>> {
        let slot = self.lock();
        match slot.contents.as_deref() {
            None => Ok(Vec::new()),
            Some(raw) => serde_json::from_str(raw).map_err(|err| StorageError::Read {
                slot: self.describe(),
                reason: err.to_string(),
            }),
        }
    }

    fn write(&self, records: &[ExpenseRecord]) -> Result<()> {
        let mut slot = self.lock();
        if let Some(reason) = slot.fail_writes.clone() {
            return Err(StorageError::Write {
                slot: self.describe(),
                reason,
            });
        }
        slot.contents = Some(serde_json::to_string(records)?);
        slot.writes += 1;
        Ok(())
    }

    fn describe(&self) -> String {
        "memory slot".into()
    }
}
