pub mod export;
pub mod json_backend;
pub mod memory;

use std::sync::Arc;

use crate::{domain::ExpenseRecord, errors::StorageError};

pub type Result<T> = std::result::Result<T, StorageError>;

/// Name of the durable slot when none is configured.
pub const DEFAULT_SLOT: &str = "expenseTrackerData";

/// A single named slot holding the whole expense collection.
///
/// Reads and writes are whole-value: there is no indexing and no partial update.
pub trait ExpenseStore: Send + Sync {
    /// Returns the stored collection. A slot that was never written reads as empty.
    fn read(&self) -> Result<Vec<ExpenseRecord>>;

    /// Overwrites the slot with `records`.
    fn write(&self, records: &[ExpenseRecord]) -> Result<()>;

    /// Human readable location used in log and error messages.
    fn describe(&self) -> String;
}

impl<S: ExpenseStore + ?Sized> ExpenseStore for Arc<S> {
    fn read(&self) -> Result<Vec<ExpenseRecord>> {
        (**self).read()
    }

    fn write(&self, records: &[ExpenseRecord]) -> Result<()> {
        (**self).write(records)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

pub use export::{export_file_name, write_export, DEFAULT_EXPORT_PREFIX};
pub use json_backend::{load_records_from_path, save_records_to_path, JsonStorage};
pub use memory::MemoryStore;
