#![doc(test(attr(deny(warnings))))]

//! Expense Ledger records personal expenses, keeps them in a durable JSON slot and
//! derives totals, averages and per-category breakdowns from them.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

pub use domain::{Category, ExpenseDraft, ExpenseId, ExpenseRecord};
pub use errors::{LedgerError, StorageError, ValidationError};
pub use ledger::{Aggregates, CategoryTotals, Ledger, LoadReport, Persisted, SortKey};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Expense Ledger tracing initialized.");
    });
}
