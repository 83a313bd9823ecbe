//! The expense ledger: authoritative collection, validation, ordering and statistics.

pub mod ids;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod sort;
pub mod summary;
pub mod validation;

pub use ids::IdGenerator;
pub use ledger::{Ledger, LoadReport, Persisted};
pub use sort::{sort_records, SortKey};
pub use summary::{summarize, Aggregates, CategoryTotals};
pub use validation::{
    parse_amount, parse_date, validate, ValidExpense, ValidationRules, DEFAULT_DESCRIPTION_LIMIT,
    MAX_AMOUNT,
};
