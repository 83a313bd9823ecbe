//! Plain expense data types. No I/O, no rendering.

pub mod category;
pub mod common;
pub mod expense;

pub use category::Category;
pub use common::{Amounted, Categorized, Dated, Displayable, Identifiable};
pub use expense::{ExpenseDraft, ExpenseId, ExpenseRecord, DATE_FORMAT};
