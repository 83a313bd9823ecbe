use chrono::NaiveDate;

use super::{Category, ExpenseId};

/// Identifies entities that expose a stable unique identifier.
pub trait Identifiable {
    fn id(&self) -> ExpenseId;
}

/// Supplies a common contract for retrieving numeric amounts.
pub trait Amounted {
    fn amount(&self) -> f64;
}

/// Associates entities with one of the fixed categories.
pub trait Categorized {
    fn category(&self) -> Category;
}

/// Exposes the calendar date an entity is booked on.
pub trait Dated {
    fn date(&self) -> NaiveDate;
}

/// Supplies a presentation-ready label for UI or logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}
