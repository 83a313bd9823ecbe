//! Expense records and the raw draft shape a UI hands to the ledger.

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Amounted, Categorized, Category, Dated, Displayable, Identifiable};

/// Date format used for storage, exports and user input.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Opaque identifier of an expense. Serialized as a plain JSON number.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
#[serde(transparent)]
pub struct ExpenseId(u64);

impl ExpenseId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ExpenseId {
    type Err = std::num::ParseIntError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        value.trim().trim_start_matches('#').parse().map(ExpenseId)
    }
}

/// A committed expense. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseRecord {
    pub id: ExpenseId,
    pub description: String,
    pub amount: f64,
    pub category: Category,
    pub date: NaiveDate,
}

impl Identifiable for ExpenseRecord {
    fn id(&self) -> ExpenseId {
        self.id
    }
}

impl Amounted for ExpenseRecord {
    fn amount(&self) -> f64 {
        self.amount
    }
}

impl Categorized for ExpenseRecord {
    fn category(&self) -> Category {
        self.category
    }
}

impl Dated for ExpenseRecord {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Displayable for ExpenseRecord {
    fn display_label(&self) -> String {
        format!(
            "#{} {} [{}] {:.2} on {}",
            self.id,
            self.description,
            self.category,
            self.amount,
            self.date.format(DATE_FORMAT)
        )
    }
}

/// Unvalidated input for a new expense, as captured by a form or command line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseDraft {
    pub description: String,
    pub amount: Option<f64>,
    pub category: Option<String>,
    pub date: Option<String>,
}

impl ExpenseDraft {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Sets the date from an already parsed calendar value.
    pub fn on(self, date: NaiveDate) -> Self {
        self.date(date.format(DATE_FORMAT).to_string())
    }
}
