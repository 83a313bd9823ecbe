use chrono::NaiveDate;

use crate::{
    domain::{Category, ExpenseDraft, DATE_FORMAT},
    errors::ValidationError,
};

/// Default maximum description length, in characters.
pub const DEFAULT_DESCRIPTION_LIMIT: usize = 100;

/// Largest single amount accepted. Keeps every running total finite.
pub const MAX_AMOUNT: f64 = 1_000_000_000_000.0;

/// Tunable limits applied to new expenses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidationRules {
    pub description_limit: usize,
    pub max_amount: f64,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            description_limit: DEFAULT_DESCRIPTION_LIMIT,
            max_amount: MAX_AMOUNT,
        }
    }
}

/// A draft that passed every check.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidExpense {
    pub description: String,
    pub amount: f64,
    pub category: Category,
    pub date: NaiveDate,
}

/// Checks a draft field by field and stops at the first failure.
pub fn validate(
    draft: &ExpenseDraft,
    today: NaiveDate,
    rules: &ValidationRules,
) -> Result<ValidExpense, ValidationError> {
    let description = draft.description.trim();
    if description.is_empty() {
        return Err(ValidationError::EmptyDescription);
    }
    let length = description.chars().count();
    if length > rules.description_limit {
        return Err(ValidationError::DescriptionTooLong {
            max: rules.description_limit,
            actual: length,
        });
    }

    let amount = match draft.amount {
        Some(value) if value.is_finite() => value,
        _ => return Err(ValidationError::InvalidAmount),
    };
    if amount <= 0.0 {
        return Err(ValidationError::NonPositiveAmount(amount));
    }
    if amount > rules.max_amount {
        return Err(ValidationError::AmountTooLarge {
            max: rules.max_amount,
            actual: amount,
        });
    }

    let category = match draft.category.as_deref() {
        Some(raw) => raw.parse::<Category>()?,
        None => return Err(ValidationError::MissingCategory),
    };

    let date = match draft.date.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => parse_date(raw)?,
        _ => return Err(ValidationError::MissingDate),
    };
    if date > today {
        return Err(ValidationError::FutureDate { date, today });
    }

    Ok(ValidExpense {
        description: description.to_string(),
        amount,
        category,
        date,
    })
}

/// Parses a `YYYY-MM-DD` calendar date.
pub fn parse_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| ValidationError::MalformedDate(trimmed.to_string()))
}

/// Parses user-typed amounts, accepting either `.` or `,` as decimal separator.
/// Returns `None` when the text is not a number.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let normalized = raw.trim().replace(',', ".");
    normalized.parse::<f64>().ok()
}
