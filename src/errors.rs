use chrono::NaiveDate;
use thiserror::Error;

/// Rejection reasons for a new expense. Nothing is committed when one is raised.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Please enter a description for the expense.")]
    EmptyDescription,
    #[error("Description is {actual} characters long; the limit is {max}.")]
    DescriptionTooLong { max: usize, actual: usize },
    #[error("Please enter a valid amount.")]
    InvalidAmount,
    #[error("Amount must be greater than zero (got {0}).")]
    NonPositiveAmount(f64),
    #[error("Amount {actual} is above the limit of {max}.")]
    AmountTooLarge { max: f64, actual: f64 },
    #[error("Please choose a category.")]
    MissingCategory,
    #[error("Unknown category `{0}`. Expected one of: Gıda, Ulaşım, Eğlence, Fatura, Diğer.")]
    UnknownCategory(String),
    #[error("Please choose a date.")]
    MissingDate,
    #[error("Date `{0}` is not a valid YYYY-MM-DD calendar date.")]
    MalformedDate(String),
    #[error("Date {date} is in the future (today is {today}).")]
    FutureDate { date: NaiveDate, today: NaiveDate },
}

impl ValidationError {
    /// Name of the input field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::EmptyDescription | ValidationError::DescriptionTooLong { .. } => {
                "description"
            }
            ValidationError::InvalidAmount
            | ValidationError::NonPositiveAmount(_)
            | ValidationError::AmountTooLarge { .. } => "amount",
            ValidationError::MissingCategory | ValidationError::UnknownCategory(_) => "category",
            ValidationError::MissingDate
            | ValidationError::MalformedDate(_)
            | ValidationError::FutureDate { .. } => "date",
        }
    }
}

/// Failures raised by durable storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Could not read expense data from {slot}: {reason}")]
    Read { slot: String, reason: String },
    #[error("Could not save expense data to {slot}: {reason}")]
    Write { slot: String, reason: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Umbrella error for callers that handle every ledger failure in one place.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_name_their_field() {
        assert_eq!(ValidationError::EmptyDescription.field(), "description");
        assert_eq!(ValidationError::NonPositiveAmount(-1.0).field(), "amount");
        assert_eq!(
            ValidationError::UnknownCategory("x".into()).field(),
            "category"
        );
        assert_eq!(ValidationError::MissingDate.field(), "date");
    }

    #[test]
    fn ledger_error_wraps_validation_transparently() {
        let err = LedgerError::from(ValidationError::MissingCategory);
        assert_eq!(err.to_string(), "Please choose a category.");
    }
}
