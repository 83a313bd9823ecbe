//! Two-step confirmation for destructive actions.
//!
//! A destructive command only records what it wants to do. Nothing changes until the
//! pending action is confirmed; cancelling discards it.

use std::fmt;

use dialoguer::{theme::ColorfulTheme, Confirm};

use crate::cli::core::CommandError;
use crate::domain::ExpenseId;

/// A destructive action waiting for the user's answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    DeleteOne(ExpenseId),
    ClearAll,
}

impl PendingAction {
    pub fn prompt(&self) -> String {
        match self {
            PendingAction::DeleteOne(id) => {
                format!("Delete expense #{id}? This cannot be undone.")
            }
            PendingAction::ClearAll => {
                "Delete ALL expenses? This cannot be undone.".to_string()
            }
        }
    }
}

impl fmt::Display for PendingAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PendingAction::DeleteOne(id) => write!(f, "delete expense #{id}"),
            PendingAction::ClearAll => f.write_str("clear all expenses"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfirmationState {
    #[default]
    Idle,
    PendingConfirmation(PendingAction),
}

/// How an answer resolved the flow. The flow is back to idle afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Confirmed(PendingAction),
    Cancelled(PendingAction),
    NothingPending,
}

#[derive(Debug, Default)]
pub struct ConfirmationFlow {
    state: ConfirmationState,
}

impl ConfirmationFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ConfirmationState {
        self.state
    }

    pub fn pending(&self) -> Option<PendingAction> {
        match self.state {
            ConfirmationState::Idle => None,
            ConfirmationState::PendingConfirmation(action) => Some(action),
        }
    }

    /// Starts waiting on `action`. Returns the action it displaced, if any.
    pub fn request(&mut self, action: PendingAction) -> Option<PendingAction> {
        let previous = self.pending();
        self.state = ConfirmationState::PendingConfirmation(action);
        previous
    }

    pub fn confirm(&mut self) -> Resolution {
        self.resolve(true)
    }

    pub fn cancel(&mut self) -> Resolution {
        self.resolve(false)
    }

    pub fn resolve(&mut self, accepted: bool) -> Resolution {
        let state = std::mem::take(&mut self.state);
        match state {
            ConfirmationState::Idle => Resolution::NothingPending,
            ConfirmationState::PendingConfirmation(action) if accepted => {
                Resolution::Confirmed(action)
            }
            ConfirmationState::PendingConfirmation(action) => Resolution::Cancelled(action),
        }
    }
}

/// Asks a yes/no question on the terminal.
pub fn ask(theme: &ColorfulTheme, prompt: &str, default: bool) -> Result<bool, CommandError> {
    Confirm::with_theme(theme)
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(CommandError::from)
}
