use std::{path::PathBuf, sync::Arc};

use dialoguer::theme::ColorfulTheme;

use crate::{
    config::{Config, ConfigManager},
    core::{
        utils::{app_data_dir, data_dir_in},
        Clock, SystemClock,
    },
    ledger::{Ledger, LoadReport, Persisted, SortKey},
    storage::{ExpenseStore, JsonStorage},
};

use super::{
    commands,
    confirmation::{self, ConfirmationFlow, PendingAction, Resolution},
    core::{CliError, CommandError, CommandResult, LoopControl},
    formatters::CliFormatters,
    output::{self, OutputPreferences},
    registry::CommandRegistry,
};

/// Environment variable switching the shell to line-by-line script input.
pub const SCRIPT_ENV: &str = "EXPENSE_LEDGER_CLI_SCRIPT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

impl CliMode {
    pub fn from_env() -> Self {
        if std::env::var_os(SCRIPT_ENV).is_some() {
            CliMode::Script
        } else {
            CliMode::Interactive
        }
    }
}

/// Commands that answer a pending confirmation.
const ANSWERS: [&str; 2] = ["yes", "no"];

/// Everything a command handler can touch. Owned by the shell loop; nothing is global.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub ledger: Ledger,
    pub config: Config,
    pub config_manager: ConfigManager,
    pub theme: ColorfulTheme,
    pub sort: SortKey,
    pub confirmation: ConfirmationFlow,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    /// Context rooted at `$EXPENSE_LEDGER_HOME` (or `~/.expense_ledger`).
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_base_dir(mode, app_data_dir())
    }

    pub fn with_base_dir(mode: CliMode, base: PathBuf) -> Result<Self, CliError> {
        let config_manager = ConfigManager::with_base_dir(base.clone());
        let config = config_manager.load()?;
        let store = JsonStorage::new(data_dir_in(&base), &config.storage_slot);
        tracing::debug!(base = %base.display(), slot = %store.describe(), "opening shell");
        Ok(Self::from_parts(
            mode,
            Box::new(store),
            Arc::new(SystemClock),
            config,
            config_manager,
        ))
    }

    pub fn from_parts(
        mode: CliMode,
        store: Box<dyn ExpenseStore>,
        clock: Arc<dyn Clock>,
        config: Config,
        config_manager: ConfigManager,
    ) -> Self {
        output::set_preferences(OutputPreferences::from(&config));
        let (ledger, report) = Ledger::open_with(store, clock, config.validation_rules());
        log_load(&report);

        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        Self {
            mode,
            registry,
            ledger,
            sort: config.default_sort,
            config,
            config_manager,
            theme: ColorfulTheme::default(),
            confirmation: ConfirmationFlow::new(),
            last_command: None,
            running: true,
        }
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn prompt(&self) -> String {
        match self.confirmation.pending() {
            Some(_) => "expenses (yes/no)> ".to_string(),
            None => "expenses> ".to_string(),
        }
    }

    pub fn formatters(&self) -> CliFormatters {
        CliFormatters::new(&self.config)
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if !ANSWERS.contains(&command) {
            self.drop_unanswered();
        }
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    #[cfg(test)]
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match crate::cli::shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                self.print_warning(&err.to_string());
                return Ok(LoopControl::Continue);
            }
        };
        let Some(first) = tokens.first() else {
            return Ok(LoopControl::Continue);
        };
        let command = first.to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
        self.dispatch(&command, first, &args)
    }

    /// A pending confirmation only survives until the next command that is not an answer.
    fn drop_unanswered(&mut self) {
        if let Resolution::Cancelled(action) = self.confirmation.cancel() {
            tracing::debug!(%action, "confirmation abandoned");
            output::info(format!("Cancelled: {action}."));
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));
        if let Some(name) = self.registry.suggest(input) {
            output::info(format!("Suggestion: `{}`?", name));
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        confirmation::ask(&self.theme, "Exit shell?", true).map_err(CliError::from)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                self.print_error(&message);
                self.print_hint("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::Validation(err) => {
                self.print_error(&err.to_string());
                self.print_hint(&format!("Check the {} and try again.", err.field()));
                Ok(())
            }
            CommandError::Io(err) if self.mode == CliMode::Interactive => Err(err.into()),
            other => {
                self.print_error(&other.to_string());
                Ok(())
            }
        }
    }

    pub(crate) fn print_error(&self, message: &str) {
        output::error(message);
    }

    pub(crate) fn print_warning(&self, message: &str) {
        output::warning(message);
    }

    pub(crate) fn print_hint(&self, message: &str) {
        output::hint(message);
    }

    /// Surfaces a failed save. The in-memory change already happened.
    pub(crate) fn report_persisted<T>(&self, outcome: &Persisted<T>) {
        if let Some(err) = &outcome.warning {
            self.print_warning(&format!(
                "{err}. The change is kept for this session only."
            ));
        }
    }

    /// Re-applies settings that live outside the config struct itself.
    pub(crate) fn apply_config(&mut self) {
        output::set_preferences(OutputPreferences::from(&self.config));
        self.ledger.set_rules(self.config.validation_rules());
    }

    /// Parks `action` until the user answers. Interactive sessions ask right away;
    /// scripts answer with `yes` or `no` on a later line.
    pub(crate) fn request_confirmation(&mut self, action: PendingAction) -> CommandResult {
        if let Some(previous) = self.confirmation.request(action) {
            tracing::debug!(%previous, "replaced an unanswered confirmation");
        }

        match self.mode {
            CliMode::Interactive => {
                let accepted = match confirmation::ask(&self.theme, &action.prompt(), false)
                {
                    Ok(accepted) => accepted,
                    Err(err) => {
                        self.confirmation.cancel();
                        return Err(err);
                    }
                };
                let resolution = self.confirmation.resolve(accepted);
                self.apply_resolution(resolution)
            }
            CliMode::Script => {
                self.print_warning(&action.prompt());
                self.print_hint("Type `yes` to confirm or `no` to cancel.");
                Ok(())
            }
        }
    }

    pub(crate) fn apply_resolution(&mut self, resolution: Resolution) -> CommandResult {
        match resolution {
            Resolution::Confirmed(PendingAction::DeleteOne(id)) => {
                let outcome = self.ledger.remove(id);
                if outcome.value {
                    output::success(format!("Deleted expense #{id}."));
                } else {
                    self.print_warning(&format!("Expense #{id} no longer exists."));
                }
                self.report_persisted(&outcome);
            }
            Resolution::Confirmed(PendingAction::ClearAll) => {
                let outcome = self.ledger.clear();
                output::success(format!("Cleared {} expense(s).", outcome.value));
                self.report_persisted(&outcome);
            }
            Resolution::Cancelled(action) => {
                output::info(format!("Cancelled: {action}."));
            }
            Resolution::NothingPending => {
                self.print_warning("Nothing is waiting for confirmation.");
            }
        }
        Ok(())
    }
}

fn log_load(report: &LoadReport) {
    if let Some(err) = &report.recovered {
        tracing::warn!(error = %err, "saved expenses could not be read");
    }
    for warning in &report.warnings {
        tracing::warn!("{warning}");
    }
    tracing::debug!(count = report.loaded, "ledger ready");
}
