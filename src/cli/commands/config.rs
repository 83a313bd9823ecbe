use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::config::model::CONFIG_KEYS;

const USAGE: &str = "config [show|get <key>|set <key> <value>]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View and change saved preferences",
        USAGE,
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => show(context),
        [action] if action.eq_ignore_ascii_case("show") => show(context),
        [action, key] if action.eq_ignore_ascii_case("get") => {
            output::info(format!("{key} = {}", context.config.get(key)?));
            Ok(())
        }
        [action, key, value @ ..] if action.eq_ignore_ascii_case("set") && !value.is_empty() => {
            set(context, key, &value.join(" "))
        }
        _ => Err(CommandError::InvalidArguments(format!("usage: {USAGE}"))),
    }
}

fn show(context: &ShellContext) -> CommandResult {
    output::section("Configuration");
    let width = CONFIG_KEYS.iter().map(|key| key.len()).max().unwrap_or(0);
    for key in CONFIG_KEYS {
        output::info(format!(
            "  {key:<width$}  {}",
            context.config.get(key)?
        ));
    }
    output::info(format!(
        "  Saved in {}",
        context.config_manager.config_path().display()
    ));
    Ok(())
}

fn set(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    let mut updated = context.config.clone();
    updated.set(key, value)?;
    context.config_manager.save(&updated)?;
    context.config = updated;
    context.apply_config();

    match key {
        "default_sort" => context.sort = context.config.default_sort,
        "storage_slot" => {
            output::info("The new storage slot is used from the next start.");
        }
        _ => {}
    }
    output::success(format!("{key} = {}", context.config.get(key)?));
    Ok(())
}
