use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandRegistry};
use crate::utils::build_info::BUILD;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandEntry::new("version", "Show build metadata", "version", cmd_version),
        CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit),
    ]
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::section(format!("Expense Ledger {}", BUILD.version));
    for (label, value) in BUILD.fields() {
        output::info(format!("  {label:<10} : {value}"));
    }
    Ok(())
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first() {
        Some(name) => match context.registry.get(name) {
            Some(entry) => print_command(entry),
            None => context.suggest_command(name),
        },
        None => print_overview(&context.registry),
    }
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}

fn print_overview(registry: &CommandRegistry) {
    output::section("Available commands");
    let width = registry.names().map(str::len).max().unwrap_or(0);
    for entry in registry.list() {
        output::info(format!("  {:<width$}  {}", entry.name, entry.description));
    }
    output::info("Use `help <command>` for details.");
}

fn print_command(entry: &CommandEntry) {
    output::section(format!("Help: {}", entry.name));
    output::info(format!("  {}", entry.description));
    output::info(format!("  Usage: {}", entry.usage));
}
