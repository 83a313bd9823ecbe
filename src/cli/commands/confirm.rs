use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("yes", "Confirm the pending delete or clear", "yes", cmd_yes),
        CommandEntry::new("no", "Cancel the pending delete or clear", "no", cmd_no),
    ]
}

fn cmd_yes(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let resolution = context.confirmation.confirm();
    context.apply_resolution(resolution)
}

fn cmd_no(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let resolution = context.confirmation.cancel();
    context.apply_resolution(resolution)
}
