use std::path::PathBuf;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::core::utils::ensure_dir;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "export",
        "Write every expense to <prefix>_<date>.json",
        "export [directory]",
        cmd_export,
    )]
}

fn cmd_export(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() > 1 {
        return Err(CommandError::InvalidArguments(
            "usage: export [directory]".into(),
        ));
    }
    if context.ledger.is_empty() {
        output::warning("Nothing to export.");
        return Ok(());
    }

    let dir = match args.first() {
        Some(dir) => PathBuf::from(dir),
        None => context.config.resolve_export_dir(),
    };
    ensure_dir(&dir)?;

    let path = context.ledger.export(&dir, &context.config.export_prefix)?;
    output::success(format!(
        "Exported {} expense(s) to {}",
        context.ledger.len(),
        path.display()
    ));
    Ok(())
}
