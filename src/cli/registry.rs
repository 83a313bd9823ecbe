use strsim::levenshtein;

use crate::cli::core::CommandResult;
use crate::cli::shell_context::ShellContext;

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

/// Largest edit distance still offered as a "did you mean" suggestion.
const SUGGESTION_DISTANCE: usize = 3;

pub struct CommandEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandEntry {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            handler,
        }
    }
}

/// Commands in registration order. Lookups ignore case.
#[derive(Default)]
pub struct CommandRegistry {
    entries: Vec<CommandEntry>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `entry`, replacing an earlier command of the same name.
    pub fn register(&mut self, entry: CommandEntry) {
        match self.entries.iter_mut().find(|e| e.name == entry.name) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.entries
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(name.trim()))
    }

    pub fn list(&self) -> &[CommandEntry] {
        &self.entries
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.name)
    }

    pub fn handler(&self, name: &str) -> Option<CommandHandler> {
        self.get(name).map(|entry| entry.handler)
    }

    /// Closest command name to a mistyped `input`, if any is close enough.
    pub fn suggest(&self, input: &str) -> Option<&'static str> {
        let needle = input.to_lowercase();
        self.names()
            .map(|name| (levenshtein(name, &needle), name))
            .min_by_key(|(distance, _)| *distance)
            .filter(|(distance, _)| *distance <= SUGGESTION_DISTANCE)
            .map(|(_, name)| name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_: &mut ShellContext, _: &[&str]) -> CommandResult {
        Ok(())
    }

    fn registry() -> CommandRegistry {
        let mut registry = CommandRegistry::new();
        for name in ["add", "list", "stats", "exit"] {
            registry.register(CommandEntry::new(name, "", name, noop));
        }
        registry
    }

    #[test]
    fn lookups_ignore_case_and_keep_order() {
        let registry = registry();
        assert!(registry.get("LIST").is_some());
        assert!(registry.handler("delete").is_none());
        assert_eq!(
            registry.names().collect::<Vec<_>>(),
            vec!["add", "list", "stats", "exit"]
        );
    }

    #[test]
    fn re_registering_replaces_in_place() {
        let mut registry = registry();
        registry.register(CommandEntry::new("list", "again", "list", noop));
        assert_eq!(registry.list().len(), 4);
        assert_eq!(registry.get("list").unwrap().description, "again");
    }

    #[test]
    fn suggestions_prefer_the_earliest_close_match() {
        let registry = registry();
        assert_eq!(registry.suggest("lsit"), Some("list"));
        assert_eq!(registry.suggest("stast"), Some("stats"));
        assert_eq!(registry.suggest("completely-different"), None);
    }
}
