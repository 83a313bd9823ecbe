use std::{
    borrow::Cow,
    fmt,
    io::{self, BufRead, Lines, StdinLock},
};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::{ValidationContext, ValidationResult, Validator},
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};
use shell_words::split;

use crate::{
    cli::{
        core::{CliError, CliMode, CommandError, LoopControl, ShellContext},
        output,
    },
    config::model::CONFIG_KEYS,
    ledger::SortKey,
};

/// Entry point of the `expense_ledger_cli` binary.
pub fn run_cli() -> Result<(), CliError> {
    let mode = CliMode::from_env();
    let mut context = ShellContext::new(mode)?;
    let mut source = match mode {
        CliMode::Interactive => {
            output::info("Type `help` to list commands.");
            LineSource::prompt(context.command_names())?
        }
        CliMode::Script => LineSource::Piped(io::stdin().lock().lines()),
    };
    drive(&mut context, &mut source)
}

enum Next {
    Line(String),
    Interrupted,
    Finished,
}

/// Where command lines come from: a rustyline editor or piped stdin.
enum LineSource {
    Prompt(Box<Editor<CommandHelper, DefaultHistory>>),
    Piped(Lines<StdinLock<'static>>),
}

impl LineSource {
    fn prompt(commands: Vec<&'static str>) -> Result<Self, CliError> {
        let mut editor = Editor::<CommandHelper, DefaultHistory>::new()?;
        editor.set_helper(Some(CommandHelper::new(commands)));
        editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);
        Ok(Self::Prompt(Box::new(editor)))
    }

    fn next(&mut self, prompt: &str) -> Result<Next, CliError> {
        match self {
            Self::Prompt(editor) => match editor.readline(prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        editor.add_history_entry(line.trim()).ok();
                    }
                    Ok(Next::Line(line))
                }
                Err(ReadlineError::Interrupted) => Ok(Next::Interrupted),
                Err(ReadlineError::Eof) => Ok(Next::Finished),
                Err(err) => Err(err.into()),
            },
            Self::Piped(lines) => match lines.next() {
                Some(line) => Ok(Next::Line(line?)),
                None => Ok(Next::Finished),
            },
        }
    }
}

fn drive(context: &mut ShellContext, source: &mut LineSource) -> Result<(), CliError> {
    while context.running {
        let line = match source.next(&context.prompt())? {
            Next::Line(line) => line,
            Next::Interrupted => {
                if context.confirm_exit()? {
                    break;
                }
                continue;
            }
            Next::Finished => {
                if context.mode == CliMode::Interactive {
                    output::info("Exiting shell.");
                }
                break;
            }
        };
        if let Err(err) = handle_line(context, &line) {
            context.report_error(err)?;
        }
    }
    if let Some(action) = context.confirmation.pending() {
        tracing::debug!(%action, "input ended with an unanswered confirmation");
    }
    Ok(())
}

/// Runs one input line. Blank lines and quoting mistakes never reach the registry.
fn handle_line(context: &mut ShellContext, line: &str) -> Result<(), CommandError> {
    let tokens = match parse_command_line(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            context.print_warning(&err.message);
            return Ok(());
        }
    };
    let Some((raw, rest)) = tokens.split_first() else {
        return Ok(());
    };
    let args: Vec<&str> = rest.iter().map(String::as_str).collect();
    context.last_command = Some(line.trim().to_string());
    tracing::debug!(command = %raw, args = args.len(), "dispatching");

    if let LoopControl::Exit = context.dispatch(&raw.to_lowercase(), raw, &args)? {
        context.running = false;
    }
    Ok(())
}

struct CommandHelper {
    commands: Vec<String>,
}

impl CommandHelper {
    fn new(names: Vec<&'static str>) -> Self {
        let mut commands: Vec<String> = names
            .into_iter()
            .map(|name| name.to_ascii_lowercase())
            .collect();
        commands.sort();
        commands.dedup();
        Self { commands }
    }

    /// Completions for the word after `words`, filtered by the partial `needle`.
    fn candidates(&self, words: &[&str], needle: &str) -> Vec<Pair> {
        let pool: Vec<&str> = match words {
            [] => self.commands.iter().map(String::as_str).collect(),
            [command] => self.first_argument(command),
            [command, action]
                if command.eq_ignore_ascii_case("config")
                    && (action.eq_ignore_ascii_case("get") || action.eq_ignore_ascii_case("set")) =>
            {
                CONFIG_KEYS.to_vec()
            }
            _ => Vec::new(),
        };

        let needle = needle.to_lowercase();
        pool.into_iter()
            .filter(|candidate| candidate.to_lowercase().starts_with(&needle))
            .map(|candidate| Pair {
                display: candidate.to_string(),
                replacement: candidate.to_string(),
            })
            .collect()
    }

    fn first_argument(&self, command: &str) -> Vec<&str> {
        match command.to_ascii_lowercase().as_str() {
            "list" | "sort" => SortKey::ALL.iter().map(|key| key.as_str()).collect(),
            "config" => vec!["show", "get", "set"],
            "help" => self.commands.iter().map(String::as_str).collect(),
            _ => Vec::new(),
        }
    }
}

impl Helper for CommandHelper {}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];
        let start = prefix
            .rfind(char::is_whitespace)
            .map(|idx| idx + 1)
            .unwrap_or(0);
        let words: Vec<&str> = prefix[..start].split_whitespace().collect();
        Ok((start, self.candidates(&words, &prefix[start..])))
    }
}

impl Hinter for CommandHelper {
    type Hint = String;
}

impl Highlighter for CommandHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Borrowed(line)
    }
}

impl Validator for CommandHelper {
    fn validate(&self, _ctx: &mut ValidationContext) -> rustyline::Result<ValidationResult> {
        Ok(ValidationResult::Valid(None))
    }
}

/// Splits a line into shell-style words. A `#` opening a word is kept literally,
/// so ids can be typed the way they are printed (`delete #42`).
pub(crate) fn parse_command_line(input: &str) -> Result<Vec<String>, ParseError> {
    split(&escape_word_hashes(input)).map_err(|err| ParseError {
        message: err.to_string(),
    })
}

fn escape_word_hashes(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    let mut quote: Option<char> = None;
    let mut word_start = true;
    let mut chars = input.chars();
    while let Some(c) = chars.next() {
        escaped.push(c);
        match quote {
            Some(open) => {
                if c == open {
                    quote = None;
                } else if open == '"' && c == '\\' {
                    escaped.extend(chars.next());
                }
            }
            None => match c {
                '#' if word_start => {
                    escaped.pop();
                    escaped.push_str("\\#");
                }
                '\\' => escaped.extend(chars.next()),
                '\'' | '"' => quote = Some(c),
                _ => {}
            },
        }
        word_start = quote.is_none() && c.is_whitespace();
    }
    escaped
}

#[derive(Debug)]
pub(crate) struct ParseError {
    message: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}
