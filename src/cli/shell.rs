use std::{
    borrow::Cow,
    collections::HashMap,
    fmt,
    io::{self, BufRead},
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

use crate::cli::core::{CliError, CliMode, CommandError, LoopControl, ShellContext};
use crate::cli::output::{self, info as output_info, OutputPreferences};

const SCRIPT_ENV: &str = "DREAMFUND_CLI_SCRIPT";

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };
    output::set_preferences(OutputPreferences {
        plain_mode: mode == CliMode::Script,
        quiet_mode: false,
    });

    let mut context = ShellContext::new(mode)?;
    if mode == CliMode::Interactive {
        output_info("Welcome to DreamFund. Type `help` to see available commands.");
    }

    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context),
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = Editor::<CommandHelper, DefaultHistory>::new()?;
    let helper = CommandHelper::new(context.command_names());
    editor.set_helper(Some(helper));
    editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);

    loop {
        if !context.running {
            break;
        }
        let prompt = context.prompt();
        let line = editor.readline(&prompt);

        match line {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                editor.add_history_entry(trimmed).ok();

                match handle_line(context, trimmed) {
                    Ok(LoopControl::Continue) => {}
                    Ok(LoopControl::Exit) => break,
                    Err(err) => context.report_error(err)?,
                }
            }
            Err(ReadlineError::Interrupted) => {
                if context.confirm_exit()? {
                    break;
                }
            }
            Err(ReadlineError::Eof) => {
                output_info("Exiting shell.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

fn run_script(context: &mut ShellContext) -> Result<(), CliError> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        if !context.running {
            break;
        }
        let line = line?;
        match handle_line(context, &line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err)?,
        }
    }
    Ok(())
}

fn handle_line(context: &mut ShellContext, line: &str) -> Result<LoopControl, CommandError> {
    if line.trim_start().starts_with('#') {
        return Ok(LoopControl::Continue);
    }
    let tokens = match parse_command_line(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            context.print_warning(&err.message);
            return Ok(LoopControl::Continue);
        }
    };

    let Some((raw, rest)) = tokens.split_first() else {
        return Ok(LoopControl::Continue);
    };
    let command = raw.to_lowercase();
    let args: Vec<&str> = rest.iter().map(String::as_str).collect();

    match context.dispatch(&command, raw, &args) {
        Ok(LoopControl::Exit) => {
            context.running = false;
            Ok(LoopControl::Exit)
        }
        other => other,
    }
}

/// Completes command names, then the subcommand of commands that have one.
struct CommandHelper {
    commands: Vec<&'static str>,
    subcommands: HashMap<&'static str, &'static [&'static str]>,
}

impl CommandHelper {
    fn new(mut commands: Vec<&'static str>) -> Self {
        commands.sort_unstable();
        commands.dedup();
        Self {
            commands,
            subcommands: crate::cli::commands::subcommands().into_iter().collect(),
        }
    }

    fn candidates(&self, words: &[&str], needle: &str) -> Vec<Pair> {
        let pool: &[&str] = match words {
            [] => self.commands.as_slice(),
            [command] => self
                .subcommands
                .get(command.to_ascii_lowercase().as_str())
                .copied()
                .unwrap_or(&[]),
            _ => &[],
        };
        pool.iter()
            .filter(|name| name.starts_with(needle))
            .map(|name| Pair {
                display: name.to_string(),
                replacement: name.to_string(),
            })
            .collect()
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
        let needle = prefix[start..].to_ascii_lowercase();
        Ok((start, self.candidates(&words, &needle)))
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
    fn validate(&self, ctx: &mut ValidationContext) -> rustyline::Result<ValidationResult> {
        let _ = ctx;
        Ok(ValidationResult::Valid(None))
    }
}

pub(crate) fn parse_command_line(input: &str) -> Result<Vec<String>, ParseError> {
    split(input).map_err(|err| ParseError {
        message: err.to_string(),
    })
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

#[cfg(test)]
mod tests {
    use super::*;

    fn helper() -> CommandHelper {
        CommandHelper::new(vec!["goal", "wallet", "help", "goal"])
    }

    fn names(pairs: Vec<Pair>) -> Vec<String> {
        pairs.into_iter().map(|pair| pair.replacement).collect()
    }

    #[test]
    fn completes_command_names() {
        assert_eq!(names(helper().candidates(&[], "go")), vec!["goal"]);
        assert_eq!(helper().commands, vec!["goal", "help", "wallet"]);
    }

    #[test]
    fn completes_subcommands_after_the_command() {
        assert_eq!(names(helper().candidates(&["goal"], "pu")), vec!["pull"]);
        assert!(helper().candidates(&["goal", "pull"], "").is_empty());
        assert!(helper().candidates(&["help"], "").is_empty());
    }

    #[test]
    fn parses_quoted_arguments() {
        let tokens = parse_command_line("link add Shop \"https://shop.test\"").unwrap();
        assert_eq!(tokens, vec!["link", "add", "Shop", "https://shop.test"]);
        assert!(parse_command_line("goal add \"unterminated").is_err());
    }
}
