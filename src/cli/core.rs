//! Shell context, dispatch, and error reporting.

use std::{io, path::PathBuf};

use dialoguer::theme::ColorfulTheme;
use rustyline::error::ReadlineError;
use strsim::levenshtein;
use thiserror::Error;
use tracing::{error, info};

use crate::{
    config::{Config, ConfigManager},
    core::{
        services::{GoalService, ServiceError},
        utils::PathResolver,
    },
    currency::{parse_digits, AmountFormat},
    errors::WishlistError,
    storage::{JsonStore, StateStore},
    wishlist::{GoalId, Wishlist},
};

use super::commands::{self, CommandDefinition, CommandRegistry};
use super::io as cli_io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Core(#[from] WishlistError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<ServiceError> for CommandError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Wishlist(err) => CommandError::Core(err),
            ServiceError::GoalNotFound(id) => {
                CommandError::Message(format!("No goal matches `{}`.", id))
            }
            ServiceError::Invalid(message) => CommandError::InvalidArguments(message),
        }
    }
}

/// Errors that end the shell itself rather than a single command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] WishlistError),
    #[error("{0}")]
    Input(String),
    #[error("{0}")]
    Command(String),
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        CliError::Command(err.to_string())
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Input(err.to_string())
    }
}

impl From<ReadlineError> for CliError {
    fn from(err: ReadlineError) -> Self {
        CliError::Input(err.to_string())
    }
}

pub struct ShellContext {
    pub(crate) mode: CliMode,
    pub(crate) registry: CommandRegistry,
    pub(crate) theme: ColorfulTheme,
    pub(crate) store: JsonStore,
    pub(crate) config_manager: ConfigManager,
    pub(crate) config: Config,
    pub(crate) wishlist: Wishlist,
    pub(crate) running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_base_dir(mode, PathResolver::base_dir())
    }

    /// Opens the shell over the data and config directories below `base`.
    pub fn with_base_dir(mode: CliMode, base: PathBuf) -> Result<Self, CliError> {
        let registry = CommandRegistry::new(commands::all_definitions());
        let store = JsonStore::new(Some(base.clone()))?;
        let config_manager = ConfigManager::with_base_dir(base)?;
        let config = config_manager.load()?;
        let wishlist = store.load_wishlist();
        info!(
            goals = wishlist.goals.len(),
            wallet = wishlist.wallet_balance,
            "wishlist loaded"
        );

        Ok(Self {
            mode,
            registry,
            theme: ColorfulTheme::default(),
            store,
            config_manager,
            config,
            wishlist,
            running: true,
        })
    }

    pub(crate) fn can_prompt(&self) -> bool {
        self.mode == CliMode::Interactive
    }

    pub fn wishlist(&self) -> &Wishlist {
        &self.wishlist
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) fn amount_format(&self) -> AmountFormat {
        AmountFormat::from_config(&self.config)
    }

    pub(crate) fn format_amount(&self, amount: u64) -> String {
        self.amount_format().format(amount)
    }

    pub(crate) fn prompt(&self) -> String {
        format!(
            "dreamfund [{}]> ",
            self.format_amount(self.wishlist.wallet_balance)
        )
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandDefinition> {
        self.registry.get(name)
    }

    /// Writes all four records. Memory is kept as-is when the write fails.
    pub(crate) fn persist(&self) -> CommandResult {
        self.store.save_wishlist(&self.wishlist).map_err(|err| {
            error!("failed to persist wishlist: {err}");
            CommandError::from(err)
        })
    }

    pub(crate) fn persist_config(&self) -> CommandResult {
        self.config_manager
            .save(&self.config)
            .map_err(CommandError::from)
    }

    pub(crate) fn resolve_goal(&self, token: &str) -> Result<GoalId, CommandError> {
        GoalService::resolve(&self.wishlist, token).map_err(CommandError::from)
    }

    /// Parses a whole amount, warning and returning `None` on junk input.
    pub(crate) fn amount_arg(&self, raw: &str) -> Option<u64> {
        let parsed = parse_digits(raw);
        if parsed.is_none() {
            cli_io::print_warning(format!(
                "`{}` is not a valid amount; nothing changed.",
                raw
            ));
        }
        parsed
    }

    /// Asks in interactive mode; scripts always proceed.
    pub(crate) fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        if !self.can_prompt() {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, prompt, false)
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let Some(handler) = self.registry.get(command).map(|entry| entry.handler) else {
            self.suggest_command(raw);
            return Ok(LoopControl::Continue);
        };
        match handler(self, args) {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
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

        if tokens.is_empty() {
            return Ok(LoopControl::Continue);
        }

        let command = tokens[0].to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
        self.dispatch(&command, &tokens[0], &args)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let needle = input.to_lowercase();
        let best = self
            .registry
            .names()
            .map(|key| (levenshtein(key, &needle), key))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = best {
            if distance <= 3 {
                cli_io::print_info(format!("Suggestion: `{}`?", best));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, "Exit shell?", true).map_err(CliError::from)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                self.print_error(&message);
                cli_io::print_hint("Use `help <command>` for usage details.");
                Ok(())
            }
            other => {
                self.print_error(&other.to_string());
                Ok(())
            }
        }
    }

    pub(crate) fn print_error(&self, message: &str) {
        cli_io::print_error(message);
    }

    pub(crate) fn print_warning(&self, message: &str) {
        cli_io::print_warning(message);
    }
}

#[cfg(test)]
pub(crate) fn process_script(base: PathBuf, lines: &[&str]) -> Result<ShellContext, CliError> {
    let mut app = ShellContext::with_base_dir(CliMode::Script, base)?;
    for line in lines {
        match app.process_line(line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => app.report_error(err)?,
        }
    }
    Ok(app)
}
