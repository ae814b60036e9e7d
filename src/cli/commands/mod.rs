use std::collections::HashMap;

pub mod advice;
pub mod category;
pub mod config;
pub mod distribute;
pub mod goal;
pub mod link;
pub mod status;
pub mod system;
pub mod transfer;
pub mod wallet;

use crate::cli::core::{CommandResult, ShellContext};

pub(crate) fn all_definitions() -> Vec<CommandDefinition> {
    let mut commands = Vec::new();
    commands.extend(system::definitions());
    commands.extend(status::definitions());
    commands.extend(goal::definitions());
    commands.extend(wallet::definitions());
    commands.extend(distribute::definitions());
    commands.extend(category::definitions());
    commands.extend(link::definitions());
    commands.extend(transfer::definitions());
    commands.extend(advice::definitions());
    commands.extend(config::definitions());
    commands
}

/// Second-word completions for commands that take a subcommand.
pub(crate) fn subcommands() -> Vec<(&'static str, &'static [&'static str])> {
    vec![
        ("goal", goal::SUBCOMMANDS),
        ("wallet", wallet::SUBCOMMANDS),
        ("distribute", distribute::SUBCOMMANDS),
        ("category", category::SUBCOMMANDS),
        ("link", link::SUBCOMMANDS),
        ("config", config::SUBCOMMANDS),
    ]
}

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

#[derive(Clone)]
pub struct CommandDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandDefinition {
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

pub struct CommandRegistry {
    commands: HashMap<&'static str, CommandDefinition>,
    order: Vec<&'static str>,
}

impl CommandRegistry {
    pub fn new(definitions: Vec<CommandDefinition>) -> Self {
        let mut commands = HashMap::new();
        let mut order = Vec::new();
        for definition in definitions {
            order.push(definition.name);
            commands.insert(definition.name, definition);
        }
        Self { commands, order }
    }

    pub fn get(&self, name: &str) -> Option<&CommandDefinition> {
        self.commands.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandDefinition> {
        self.order
            .iter()
            .filter_map(move |name| self.commands.get(name))
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.order.iter().copied()
    }
}
