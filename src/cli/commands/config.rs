use crate::cli::commands::CommandDefinition;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::config::Config;

pub(crate) const SUBCOMMANDS: &[&str] = &["show", "set", "backup", "backups", "restore"];

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "config",
        "View and manage preferences",
        "config [show|set <key> <value>|backup [note]|backups|restore [name]]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((action, rest)) = args.split_first() else {
        return show_config(context);
    };

    match action.to_lowercase().as_str() {
        "show" => show_config(context),
        "set" => {
            let [key, value @ ..] = rest else {
                return Err(set_usage());
            };
            if value.is_empty() {
                return Err(set_usage());
            }
            context.config.set(key, &value.join(" "))?;
            context.persist_config()?;
            io::print_success(format!("Configuration updated: {} = {}.", key, value.join(" ")));
            Ok(())
        }
        "backup" => {
            let note = (!rest.is_empty()).then(|| rest.join(" "));
            let name = context
                .config_manager
                .backup(&context.config, note.as_deref())?;
            io::print_success(format!("Configuration backed up as `{}`.", name));
            Ok(())
        }
        "backups" => list_backups(context),
        "restore" => restore(context, rest.first().copied()),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown config subcommand `{}`",
            other
        ))),
    }
}

fn set_usage() -> CommandError {
    CommandError::InvalidArguments(format!(
        "usage: config set <key> <value> (keys: {})",
        Config::KEYS.join(", ")
    ))
}

fn show_config(context: &mut ShellContext) -> CommandResult {
    output_section("Configuration");
    for key in Config::KEYS {
        let value = context.config.value(key).unwrap_or_default();
        io::print_info(format!("  {:<22} {}", key, value));
    }
    io::print_info(format!("  File: {}", context.config_manager.path().display()));
    Ok(())
}

fn list_backups(context: &mut ShellContext) -> CommandResult {
    let backups = context.config_manager.list_backups()?;
    output_section("Configuration backups");
    if backups.is_empty() {
        io::print_info("No backups yet. Create one with `config backup [note]`.");
    }
    for (index, name) in backups.iter().enumerate() {
        io::print_info(format!("  {:>2}. {}", index + 1, name));
    }
    Ok(())
}

fn restore(context: &mut ShellContext, reference: Option<&str>) -> CommandResult {
    let backups = context.config_manager.list_backups()?;
    let name = match reference {
        Some(reference) => resolve_backup(&backups, reference)?,
        None if context.can_prompt() => {
            if backups.is_empty() {
                io::print_info("No backups to restore.");
                return Ok(());
            }
            match io::select_item(&context.theme, "Select configuration backup", backups.as_slice(), 0)? {
                Some(index) => backups[index].clone(),
                None => {
                    io::print_info("Operation cancelled.");
                    return Ok(());
                }
            }
        }
        None => {
            return Err(CommandError::InvalidArguments(
                "usage: config restore <name|number>".into(),
            ))
        }
    };

    context.config = context.config_manager.restore(&name)?;
    io::print_success(format!("Configuration restored from `{}`.", name));
    Ok(())
}

/// Accepts a 1-based position in the backup list or a file name.
fn resolve_backup(backups: &[String], reference: &str) -> Result<String, CommandError> {
    if let Some(name) = reference
        .parse::<usize>()
        .ok()
        .and_then(|position| position.checked_sub(1))
        .and_then(|index| backups.get(index))
    {
        return Ok(name.clone());
    }
    backups
        .iter()
        .find(|name| name.as_str() == reference || name.trim_end_matches(".json") == reference)
        .cloned()
        .ok_or_else(|| CommandError::Message(format!("No configuration backup `{}`.", reference)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backups_resolve_by_position_or_name() {
        let backups = vec![
            "config_20260102_090000.json".to_string(),
            "config_20260101_090000_trip.json".to_string(),
        ];
        assert_eq!(resolve_backup(&backups, "2").unwrap(), backups[1]);
        assert_eq!(
            resolve_backup(&backups, "config_20260102_090000").unwrap(),
            backups[0]
        );
        assert!(resolve_backup(&backups, "3").is_err());
        assert!(resolve_backup(&backups, "nope.json").is_err());
    }
}
