use std::path::Path;

use crate::cli::commands::CommandDefinition;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::transfer;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "export",
            "Write the whole wishlist to a JSON file",
            "export <path>",
            cmd_export,
        ),
        CommandDefinition::new(
            "import",
            "Load a JSON export; missing fields are left untouched",
            "import <path>",
            cmd_import,
        ),
    ]
}

fn single_path<'a>(args: &[&'a str], usage: &str) -> Result<&'a str, CommandError> {
    match args {
        [path] => Ok(*path),
        _ => Err(CommandError::InvalidArguments(format!("usage: {usage}"))),
    }
}

fn cmd_export(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let path = single_path(args, "export <path>")?;
    transfer::write_export(&context.wishlist, Path::new(path))?;
    io::print_success(format!("Wishlist exported to {}.", path));
    Ok(())
}

fn cmd_import(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let path = single_path(args, "import <path>")?;
    if !context.confirm("Importing replaces the fields present in the file. Continue?")? {
        io::print_info("Operation cancelled.");
        return Ok(());
    }
    let report = transfer::read_import(&mut context.wishlist, Path::new(path))?;
    if report.is_empty() {
        io::print_warning("The file held no usable fields; nothing imported.");
        return Ok(());
    }
    context.persist()?;
    io::print_success(format!("Imported: {}.", report.applied.join(", ")));
    if !report.skipped.is_empty() {
        io::print_warning(format!(
            "Skipped malformed fields: {}.",
            report.skipped.join(", ")
        ));
    }
    Ok(())
}
