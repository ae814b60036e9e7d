use crate::cli::commands::CommandDefinition;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::core::services::LinkService;

pub(crate) const SUBCOMMANDS: &[&str] = &["add", "remove", "list"];

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "link",
        "Manage external shop links",
        "link <add <label> <url>|remove <link>|list>",
        cmd_link,
    )]
}

fn cmd_link(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((action, rest)) = args.split_first() else {
        return list_links(context);
    };

    match action.to_lowercase().as_str() {
        "add" => {
            let [label, url] = rest else {
                return Err(CommandError::InvalidArguments(
                    "usage: link add <label> <url>".into(),
                ));
            };
            LinkService::add(&mut context.wishlist, label, url)?;
            context.persist()?;
            io::print_success(format!("Link `{}` added.", label.trim()));
            Ok(())
        }
        "remove" | "delete" => {
            let [reference] = rest else {
                return Err(CommandError::InvalidArguments(
                    "usage: link remove <link>".into(),
                ));
            };
            let removed = LinkService::remove(&mut context.wishlist, reference)?;
            context.persist()?;
            io::print_success(format!("Link `{}` removed.", removed.label));
            Ok(())
        }
        "list" => list_links(context),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown link subcommand `{}`",
            other
        ))),
    }
}

fn list_links(context: &mut ShellContext) -> CommandResult {
    output_section("Links");
    let links = LinkService::list(&context.wishlist);
    if links.is_empty() {
        io::print_info("No links saved.");
    }
    for (index, link) in links.iter().enumerate() {
        io::print_info(format!("  {:>2}. {:<16} {}", index + 1, link.label, link.url));
    }
    Ok(())
}
