use crate::cli::commands::CommandDefinition;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::core::services::CategoryService;

pub(crate) const SUBCOMMANDS: &[&str] = &["add", "remove", "move", "list"];

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "category",
        "Manage goal categories and their order",
        "category <add <name>|remove <name>|move <from> <to>|list>",
        cmd_category,
    )]
}

fn cmd_category(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((action, rest)) = args.split_first() else {
        return list_categories(context);
    };

    match action.to_lowercase().as_str() {
        "add" => {
            CategoryService::add(&mut context.wishlist, &rest.join(" "))?;
            context.persist()?;
            io::print_success("Category added.");
            Ok(())
        }
        "remove" | "delete" => {
            let name = rest.join(" ");
            CategoryService::remove(&mut context.wishlist, &name)?;
            context.persist()?;
            io::print_success(format!(
                "Category `{}` removed. Its goals are now listed under Other.",
                name.trim()
            ));
            Ok(())
        }
        "move" => {
            let [from, to] = rest else {
                return Err(CommandError::InvalidArguments(
                    "usage: category move <from> <to>".into(),
                ));
            };
            let from = parse_position(from)?;
            let to = parse_position(to)?;
            CategoryService::move_to(&mut context.wishlist, from, to)?;
            context.persist()?;
            list_categories(context)
        }
        "list" => list_categories(context),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown category subcommand `{}`",
            other
        ))),
    }
}

/// 1-based position on the command line, 0-based for the service.
fn parse_position(raw: &str) -> Result<usize, CommandError> {
    raw.parse::<usize>()
        .ok()
        .and_then(|position| position.checked_sub(1))
        .ok_or_else(|| {
            CommandError::InvalidArguments(format!("`{}` is not a category position", raw))
        })
}

fn list_categories(context: &mut ShellContext) -> CommandResult {
    output_section("Categories");
    let categories = CategoryService::list(&context.wishlist);
    if categories.is_empty() {
        io::print_info("No categories. Goals are listed under Other.");
    }
    for (index, category) in categories.iter().enumerate() {
        let count = context
            .wishlist
            .goals
            .iter()
            .filter(|goal| &goal.category == category)
            .count();
        io::print_info(format!("  {:>2}. {} ({} goals)", index + 1, category, count));
    }
    Ok(())
}
