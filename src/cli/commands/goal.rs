use crate::cli::commands::CommandDefinition;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::core::services::{GoalService, NewGoal};
use crate::currency::parse_digits;
use crate::wishlist::{Goal, Priority};

pub(crate) const SUBCOMMANDS: &[&str] = &["add", "list", "fund", "set", "pull", "delete"];

const USAGE: &str = "goal <add|list|fund|set|pull|delete> ...";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "goal",
        "Manage wishlist goals",
        "goal add <name> <target> [category|-] [priority] | goal list | goal fund <goal> <amount> | \
         goal set <goal> <amount> | goal pull <goal> [amount] | goal delete <goal>",
        cmd_goal,
    )]
}

fn cmd_goal(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((action, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(format!("usage: {USAGE}")));
    };

    match action.to_lowercase().as_str() {
        "add" => add_goal(context, rest),
        "list" | "ls" => list_goals(context),
        "fund" => fund_goal(context, rest),
        "set" => set_goal(context, rest),
        "pull" => pull_goal(context, rest),
        "delete" | "remove" | "rm" => delete_goal(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown goal subcommand `{}`",
            other
        ))),
    }
}

fn add_goal(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let input = if args.is_empty() && context.can_prompt() {
        match prompt_new_goal(context)? {
            Some(input) => input,
            None => return Ok(()),
        }
    } else {
        let [name, target, extra @ ..] = args else {
            return Err(CommandError::InvalidArguments(
                "usage: goal add <name> <target> [category|-] [priority]".into(),
            ));
        };
        let Some(target) = context.amount_arg(target) else {
            return Ok(());
        };
        let mut input = NewGoal::new(*name, target);
        if let Some(category) = extra.first().filter(|value| **value != "-") {
            input = input.with_category(*category);
        }
        if let Some(priority) = extra.get(1) {
            let priority = priority
                .parse::<Priority>()
                .map_err(CommandError::InvalidArguments)?;
            input = input.with_priority(priority);
        }
        input
    };

    let id = GoalService::add(&mut context.wishlist, input)?;
    context.persist()?;
    if let Some(goal) = context.wishlist.goal(&id) {
        io::print_success(format!(
            "Goal `{}` added ({}, {} priority).",
            goal.name,
            context.format_amount(goal.target),
            goal.priority
        ));
    }
    Ok(())
}

fn prompt_new_goal(context: &ShellContext) -> Result<Option<NewGoal>, CommandError> {
    let name = io::prompt_text(&context.theme, "Goal name")?;
    let raw_target = io::prompt_text(&context.theme, "Target amount")?;
    let Some(target) = parse_digits(&raw_target) else {
        io::print_warning("Target must be a whole amount. Goal not added.");
        return Ok(None);
    };

    let mut input = NewGoal::new(name, target);
    if !context.wishlist.categories.is_empty() {
        if let Some(index) = io::select_item(
            &context.theme,
            "Category",
            context.wishlist.categories.as_slice(),
            0,
        )? {
            input = input.with_category(context.wishlist.categories[index].clone());
        }
    }
    let priorities: Vec<&str> = Priority::ALL.iter().rev().map(|p| p.label()).collect();
    if let Some(index) = io::select_item(&context.theme, "Priority", priorities.as_slice(), 1)? {
        let chosen = Priority::ALL.iter().rev().nth(index).copied();
        input = input.with_priority(chosen.unwrap_or_default());
    }
    Ok(Some(input))
}

fn list_goals(context: &mut ShellContext) -> CommandResult {
    output_section("Goals");
    if context.wishlist.goals.is_empty() {
        io::print_info("No goals yet. Add one with `goal add <name> <target>`.");
        return Ok(());
    }
    for (index, goal) in context.wishlist.goals.iter().enumerate() {
        io::print_info(describe_goal(context, index, goal));
    }
    Ok(())
}

pub(crate) fn describe_goal(context: &ShellContext, index: usize, goal: &Goal) -> String {
    let marker = if goal.is_complete() { "✓" } else { " " };
    format!(
        "  {:>2}. [{}] {:<20} {} / {} ({}%) {} · {} · {}",
        index + 1,
        marker,
        goal.name,
        context.format_amount(goal.saved),
        context.format_amount(goal.target),
        goal.progress_percent(),
        goal.priority,
        goal.category,
        short_id(goal),
    )
}

fn short_id(goal: &Goal) -> &str {
    let id = goal.id.as_str();
    id.get(..8).unwrap_or(id)
}

fn fund_goal(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [reference, amount] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: goal fund <goal> <amount>".into(),
        ));
    };
    let id = context.resolve_goal(reference)?;
    let Some(amount) = context.amount_arg(amount) else {
        return Ok(());
    };
    let saved = GoalService::deposit(&mut context.wishlist, &id, amount)?;
    context.persist()?;
    io::print_success(format!(
        "{} added directly. Saved: {}.",
        context.amount_format().format_delta(amount),
        context.format_amount(saved)
    ));
    Ok(())
}

fn set_goal(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [reference, amount] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: goal set <goal> <amount>".into(),
        ));
    };
    let id = context.resolve_goal(reference)?;
    let Some(amount) = context.amount_arg(amount) else {
        return Ok(());
    };
    GoalService::set_saved(&mut context.wishlist, &id, amount)?;
    context.persist()?;
    io::print_success(format!("Saved amount set to {}.", context.format_amount(amount)));
    Ok(())
}

fn pull_goal(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (reference, amount) = match args {
        [reference] => (*reference, None),
        [reference, amount] => (*reference, Some(*amount)),
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: goal pull <goal> [amount]".into(),
            ))
        }
    };
    let id = context.resolve_goal(reference)?;

    let moved = match amount {
        Some(raw) => {
            let Some(amount) = context.amount_arg(raw) else {
                return Ok(());
            };
            GoalService::allocate_from_wallet(&mut context.wishlist, &id, amount)?;
            amount
        }
        None => GoalService::quick_allocate(&mut context.wishlist, &id)?,
    };

    if moved == 0 {
        io::print_info("Nothing to move: the wallet is empty or the goal is already funded.");
        return Ok(());
    }
    context.persist()?;
    io::print_success(format!(
        "Moved {} from the wallet. Wallet: {}.",
        context.format_amount(moved),
        context.format_amount(context.wishlist.wallet_balance)
    ));
    Ok(())
}

fn delete_goal(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [reference] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: goal delete <goal>".into(),
        ));
    };
    let id = context.resolve_goal(reference)?;
    let name = context
        .wishlist
        .goal(&id)
        .map(|goal| goal.name.clone())
        .unwrap_or_default();
    if !context.confirm(&format!("Delete `{}`? Saved funds are not returned.", name))? {
        io::print_info("Operation cancelled.");
        return Ok(());
    }
    let removed = GoalService::remove(&mut context.wishlist, &id)?;
    context.persist()?;
    io::print_success(format!("Goal `{}` deleted.", removed.name));
    Ok(())
}
