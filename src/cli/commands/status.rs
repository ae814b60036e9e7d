use crate::cli::commands::{goal::describe_goal, CommandDefinition};
use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::core::services::SummaryService;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "status",
        "Show totals and goals grouped by category",
        "status",
        cmd_status,
    )]
}

fn cmd_status(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let totals = SummaryService::totals(&context.wishlist);
    let format = context.amount_format();

    output_section("Overview");
    io::print_info(format!(
        "  Wallet   : {}",
        format.format(context.wishlist.wallet_balance)
    ));
    io::print_info(format!(
        "  Saved    : {} of {} ({}%)",
        format.format(totals.total_saved),
        format.format(totals.total_target),
        totals.percentage
    ));
    io::print_info(format!(
        "  Remaining: {} across {} active goal(s)",
        format.format(totals.remaining_needed),
        totals.active_goals
    ));
    if totals.all_done {
        io::print_success("Every goal is fully funded!");
    }

    // Numbering follows the goal list so references stay valid.
    for group in SummaryService::grouped(&context.wishlist) {
        output_section(&group.category);
        for goal in group.goals {
            let index = context
                .wishlist
                .goals
                .iter()
                .position(|candidate| candidate.id == goal.id)
                .unwrap_or_default();
            io::print_info(describe_goal(context, index, goal));
        }
    }
    Ok(())
}
