use crate::cli::commands::CommandDefinition;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::core::services::DistributionService;
use crate::distribution::{Distribution, DistributionPolicy};

pub(crate) const SUBCOMMANDS: &[&str] = &["even", "weighted", "preview"];

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "distribute",
        "Spread the wallet across unfinished goals",
        "distribute [even|weighted] [preview]",
        cmd_distribute,
    )]
}

fn cmd_distribute(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let mut policy = context.config.distribution_policy;
    let mut preview = false;
    for arg in args {
        if arg.eq_ignore_ascii_case("preview") || arg.eq_ignore_ascii_case("--preview") {
            preview = true;
        } else {
            policy = arg
                .parse::<DistributionPolicy>()
                .map_err(CommandError::InvalidArguments)?;
        }
    }

    if context.wishlist.wallet_balance == 0 {
        io::print_info("The wallet is empty; top it up first.");
        return Ok(());
    }
    if context.wishlist.active_goals().next().is_none() {
        io::print_info("Every goal is already funded.");
        return Ok(());
    }

    let distribution = if preview {
        DistributionService::preview(&context.wishlist, policy)
    } else {
        DistributionService::run(&mut context.wishlist, policy)
    };

    if distribution.is_noop() {
        io::print_info("Nothing could be allocated.");
        return Ok(());
    }
    if !preview {
        context.persist()?;
    }
    print_report(context, &distribution, preview);
    Ok(())
}

fn print_report(context: &ShellContext, distribution: &Distribution, preview: bool) {
    let title = if preview {
        format!("Distribution preview ({})", distribution.policy)
    } else {
        format!("Distribution ({})", distribution.policy)
    };
    output_section(title);
    let format = context.amount_format();
    for allocation in &distribution.allocations {
        let name = distribution
            .goals
            .iter()
            .find(|goal| goal.id == allocation.goal_id)
            .map(|goal| goal.name.as_str())
            .unwrap_or("?");
        io::print_info(format!(
            "  {:<20} {}",
            name,
            format.format_delta(allocation.amount)
        ));
    }
    io::print_info(format!(
        "Allocated {} in {} pass(es); wallet left: {}.",
        format.format(distribution.allocated()),
        distribution.passes,
        format.format(distribution.residual)
    ));
    if !preview {
        io::print_success("Funds distributed.");
    }
}
