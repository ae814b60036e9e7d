use crate::advice::{
    months_to_goal, AdviceRequest, AdviceService, GeminiConfig, GeminiProvider, FAILURE_FALLBACK,
};
use crate::cli::commands::CommandDefinition;
use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "advice",
        "Ask the savings assistant for a strategy",
        "advice [monthly contribution]",
        cmd_advice,
    )]
}

fn cmd_advice(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let monthly = if args.is_empty() {
        context.config.monthly_contribution
    } else {
        match context.amount_arg(&args.join("")) {
            Some(amount) => amount,
            None => return Ok(()),
        }
    };

    if context.wishlist.goals.is_empty() {
        io::print_info("Add a goal first; there is nothing to plan for yet.");
        return Ok(());
    }

    let request = AdviceRequest::new(
        &context.wishlist.goals,
        monthly,
        context.config.language.clone(),
    );
    let format = context.amount_format();

    output_section("Savings plan");
    io::print_info(format!("  Remaining: {}", format.format(request.remaining())));
    match months_to_goal(request.remaining(), monthly) {
        Some(months) => io::print_info(format!(
            "  At {} per month: about {} month(s).",
            format.format(monthly),
            months
        )),
        None => io::print_info(
            "  Set a monthly contribution (`advice <amount>` or `config set monthly_contribution`) to estimate a timeline.",
        ),
    }

    let advice = match GeminiProvider::new(GeminiConfig::from_config(&context.config)) {
        Ok(provider) => AdviceService::new(Box::new(provider), format).advise(&request),
        Err(err) => {
            tracing::warn!("advice client unavailable: {err}");
            FAILURE_FALLBACK.to_string()
        }
    };

    output_section("Assistant");
    for line in advice.lines() {
        io::print_info(line);
    }
    Ok(())
}
