use crate::cli::commands::CommandDefinition;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::core::services::WalletService;

pub(crate) const SUBCOMMANDS: &[&str] = &["show", "topup"];

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "wallet",
        "Show or top up the wallet",
        "wallet [show|topup <amount>]",
        cmd_wallet,
    )]
}

fn cmd_wallet(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.split_first() {
        None => show_wallet(context),
        Some((action, rest)) => match action.to_lowercase().as_str() {
            "show" => show_wallet(context),
            "topup" | "top-up" | "add" => top_up(context, rest),
            other => Err(CommandError::InvalidArguments(format!(
                "unknown wallet subcommand `{}`",
                other
            ))),
        },
    }
}

fn show_wallet(context: &mut ShellContext) -> CommandResult {
    io::print_info(format!(
        "Wallet balance: {}",
        context.format_amount(context.wishlist.wallet_balance)
    ));
    Ok(())
}

fn top_up(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        return Err(CommandError::InvalidArguments(
            "usage: wallet topup <amount>".into(),
        ));
    }
    // Amounts may be typed with separators or spaces ("1.500 000").
    let raw = args.join("");
    let Some(receipt) = WalletService::top_up(&mut context.wishlist, &raw) else {
        io::print_warning(format!(
            "`{}` is not a positive amount; wallet unchanged.",
            args.join(" ")
        ));
        return Ok(());
    };
    context.persist()?;
    let format = context.amount_format();
    io::print_success(format!(
        "{} added. Wallet: {}.",
        format.format_delta(receipt.amount),
        format.format(receipt.balance)
    ));
    Ok(())
}
