use tally_core::commands;
use tally_core::commands::report::ReportOverrides;
use tally_core::{LedgerResult, SuccessEnvelope};

use crate::cli::{Cli, Commands, EntriesCommand, ReportCommand};

pub fn dispatch(cli: &Cli) -> LedgerResult<SuccessEnvelope> {
    match &cli.command {
        Commands::Submit { text, user_id, .. } => commands::submit::run(text, *user_id),
        Commands::Report { command } => match command {
            ReportCommand::Day {
                date,
                balance,
                sales,
                purchases,
                admin_fee,
                card_fee,
                ..
            } => commands::report::day(
                date.as_str(),
                *balance,
                ReportOverrides {
                    total_sales: *sales,
                    total_purchases: *purchases,
                    admin_fee: *admin_fee,
                    card_fee: *card_fee,
                },
            ),
            ReportCommand::Month { period, .. } => commands::report::month(period.as_str()),
        },
        Commands::Entries { command } => match command {
            EntriesCommand::List { date, kind, .. } => {
                commands::entries::list(date.as_str(), kind.clone())
            }
            EntriesCommand::Edit {
                entry_id,
                field,
                value,
                ..
            } => commands::entries::edit(*entry_id, field, value),
            EntriesCommand::Delete { entry_id, yes, .. } => {
                commands::entries::delete(*entry_id, *yes)
            }
        },
    }
}
