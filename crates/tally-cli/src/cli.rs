use clap::{Parser, Subcommand};
use tally_core::dates;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDate(pub String);

impl EntryDate {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub fn parse_entry_date(value: &str) -> Result<EntryDate, String> {
    if dates::parse_entry_date(value).is_none() {
        return Err("date must use DD.MM.YY format with valid calendar values".to_string());
    }
    Ok(EntryDate(value.to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthPeriod(pub String);

impl MonthPeriod {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub fn parse_month_period(value: &str) -> Result<MonthPeriod, String> {
    if dates::parse_month_period(value).is_none() {
        return Err("month must use MM.YY format".to_string());
    }
    Ok(MonthPeriod(value.to_string()))
}

pub fn parse_entry_kind(value: &str) -> Result<String, String> {
    match value {
        "sale" | "purchase" => Ok(value.to_string()),
        _ => Err("kind must be `sale` or `purchase`".to_string()),
    }
}

pub fn parse_edit_field(value: &str) -> Result<String, String> {
    match value {
        "amount" | "time" | "tag" => Ok(value.to_string()),
        _ => Err("field must be one of: amount, time, tag".to_string()),
    }
}

/// Extended help shown after `tally submit --help`.
pub const SUBMIT_AFTER_HELP: &str = "\
Submission format:
  [#]<kind>/<DD.MM.YY>/<@tag>/<HH:MM>/<amount>[\u{20bd}]

  kind    `sale` or `purchase` (case-insensitive)
  date    day.month.two-digit-year, e.g. 10.04.25
  tag     `@` followed by letters, digits, or `_`
  time    24-hour clock; stored shifted to local time
  amount  whole rubles; `.` and `,` separators and a trailing \u{20bd} are ignored

Examples:
  tally submit \"sale/10.04.25/@ivan/10:00/7000\"
  tally submit \"#purchase/10.04.25/@dealer/12:30/1.500\u{20bd}\"

A submission matching an already-stored entry on kind, date, tag, time,
and amount is rejected without writing anything.
";

#[derive(Debug, Parser)]
#[command(
    name = "tally",
    version,
    about = "sales and purchases ledger with daily settlement reports",
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Record a sale or purchase from a formatted submission line
    #[command(after_long_help = SUBMIT_AFTER_HELP)]
    Submit {
        /// The submission line, quoted
        text: String,
        /// Numeric id of the submitting user
        #[arg(long, default_value_t = 0)]
        user_id: i64,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Compute settlement reports from the stored entries
    #[command(arg_required_else_help = true)]
    Report {
        #[command(subcommand)]
        command: ReportCommand,
    },
    /// List, edit, and delete stored entries
    #[command(arg_required_else_help = true)]
    Entries {
        #[command(subcommand)]
        command: EntriesCommand,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum ReportCommand {
    /// Report one day: totals, fees, and the settled day total
    Day {
        /// Day to report (DD.MM.YY)
        #[arg(value_parser = parse_entry_date)]
        date: EntryDate,
        /// Include the running balance from the 1st of the month
        #[arg(long)]
        balance: bool,
        /// Override total sales for this report only
        #[arg(long)]
        sales: Option<i64>,
        /// Override total purchases for this report only
        #[arg(long)]
        purchases: Option<i64>,
        /// Override the admin fee for this report only
        #[arg(long)]
        admin_fee: Option<i64>,
        /// Override the card fee for this report only
        #[arg(long)]
        card_fee: Option<i64>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Report a whole month with the month-length card fee
    Month {
        /// Month to report (MM.YY)
        #[arg(value_parser = parse_month_period)]
        period: MonthPeriod,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum EntriesCommand {
    /// List the entries stored for one day
    List {
        /// Day to list (DD.MM.YY)
        #[arg(value_parser = parse_entry_date)]
        date: EntryDate,
        /// Only show one kind: sale or purchase
        #[arg(long, value_parser = parse_entry_kind)]
        kind: Option<String>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Change one field of a stored entry
    Edit {
        /// Entry id (from `tally entries list`)
        entry_id: i64,
        /// Field to change: amount, time, or tag
        #[arg(value_parser = parse_edit_field)]
        field: String,
        /// The new value
        value: String,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Delete a stored entry (previews first; pass --yes to confirm)
    Delete {
        /// Entry id (from `tally entries list`)
        entry_id: i64,
        /// Actually delete instead of previewing
        #[arg(long)]
        yes: bool,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
pub fn parse_from<I, T>(itr: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(itr)
}

#[cfg(test)]
mod tests {
    use clap::error::ErrorKind;

    use super::{parse_from, Commands, EntriesCommand, ReportCommand};

    #[test]
    fn parse_command_paths() {
        let cases: [Vec<&str>; 14] = [
            vec!["tally", "submit", "sale/10.04.25/@user/10:00/7000"],
            vec!["tally", "submit", "sale/10.04.25/@user/10:00/7000", "--json"],
            vec![
                "tally",
                "submit",
                "#purchase/10.04.25/@user/10:00/500",
                "--user-id",
                "42",
            ],
            vec!["tally", "report", "day", "10.04.25"],
            vec!["tally", "report", "day", "10.04.25", "--balance"],
            vec!["tally", "report", "day", "10.04.25", "--sales", "10000"],
            vec![
                "tally",
                "report",
                "day",
                "10.04.25",
                "--admin-fee",
                "900",
                "--card-fee",
                "0",
                "--json",
            ],
            vec!["tally", "report", "month", "04.25"],
            vec!["tally", "report", "month", "04.25", "--json"],
            vec!["tally", "entries", "list", "10.04.25"],
            vec!["tally", "entries", "list", "10.04.25", "--kind", "sale"],
            vec!["tally", "entries", "edit", "3", "amount", "8500"],
            vec!["tally", "entries", "delete", "3"],
            vec!["tally", "entries", "delete", "3", "--yes", "--json"],
        ];

        for case in cases {
            let parsed = parse_from(case.clone());
            assert!(parsed.is_ok(), "failed to parse: {case:?}");
        }
    }

    #[test]
    fn parse_submit_with_user_id() {
        let parsed = parse_from([
            "tally",
            "submit",
            "sale/10.04.25/@user/10:00/7000",
            "--user-id",
            "42",
        ]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            assert!(matches!(
                cli.command,
                Commands::Submit {
                    user_id: 42,
                    json: false,
                    ..
                }
            ));
        }
    }

    #[test]
    fn parse_report_day_with_overrides() {
        let parsed = parse_from([
            "tally", "report", "day", "10.04.25", "--sales", "10000", "--json",
        ]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            assert!(matches!(
                cli.command,
                Commands::Report {
                    command: ReportCommand::Day {
                        sales: Some(10000),
                        json: true,
                        ..
                    },
                }
            ));
        }
    }

    #[test]
    fn invalid_date_is_rejected() {
        let parsed = parse_from(["tally", "report", "day", "2025-04-10"]);
        assert!(parsed.is_err());

        let impossible = parse_from(["tally", "report", "day", "31.02.25"]);
        assert!(impossible.is_err());
    }

    #[test]
    fn invalid_month_is_rejected() {
        let parsed = parse_from(["tally", "report", "month", "13.25"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn invalid_kind_is_rejected() {
        let parsed = parse_from(["tally", "entries", "list", "10.04.25", "--kind", "refund"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn invalid_edit_field_is_rejected() {
        let parsed = parse_from(["tally", "entries", "edit", "3", "date", "11.04.25"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn parse_entries_delete_flags() {
        let parsed = parse_from(["tally", "entries", "delete", "3", "--yes"]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            assert!(matches!(
                cli.command,
                Commands::Entries {
                    command: EntriesCommand::Delete {
                        entry_id: 3,
                        yes: true,
                        json: false,
                    },
                }
            ));
        }
    }

    #[test]
    fn bare_report_shows_help() {
        let parsed = parse_from(["tally", "report"]);
        assert!(parsed.is_err());
        if let Err(err) = parsed {
            assert_eq!(
                err.kind(),
                ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            );
        }
    }

    #[test]
    fn bare_entries_shows_help() {
        let parsed = parse_from(["tally", "entries"]);
        assert!(parsed.is_err());
        if let Err(err) = parsed {
            assert_eq!(
                err.kind(),
                ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            );
        }
    }

    #[test]
    fn help_command_is_rejected() {
        let parsed = parse_from(["tally", "help"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn subcommand_help_uses_clap_display_help() {
        let parsed = parse_from(["tally", "submit", "--help"]);
        assert!(parsed.is_err());
        if let Err(err) = parsed {
            assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        }
    }
}
