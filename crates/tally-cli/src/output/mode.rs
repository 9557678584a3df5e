use crate::cli::{Commands, EntriesCommand, ReportCommand};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum OutputMode {
    Text,
    Json,
}

pub fn mode_for_command(command: &Commands) -> OutputMode {
    let json = match command {
        Commands::Submit { json, .. } => *json,
        Commands::Report { command } => match command {
            ReportCommand::Day { json, .. } | ReportCommand::Month { json, .. } => *json,
        },
        Commands::Entries { command } => match command {
            EntriesCommand::List { json, .. }
            | EntriesCommand::Edit { json, .. }
            | EntriesCommand::Delete { json, .. } => *json,
        },
    };

    if json {
        OutputMode::Json
    } else {
        OutputMode::Text
    }
}

#[cfg(test)]
mod tests {
    use super::{mode_for_command, OutputMode};
    use crate::cli::parse_from;

    #[test]
    fn json_flag_selects_json_mode_on_every_command() {
        let cases: [&[&str]; 5] = [
            &["tally", "submit", "sale/10.04.25/@u/10:00/1", "--json"],
            &["tally", "report", "day", "10.04.25", "--json"],
            &["tally", "report", "month", "04.25", "--json"],
            &["tally", "entries", "list", "10.04.25", "--json"],
            &["tally", "entries", "delete", "1", "--json"],
        ];

        for args in cases {
            let parsed = parse_from(args.iter().copied());
            assert!(parsed.is_ok(), "failed to parse: {args:?}");
            if let Ok(cli) = parsed {
                assert_eq!(mode_for_command(&cli.command), OutputMode::Json);
            }
        }
    }

    #[test]
    fn default_mode_is_text() {
        let parsed = parse_from(["tally", "report", "day", "10.04.25"]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            assert_eq!(mode_for_command(&cli.command), OutputMode::Text);
        }
    }
}
