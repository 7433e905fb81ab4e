use clap::{Parser, Subcommand};

/// hron: human-readable cron expressions.
#[derive(Debug, Parser)]
#[command(name = "hron", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the next occurrences of an expression.
    Next {
        /// The schedule expression.
        expr: String,
        /// How many occurrences to print (defaults to `output.count`).
        #[arg(short = 'n', long)]
        count: Option<usize>,
        /// Reference instant in RFC 3339 (defaults to now).
        #[arg(long)]
        from: Option<String>,
    },
    /// Print the most recent occurrence before the reference instant.
    Previous {
        /// The schedule expression.
        expr: String,
        /// Reference instant in RFC 3339 (defaults to now).
        #[arg(long)]
        from: Option<String>,
    },
    /// Check whether an expression fires at an instant.
    Matches {
        /// The schedule expression.
        expr: String,
        /// Instant in RFC 3339.
        at: String,
    },
    /// Convert an expression to 5-field cron.
    ToCron {
        /// The schedule expression.
        expr: String,
    },
    /// Convert a 5-field cron expression to hron.
    FromCron {
        /// The cron expression, quoted as one argument.
        cron: String,
    },
    /// Explain a cron expression, noting cron quirks.
    Explain {
        /// The cron expression, quoted as one argument.
        cron: String,
    },
    /// Validate an expression and print its canonical form.
    Check {
        /// The schedule expression.
        expr: String,
    },
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test_log::test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test_log::test]
    fn test_cli_parses_next_with_count() {
        let cli = Cli::try_parse_from(["hron", "next", "every day at 09:00", "-n", "3"])
            .expect("should parse arguments");
        let Command::Next { expr, count, from } = cli.command else {
            panic!("expected next command");
        };
        assert_eq!(expr, "every day at 09:00");
        assert_eq!(count, Some(3));
        assert_eq!(from, None);
    }

    #[test_log::test]
    fn test_cli_rejects_missing_argument() {
        let err = Cli::try_parse_from(["hron", "matches", "every day at 09:00"])
            .expect_err("should require an instant");
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }
}
