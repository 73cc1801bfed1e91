mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use log::LevelFilter;
use std::process;

use commands::batch::BatchArgs;
use commands::schedule::ScheduleArgs;

/// Fixed-rate mortgage payment tables
#[derive(Parser)]
#[command(
    name = "mortgage",
    version,
    about = "Fixed-rate mortgage payment tables",
    long_about = "Computes the level monthly payment of a fixed-rate mortgage and prints \
                  its amortization table by year (or by month with --monthly). Run with \
                  no arguments for a demonstration loan, or pass PRINCIPAL YEARS RATE, \
                  e.g. `mortgage 200000 30 3.7`.",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    schedule: ScheduleArgs,

    /// Output format
    #[arg(long, value_enum, default_value = "tsv", global = true)]
    output: OutputFormat,

    /// Log calculation details to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarise every loan in a file of `principal,years,rate` records
    Batch(BatchArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Tsv,
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Some(Commands::Batch(args)) => commands::batch::run_batch(args),
        Some(Commands::Version) => {
            println!("mortgage {}", env!("CARGO_PKG_VERSION"));
            return;
        }
        None => commands::schedule::run_schedule(cli.schedule),
    };

    match result {
        Ok(value) => {
            output::format_output(cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_is_demo_mode() {
        let cli = Cli::try_parse_from(["mortgage"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.schedule.principal.is_none());
        assert_eq!(cli.output, OutputFormat::Tsv);
    }

    #[test]
    fn test_three_positional_arguments() {
        let cli = Cli::try_parse_from(["mortgage", "200000", "30", "3.7", "--monthly"]).unwrap();
        assert_eq!(cli.schedule.principal.as_deref(), Some("200000"));
        assert_eq!(cli.schedule.years.as_deref(), Some("30"));
        assert_eq!(cli.schedule.rate.as_deref(), Some("3.7"));
        assert!(cli.schedule.monthly);
    }

    #[test]
    fn test_partial_positional_arguments_are_rejected() {
        assert!(Cli::try_parse_from(["mortgage", "200000"]).is_err());
        assert!(Cli::try_parse_from(["mortgage", "200000", "30"]).is_err());
    }

    #[test]
    fn test_input_file_conflicts_with_positional() {
        assert!(
            Cli::try_parse_from(["mortgage", "--input", "loan.json", "200000", "30", "3.7"]).is_err()
        );
        assert!(Cli::try_parse_from(["mortgage", "--input", "loan.json"]).is_ok());
    }

    #[test]
    fn test_dash_input_selects_stdin() {
        let cli = Cli::try_parse_from(["mortgage", "--input", "-"]).unwrap();
        assert_eq!(cli.schedule.input.as_deref(), Some(input::STDIN_PATH));
    }

    #[test]
    fn test_batch_subcommand() {
        let cli =
            Cli::try_parse_from(["mortgage", "batch", "--input", "loans.csv", "--output", "json"])
                .unwrap();
        match cli.command {
            Some(Commands::Batch(args)) => assert_eq!(args.input.as_deref(), Some("loans.csv")),
            _ => panic!("expected batch subcommand"),
        }
        assert_eq!(cli.output, OutputFormat::Json);
    }

    #[test]
    fn test_output_formats() {
        for (flag, format) in [
            ("tsv", OutputFormat::Tsv),
            ("json", OutputFormat::Json),
            ("table", OutputFormat::Table),
            ("csv", OutputFormat::Csv),
            ("minimal", OutputFormat::Minimal),
        ] {
            let cli = Cli::try_parse_from(["mortgage", "--output", flag]).unwrap();
            assert_eq!(cli.output, format);
        }
    }
}
