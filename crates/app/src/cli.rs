//! Command-line definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "probe", version, about = "Contract tests for JSON HTTP APIs")]
pub struct Cli {
    /// Log at debug level unless `PROBE_LOG` or `RUST_LOG` says otherwise.
    #[arg(short, long, global = true)]
    pub verbose: bool,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a suite against a live service.
    Run(RunArgs),
    /// Load and register a suite without sending any request.
    Validate(ValidateArgs),
}

/// Arguments of `probe run`.
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Suite file (.yaml, .yml or .json).
    #[arg(value_name = "SUITE")]
    pub suite: PathBuf,
    /// Base URL of the service under test.
    #[arg(long, value_name = "URL", env = "PROBE_BASE_URL")]
    pub base_url: Option<String>,
    /// Maximum simultaneous requests (1 = sequential).
    #[arg(long, value_name = "N", env = "PROBE_CONCURRENCY")]
    pub concurrency: Option<usize>,
    /// Per-request timeout in milliseconds.
    #[arg(long = "timeout", value_name = "MS", env = "PROBE_TIMEOUT_MS")]
    pub timeout_ms: Option<u64>,
    /// Stop dispatching new cases after the first failure or error.
    #[arg(long)]
    pub fail_fast: bool,
    /// Retries per case on transport errors.
    #[arg(long = "retry", value_name = "N", env = "PROBE_RETRY")]
    pub retry: Option<u32>,
    /// Delay before the first retry in milliseconds.
    #[arg(long, value_name = "MS")]
    pub retry_backoff: Option<u64>,
    /// How the retry delay evolves.
    #[arg(long, value_enum)]
    pub backoff: Option<BackoffKind>,
    /// Deadline for the whole run in milliseconds.
    #[arg(long = "deadline", value_name = "MS", env = "PROBE_DEADLINE_MS")]
    pub deadline_ms: Option<u64>,
    /// Report format.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
    /// Write the report to a file instead of stdout.
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,
}

/// Arguments of `probe validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Suite file (.yaml, .yml or .json).
    #[arg(value_name = "SUITE")]
    pub suite: PathBuf,
}

/// Retry delay policy selectable from the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackoffKind {
    /// Same delay before every retry.
    Fixed,
    /// Delay doubles with every retry.
    Exponential,
}

/// Report renderers.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// One line per case plus a summary.
    #[default]
    Text,
    /// The full run summary as JSON.
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run_flags() {
        let cli = Cli::try_parse_from([
            "probe",
            "run",
            "demos/deals.yaml",
            "--base-url",
            "http://localhost:5000",
            "--concurrency",
            "4",
            "--timeout",
            "2500",
            "--retry",
            "2",
            "--backoff",
            "exponential",
            "--fail-fast",
            "--format",
            "json",
        ])
        .expect("valid arguments");

        let Command::Run(args) = cli.command else {
            panic!("expected run command");
        };
        assert_eq!(args.suite, PathBuf::from("demos/deals.yaml"));
        assert_eq!(args.base_url.as_deref(), Some("http://localhost:5000"));
        assert_eq!(args.concurrency, Some(4));
        assert_eq!(args.timeout_ms, Some(2500));
        assert_eq!(args.retry, Some(2));
        assert_eq!(args.backoff, Some(BackoffKind::Exponential));
        assert!(args.fail_fast);
        assert_eq!(args.format, ReportFormat::Json);
    }

    #[test]
    fn test_run_requires_suite() {
        assert!(Cli::try_parse_from(["probe", "run"]).is_err());
    }
}
