//! Probe - Main Entry Point
//!
//! Loads a suite file, runs it against a live service and reports the
//! verdicts. Exit codes: 0 pass, 1 at least one failure, 2 any error or a
//! suite that could not be loaded.

mod cli;
mod config;
mod logging;

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use probe_application::ports::Reporter;
use probe_application::{Registry, RunSuite};
use probe_domain::SuiteDefinition;
use probe_infrastructure::{
    ConsoleReporter, JsonReporter, ReportSink, ReqwestHttpClient, SystemClock, load_suite,
};
use tracing::{error, info};

use crate::cli::{Cli, Command, ReportFormat, RunArgs, ValidateArgs};

/// Exit code for anything that kept the suite from running properly.
const EXIT_HARNESS_ERROR: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Command::Run(args) => run(args).await,
        Command::Validate(args) => validate(args).await,
    };

    result.unwrap_or_else(|err| {
        error!(error = %err, "probe aborted");
        eprintln!("probe: {err:#}");
        ExitCode::from(EXIT_HARNESS_ERROR)
    })
}

/// Loads and registers a suite; nothing touches the network before this succeeds.
async fn load_registry(path: &Path) -> Result<(Registry, SuiteDefinition)> {
    let definition = load_suite(path).await?;
    let registry = Registry::from_definition(definition.clone())
        .with_context(|| format!("invalid suite {}", path.display()))?;
    Ok((registry, definition))
}

async fn run(args: RunArgs) -> Result<ExitCode> {
    let (registry, definition) = load_registry(&args.suite).await?;
    let settings = config::resolve(&args, &definition)?;
    let client = ReqwestHttpClient::new(&settings.base_url)?;

    let sink = match &args.report {
        Some(path) => ReportSink::file(path)
            .with_context(|| format!("cannot create report file {}", path.display()))?,
        None => ReportSink::stdout(),
    };
    let reporter: Box<dyn Reporter> = match args.format {
        ReportFormat::Text => Box::new(ConsoleReporter::new(sink)),
        ReportFormat::Json => Box::new(JsonReporter::new(sink)),
    };

    info!(
        suite = registry.name(),
        base_url = %settings.base_url,
        cases = registry.len(),
        "running suite"
    );
    let runner = RunSuite::new(Arc::new(client), SystemClock::new());
    let summary = runner.run(&registry, &settings.run).await;
    reporter.render(&summary);

    Ok(ExitCode::from(summary.exit_code()))
}

async fn validate(args: ValidateArgs) -> Result<ExitCode> {
    let (registry, _) = load_registry(&args.suite).await?;
    println!("{}: {} cases OK", registry.name(), registry.len());
    Ok(ExitCode::SUCCESS)
}
