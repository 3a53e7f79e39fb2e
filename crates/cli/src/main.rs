//! collective-bot CLI entry point.
//!
//! This binary is the composition root. Responsibilities:
//!
//! 1. **Parse configuration**: merge defaults, `collective-bot.toml`,
//!    `COLLECTIVE_BOT_*` environment variables, and flags (see [`config`]).
//! 2. **Wire observability**: install `tracing-subscriber` with a pretty or
//!    JSON layer and, when configured, an OpenTelemetry OTLP exporter. Every
//!    span emitted by the `issues` and `github` crates flows through it.
//! 3. **Construct infrastructure**: build a [`github::GithubClient`] and hand
//!    it to the `issues` operations as a `&dyn RemoteIssueClient`.
//! 4. **Run one subcommand** and print its outcome on stdout.

mod commands;
mod config;
mod telemetry;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info_span, Instrument};
use uuid::Uuid;

use crate::commands::{Command, OutputFormat};
use crate::config::{CliConfig, CliOverrides, LogFormat};

/// Posts comments and manages labels on GitHub issues.
#[derive(Debug, Parser)]
#[command(name = "collective-bot", version, about)]
struct Cli {
    /// Config file (TOML). Defaults to ./collective-bot.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// GitHub REST root, e.g. https://ghe.example.com/api/v3.
    #[arg(long, global = true)]
    api_base_url: Option<String>,

    /// Token sent as a bearer token.
    #[arg(long, global = true, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Colour for labels created during `label` (six hex digits, no '#').
    #[arg(long, global = true)]
    label_color: Option<String>,

    /// Log format on stderr.
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    /// Output format on stdout.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            api_base_url: self.api_base_url.clone(),
            token: self.token.clone(),
            label_color: self.label_color.clone(),
            log_format: self.log_format,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match CliConfig::load(cli.config.as_deref(), &cli.overrides()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: invalid configuration: {err}");
            return ExitCode::FAILURE;
        }
    };

    let _telemetry = match telemetry::init(&config) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("error: {err:#}");
            return ExitCode::FAILURE;
        }
    };

    let span = info_span!(
        "invocation",
        invocation_id = %Uuid::new_v4(),
        command = cli.command.name()
    );
    match run(&cli, &config).instrument(span).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %format!("{err:#}"), "command failed");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli, config: &CliConfig) -> Result<()> {
    let client =
        github::GithubClient::new(config.github()).context("failed to construct GitHub client")?;

    let outcome = commands::execute(&cli.command, &client, &config.label_color).await?;
    println!("{}", outcome.render(cli.output)?);
    Ok(())
}
