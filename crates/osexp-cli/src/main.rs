//! osexp: a command-line filesystem explorer with a reversible trash.
//!
//! This binary parses arguments, sets up logging, loads the config file,
//! and hands the subcommand to [`commands::execute`].

mod cli;
mod commands;
mod render;

use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use osexp_core::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::Cli;

/// Environment variable holding a `tracing` filter directive.
const LOG_ENV: &str = "OSEXP_LOG";

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "osexp_core=debug,osexp=debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| default.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    match explicit {
        Some(path) => {
            Config::load(path).with_context(|| format!("loading config {}", path.display()))
        }
        None => match Config::default_path() {
            Some(path) => Config::load_or_default(&path)
                .with_context(|| format!("loading config {}", path.display())),
            None => Ok(Config::default()),
        },
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let mut stdout = std::io::stdout().lock();
    commands::execute(&cli.command, &config, &mut stdout)?;
    stdout.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!("command failed: {err:?}");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
