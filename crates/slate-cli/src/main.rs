//! slate - Manage attendance, blog posts and contacts from the terminal.
//!
//! This is a thin view layer over `slate-core` record stores persisted as
//! JSON files in a data directory.

mod cli;
mod commands;
mod config;
mod output;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use commands::{attendance, blog, contacts};

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.json_logs);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::report(&err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let data_dir = config::data_dir(cli.data_dir)?;
    tracing::debug!(data_dir = %data_dir.display(), "Using data directory");

    match cli.command {
        Commands::Attendance(cmd) => attendance::handle(cmd, &data_dir),
        Commands::Blog(cmd) => blog::handle(cmd, &data_dir),
        Commands::Contacts(cmd) => contacts::handle(cmd, &data_dir),
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
