//! CLI entry point for buildinfo.

mod app;
mod cli;

use std::env;

use buildinfo::command::SystemCommandRunner;
use clap::Parser;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::app::Application;

fn main() {
    let args = cli::Args::parse();

    let filter = match log_filter(env::var("RUST_LOG").ok().as_deref(), &args.log_level) {
        Ok(filter) => filter,
        Err(msg) => {
            eprintln!("error: {msg}");
            std::process::exit(1);
        }
    };
    // Log to stderr; stdout is reserved for the JSON record.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = Application::from(&args).run(&SystemCommandRunner) {
        tracing::debug!(error = ?e, "buildinfo failed");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

/// Non-empty `RUST_LOG` directives win over `--log-level`, which must name a
/// level (`off`, `error`, `warn`, `info`, `debug`, `trace`).
fn log_filter(rust_log: Option<&str>, level: &str) -> Result<EnvFilter, String> {
    if let Some(directives) = rust_log.filter(|d| !d.trim().is_empty()) {
        return EnvFilter::try_new(directives)
            .map_err(|e| format!("invalid RUST_LOG `{directives}`: {e}"));
    }

    let level = level
        .trim()
        .parse::<LevelFilter>()
        .map_err(|e| format!("invalid log level `{level}`: {e}"))?;
    Ok(EnvFilter::new(level.to_string()))
}
