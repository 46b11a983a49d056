//! Entry point for the `tr-catalog` command.

use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser;
use tr_catalog::cli::{
    self,
    Cli,
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Installs the stderr logger and, with `--log-file`, a file logger.
///
/// `RUST_LOG` overrides the default filter.
fn init_logging(verbose: bool, log_file: Option<&Path>) -> anyhow::Result<Option<WorkerGuard>> {
    let default_filter = if verbose { "tr_catalog=debug" } else { "tr_catalog=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            (Some(fmt::layer().with_ansi(false).with_writer(writer)), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(file_layer)
        .init();

    Ok(guard)
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let _guard = match init_logging(cli.verbose, cli.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(err) => {
            let _ = writeln!(std::io::stderr(), "error: {err:#}");
            return ExitCode::from(2);
        }
    };

    let mut stdout = std::io::stdout().lock();
    match cli::run(cli, &mut stdout).await {
        Ok(status) => status.into(),
        Err(err) => {
            tracing::debug!(?err, "Command failed");
            let _ = writeln!(std::io::stderr(), "error: {err:#}");
            ExitCode::from(2)
        }
    }
}
