use std::process::ExitCode;

use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::config::ReportConfig;

mod config;
mod error;
mod measurement;
mod plot;
mod report;
mod table;

#[cfg(test)]
mod fixtures;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match report::run(&ReportConfig::default()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!("report failed: {err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
