//! Asistencia admin console
//!
//! Command line front end for the municipal attendance backend.
//!
//! # Usage
//!
//! ```bash
//! asistencia login -u admin
//! asistencia dashboard
//! asistencia asistencias --desde 2026-10-01 --hasta 2026-10-18
//! asistencia registrar --tipo plania --dni 45678912 --buscar-dni ...
//! ```

mod cli;
mod commands;
mod logger;
mod session_file;

use std::process::ExitCode;
use std::time::Duration;

use asistencia_client::ClientConfig;
use clap::Parser;

use crate::cli::Cli;
use crate::commands::App;
use crate::session_file::SessionFile;

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let _log_guard = match logger::init_logger(cli.log_dir.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("No se pudo iniciar el registro de logs: {e:#}");
            None
        }
    };

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("[ERROR] {}", commands::describe_error(&e));
            return ExitCode::FAILURE;
        }
    };
    tracing::debug!(base_url = %config.base_url, timeout = ?config.timeout, "Configuration loaded");

    let app = App::new(config, SessionFile::new(cli.token_file));
    match app.run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "Command failed");
            eprintln!("[ERROR] {}", commands::describe_error(&e));
            ExitCode::FAILURE
        }
    }
}

/// Environment first, then command line overrides
fn build_config(cli: &Cli) -> anyhow::Result<ClientConfig> {
    let mut config = ClientConfig::from_env();
    if let Some(url) = &cli.api_url {
        config = config.with_base_url(url.as_str());
    }
    if let Some(secs) = cli.timeout {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    if let Some(policy) = cli.acceptance {
        config = config.with_acceptance(policy);
    }
    config.validate()?;
    Ok(config)
}
