//! Logging setup
//!
//! Console output filtered by `RUST_LOG`; with a log directory, a daily
//! rolling file receives the same events.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "asistencia_console=info,asistencia_client=info";

/// Initialise tracing. Keep the returned guard alive until exit so the
/// file writer can flush.
pub fn init_logger(log_dir: Option<&Path>) -> anyhow::Result<Option<WorkerGuard>> {
    let env_filter = || EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());

    let console_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(env_filter());

    let Some(dir) = log_dir else {
        tracing_subscriber::registry().with(console_layer).try_init()?;
        return Ok(None);
    };

    std::fs::create_dir_all(dir)?;
    let file_appender = tracing_appender::rolling::daily(dir, "asistencia-console.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    let file_layer = fmt::layer()
        .json()
        .with_target(true)
        .with_writer(writer)
        .with_filter(env_filter());

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()?;
    Ok(Some(guard))
}
