//! Subscriber setup for applications embedding the engine.

use anyhow::Result;
use std::ffi::OsStr;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Installs a colored stderr layer (`RUST_LOG`, default `info`) and a JSON
/// daily rolling file layer (`RUST_LOG_JSON`, default `debug`).
///
/// The file location comes from `LOG_FILE_PATH`, defaulting to
/// `logs/parade_throws.log`. Keep the returned guard alive for as long as
/// file logging should flush.
pub fn init() -> Result<WorkerGuard> {
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/parade_throws.log".to_string());
    init_with_file(log_file_path)
}

/// Like [`init`], with the log file location given explicitly.
pub fn init_with_file(log_file_path: impl AsRef<Path>) -> Result<WorkerGuard> {
    let log_file_path = log_file_path.as_ref();
    let log_dir = log_file_path.parent().unwrap_or(Path::new("logs"));
    let log_file_name = log_file_path
        .file_name()
        .unwrap_or(OsStr::new("parade_throws.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(env_filter("RUST_LOG", "info"));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(env_filter("RUST_LOG_JSON", "debug"));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .try_init()?;

    Ok(guard)
}

/// Directives from `var`, or `default` when it is unset or invalid.
fn env_filter(var: &str, default: &str) -> EnvFilter {
    EnvFilter::try_from_env(var).unwrap_or_else(|_| EnvFilter::new(default))
}
