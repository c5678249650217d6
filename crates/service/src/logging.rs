use std::path::Path;

use anyhow::{Context, Result};
use core_types::config::LoggingConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber described by `cfg`.
///
/// `RUST_LOG` wins over `cfg.level`. When `cfg.file` is set the returned
/// guard flushes the background writer on drop and must outlive logging.
pub fn init_tracing_with_config(cfg: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cfg.level))
        .with_context(|| format!("invalid log level {:?}", cfg.level))?;

    let file = cfg.file.trim();
    if file.is_empty() {
        let registry = tracing_subscriber::registry().with(filter);
        let installed = if cfg.json {
            registry
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .try_init()
        } else {
            registry
                .with(fmt::layer().with_writer(std::io::stderr))
                .try_init()
        };
        installed.context("tracing subscriber already installed")?;
        return Ok(None);
    }

    let path = Path::new(file);
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;
    let file_name = path
        .file_name()
        .with_context(|| format!("log path {file} has no file name"))?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let registry = tracing_subscriber::registry().with(filter);
    let installed = if cfg.json {
        registry
            .with(fmt::layer().json().with_writer(writer))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_ansi(false).with_writer(writer))
            .try_init()
    };
    installed.context("tracing subscriber already installed")?;
    Ok(Some(guard))
}
