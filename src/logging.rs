use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_LOG_DIR: &str = "./logs";
const DEFAULT_LOG_PREFIX: &str = "grammar-galaxy.log";

/// Flushes buffered file logs when dropped; hold it until exit.
pub struct FileLogGuard {
    _guard: WorkerGuard,
}

/// Where the daily rolling log goes: `<dir>/<prefix>.<date>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLogTarget {
    pub dir: PathBuf,
    pub prefix: String,
}

impl FileLogTarget {
    pub fn from_env() -> Self {
        Self::from_values(
            std::env::var("LOG_DIR").ok(),
            std::env::var("LOG_FILE_PREFIX").ok(),
        )
    }

    pub fn from_values(dir: Option<String>, prefix: Option<String>) -> Self {
        let dir = dir
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_DIR.to_string());
        let prefix = prefix
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_PREFIX.to_string());
        Self {
            dir: PathBuf::from(dir),
            prefix,
        }
    }
}

pub fn file_logging_enabled() -> bool {
    std::env::var("ENABLE_FILE_LOGS")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false)
}

/// Console output goes to stderr; stdout is left for program output.
pub fn init_tracing(log_level: &str) -> Option<FileLogGuard> {
    let env_filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let console_layer = fmt::layer().with_target(true).with_writer(std::io::stderr);

    let target = file_logging_enabled().then(FileLogTarget::from_env);
    let target = target.filter(|t| match std::fs::create_dir_all(&t.dir) {
        Ok(()) => true,
        Err(err) => {
            eprintln!("failed to create log directory {}: {err}", t.dir.display());
            false
        }
    });

    let (file_layer, guard) = match &target {
        Some(t) => {
            let appender = RollingFileAppender::new(Rotation::DAILY, &t.dir, &t.prefix);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true);
            (Some(layer), Some(FileLogGuard { _guard: guard }))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    if let Some(t) = &target {
        tracing::info!(dir = %t.dir.display(), prefix = %t.prefix, "daily rolling file logs enabled");
    }

    guard
}
