use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub struct FileLogGuard {
    _guard: WorkerGuard,
}

pub fn file_logging_enabled() -> bool {
    std::env::var("ENABLE_FILE_LOGS")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false)
}

/// Installs the global subscriber. File output is added when
/// `ENABLE_FILE_LOGS` is set, under `LOG_DIR` (default `./logs`).
pub fn init_tracing(log_level: &str) -> Option<FileLogGuard> {
    let log_dir = file_logging_enabled().then(|| {
        PathBuf::from(std::env::var("LOG_DIR").unwrap_or_else(|_| "./logs".to_string()))
    });
    init_tracing_with(log_level, log_dir.as_deref())
}

const LOG_FILE_PREFIX: &str = "adaptive-quiz-engine.log";

/// Like [`init_tracing`] with an explicit log directory. A subscriber that is
/// already installed is left in place. When the directory cannot be created
/// the subscriber logs to stdout only and a warning is emitted through it.
pub fn init_tracing_with(log_level: &str, log_dir: Option<&Path>) -> Option<FileLogGuard> {
    let env_filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let stdout_layer = fmt::layer().with_target(true);

    let file_setup =
        log_dir.map(|dir| std::fs::create_dir_all(dir).map(|()| dir).map_err(|err| (dir, err)));
    match file_setup {
        Some(Ok(dir)) => {
            let file_appender = RollingFileAppender::new(Rotation::DAILY, dir, LOG_FILE_PREFIX);
            let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
            let file_layer = fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false)
                .with_target(true);

            let _ = tracing_subscriber::registry()
                .with(env_filter)
                .with(stdout_layer)
                .with(file_layer)
                .try_init();

            Some(FileLogGuard { _guard: guard })
        }
        Some(Err((dir, err))) => {
            let _ = tracing_subscriber::registry()
                .with(env_filter)
                .with(stdout_layer)
                .try_init();
            tracing::warn!(
                log_dir = %dir.display(),
                error = %err,
                "log directory unavailable, file logging disabled"
            );
            None
        }
        None => {
            let _ = tracing_subscriber::registry()
                .with(env_filter)
                .with(stdout_layer)
                .try_init();
            None
        }
    }
}
