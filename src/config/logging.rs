use std::env;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("invalid LOG_LEVEL: {0}")]
    Filter(String),

    #[error("failed to install tracing subscriber: {0}")]
    Subscriber(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Initialize tracing from the environment.
///
/// `LOG_LEVEL` feeds an `EnvFilter` (default `info`). When `LOG_DIR` is
/// set, a daily-rotated `vetclinic.log` in that directory is written next
/// to the console output.
pub fn init_logging() -> Result<(), LoggingError> {
    let level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let filter = EnvFilter::try_new(&level).map_err(|e| LoggingError::Filter(e.to_string()))?;

    let console_layer = fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    let file_layer = match env::var("LOG_DIR") {
        Ok(dir) => {
            std::fs::create_dir_all(&dir)?;
            let appender = tracing_appender::rolling::daily(dir, "vetclinic.log");
            Some(fmt::layer().with_writer(appender).with_ansi(false))
        }
        Err(_) => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| LoggingError::Subscriber(e.to_string()))
}
