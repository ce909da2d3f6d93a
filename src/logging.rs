use std::fs;
use std::path::PathBuf;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Logging configuration.
///
/// # Environment Variables
///
/// - `LOG_LEVEL`: level for the eduke crates (default: `info`)
/// - `LOG_DIR`: directory for daily rolling log files (default: console only)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogConfig {
    pub level: String,
    pub dir: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: None,
        }
    }
}

impl LogConfig {
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            level: var("LOG_LEVEL")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.level),
            dir: var("LOG_DIR")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
        }
    }

    /// Filter directive used when `RUST_LOG` is not set.
    fn directive(&self) -> String {
        format!(
            "eduke={level},eduke_cache={level},eduke_client={level},reqwest=warn,hyper=warn",
            level = self.level
        )
    }
}

/// Install the global subscriber.
///
/// Console output goes to stderr so command output on stdout stays
/// machine-readable. With a log directory configured, a JSON file layer is
/// added that rotates daily.
pub fn init_tracing(config: &LogConfig) -> anyhow::Result<()> {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.directive()));

    let console_layer = fmt::layer()
        .compact()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_filter(console_filter);

    let file_layer = match &config.dir {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            let appender = RollingFileAppender::new(Rotation::DAILY, dir, "eduke.json");

            Some(
                fmt::layer()
                    .json()
                    .with_writer(appender)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_filter(EnvFilter::new(config.directive())),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    Ok(())
}
