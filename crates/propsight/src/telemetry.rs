//! Tracing setup for the market intelligence service.

use crate::config::TelemetryConfig;
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

/// Directives appended below the configured level so request-path and
/// metrics dependencies stay quiet when the engine itself runs at
/// `debug` (e.g. for source-chain and top-up logging).
const QUIET_DEPENDENCIES: &[&str] = &[
    "hyper=warn",
    "tower=warn",
    "metrics_exporter_prometheus=warn",
];

#[derive(Debug)]
pub enum TelemetryError {
    InvalidDirectives {
        directives: String,
        source: ParseError,
    },
    AlreadyInitialized(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::InvalidDirectives { directives, .. } => {
                write!(f, "cannot parse log filter '{directives}'")
            }
            TelemetryError::AlreadyInitialized(err) => {
                write!(f, "tracing subscriber rejected: {err}")
            }
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::InvalidDirectives { source, .. } => Some(source),
            TelemetryError::AlreadyInitialized(err) => Some(&**err),
        }
    }
}

/// Install the global subscriber: compact single-line format, no ANSI,
/// no targets. An explicit `RUST_LOG` wins over the configured level;
/// otherwise the level is combined with the dependency-quieting
/// directives.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => build_filter(&config.log_level)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::AlreadyInitialized)
}

fn build_filter(log_level: &str) -> Result<EnvFilter, TelemetryError> {
    let directives = compose_directives(log_level);
    EnvFilter::try_new(&directives)
        .map_err(|source| TelemetryError::InvalidDirectives { directives, source })
}

fn compose_directives(log_level: &str) -> String {
    let mut directives = log_level.trim().to_string();
    for dependency in QUIET_DEPENDENCIES {
        directives.push(',');
        directives.push_str(dependency);
    }
    directives
}
