use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Deployment stage of the engine. Mostly informational; the demo and
/// tests run as `Development` unless `APP_ENV` says otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Test => "test",
            Self::Production => "production",
        }
    }
}

/// Environment-driven settings for the market intelligence service.
///
/// Variables: `APP_ENV`, `APP_HOST`, `APP_PORT`, `APP_LOG_LEVEL`, and
/// `APP_LISTING_FEED` (path to a live listing CSV export consulted
/// ahead of synthetic generation). A `.env` file is honored when
/// present.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub markets: MarketDataConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let raw_port = env::var("APP_PORT").unwrap_or_else(|_| "3000".to_string());
        let port = raw_port
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort { value: raw_port })?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let listing_feed = env::var("APP_LISTING_FEED")
            .ok()
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            markets: MarketDataConfig { listing_feed },
        })
    }
}

/// HTTP bind settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// Resolve the configured host/port into a bindable address. The
    /// `localhost` shorthand maps to the IPv4 loopback; anything else
    /// must already be a literal IP.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self.host.parse().map_err(|source| ConfigError::InvalidHost {
            host: self.host.clone(),
            source,
        })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Log filter settings consumed by [`crate::telemetry::init`].
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Base level or filter directives, e.g. `info` or
    /// `debug,propsight=trace`.
    pub log_level: String,
}

/// Settings for the live market-data inputs.
#[derive(Debug, Clone)]
pub struct MarketDataConfig {
    /// Listing CSV export consulted ahead of synthetic generation.
    /// Absent means the prediction chain starts empty and synthesizes
    /// everything.
    pub listing_feed: Option<PathBuf>,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort { value: String },
    InvalidHost {
        host: String,
        source: std::net::AddrParseError,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort { value } => {
                write!(f, "APP_PORT '{value}' is not a valid u16")
            }
            ConfigError::InvalidHost { host, .. } => {
                write!(f, "APP_HOST '{host}' is neither 'localhost' nor a literal IP")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort { .. } => None,
            ConfigError::InvalidHost { source, .. } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_HOST");
        env::remove_var("APP_PORT");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("APP_LISTING_FEED");
    }

    #[test]
    fn empty_environment_yields_development_defaults() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.environment.label(), "development");
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert!(config.markets.listing_feed.is_none());
    }

    #[test]
    fn listing_feed_path_comes_from_the_environment() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_LISTING_FEED", "/var/data/listings.csv");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(
            config.markets.listing_feed,
            Some(PathBuf::from("/var/data/listings.csv"))
        );
        env::remove_var("APP_LISTING_FEED");
    }

    #[test]
    fn blank_listing_feed_counts_as_absent() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_LISTING_FEED", "   ");
        let config = AppConfig::load().expect("config loads");
        assert!(config.markets.listing_feed.is_none());
        env::remove_var("APP_LISTING_FEED");
    }

    #[test]
    fn localhost_shorthand_binds_loopback() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        env::remove_var("APP_HOST");
    }

    #[test]
    fn invalid_port_error_carries_the_offending_value() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_PORT", "ninety");
        let error = AppConfig::load().expect_err("expected port error");
        match error {
            ConfigError::InvalidPort { value } => assert_eq!(value, "ninety"),
            other => panic!("expected InvalidPort, got {other:?}"),
        }
        env::remove_var("APP_PORT");
    }

    #[test]
    fn hostname_other_than_localhost_is_rejected() {
        let server = ServerConfig {
            host: "markets.internal".to_string(),
            port: 3000,
        };
        let error = server.socket_addr().expect_err("expected host error");
        match error {
            ConfigError::InvalidHost { host, .. } => assert_eq!(host, "markets.internal"),
            other => panic!("expected InvalidHost, got {other:?}"),
        }
    }

    #[test]
    fn environment_names_normalize_loosely() {
        assert_eq!(
            AppEnvironment::from_str(" PROD "),
            AppEnvironment::Production
        );
        assert_eq!(AppEnvironment::from_str("ci"), AppEnvironment::Test);
        assert_eq!(
            AppEnvironment::from_str("anything-else"),
            AppEnvironment::Development
        );
    }
}
