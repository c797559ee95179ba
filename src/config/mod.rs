use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::workflows::underwriting::{GeocodeFallback, UnderwritingConfig};

/// Distinguishes runtime behavior for different stages of the service.
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
}

/// Top-level configuration for the service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub underwriting: UnderwritingConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let underwriting = load_underwriting_overrides(UnderwritingConfig::default())?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            underwriting,
        })
    }
}

fn load_underwriting_overrides(
    mut config: UnderwritingConfig,
) -> Result<UnderwritingConfig, ConfigError> {
    if let Ok(raw) = env::var("UNDERWRITING_STP_THRESHOLD") {
        let threshold = raw
            .trim()
            .parse::<f64>()
            .map_err(|_| ConfigError::InvalidThreshold { value: raw.clone() })?;
        if !threshold.is_finite() || !(0.0..=100.0).contains(&threshold) {
            return Err(ConfigError::InvalidThreshold { value: raw });
        }
        config.stp_threshold = threshold;
    }

    if let Ok(raw) = env::var("UNDERWRITING_GEOCODE_FALLBACK") {
        config.geocode_fallback = match raw.trim().to_ascii_lowercase().as_str() {
            "enabled" => GeocodeFallback::Enabled,
            "disabled" => GeocodeFallback::Disabled,
            _ => return Err(ConfigError::InvalidFallback { value: raw }),
        };
    }

    if let Ok(raw) = env::var("UNDERWRITING_GEOCODE_TIMEOUT_MS") {
        config.geocode_timeout_ms = parse_timeout("UNDERWRITING_GEOCODE_TIMEOUT_MS", &raw)?;
    }

    if let Ok(raw) = env::var("UNDERWRITING_EVALUATOR_TIMEOUT_MS") {
        config.evaluator_timeout_ms = parse_timeout("UNDERWRITING_EVALUATOR_TIMEOUT_MS", &raw)?;
    }

    Ok(config)
}

fn parse_timeout(key: &'static str, raw: &str) -> Result<u64, ConfigError> {
    let millis = raw.trim().parse::<u64>().map_err(|_| ConfigError::InvalidTimeout {
        key,
        value: raw.to_string(),
    })?;
    if millis == 0 {
        return Err(ConfigError::InvalidTimeout {
            key,
            value: raw.to_string(),
        });
    }
    Ok(millis)
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidThreshold { value: String },
    InvalidFallback { value: String },
    InvalidTimeout { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidThreshold { value } => write!(
                f,
                "UNDERWRITING_STP_THRESHOLD must be a number in 0..=100, got '{value}'"
            ),
            ConfigError::InvalidFallback { value } => write!(
                f,
                "UNDERWRITING_GEOCODE_FALLBACK must be 'enabled' or 'disabled', got '{value}'"
            ),
            ConfigError::InvalidTimeout { key, value } => {
                write!(f, "{key} must be a positive integer of milliseconds, got '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
        }
    }
}
