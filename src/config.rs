use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::crosscheck::config::{
    ValidationConfig, DEFAULT_ADDRESS_THRESHOLD, DEFAULT_CONVICTION_THRESHOLD,
    DEFAULT_NAME_THRESHOLD, DEFAULT_POLICY_GAP_DAYS,
};

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

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub validation: ValidationConfig,
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

        let validation = ValidationConfig {
            name_similarity_threshold: threshold_var(
                "CROSSCHECK_NAME_THRESHOLD",
                DEFAULT_NAME_THRESHOLD,
            )?,
            address_similarity_threshold: threshold_var(
                "CROSSCHECK_ADDRESS_THRESHOLD",
                DEFAULT_ADDRESS_THRESHOLD,
            )?,
            conviction_similarity_threshold: threshold_var(
                "CROSSCHECK_CONVICTION_THRESHOLD",
                DEFAULT_CONVICTION_THRESHOLD,
            )?,
            policy_gap_tolerance_days: match env::var("CROSSCHECK_POLICY_GAP_DAYS") {
                Ok(raw) => raw
                    .trim()
                    .parse::<u32>()
                    .map_err(|_| ConfigError::InvalidGapDays)?,
                Err(_) => DEFAULT_POLICY_GAP_DAYS,
            },
            ..ValidationConfig::default()
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            validation,
        })
    }
}

fn threshold_var(name: &'static str, default: f32) -> Result<f32, ConfigError> {
    let Ok(raw) = env::var(name) else {
        return Ok(default);
    };
    match raw.trim().parse::<f32>() {
        Ok(value) if value > 0.0 && value <= 1.0 => Ok(value),
        _ => Err(ConfigError::InvalidThreshold { name, value: raw }),
    }
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

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidThreshold { name: &'static str, value: String },
    InvalidGapDays,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidThreshold { name, value } => {
                write!(f, "{name} must be a ratio in (0, 1], got '{value}'")
            }
            ConfigError::InvalidGapDays => {
                write!(f, "CROSSCHECK_POLICY_GAP_DAYS must be a non-negative number of days")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidThreshold { .. }
            | ConfigError::InvalidGapDays => None,
        }
    }
}
