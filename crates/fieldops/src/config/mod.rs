use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::workflows::coaching::RatingPolicy;

const DEFAULT_TOP_PERFORMERS: usize = 5;

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
    pub coaching: CoachingConfig,
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

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            coaching: CoachingConfig::from_env()?,
        })
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

/// Rubric intake and reporting knobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoachingConfig {
    pub rating_policy: RatingPolicy,
    pub top_performers: usize,
}

impl CoachingConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let rating_policy = match env::var("COACHING_RATING_POLICY") {
            Ok(raw) => RatingPolicy::parse(&raw).ok_or(ConfigError::InvalidRatingPolicy(raw))?,
            Err(_) => RatingPolicy::default(),
        };

        let top_performers = match env::var("COACHING_TOP_PERFORMERS") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidTopPerformers)?,
            Err(_) => DEFAULT_TOP_PERFORMERS,
        };

        Ok(Self {
            rating_policy,
            top_performers,
        })
    }
}

impl Default for CoachingConfig {
    fn default() -> Self {
        Self {
            rating_policy: RatingPolicy::default(),
            top_performers: DEFAULT_TOP_PERFORMERS,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidRatingPolicy(String),
    InvalidTopPerformers,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidRatingPolicy(value) => write!(
                f,
                "COACHING_RATING_POLICY must be 'reject' or 'clamp' (found '{value}')"
            ),
            ConfigError::InvalidTopPerformers => {
                write!(f, "COACHING_TOP_PERFORMERS must be a non-negative integer")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidRatingPolicy(_)
            | ConfigError::InvalidTopPerformers => None,
        }
    }
}
