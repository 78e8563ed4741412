//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Public URL prefix under which stored photos are served.
pub const UPLOADS_PUBLIC_PREFIX: &str = "/uploads";

/// Development default values - NEVER rely on these in production.
pub mod defaults {
    pub const DEV_HOST: &str = "127.0.0.1";
    pub const DEV_PORT: u16 = 8080;
    pub const DEV_UPLOAD_DIR: &str = "public/uploads";
    pub const DEV_SOURCE_URL: &str =
        "https://rwl.artport.pro/commercialAgent/hs/CarrWorkApp/VagonInfo";
    pub const DEV_FETCH_TIMEOUT_SECS: u64 = 5; // upstream wagon registry timeout
    pub const DEV_MAX_UPLOAD_SIZE: usize = 10_485_760; // 10MB per photo
}

/// Runtime environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Parse environment from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Some(Self::Development),
            "production" | "prod" => Some(Self::Production),
            _ => None,
        }
    }

    /// Check if this is a development environment.
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    /// Check if this is a production environment.
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Runtime environment
    pub environment: Environment,
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Directory holding uploaded wagon photos (flat, one file per wagon)
    pub upload_dir: PathBuf,
    /// URL of the upstream wagon registry endpoint
    pub source_url: String,
    /// Timeout applied to upstream wagon registry fetches
    pub fetch_timeout_secs: u64,
    /// Maximum photo upload size in bytes (default: 10MB)
    pub max_upload_size: usize,
    /// Directory for static frontend assets (production only)
    pub static_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// In development mode (RUST_ENV=development):
    /// - All variables have sensible defaults
    /// - Only RUST_ENV is required
    ///
    /// In production mode (RUST_ENV=production):
    /// - VAGON_UPLOAD_DIR must be set to an absolute path
    ///
    /// Environment variables:
    /// - `RUST_ENV`: Environment (development/production) - REQUIRED
    /// - `VAGON_HOST`: Server host (default: 127.0.0.1)
    /// - `VAGON_PORT`: Server port (default: 8080)
    /// - `VAGON_UPLOAD_DIR`: Photo upload directory (default: public/uploads)
    /// - `VAGON_SOURCE_URL`: Upstream wagon registry URL
    /// - `VAGON_FETCH_TIMEOUT_SECS`: Upstream fetch timeout in seconds (default: 5)
    /// - `VAGON_MAX_UPLOAD_SIZE`: Max photo size in bytes (default: 10MB)
    /// - `VAGON_STATIC_DIR`: Static assets directory for production
    pub fn from_env() -> Result<Self, ConfigError> {
        // Parse environment - required
        let env_str = env::var("RUST_ENV").map_err(|_| ConfigError::MissingEnvVar("RUST_ENV"))?;

        let environment = Environment::parse(&env_str).ok_or(ConfigError::InvalidValue(
            "RUST_ENV must be 'development' or 'production'",
        ))?;

        // Load values with defaults
        let host = env::var("VAGON_HOST").unwrap_or_else(|_| defaults::DEV_HOST.to_string());

        let port = env::var("VAGON_PORT")
            .unwrap_or_else(|_| defaults::DEV_PORT.to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidValue("VAGON_PORT must be a valid port number"))?;

        let upload_dir = PathBuf::from(
            env::var("VAGON_UPLOAD_DIR").unwrap_or_else(|_| defaults::DEV_UPLOAD_DIR.to_string()),
        );

        let source_url =
            env::var("VAGON_SOURCE_URL").unwrap_or_else(|_| defaults::DEV_SOURCE_URL.to_string());

        let fetch_timeout_secs = env::var("VAGON_FETCH_TIMEOUT_SECS")
            .unwrap_or_else(|_| defaults::DEV_FETCH_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| {
                ConfigError::InvalidValue("VAGON_FETCH_TIMEOUT_SECS must be a valid number")
            })?;

        let max_upload_size = env::var("VAGON_MAX_UPLOAD_SIZE")
            .unwrap_or_else(|_| defaults::DEV_MAX_UPLOAD_SIZE.to_string())
            .parse::<usize>()
            .map_err(|_| {
                ConfigError::InvalidValue("VAGON_MAX_UPLOAD_SIZE must be a valid number")
            })?;

        let static_dir = env::var("VAGON_STATIC_DIR").ok().map(PathBuf::from);

        let config = Config {
            environment,
            host,
            port,
            upload_dir,
            source_url,
            fetch_timeout_secs,
            max_upload_size,
            static_dir,
        };

        // Validate production configuration
        if environment.is_production() {
            config.validate_production()?;
        }

        Ok(config)
    }

    /// Validate that production configuration does not use development defaults.
    fn validate_production(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if !self.upload_dir.is_absolute() {
            errors.push(format!(
                "VAGON_UPLOAD_DIR is '{}', which resolves relative to the working directory. \
                 Set an absolute path in production.",
                self.upload_dir.display()
            ));
        }

        if !errors.is_empty() {
            return Err(ConfigError::ProductionValidation(errors));
        }

        Ok(())
    }

    /// Get the server bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the upstream fetch timeout as a Duration.
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Check if running in development mode.
    pub fn is_development(&self) -> bool {
        self.environment.is_development()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(&'static str),

    #[error("Production configuration validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    ProductionValidation(Vec<String>),
}
