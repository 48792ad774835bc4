//! Application settings loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use super::constants::{
    DEFAULT_ACTIVITY_LOG_INTERVAL_MS, DEFAULT_DATABASE_URL, DEFAULT_DATA_DIR,
    DEFAULT_JWT_EXPIRATION_HOURS, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
    MIN_JWT_SECRET_LENGTH,
};
use crate::errors::{AppError, AppResult};

/// Which repository adapter backs the services
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum StorageBackend {
    /// JSON-lines files under `DATA_DIR`
    File,
    /// PostgreSQL via SeaORM
    Postgres,
}

impl FromStr for StorageBackend {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "file" => Ok(StorageBackend::File),
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            other => Err(AppError::internal(format!(
                "Unknown STORAGE_BACKEND '{}', expected 'file' or 'postgres'",
                other
            ))),
        }
    }
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub server_host: String,
    pub server_port: u16,
    pub storage_backend: StorageBackend,
    pub data_dir: PathBuf,
    pub activity_log_interval: Duration,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("storage_backend", &self.storage_backend)
            .field("data_dir", &self.data_dir)
            .field("activity_log_interval", &self.activity_log_interval)
            .finish()
    }
}

impl Config {
    /// Configuration with defaults for everything except the signing secret.
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            jwt_secret: jwt_secret.into(),
            jwt_expiration_hours: DEFAULT_JWT_EXPIRATION_HOURS,
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            storage_backend: StorageBackend::File,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            activity_log_interval: Duration::from_millis(DEFAULT_ACTIVITY_LOG_INTERVAL_MS),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Fails if JWT_SECRET is missing in a release build or shorter than
    /// the minimum length, or if STORAGE_BACKEND is not recognised.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set, using insecure default for development");
                "dev-secret-key-minimum-32-chars!!".to_string()
            }
            Err(_) => {
                return Err(AppError::internal(
                    "JWT_SECRET environment variable must be set in production",
                ))
            }
        };

        if jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(AppError::internal(format!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            )));
        }

        let storage_backend = match env::var("STORAGE_BACKEND") {
            Ok(value) => value.parse()?,
            Err(_) => StorageBackend::File,
        };

        let mut config = Self::new(jwt_secret);
        config.storage_backend = storage_backend;

        if let Ok(url) = env::var("DATABASE_URL") {
            config.database_url = url;
        }
        if let Some(hours) = env::var("JWT_EXPIRATION_HOURS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.jwt_expiration_hours = hours;
        }
        if let Ok(host) = env::var("SERVER_HOST") {
            config.server_host = host;
        }
        if let Some(port) = env::var("SERVER_PORT").ok().and_then(|v| v.parse().ok()) {
            config.server_port = port;
        }
        if let Ok(dir) = env::var("DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(ms) = env::var("ACTIVITY_LOG_INTERVAL_MS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.activity_log_interval = Duration::from_millis(ms);
        }

        Ok(config)
    }

    /// Get JWT secret bytes for token signing/verification.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_backend_parse() {
        assert_eq!("file".parse::<StorageBackend>().unwrap(), StorageBackend::File);
        assert_eq!(
            "Postgres".parse::<StorageBackend>().unwrap(),
            StorageBackend::Postgres
        );
        assert!("mongo".parse::<StorageBackend>().is_err());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = Config::new("super-secret-signing-key-0123456789");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_server_addr() {
        let mut config = Config::new("x".repeat(32));
        config.server_host = "127.0.0.1".to_string();
        config.server_port = 8080;
        assert_eq!(config.server_addr(), "127.0.0.1:8080");
    }
}
