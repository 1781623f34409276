use std::net::SocketAddr;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Application configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub import: ImportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: Option<String>,
    pub format: String, // "json" or "text"
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Upper bound for uploaded spreadsheet/CSV bodies, in bytes
    pub max_upload_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                bind_address: "127.0.0.1".to_string(),
                port: 8000,
            },
            database: DatabaseConfig {
                path: "data/basta.db".to_string(),
                max_connections: 10,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: None,
                format: "text".to_string(),
            },
            import: ImportConfig {
                max_upload_bytes: 10 * 1024 * 1024,
            },
        }
    }
}

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// defaults, then `config/default` and `config/local` files if present,
    /// then `BASTA_*` environment variables.
    pub fn load() -> Result<Self> {
        let defaults = AppConfig::default();

        let config = Config::builder()
            .set_default("server.bind_address", defaults.server.bind_address)
            .and_then(|b| b.set_default("server.port", i64::from(defaults.server.port)))
            .and_then(|b| b.set_default("database.path", defaults.database.path))
            .and_then(|b| {
                b.set_default(
                    "database.max_connections",
                    i64::from(defaults.database.max_connections),
                )
            })
            .and_then(|b| b.set_default("logging.level", defaults.logging.level))
            .and_then(|b| b.set_default("logging.format", defaults.logging.format))
            .and_then(|b| {
                b.set_default(
                    "import.max_upload_bytes",
                    defaults.import.max_upload_bytes as i64,
                )
            })
            .map_err(|e| AppError::InvalidConfig(e.to_string()))?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(Environment::with_prefix("BASTA").separator("__"))
            .build()
            .map_err(|e| AppError::InvalidConfig(e.to_string()))?;

        let app_config: AppConfig = config
            .try_deserialize()
            .map_err(|e| AppError::InvalidConfig(e.to_string()))?;

        app_config.validate()?;

        Ok(app_config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.server.bind_address.trim().is_empty() {
            return Err(AppError::InvalidConfig(
                "bind_address must not be empty".to_string(),
            ));
        }
        if self.server.port == 0 {
            return Err(AppError::InvalidConfig(
                "port must be greater than 0".to_string(),
            ));
        }

        if self.database.path.trim().is_empty() {
            return Err(AppError::InvalidConfig(
                "database path must not be empty".to_string(),
            ));
        }
        if self.database.max_connections == 0 {
            return Err(AppError::InvalidConfig(
                "max_connections must be greater than 0".to_string(),
            ));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(AppError::InvalidConfig(format!(
                "invalid log level: {}. Must be one of: {valid_levels:?}",
                self.logging.level
            )));
        }

        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            return Err(AppError::InvalidConfig(format!(
                "invalid log format: {}. Must be one of: {valid_formats:?}",
                self.logging.format
            )));
        }

        if self.import.max_upload_bytes == 0 {
            return Err(AppError::InvalidConfig(
                "max_upload_bytes must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Get database path from environment or config
    #[must_use]
    pub fn get_database_path(&self) -> String {
        std::env::var("DATABASE_PATH").unwrap_or_else(|_| self.database.path.clone())
    }

    /// Get log level from environment or config
    #[must_use]
    pub fn get_log_level(&self) -> String {
        std::env::var("RUST_LOG").unwrap_or_else(|_| self.logging.level.clone())
    }

    /// The socket address the server binds to
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.server.bind_address, self.server.port)
            .parse()
            .map_err(|e| AppError::InvalidConfig(format!("invalid bind address: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.database.path, "data/basta.db");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_config_validation() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_config() {
        let mut config = AppConfig::default();
        config.database.max_connections = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = AppConfig::default();
        config.logging.level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_socket_addr() {
        let config = AppConfig::default();
        let addr = config.socket_addr().expect("valid address");
        assert_eq!(addr.port(), 8000);
    }
}
