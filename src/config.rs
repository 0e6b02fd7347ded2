// Configuration module
// Layers an optional portfolio.toml file under plain environment variables.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Bind address, wildcard by default
    pub host: String,
    /// Listen port
    pub port: u16,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// Log each request to the access log
    #[serde(default = "default_access_log")]
    pub access_log: bool,
    /// Access log format (combined, common, or json)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log() -> bool {
    true
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            access_log: default_access_log(),
            access_log_format: default_access_log_format(),
            access_log_file: None,
            error_log_file: None,
        }
    }
}

impl Config {
    /// Load configuration from `portfolio.toml` (if present) and the
    /// `PORT` / `HOST` environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("portfolio")
    }

    /// Load configuration from the specified file path (without extension).
    ///
    /// Environment variables override file values; built-in defaults fill
    /// the rest (`0.0.0.0:8080`).
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::default())
            .set_default("host", "0.0.0.0")?
            .set_default("port", 8080)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_and_env_override() {
        // Defaults apply when neither file nor environment provide values
        let cfg = Config::load_from("no-such-config-file").unwrap();
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 8080);
        assert!(cfg.logging.access_log);
        assert_eq!(cfg.logging.access_log_format, "combined");
        assert!(cfg.logging.access_log_file.is_none());

        // PORT wins over the default
        std::env::set_var("PORT", "9090");
        let cfg = Config::load_from("no-such-config-file").unwrap();
        assert_eq!(cfg.port, 9090);
        std::env::remove_var("PORT");
    }

    #[test]
    fn socket_addr_parses() {
        let cfg = Config {
            host: "127.0.0.1".to_string(),
            port: 8080,
            logging: LoggingConfig::default(),
        };
        assert_eq!(cfg.socket_addr().unwrap().to_string(), "127.0.0.1:8080");
    }

    #[test]
    fn socket_addr_rejects_bad_host() {
        let cfg = Config {
            host: "not a host".to_string(),
            port: 8080,
            logging: LoggingConfig::default(),
        };
        assert!(cfg.socket_addr().is_err());
    }
}
