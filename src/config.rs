//! Configuration management for session-todos.
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. Configuration file (JSON)
//! 4. Default values

use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cli::Args;
use crate::session::{SessionConfig, DEFAULT_IDLE_TIMEOUT_SECS};
use crate::web::ServerConfig;

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerSection,
    /// Session configuration.
    pub session: SessionSection,
    /// Logging configuration.
    pub logging: LoggingSection,
}

/// Server configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Enable graceful shutdown.
    pub graceful_shutdown: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 4567,
            graceful_shutdown: true,
        }
    }
}

/// Session configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSection {
    /// Cookie carrying the session ID.
    pub cookie_name: String,
    /// Idle seconds before a session is discarded.
    pub idle_timeout_secs: u64,
    /// Mark the cookie `Secure` (HTTPS only).
    pub secure_cookie: bool,
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            cookie_name: "todo_session".to_string(),
            idle_timeout_secs: DEFAULT_IDLE_TIMEOUT_SECS,
            secure_cookie: false,
        }
    }
}

/// Logging configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level or filter directive (error, warn, info, debug, trace).
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Apply environment variable overrides.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable lookup (for testing).
    pub fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("SESSION_TODOS_HOST") {
            self.server.host = host;
        }

        if let Some(port) = lookup("SESSION_TODOS_PORT").and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }

        if let Some(ttl) = lookup("SESSION_TODOS_SESSION_TTL").and_then(|t| t.parse().ok()) {
            self.session.idle_timeout_secs = ttl;
        }

        if let Some(level) = lookup("SESSION_TODOS_LOG_LEVEL").or_else(|| lookup("RUST_LOG")) {
            self.logging.level = level;
        }
    }

    /// Apply CLI argument overrides.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(host) = args.host {
            self.server.host = host.to_string();
        }

        if let Some(port) = args.port {
            self.server.port = port;
        }

        if let Some(ttl) = args.session_ttl {
            self.session.idle_timeout_secs = ttl;
        }

        if let Some(ref level) = args.log_level {
            self.logging.level = level.clone();
        }
    }

    /// Load configuration with full priority chain.
    ///
    /// Priority: CLI args > env vars > config file > defaults
    pub fn load(args: &Args) -> Result<Self, ConfigError> {
        let mut config = match args.config {
            Some(ref path) => Config::from_file(path)?,
            None => Config::default(),
        };

        config.apply_env();
        config.apply_args(args);

        Ok(config)
    }

    /// Convert to ServerConfig for the HTTP server.
    pub fn to_server_config(&self) -> Result<ServerConfig, ConfigError> {
        let host: IpAddr = self
            .server
            .host
            .parse()
            .map_err(|_| ConfigError::InvalidHost(self.server.host.clone()))?;

        let mut server_config = ServerConfig::new(host.to_string(), self.server.port);
        if !self.server.graceful_shutdown {
            server_config = server_config.without_graceful_shutdown();
        }

        Ok(server_config)
    }

    /// Convert to SessionConfig for the session store.
    pub fn to_session_config(&self) -> Result<SessionConfig, ConfigError> {
        let name = &self.session.cookie_name;
        let valid_name = !name.is_empty()
            && name
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
        if !valid_name {
            return Err(ConfigError::InvalidCookieName(name.clone()));
        }

        Ok(SessionConfig {
            cookie_name: name.clone(),
            idle_timeout: Duration::from_secs(self.session.idle_timeout_secs),
            secure_cookie: self.session.secure_cookie,
        })
    }

    /// Get the log level filter string.
    pub fn log_filter(&self) -> &str {
        &self.logging.level
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// JSON parsing error.
    #[error("failed to parse config file: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid host address.
    #[error("invalid host address: {0}")]
    InvalidHost(String),

    /// Cookie name with characters not allowed in a cookie token.
    #[error("invalid session cookie name: '{0}'")]
    InvalidCookieName(String),
}
