//! Configuration types.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::ConfigError;

/// HTTP server configuration, built from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Directory served under `/static` and searched for `index.html`.
    pub static_dir: PathBuf,
    /// Allowed CORS origins. Empty means any origin.
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            static_dir: PathBuf::from("."),
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Build config from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup("INTAKE_HOST").unwrap_or(defaults.host);

        let port = match lookup("INTAKE_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| ConfigError::InvalidValue {
                    key: "INTAKE_PORT".to_string(),
                    message: format!("{raw:?}: {e}"),
                })?,
            None => defaults.port,
        };

        let static_dir = lookup("INTAKE_STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.static_dir);

        let cors_origins = parse_origins(&lookup("INTAKE_CORS_ORIGINS").unwrap_or_default());

        Ok(Self {
            host,
            port,
            static_dir,
            cors_origins,
        })
    }

    /// Socket address to bind.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ConfigError::InvalidValue {
                key: "INTAKE_HOST".to_string(),
                message: format!("{}: {e}", self.host),
            })
    }
}

/// Split a comma-separated origin list. A `*` entry allows every origin.
fn parse_origins(raw: &str) -> Vec<String> {
    let origins: Vec<String> = raw
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if origins.iter().any(|o| o == "*") {
        return Vec::new();
    }
    origins
}
