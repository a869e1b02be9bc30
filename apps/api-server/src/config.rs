//! API server configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Port the catalog API has always listened on.
pub const DEFAULT_PORT: u16 = 82;

/// API server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// HTTP listen port
    pub port: u16,

    /// Interface to bind
    pub bind: IpAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            port: DEFAULT_PORT,
            bind: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable             | Default   |
    /// |----------------------|-----------|
    /// | `BOOKSTORE_API_PORT` | `82`      |
    /// | `BOOKSTORE_API_BIND` | `0.0.0.0` |
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ServerConfig::load`], reading variables through `var`.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = ServerConfig::default();

        let port = match var("BOOKSTORE_API_PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("BOOKSTORE_API_PORT".to_string()))?,
            None => defaults.port,
        };

        let bind = match var("BOOKSTORE_API_BIND") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("BOOKSTORE_API_BIND".to_string()))?,
            None => defaults.bind,
        };

        Ok(ServerConfig { port, bind })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.port, 82);
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:82");
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("BOOKSTORE_API_PORT", "8082"),
            ("BOOKSTORE_API_BIND", "127.0.0.1"),
        ]))
        .unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8082");
    }

    #[test]
    fn test_invalid_port() {
        let err = ServerConfig::from_lookup(lookup(&[("BOOKSTORE_API_PORT", "eighty")])).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for BOOKSTORE_API_PORT");
    }

    #[test]
    fn test_invalid_bind() {
        let err = ServerConfig::from_lookup(lookup(&[("BOOKSTORE_API_BIND", "localhost")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref key) if key == "BOOKSTORE_API_BIND"));
    }
}
