//! Server configuration from the environment.

use std::net::SocketAddr;

use thiserror::Error;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 9002;
pub const DEFAULT_ADMIN: &str = "admin";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("ORACLE_SERVER_PORT is not a port number: '{value}'")]
    InvalidPort {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("'{value}' is not a bindable address")]
    InvalidAddress {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub admin_user: String,
    pub admin_password: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            admin_user: DEFAULT_ADMIN.to_string(),
            admin_password: DEFAULT_ADMIN.to_string(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = match get("ORACLE_SERVER_PORT") {
            Some(value) => value
                .parse()
                .map_err(|source| ConfigError::InvalidPort { value, source })?,
            None => defaults.port,
        };

        Ok(Self {
            host: get("ORACLE_SERVER_HOST").unwrap_or(defaults.host),
            port,
            admin_user: get("ORACLE_ADMIN_USER").unwrap_or(defaults.admin_user),
            admin_password: get("ORACLE_ADMIN_PASSWORD").unwrap_or(defaults.admin_password),
        })
    }

    pub fn addr(&self) -> Result<SocketAddr, ConfigError> {
        let value = format!("{}:{}", self.host, self.port);
        value
            .parse()
            .map_err(|source| ConfigError::InvalidAddress { value, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_bind_loopback_9002() {
        let config = ServerConfig::from_lookup(|_| None).expect("defaults");
        assert_eq!(config, ServerConfig::default());
        assert_eq!(
            config.addr().expect("addr"),
            "127.0.0.1:9002".parse::<SocketAddr>().expect("literal")
        );
    }

    #[test]
    fn overrides_are_read() {
        let config = ServerConfig::from_lookup(|key| match key {
            "ORACLE_SERVER_HOST" => Some("0.0.0.0".to_string()),
            "ORACLE_SERVER_PORT" => Some(" 9100 ".to_string()),
            "ORACLE_ADMIN_USER" => Some("root".to_string()),
            _ => None,
        })
        .expect("valid");
        assert_eq!(config.port, 9100);
        assert_eq!(config.admin_user, "root");
        assert_eq!(config.admin_password, DEFAULT_ADMIN);
        assert!(config.addr().is_ok());
    }

    #[test]
    fn bad_port_and_host_are_errors() {
        let err = ServerConfig::from_lookup(|key| {
            (key == "ORACLE_SERVER_PORT").then(|| "ninety".to_string())
        })
        .expect_err("bad port");
        assert!(matches!(err, ConfigError::InvalidPort { .. }));

        let config = ServerConfig {
            host: "not a host".to_string(),
            ..ServerConfig::default()
        };
        assert!(matches!(config.addr(), Err(ConfigError::InvalidAddress { .. })));
    }
}
