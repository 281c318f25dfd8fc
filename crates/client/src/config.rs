//! Client configuration from the environment.

use thiserror::Error;
use url::Url;

use oracle_domain::{DomainError, LoginFailureMode, LoginPolicy, PostLoginView};

pub const DEFAULT_WS_URL: &str = "ws://127.0.0.1:9002";

pub const ENV_WS_URL: &str = "ORACLE_WS_URL";
pub const ENV_POST_LOGIN_VIEW: &str = "ORACLE_POST_LOGIN_VIEW";
pub const ENV_LOGIN_FAILURE: &str = "ORACLE_LOGIN_FAILURE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} is not a valid URL: {source}")]
    InvalidUrl {
        var: &'static str,
        #[source]
        source: url::ParseError,
    },
    #[error("{var} must use ws:// or wss://, got '{scheme}'")]
    UnsupportedScheme { var: &'static str, scheme: String },
    #[error("{var}: {source}")]
    InvalidValue {
        var: &'static str,
        #[source]
        source: DomainError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub ws_url: Url,
    pub policy: LoginPolicy,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or blank keys use the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let raw_url = get(ENV_WS_URL).unwrap_or_else(|| DEFAULT_WS_URL.to_string());
        let ws_url = Url::parse(raw_url.trim()).map_err(|source| ConfigError::InvalidUrl {
            var: ENV_WS_URL,
            source,
        })?;
        if !matches!(ws_url.scheme(), "ws" | "wss") {
            return Err(ConfigError::UnsupportedScheme {
                var: ENV_WS_URL,
                scheme: ws_url.scheme().to_string(),
            });
        }

        let post_login = match get(ENV_POST_LOGIN_VIEW) {
            Some(raw) => raw
                .parse::<PostLoginView>()
                .map_err(|source| ConfigError::InvalidValue {
                    var: ENV_POST_LOGIN_VIEW,
                    source,
                })?,
            None => PostLoginView::default(),
        };
        let on_failure = match get(ENV_LOGIN_FAILURE) {
            Some(raw) => raw
                .parse::<LoginFailureMode>()
                .map_err(|source| ConfigError::InvalidValue {
                    var: ENV_LOGIN_FAILURE,
                    source,
                })?,
            None => LoginFailureMode::default(),
        };

        Ok(Self {
            ws_url,
            policy: LoginPolicy::new(post_login, on_failure),
        })
    }
}
