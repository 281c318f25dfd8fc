//! Login page-flow policy.
//!
//! Two deployments of the admin console disagree on what happens around a
//! login: one lands on the dashboard and shows an inline error on failure,
//! the other lands on the registration page and stays silent on failure.
//! Both flows are kept and selected by configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// Page revealed after a successful login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostLoginView {
    #[default]
    Dashboard,
    Registration,
}

impl PostLoginView {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Registration => "registration",
        }
    }
}

impl fmt::Display for PostLoginView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostLoginView {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dashboard" => Ok(Self::Dashboard),
            "registration" => Ok(Self::Registration),
            other => Err(DomainError::parse(format!(
                "Unknown post-login view: {other}"
            ))),
        }
    }
}

/// What the login page does when the server rejects the credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoginFailureMode {
    /// Reveal the inline login-error indicator
    #[default]
    ShowIndicator,
    /// Leave the login page untouched
    Silent,
}

impl LoginFailureMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ShowIndicator => "indicator",
            Self::Silent => "silent",
        }
    }
}

impl fmt::Display for LoginFailureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoginFailureMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "indicator" | "show_indicator" => Ok(Self::ShowIndicator),
            "silent" => Ok(Self::Silent),
            other => Err(DomainError::parse(format!(
                "Unknown login failure mode: {other}"
            ))),
        }
    }
}

/// Combined login flow settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LoginPolicy {
    pub post_login: PostLoginView,
    pub on_failure: LoginFailureMode,
}

impl LoginPolicy {
    pub fn new(post_login: PostLoginView, on_failure: LoginFailureMode) -> Self {
        Self {
            post_login,
            on_failure,
        }
    }
}
