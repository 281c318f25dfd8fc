//! The action discriminator.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// JSON key holding the action on every frame.
pub const ACTION_KEY: &str = "action";

/// Purpose of a request, echoed by its reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    LogIn,
    GetUserCreationPopUpDetails,
    UserCreate,
    RoleCreate,
}

impl Action {
    pub const ALL: [Action; 4] = [
        Action::LogIn,
        Action::GetUserCreationPopUpDetails,
        Action::UserCreate,
        Action::RoleCreate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::LogIn => "log_in",
            Action::GetUserCreationPopUpDetails => "get_user_creation_pop_up_details",
            Action::UserCreate => "user_create",
            Action::RoleCreate => "role_create",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the four actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAction(pub String);

impl fmt::Display for UnknownAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown action: {}", self.0)
    }
}

impl std::error::Error for UnknownAction {}

impl FromStr for Action {
    type Err = UnknownAction;

    /// Exact, case-sensitive match; the wire format has no aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| UnknownAction(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_str_matches_serde_name() {
        for action in Action::ALL {
            let json = serde_json::to_string(&action).expect("serialize action");
            assert_eq!(json, format!("\"{}\"", action.as_str()));
        }
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert_eq!("log_in".parse::<Action>(), Ok(Action::LogIn));
        assert_eq!(
            "LOG_IN".parse::<Action>(),
            Err(UnknownAction("LOG_IN".to_string()))
        );
    }
}
