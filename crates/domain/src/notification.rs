//! One-shot notifications shown after create operations.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Failure,
}

/// A dismissable message (an `alert()` in the browser build).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub text: String,
}

impl Notification {
    pub const GENERIC_FAILURE: &'static str = "Something went wrong";

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            text: text.into(),
        }
    }

    /// Failure notification with the generic text every create form uses.
    pub fn failure() -> Self {
        Self {
            kind: NotificationKind::Failure,
            text: Self::GENERIC_FAILURE.to_string(),
        }
    }

    pub fn user_created() -> Self {
        Self::success("New user created")
    }

    pub fn role_created() -> Self {
        Self::success("New role created")
    }

    pub fn is_success(&self) -> bool {
        self.kind == NotificationKind::Success
    }
}
