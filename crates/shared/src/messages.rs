//! WebSocket message types for server-client communication
//!
//! The server receives [`ClientMessage`] and sends [`ServerMessage`]; the client
//! does the opposite. Both are internally tagged on `"action"` so the tag is
//! always the first key of the serialized object.
//!
//! Request fields carry the raw form values. They are serialized even when
//! empty and default to an empty string when absent on decode, so the server
//! decides what "missing" means.

use serde::{Deserialize, Deserializer, Serialize};

use oracle_domain::SelectOption;

use crate::action::Action;

/// Greeting the server attaches to a successful login.
pub const WELCOME_MESSAGE: &str = "Welcome to Oracle.";

// =============================================================================
// Status flag
// =============================================================================

/// Success flag of a reply.
///
/// The wire carries a string; only the exact value `"True"` means success.
/// `"true"`, `"1"`, JSON `true`, numbers, `null` and a missing field all count
/// as failure. Non-string values keep their JSON text for logging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StatusFlag(String);

impl StatusFlag {
    const TRUE: &'static str = "True";
    const FALSE: &'static str = "False";

    pub fn success() -> Self {
        Self(Self::TRUE.to_string())
    }

    pub fn failure() -> Self {
        Self(Self::FALSE.to_string())
    }

    pub fn is_success(&self) -> bool {
        self.0 == Self::TRUE
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for StatusFlag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(text) => Self(text),
            other => Self(other.to_string()),
        })
    }
}

impl From<&str> for StatusFlag {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

// =============================================================================
// Client Messages (Client → Server)
// =============================================================================

/// Lifecycle status sent with a new user. The console always sends `active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
}

/// Messages from the session client to the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Authenticate with the login form credentials
    LogIn {
        #[serde(default)]
        username: String,
        #[serde(default)]
        password: String,
    },
    /// Fetch the drop-down contents for the user creation form
    GetUserCreationPopUpDetails,
    /// Create a user from the user creation form
    UserCreate {
        #[serde(default)]
        username: String,
        #[serde(default)]
        firstname: String,
        #[serde(default)]
        lastname: String,
        #[serde(default)]
        password: String,
        #[serde(default)]
        supervisor_id: String,
        #[serde(default)]
        user_start_date: String,
        #[serde(default)]
        user_end_date: String,
        #[serde(default)]
        user_status: UserStatus,
        #[serde(default)]
        skill_id: String,
    },
    /// Create a role from the role creation form
    RoleCreate {
        #[serde(default)]
        role_name: String,
        #[serde(default)]
        role_description: String,
        #[serde(default)]
        role_start_date: String,
        #[serde(default)]
        role_end_date: String,
    },
}

impl ClientMessage {
    pub fn action(&self) -> Action {
        match self {
            ClientMessage::LogIn { .. } => Action::LogIn,
            ClientMessage::GetUserCreationPopUpDetails => Action::GetUserCreationPopUpDetails,
            ClientMessage::UserCreate { .. } => Action::UserCreate,
            ClientMessage::RoleCreate { .. } => Action::RoleCreate,
        }
    }
}

// =============================================================================
// Server Messages (Server → Client)
// =============================================================================

/// Supervisor drop-down entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupervisorEntry {
    #[serde(deserialize_with = "id_string")]
    pub user_id: String,
    pub username: String,
}

/// Skill drop-down entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillEntry {
    #[serde(deserialize_with = "id_string")]
    pub skill_id: String,
    pub skill_name: String,
}

impl From<SupervisorEntry> for SelectOption {
    fn from(entry: SupervisorEntry) -> Self {
        SelectOption::new(entry.user_id, entry.username)
    }
}

impl From<SkillEntry> for SelectOption {
    fn from(entry: SkillEntry) -> Self {
        SelectOption::new(entry.skill_id, entry.skill_name)
    }
}

/// Decode a drop-down list entry by entry.
///
/// An absent or `null` list is empty. Entries that do not decode are skipped
/// with a warning; the rest are kept in order.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let raw = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!(index, error = %e, "Skipping drop-down entry");
                None
            }
        })
        .collect())
}

/// Ids arrive as JSON strings or numbers depending on the backend build.
fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    })
}

/// Messages from the server to the session client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Reply to `log_in`
    LogIn {
        #[serde(default)]
        status: StatusFlag,
        /// Session token (the console does not use it)
        #[serde(default, skip_serializing_if = "Option::is_none")]
        token: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    /// Reply to `get_user_creation_pop_up_details`
    GetUserCreationPopUpDetails {
        #[serde(default, deserialize_with = "lenient_list")]
        supervisor_list: Vec<SupervisorEntry>,
        #[serde(default, deserialize_with = "lenient_list")]
        user_skill_list: Vec<SkillEntry>,
    },
    /// Reply to `user_create`
    UserCreate {
        #[serde(default)]
        status: StatusFlag,
    },
    /// Reply to `role_create`
    RoleCreate {
        #[serde(default)]
        status: StatusFlag,
    },
}

impl ServerMessage {
    pub fn action(&self) -> Action {
        match self {
            ServerMessage::LogIn { .. } => Action::LogIn,
            ServerMessage::GetUserCreationPopUpDetails { .. } => {
                Action::GetUserCreationPopUpDetails
            }
            ServerMessage::UserCreate { .. } => Action::UserCreate,
            ServerMessage::RoleCreate { .. } => Action::RoleCreate,
        }
    }

    /// Successful login reply carrying a session token and the greeting.
    pub fn login_accepted(token: impl Into<String>) -> Self {
        ServerMessage::LogIn {
            status: StatusFlag::success(),
            token: Some(token.into()),
            message: Some(WELCOME_MESSAGE.to_string()),
        }
    }

    pub fn login_rejected() -> Self {
        ServerMessage::LogIn {
            status: StatusFlag::failure(),
            token: None,
            message: None,
        }
    }
}
