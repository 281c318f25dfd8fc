//! Port traits for the directory and for injecting time and randomness.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use oracle_shared::UserStatus;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("Username already taken: {0}")]
    DuplicateUser(String),
    #[error("Role already exists: {0}")]
    DuplicateRole(String),
    #[error("Directory unavailable: {0}")]
    Unavailable(String),
}

// =============================================================================
// Records
// =============================================================================

/// Stored user. Form values are kept as the raw strings the client sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub user_id: u64,
    pub username: String,
    pub password: String,
    pub firstname: String,
    pub lastname: String,
    pub supervisor_id: String,
    pub user_start_date: String,
    pub user_end_date: String,
    pub user_status: UserStatus,
    pub skill_id: String,
    pub is_supervisor: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub firstname: String,
    pub lastname: String,
    pub supervisor_id: String,
    pub user_start_date: String,
    pub user_end_date: String,
    pub user_status: UserStatus,
    pub skill_id: String,
    pub is_supervisor: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleRecord {
    pub role_id: u64,
    pub role_name: String,
    pub role_description: String,
    pub role_start_date: String,
    pub role_end_date: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRole {
    pub role_name: String,
    pub role_description: String,
    pub role_start_date: String,
    pub role_end_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillRecord {
    pub skill_id: u64,
    pub skill_name: String,
}

// =============================================================================
// Directory Port
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectoryRepo: Send + Sync {
    async fn find_user(&self, username: &str) -> Result<Option<UserRecord>, DirectoryError>;
    /// Users flagged as supervisors, ordered by id.
    async fn list_supervisors(&self) -> Result<Vec<UserRecord>, DirectoryError>;
    /// All skills, ordered by id.
    async fn list_skills(&self) -> Result<Vec<SkillRecord>, DirectoryError>;
    /// Store a user; fails if the username is taken.
    async fn insert_user(
        &self,
        user: NewUser,
        created_at: DateTime<Utc>,
    ) -> Result<UserRecord, DirectoryError>;
    /// Store a role; fails if the name is taken.
    async fn insert_role(
        &self,
        role: NewRole,
        created_at: DateTime<Utc>,
    ) -> Result<RoleRecord, DirectoryError>;
}

// =============================================================================
// Testability Ports
// =============================================================================

#[cfg_attr(test, mockall::automock)]
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub trait RandomPort: Send + Sync {
    /// Alphanumeric session token of `len` characters.
    fn token(&self, len: usize) -> String;
    fn gen_uuid(&self) -> Uuid;
}
