//! Application state and request handling.
//!
//! Every request produces exactly one reply echoing its action. Business
//! failures become `status: "False"`; nothing here returns an error to the
//! socket layer.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use oracle_domain::DomainError;
use oracle_shared::{ClientMessage, ServerMessage, SkillEntry, StatusFlag, SupervisorEntry};

use crate::infrastructure::ports::{ClockPort, DirectoryRepo, NewRole, NewUser, RandomPort};

/// Session token length handed out on login.
pub const TOKEN_LENGTH: usize = 64;

/// Main application state, shared by every connection.
pub struct App {
    directory: Arc<dyn DirectoryRepo>,
    clock: Arc<dyn ClockPort>,
    random: Arc<dyn RandomPort>,
}

impl App {
    pub fn new(
        directory: Arc<dyn DirectoryRepo>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        Self {
            directory,
            clock,
            random,
        }
    }

    pub fn random(&self) -> &dyn RandomPort {
        self.random.as_ref()
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Answer one request.
    pub async fn handle(&self, message: ClientMessage) -> ServerMessage {
        match message {
            ClientMessage::LogIn { username, password } => self.log_in(&username, &password).await,
            ClientMessage::GetUserCreationPopUpDetails => self.popup_details().await,
            ClientMessage::UserCreate {
                username,
                firstname,
                lastname,
                password,
                supervisor_id,
                user_start_date,
                user_end_date,
                user_status,
                skill_id,
            } => {
                self.create_user(NewUser {
                    username,
                    password,
                    firstname,
                    lastname,
                    supervisor_id,
                    user_start_date,
                    user_end_date,
                    user_status,
                    skill_id,
                    is_supervisor: false,
                })
                .await
            }
            ClientMessage::RoleCreate {
                role_name,
                role_description,
                role_start_date,
                role_end_date,
            } => {
                self.create_role(NewRole {
                    role_name,
                    role_description,
                    role_start_date,
                    role_end_date,
                })
                .await
            }
        }
    }

    pub async fn log_in(&self, username: &str, password: &str) -> ServerMessage {
        let user = match self.directory.find_user(username).await {
            Ok(user) => user,
            Err(e) => {
                tracing::error!(error = %e, "Directory lookup failed during login");
                return ServerMessage::login_rejected();
            }
        };

        // Accounts without a password (seeded supervisors) cannot log in.
        match user {
            Some(user) if !user.password.is_empty() && user.password == password => {
                tracing::info!(username = %user.username, "Login accepted");
                ServerMessage::login_accepted(self.random.token(TOKEN_LENGTH))
            }
            _ => {
                tracing::info!(%username, "Login rejected");
                ServerMessage::login_rejected()
            }
        }
    }

    pub async fn popup_details(&self) -> ServerMessage {
        let supervisors = self.directory.list_supervisors().await;
        let skills = self.directory.list_skills().await;

        let supervisor_list = match supervisors {
            Ok(users) => users
                .into_iter()
                .map(|user| SupervisorEntry {
                    user_id: user.user_id.to_string(),
                    username: user.username,
                })
                .collect(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to list supervisors");
                Vec::new()
            }
        };
        let user_skill_list = match skills {
            Ok(skills) => skills
                .into_iter()
                .map(|skill| SkillEntry {
                    skill_id: skill.skill_id.to_string(),
                    skill_name: skill.skill_name,
                })
                .collect(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to list skills");
                Vec::new()
            }
        };

        ServerMessage::GetUserCreationPopUpDetails {
            supervisor_list,
            user_skill_list,
        }
    }

    pub async fn create_user(&self, user: NewUser) -> ServerMessage {
        ServerMessage::UserCreate {
            status: self.store_user(user).await,
        }
    }

    pub async fn create_role(&self, role: NewRole) -> ServerMessage {
        ServerMessage::RoleCreate {
            status: self.store_role(role).await,
        }
    }

    async fn store_user(&self, user: NewUser) -> StatusFlag {
        if let Err(e) = validate_user(&user) {
            tracing::info!(error = %e, "Rejected user_create");
            return StatusFlag::failure();
        }
        match self.directory.insert_user(user, self.clock.now()).await {
            Ok(record) => {
                tracing::info!(user_id = record.user_id, username = %record.username, "User created");
                StatusFlag::success()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to store user");
                StatusFlag::failure()
            }
        }
    }

    async fn store_role(&self, role: NewRole) -> StatusFlag {
        if let Err(e) = require("role_name", &role.role_name) {
            tracing::info!(error = %e, "Rejected role_create");
            return StatusFlag::failure();
        }
        match self.directory.insert_role(role, self.clock.now()).await {
            Ok(record) => {
                tracing::info!(role_id = record.role_id, role_name = %record.role_name, "Role created");
                StatusFlag::success()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to store role");
                StatusFlag::failure()
            }
        }
    }
}

fn require(field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{field} is required")));
    }
    Ok(())
}

fn validate_user(user: &NewUser) -> Result<(), DomainError> {
    require("username", &user.username)?;
    require("password", &user.password)?;
    require("firstname", &user.firstname)
}
