//! Form snapshots and request building.
//!
//! A form holds whatever its controls contained at submit time. Nothing is
//! validated: an untouched control submits an empty string.

use thiserror::Error;

use oracle_shared::{ClientMessage, UserStatus};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("unknown field '{field}' on the {form} form (expected one of: {expected})")]
    UnknownField {
        form: &'static str,
        field: String,
        expected: String,
    },
}

fn unknown_field(form: &'static str, field: &str, expected: &[&str]) -> FormError {
    FormError::UnknownField {
        form,
        field: field.to_string(),
        expected: expected.join(", "),
    }
}

/// Login page controls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn to_message(&self) -> ClientMessage {
        ClientMessage::LogIn {
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}

/// "New user" panel controls. Field names match the request keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserForm {
    pub username: String,
    pub firstname: String,
    pub lastname: String,
    pub password: String,
    pub supervisor_id: String,
    pub user_start_date: String,
    pub user_end_date: String,
    pub skill_id: String,
}

impl UserForm {
    pub const FIELDS: [&'static str; 8] = [
        "username",
        "firstname",
        "lastname",
        "password",
        "supervisor_id",
        "user_start_date",
        "user_end_date",
        "skill_id",
    ];

    pub fn set(&mut self, field: &str, value: impl Into<String>) -> Result<(), FormError> {
        let slot = match field {
            "username" => &mut self.username,
            "firstname" => &mut self.firstname,
            "lastname" => &mut self.lastname,
            "password" => &mut self.password,
            "supervisor_id" => &mut self.supervisor_id,
            "user_start_date" => &mut self.user_start_date,
            "user_end_date" => &mut self.user_end_date,
            "skill_id" => &mut self.skill_id,
            other => return Err(unknown_field("user", other, &Self::FIELDS)),
        };
        *slot = value.into();
        Ok(())
    }

    /// `user_status` is not a control; new users are always created active.
    pub fn to_message(&self) -> ClientMessage {
        ClientMessage::UserCreate {
            username: self.username.clone(),
            firstname: self.firstname.clone(),
            lastname: self.lastname.clone(),
            password: self.password.clone(),
            supervisor_id: self.supervisor_id.clone(),
            user_start_date: self.user_start_date.clone(),
            user_end_date: self.user_end_date.clone(),
            user_status: UserStatus::Active,
            skill_id: self.skill_id.clone(),
        }
    }
}

/// "New role" panel controls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleForm {
    pub role_name: String,
    pub role_description: String,
    pub role_start_date: String,
    pub role_end_date: String,
}

impl RoleForm {
    pub const FIELDS: [&'static str; 4] = [
        "role_name",
        "role_description",
        "role_start_date",
        "role_end_date",
    ];

    pub fn set(&mut self, field: &str, value: impl Into<String>) -> Result<(), FormError> {
        let slot = match field {
            "role_name" => &mut self.role_name,
            "role_description" => &mut self.role_description,
            "role_start_date" => &mut self.role_start_date,
            "role_end_date" => &mut self.role_end_date,
            other => return Err(unknown_field("role", other, &Self::FIELDS)),
        };
        *slot = value.into();
        Ok(())
    }

    pub fn to_message(&self) -> ClientMessage {
        ClientMessage::RoleCreate {
            role_name: self.role_name.clone(),
            role_description: self.role_description.clone(),
            role_start_date: self.role_start_date.clone(),
            role_end_date: self.role_end_date.clone(),
        }
    }
}
