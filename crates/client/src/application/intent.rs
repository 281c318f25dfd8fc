//! User intents produced by the UI layer.

use super::forms::{LoginForm, RoleForm, UserForm};

/// Something the user did on the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiIntent {
    /// Press "log in" with the current form contents
    SubmitLogin(LoginForm),
    /// Press the dashboard "create user" button
    OpenUserForm,
    /// Press the dashboard "create role" button
    OpenRoleForm,
    /// Submit the new-user panel
    SubmitUser(UserForm),
    /// Submit the new-role panel
    SubmitRole(RoleForm),
    /// Re-render the current view
    Show,
    /// Leave the console
    Quit,
}

impl UiIntent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SubmitLogin(_) => "submit_login",
            Self::OpenUserForm => "open_user_form",
            Self::OpenRoleForm => "open_role_form",
            Self::SubmitUser(_) => "submit_user",
            Self::SubmitRole(_) => "submit_role",
            Self::Show => "show",
            Self::Quit => "quit",
        }
    }
}
