//! Session view state machine.
//!
//! Exactly one page is visible at a time. The state is a plain value and
//! [`transition`] is a pure function of (view, event, policy); whatever renders
//! the console reads the resulting view, it never *is* the state.
//!
//! ```text
//! Login ──LoginAccepted──▶ Dashboard(None) ──OpenUserForm──▶ Dashboard(NewUser)
//!   │                          │        ◀──OpenRoleForm──▶ Dashboard(NewRole)
//!   │                          └─(policy: Registration)──▶ Registration
//!   └──LoginRejected──▶ Login { error_visible } (unless the policy is Silent)
//! ```

use serde::{Deserialize, Serialize};

use crate::policy::{LoginFailureMode, LoginPolicy, PostLoginView};

/// Panel shown inside the dashboard. Opening one hides the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardPanel {
    #[default]
    None,
    NewUser,
    NewRole,
}

/// The mutually-exclusive pages of the admin console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum SessionView {
    /// Login page, optionally with the inline error indicator revealed
    Login { error_visible: bool },
    /// Dashboard with the currently open creation panel
    Dashboard { panel: DashboardPanel },
    /// Stand-alone registration page (alternate post-login flow)
    Registration,
}

impl Default for SessionView {
    fn default() -> Self {
        Self::Login {
            error_visible: false,
        }
    }
}

impl SessionView {
    pub fn is_login(&self) -> bool {
        matches!(self, Self::Login { .. })
    }

    pub fn is_logged_in(&self) -> bool {
        !self.is_login()
    }

    pub fn login_error_visible(&self) -> bool {
        matches!(
            self,
            Self::Login {
                error_visible: true
            }
        )
    }

    /// Whether the submit control of `form` is on screen in this view.
    pub fn shows_form(&self, form: FormKind) -> bool {
        match form {
            FormKind::Login => self.is_login(),
            FormKind::NewUser => matches!(
                self,
                Self::Dashboard {
                    panel: DashboardPanel::NewUser
                } | Self::Registration
            ),
            FormKind::NewRole => matches!(
                self,
                Self::Dashboard {
                    panel: DashboardPanel::NewRole
                }
            ),
        }
    }

    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Login { .. } => "login",
            Self::Dashboard { .. } => "dashboard",
            Self::Registration => "registration",
        }
    }
}

/// Forms whose submit control can be visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Login,
    NewUser,
    NewRole,
}

/// Inputs to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// Server answered `log_in` with a successful status
    LoginAccepted,
    /// Server answered `log_in` with any other status
    LoginRejected,
    /// User clicked "create user" on the dashboard
    OpenUserForm,
    /// User clicked "create role" on the dashboard
    OpenRoleForm,
}

/// Compute the next view. Events that make no sense for the current page
/// (their trigger is hidden) leave the view unchanged.
pub fn transition(view: SessionView, event: SessionEvent, policy: &LoginPolicy) -> SessionView {
    match (event, view) {
        (SessionEvent::LoginAccepted, current) => match policy.post_login {
            PostLoginView::Dashboard => match current {
                SessionView::Dashboard { panel } => SessionView::Dashboard { panel },
                _ => SessionView::Dashboard {
                    panel: DashboardPanel::None,
                },
            },
            PostLoginView::Registration => SessionView::Registration,
        },
        (SessionEvent::LoginRejected, SessionView::Login { .. }) => match policy.on_failure {
            LoginFailureMode::ShowIndicator => SessionView::Login {
                error_visible: true,
            },
            LoginFailureMode::Silent => view,
        },
        (SessionEvent::OpenUserForm, SessionView::Dashboard { .. }) => SessionView::Dashboard {
            panel: DashboardPanel::NewUser,
        },
        (SessionEvent::OpenRoleForm, SessionView::Dashboard { .. }) => SessionView::Dashboard {
            panel: DashboardPanel::NewRole,
        },
        (_, unchanged) => unchanged,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dashboard(panel: DashboardPanel) -> SessionView {
        SessionView::Dashboard { panel }
    }

    #[test]
    fn starts_on_login_without_error() {
        let view = SessionView::default();
        assert!(view.is_login());
        assert!(!view.login_error_visible());
    }

    #[test]
    fn accepted_login_reveals_dashboard_by_default() {
        let next = transition(
            SessionView::default(),
            SessionEvent::LoginAccepted,
            &LoginPolicy::default(),
        );
        assert_eq!(next, dashboard(DashboardPanel::None));
        assert!(next.is_logged_in());
    }

    #[test]
    fn accepted_login_reveals_registration_under_alternate_flow() {
        let policy = LoginPolicy::new(PostLoginView::Registration, LoginFailureMode::Silent);
        let next = transition(SessionView::default(), SessionEvent::LoginAccepted, &policy);
        assert_eq!(next, SessionView::Registration);
    }

    #[test]
    fn accepted_login_clears_a_previous_error() {
        let failed = SessionView::Login {
            error_visible: true,
        };
        let next = transition(failed, SessionEvent::LoginAccepted, &LoginPolicy::default());
        assert_eq!(next, dashboard(DashboardPanel::None));
    }

    #[test]
    fn repeated_acceptance_keeps_open_panel() {
        let next = transition(
            dashboard(DashboardPanel::NewRole),
            SessionEvent::LoginAccepted,
            &LoginPolicy::default(),
        );
        assert_eq!(next, dashboard(DashboardPanel::NewRole));
    }

    #[test]
    fn rejected_login_shows_indicator_and_stays_on_login() {
        let next = transition(
            SessionView::default(),
            SessionEvent::LoginRejected,
            &LoginPolicy::default(),
        );
        assert!(next.is_login());
        assert!(next.login_error_visible());
    }

    #[test]
    fn rejected_login_is_silent_under_alternate_flow() {
        let policy = LoginPolicy::new(PostLoginView::Registration, LoginFailureMode::Silent);
        let next = transition(SessionView::default(), SessionEvent::LoginRejected, &policy);
        assert_eq!(next, SessionView::default());
    }

    #[test]
    fn rejected_login_after_login_does_not_log_out() {
        let current = dashboard(DashboardPanel::NewUser);
        let next = transition(current, SessionEvent::LoginRejected, &LoginPolicy::default());
        assert_eq!(next, current);
    }

    #[test]
    fn panels_are_mutually_exclusive() {
        let policy = LoginPolicy::default();
        let user = transition(
            dashboard(DashboardPanel::None),
            SessionEvent::OpenUserForm,
            &policy,
        );
        assert_eq!(user, dashboard(DashboardPanel::NewUser));

        let role = transition(user, SessionEvent::OpenRoleForm, &policy);
        assert_eq!(role, dashboard(DashboardPanel::NewRole));

        let back = transition(role, SessionEvent::OpenUserForm, &policy);
        assert_eq!(back, dashboard(DashboardPanel::NewUser));
    }

    #[test]
    fn panel_toggles_are_ignored_before_login() {
        let policy = LoginPolicy::default();
        let view = SessionView::default();
        assert_eq!(transition(view, SessionEvent::OpenUserForm, &policy), view);
        assert_eq!(transition(view, SessionEvent::OpenRoleForm, &policy), view);
    }

    #[test]
    fn form_visibility_follows_view() {
        let login = SessionView::default();
        assert!(login.shows_form(FormKind::Login));
        assert!(!login.shows_form(FormKind::NewUser));

        let user_panel = dashboard(DashboardPanel::NewUser);
        assert!(user_panel.shows_form(FormKind::NewUser));
        assert!(!user_panel.shows_form(FormKind::NewRole));
        assert!(!user_panel.shows_form(FormKind::Login));

        assert!(SessionView::Registration.shows_form(FormKind::NewUser));
        assert!(!dashboard(DashboardPanel::None).shows_form(FormKind::NewRole));
    }

    #[test]
    fn view_serializes_with_tag() {
        let json = serde_json::to_string(&dashboard(DashboardPanel::NewRole))
            .expect("serialize view");
        assert_eq!(json, r#"{"view":"dashboard","panel":"new_role"}"#);
    }
}
