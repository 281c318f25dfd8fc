//! Reply dispatch.
//!
//! [`dispatch`] folds one decoded reply into the session state and returns the
//! side effects to perform, in order. It does no I/O itself, so every branch is
//! testable without a socket or a view.

use oracle_domain::{
    LoginPolicy, Notification, OptionList, SelectOption, SessionEvent, SessionView,
};
use oracle_shared::{ClientMessage, ServerMessage};

use crate::state::SessionState;

/// Side effect requested by a dispatched reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Render the session; carries the view that will be shown
    Render(SessionView),
    /// Entries were appended to a selection list
    AppendOptions {
        list: OptionList,
        options: Vec<SelectOption>,
    },
    /// Show a one-shot notification
    Notify(Notification),
    /// Send a follow-up request
    Send(ClientMessage),
}

pub fn dispatch(
    state: &mut SessionState,
    policy: &LoginPolicy,
    message: ServerMessage,
) -> Vec<Effect> {
    match message {
        ServerMessage::LogIn { status, .. } if status.is_success() => {
            let mut effects = Vec::with_capacity(2);
            if let Some(view) = state.apply(SessionEvent::LoginAccepted, policy) {
                effects.push(Effect::Render(view));
            }
            // The user form needs its drop-downs as soon as we are in.
            effects.push(Effect::Send(ClientMessage::GetUserCreationPopUpDetails));
            effects
        }
        ServerMessage::LogIn { status, .. } => {
            tracing::info!(status = status.as_str(), "Login rejected");
            let changed = state.apply(SessionEvent::LoginRejected, policy).is_some();
            let view = state.view();
            // Repeated rejections are rendered too.
            if changed || view.login_error_visible() {
                vec![Effect::Render(view)]
            } else {
                Vec::new()
            }
        }
        ServerMessage::GetUserCreationPopUpDetails {
            supervisor_list,
            user_skill_list,
        } => {
            let supervisors: Vec<SelectOption> =
                supervisor_list.into_iter().map(SelectOption::from).collect();
            let skills: Vec<SelectOption> =
                user_skill_list.into_iter().map(SelectOption::from).collect();

            let mut effects = Vec::with_capacity(2);
            for (list, options) in [
                (OptionList::Supervisor, supervisors),
                (OptionList::Skill, skills),
            ] {
                if options.is_empty() {
                    continue;
                }
                state.append_options(list, &options);
                effects.push(Effect::AppendOptions { list, options });
            }
            effects
        }
        ServerMessage::UserCreate { status } => {
            let notification = if status.is_success() {
                Notification::user_created()
            } else {
                Notification::failure()
            };
            vec![Effect::Notify(notification)]
        }
        ServerMessage::RoleCreate { status } => {
            let notification = if status.is_success() {
                Notification::role_created()
            } else {
                Notification::failure()
            };
            vec![Effect::Notify(notification)]
        }
    }
}
