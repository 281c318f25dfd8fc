//! Session service: the single owner of session state.
//!
//! Inbound frames and user intents are processed one at a time on one task, so
//! the view, the option lists, and the outbound requests never race.

use std::ops::ControlFlow;

use tokio::sync::mpsc;

use oracle_domain::{FormKind, LoginPolicy, SessionEvent};
use oracle_shared::{decode_server_message, ClientMessage};

use super::dispatch::{dispatch, Effect};
use super::intent::UiIntent;
use crate::infrastructure::messaging::CommandBus;
use crate::ports::outbound::ViewPort;
use crate::state::SessionState;

pub struct SessionService<V: ViewPort> {
    state: SessionState,
    policy: LoginPolicy,
    commands: CommandBus,
    view: V,
}

impl<V: ViewPort> SessionService<V> {
    pub fn new(policy: LoginPolicy, commands: CommandBus, view: V) -> Self {
        Self {
            state: SessionState::new(),
            policy,
            commands,
            view,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn render_current(&mut self) {
        self.view.render(&self.state);
    }

    /// Handle one raw text frame from the socket.
    ///
    /// Frames that fail to decode are logged and dropped; state is untouched.
    pub fn handle_frame(&mut self, frame: &str) {
        let message = match decode_server_message(frame) {
            Ok(message) => message,
            Err(e) => {
                tracing::warn!(error = %e, "Dropping inbound frame");
                return;
            }
        };
        tracing::debug!(action = %message.action(), "Reply received");

        let mut render = false;
        for effect in dispatch(&mut self.state, &self.policy, message) {
            render |= self.apply(effect);
        }
        if render {
            self.render_current();
        }
    }

    /// Handle one user intent. `Break` means the user asked to leave.
    pub fn handle_intent(&mut self, intent: UiIntent) -> ControlFlow<()> {
        tracing::debug!(intent = intent.name(), view = self.state.view().name(), "Intent");
        match intent {
            UiIntent::SubmitLogin(form) => self.submit(FormKind::Login, form.to_message()),
            UiIntent::SubmitUser(form) => self.submit(FormKind::NewUser, form.to_message()),
            UiIntent::SubmitRole(form) => self.submit(FormKind::NewRole, form.to_message()),
            UiIntent::OpenUserForm => self.open(SessionEvent::OpenUserForm),
            UiIntent::OpenRoleForm => self.open(SessionEvent::OpenRoleForm),
            UiIntent::Show => self.render_current(),
            UiIntent::Quit => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(())
    }

    /// Run until the user quits or the intent source closes.
    ///
    /// A closed socket stops inbound processing but the console stays usable.
    pub async fn run(
        mut self,
        mut inbound: mpsc::Receiver<String>,
        mut intents: mpsc::Receiver<UiIntent>,
    ) {
        self.render_current();
        let mut socket_open = true;

        loop {
            tokio::select! {
                frame = inbound.recv(), if socket_open => match frame {
                    Some(frame) => self.handle_frame(&frame),
                    None => {
                        tracing::info!("Server connection ended");
                        socket_open = false;
                    }
                },
                intent = intents.recv() => match intent {
                    Some(intent) => {
                        if self.handle_intent(intent).is_break() {
                            break;
                        }
                    }
                    None => break,
                },
            }
        }
        tracing::debug!("Session service stopped");
    }

    fn submit(&mut self, form: FormKind, message: ClientMessage) {
        let view = self.state.view();
        if !view.shows_form(form) {
            tracing::debug!(?form, view = view.name(), "Form is not on screen; ignoring submit");
            return;
        }
        self.send(message);
    }

    fn open(&mut self, event: SessionEvent) {
        match self.state.apply(event, &self.policy) {
            Some(_) => self.render_current(),
            None => tracing::debug!(?event, view = self.state.view().name(), "No view change"),
        }
    }

    fn send(&self, message: ClientMessage) {
        let action = message.action();
        match self.commands.send(message) {
            Ok(()) => tracing::debug!(%action, "Request queued"),
            Err(e) => tracing::warn!(%action, error = %e, "Request not sent"),
        }
    }

    /// Perform one effect. Returns whether the session needs rendering; the
    /// caller renders once after the whole reply.
    fn apply(&mut self, effect: Effect) -> bool {
        match effect {
            Effect::Render(view) => {
                tracing::trace!(view = view.name(), "Render requested");
                true
            }
            Effect::AppendOptions { list, options } => {
                tracing::debug!(
                    ?list,
                    added = options.len(),
                    total = self.state.options(list).len(),
                    "Options appended"
                );
                self.state.view().shows_form(FormKind::NewUser)
            }
            Effect::Notify(notification) => {
                self.view.notify(&notification);
                false
            }
            Effect::Send(message) => {
                self.send(message);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::forms::{LoginForm, RoleForm, UserForm};
    use crate::ports::outbound::MockViewPort;
    use mockall::predicate::eq;
    use oracle_domain::{
        DashboardPanel, LoginFailureMode, Notification, OptionList, PostLoginView, SelectOption,
        SessionView,
    };

    fn service(view: MockViewPort) -> (SessionService<MockViewPort>, mpsc::Receiver<ClientMessage>) {
        service_with_policy(view, LoginPolicy::default())
    }

    fn service_with_policy(
        view: MockViewPort,
        policy: LoginPolicy,
    ) -> (SessionService<MockViewPort>, mpsc::Receiver<ClientMessage>) {
        let (tx, rx) = mpsc::channel(8);
        (SessionService::new(policy, CommandBus::new(tx), view), rx)
    }

    fn drain(rx: &mut mpsc::Receiver<ClientMessage>) -> Vec<ClientMessage> {
        let mut sent = Vec::new();
        while let Ok(message) = rx.try_recv() {
            sent.push(message);
        }
        sent
    }

    /// Reach the dashboard without going through the socket.
    fn logged_in(view: MockViewPort) -> (SessionService<MockViewPort>, mpsc::Receiver<ClientMessage>) {
        let (mut svc, mut rx) = service(view);
        svc.state.apply(SessionEvent::LoginAccepted, &LoginPolicy::default());
        drain(&mut rx);
        (svc, rx)
    }

    fn expect_render_of(view: &mut MockViewPort, expected: SessionView, times: usize) {
        view.expect_render()
            .withf(move |state: &SessionState| state.view() == expected)
            .times(times)
            .return_const(());
    }

    const LOGIN_ERROR: SessionView = SessionView::Login {
        error_visible: true,
    };

    #[test]
    fn successful_login_reply_renders_dashboard_and_requests_details() {
        let mut view = MockViewPort::new();
        expect_render_of(
            &mut view,
            SessionView::Dashboard {
                panel: DashboardPanel::None,
            },
            1,
        );
        let (mut svc, mut rx) = service(view);

        svc.handle_frame(r#"{"action":"log_in","status":"True","token":"abc"}"#);

        assert_eq!(drain(&mut rx), vec![ClientMessage::GetUserCreationPopUpDetails]);
    }

    #[test]
    fn failed_login_reply_reveals_indicator_and_sends_nothing() {
        let mut view = MockViewPort::new();
        expect_render_of(&mut view, LOGIN_ERROR, 1);
        let (mut svc, mut rx) = service(view);

        svc.handle_frame(r#"{"action":"log_in","status":"False"}"#);

        assert!(drain(&mut rx).is_empty());
        assert!(svc.state().view().login_error_visible());
    }

    #[test]
    fn every_failed_login_is_rendered() {
        let mut view = MockViewPort::new();
        expect_render_of(&mut view, LOGIN_ERROR, 2);
        let (mut svc, _rx) = service(view);

        svc.handle_frame(r#"{"action":"log_in","status":"False"}"#);
        svc.handle_frame(r#"{"action":"log_in","status":"False"}"#);
    }

    #[test]
    fn non_string_login_status_is_a_rejection() {
        let mut view = MockViewPort::new();
        expect_render_of(&mut view, LOGIN_ERROR, 3);
        let (mut svc, mut rx) = service(view);

        svc.handle_frame(r#"{"action":"log_in","status":true}"#);
        svc.handle_frame(r#"{"action":"log_in","status":7}"#);
        svc.handle_frame(r#"{"action":"log_in"}"#);

        assert!(svc.state().view().is_login());
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn non_string_or_missing_create_status_notifies_failure() {
        let mut view = MockViewPort::new();
        view.expect_notify()
            .with(eq(Notification::failure()))
            .times(3)
            .return_const(());
        let (mut svc, _rx) = service(view);

        svc.handle_frame(r#"{"action":"user_create","status":false}"#);
        svc.handle_frame(r#"{"action":"role_create"}"#);
        svc.handle_frame(r#"{"action":"role_create","status":null}"#);
    }

    #[test]
    fn silent_policy_leaves_view_untouched_on_failure() {
        // No expectations: any view call fails the test.
        let policy = LoginPolicy::new(PostLoginView::Registration, LoginFailureMode::Silent);
        let (mut svc, mut rx) = service_with_policy(MockViewPort::new(), policy);

        svc.handle_frame(r#"{"action":"log_in","status":"False"}"#);
        svc.handle_frame(r#"{"action":"log_in","status":"False"}"#);

        assert_eq!(svc.state().view(), SessionView::default());
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn malformed_and_unknown_frames_are_ignored() {
        let (mut svc, mut rx) = service(MockViewPort::new());

        svc.handle_frame("not json");
        svc.handle_frame(r#"{"status":"True"}"#);
        svc.handle_frame(r#"{"action":"delete_everything"}"#);
        svc.handle_frame(r#"{"action":"log_in","status":"True","token":5}"#);

        assert_eq!(svc.state(), &SessionState::new());
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn popup_details_fill_state_without_rendering_hidden_form() {
        // Still on the login page, so nothing is drawn.
        let (mut svc, _rx) = service(MockViewPort::new());

        svc.handle_frame(
            r#"{"action":"get_user_creation_pop_up_details",
                "supervisor_list":[{"user_id":1,"username":"Arvind"},{"user_id":"2","username":"Arun"}],
                "user_skill_list":[{"skill_id":10,"skill_name":"Rust"}]}"#,
        );

        assert_eq!(
            svc.state().options(OptionList::Supervisor),
            &[SelectOption::new("1", "Arvind"), SelectOption::new("2", "Arun")]
        );
        assert_eq!(
            svc.state().options(OptionList::Skill),
            &[SelectOption::new("10", "Rust")]
        );
    }

    #[test]
    fn popup_details_redraw_open_user_panel_once() {
        let user_panel = SessionView::Dashboard {
            panel: DashboardPanel::NewUser,
        };
        let mut view = MockViewPort::new();
        view.expect_render()
            .withf(move |state: &SessionState| {
                state.view() == user_panel && state.options(OptionList::Supervisor).is_empty()
            })
            .times(1)
            .return_const(());
        view.expect_render()
            .withf(move |state: &SessionState| {
                state.view() == user_panel
                    && state.options(OptionList::Supervisor) == [SelectOption::new("3", "Athira")]
                    && state.options(OptionList::Skill) == [SelectOption::new("7", "Billing")]
            })
            .times(1)
            .return_const(());
        let (mut svc, _rx) = logged_in(view);

        svc.handle_intent(UiIntent::OpenUserForm);
        svc.handle_frame(
            r#"{"action":"get_user_creation_pop_up_details",
                "supervisor_list":[{"user_id":3,"username":"Athira"},{"username":"NoId"}],
                "user_skill_list":[{"skill_id":7,"skill_name":"Billing"}]}"#,
        );
    }

    #[test]
    fn create_replies_only_notify() {
        let mut view = MockViewPort::new();
        view.expect_notify()
            .with(eq(Notification::user_created()))
            .times(1)
            .return_const(());
        view.expect_notify()
            .with(eq(Notification::failure()))
            .times(1)
            .return_const(());
        let (mut svc, mut rx) = service(view);

        svc.handle_frame(r#"{"action":"user_create","status":"True"}"#);
        svc.handle_frame(r#"{"action":"role_create","status":"False"}"#);

        assert!(svc.state().view().is_login());
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn login_submit_is_sent_from_login_view() {
        let (mut svc, mut rx) = service(MockViewPort::new());

        let flow = svc.handle_intent(UiIntent::SubmitLogin(LoginForm::new("admin", "admin")));

        assert!(flow.is_continue());
        assert_eq!(
            drain(&mut rx),
            vec![ClientMessage::LogIn {
                username: "admin".to_string(),
                password: "admin".to_string(),
            }]
        );
    }

    #[test]
    fn hidden_forms_cannot_be_submitted() {
        let (mut svc, mut rx) = service(MockViewPort::new());

        svc.handle_intent(UiIntent::SubmitUser(UserForm::default()));
        svc.handle_intent(UiIntent::SubmitRole(RoleForm::default()));

        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn opening_role_panel_then_submitting_sends_role_create() {
        let mut view = MockViewPort::new();
        expect_render_of(
            &mut view,
            SessionView::Dashboard {
                panel: DashboardPanel::NewRole,
            },
            1,
        );
        let (mut svc, mut rx) = logged_in(view);

        svc.handle_intent(UiIntent::OpenRoleForm);
        let mut form = RoleForm::default();
        form.set("role_name", "Auditor").expect("known field");
        svc.handle_intent(UiIntent::SubmitRole(form));
        // The user panel is closed now, so this one is dropped.
        svc.handle_intent(UiIntent::SubmitUser(UserForm::default()));

        let sent = drain(&mut rx);
        assert_eq!(sent.len(), 1);
        assert!(matches!(
            &sent[0],
            ClientMessage::RoleCreate { role_name, .. } if role_name == "Auditor"
        ));
    }

    #[test]
    fn panel_toggle_before_login_does_nothing() {
        let (mut svc, _rx) = service(MockViewPort::new());

        svc.handle_intent(UiIntent::OpenUserForm);

        assert_eq!(svc.state().view(), SessionView::default());
    }

    #[test]
    fn quit_breaks_the_loop() {
        let (mut svc, _rx) = service(MockViewPort::new());
        assert!(svc.handle_intent(UiIntent::Quit).is_break());
    }

    #[test]
    fn send_failure_is_logged_not_fatal() {
        let (mut svc, rx) = service(MockViewPort::new());
        drop(rx);

        let flow = svc.handle_intent(UiIntent::SubmitLogin(LoginForm::default()));

        assert!(flow.is_continue());
    }

    #[tokio::test]
    async fn run_processes_frames_and_stops_on_quit() {
        let mut view = MockViewPort::new();
        expect_render_of(&mut view, SessionView::default(), 1);
        expect_render_of(
            &mut view,
            SessionView::Dashboard {
                panel: DashboardPanel::None,
            },
            1,
        );
        let (svc, mut rx) = service(view);

        let (frame_tx, frame_rx) = mpsc::channel(4);
        let (intent_tx, intent_rx) = mpsc::channel(4);
        let task = tokio::spawn(svc.run(frame_rx, intent_rx));

        frame_tx
            .send(r#"{"action":"log_in","status":"True"}"#.to_string())
            .await
            .expect("frame");
        let follow_up = rx.recv().await.expect("follow-up request");
        assert_eq!(follow_up, ClientMessage::GetUserCreationPopUpDetails);

        // Closing the socket side must not stop the service.
        drop(frame_tx);
        intent_tx.send(UiIntent::Quit).await.expect("intent");
        task.await.expect("service task");
    }
}
