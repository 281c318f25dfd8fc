//! Console rendering of the session views.

use std::io::Write;

use oracle_domain::{
    DashboardPanel, Notification, NotificationKind, OptionList, SelectOption, SessionView,
};

use crate::application::{RoleForm, UserForm};
use crate::infrastructure::messaging::ConnectionStateObserver;
use crate::ports::outbound::ViewPort;
use crate::state::SessionState;

/// [`ViewPort`] that writes plain text to `W` (stdout in the binary).
///
/// Holds no session data; every render reads the state it is handed.
pub struct ConsoleView<W: Write + Send> {
    out: W,
    connection: Option<ConnectionStateObserver>,
}

impl<W: Write + Send> ConsoleView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            connection: None,
        }
    }

    /// Show a notice under the page header while the socket is not connected.
    pub fn with_connection(mut self, observer: ConnectionStateObserver) -> Self {
        self.connection = Some(observer);
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_lines(&mut self, lines: &[String]) {
        let result = lines
            .iter()
            .try_for_each(|line| writeln!(self.out, "{line}"))
            .and_then(|()| self.out.flush());
        if let Err(e) = result {
            tracing::warn!(error = %e, "Console write failed");
        }
    }

    fn option_lines(label: &str, options: &[SelectOption]) -> Vec<String> {
        if options.is_empty() {
            return vec![format!("  {label}: (none)")];
        }
        let mut lines = vec![format!("  {label}:")];
        lines.extend(
            options
                .iter()
                .map(|option| format!("    {} = {}", option.value, option.label)),
        );
        lines
    }

    fn user_panel_lines(state: &SessionState) -> Vec<String> {
        let mut lines = vec![format!("  fields: {}", UserForm::FIELDS.join(", "))];
        lines.extend(Self::option_lines(
            "supervisors",
            state.options(OptionList::Supervisor),
        ));
        lines.extend(Self::option_lines("skills", state.options(OptionList::Skill)));
        lines.push("  submit with: add-user key=value...".to_string());
        lines
    }

    fn view_lines(state: &SessionState) -> Vec<String> {
        match state.view() {
            SessionView::Login { error_visible } => {
                let mut lines = vec!["== Login ==".to_string()];
                if error_visible {
                    lines.push("  ! Invalid username or password".to_string());
                }
                lines.push("  login <user> <password>".to_string());
                lines
            }
            SessionView::Dashboard { panel } => {
                let mut lines = vec![
                    "== Dashboard ==".to_string(),
                    "  new-user | new-role".to_string(),
                ];
                match panel {
                    DashboardPanel::None => {}
                    DashboardPanel::NewUser => {
                        lines.push("-- New user --".to_string());
                        lines.extend(Self::user_panel_lines(state));
                    }
                    DashboardPanel::NewRole => {
                        lines.push("-- New role --".to_string());
                        lines.push(format!("  fields: {}", RoleForm::FIELDS.join(", ")));
                        lines.push("  submit with: add-role key=value...".to_string());
                    }
                }
                lines
            }
            SessionView::Registration => {
                let mut lines = vec!["== Registration ==".to_string()];
                lines.extend(Self::user_panel_lines(state));
                lines
            }
        }
    }

    fn connection_notice(&self) -> Option<String> {
        let observer = self.connection.as_ref()?;
        if observer.is_connected() {
            return None;
        }
        Some(format!("  (server {})", observer.state().as_str()))
    }
}

impl<W: Write + Send> ViewPort for ConsoleView<W> {
    fn render(&mut self, state: &SessionState) {
        let mut lines = Self::view_lines(state);
        if let Some(notice) = self.connection_notice() {
            lines.insert(1, notice);
        }
        self.write_lines(&lines);
    }

    fn notify(&mut self, notification: &Notification) {
        let marker = match notification.kind {
            NotificationKind::Success => "*",
            NotificationKind::Failure => "!",
        };
        self.write_lines(&[format!("{marker} {}", notification.text)]);
    }
}
