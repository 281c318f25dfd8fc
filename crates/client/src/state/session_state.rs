//! Session state owned by the session service.
//!
//! Plain data: the visible view plus everything appended to the two
//! selection lists since start. Only the service task mutates it.

use oracle_domain::{
    transition, LoginPolicy, OptionList, SelectOption, SessionEvent, SessionView,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    view: SessionView,
    supervisor_options: Vec<SelectOption>,
    skill_options: Vec<SelectOption>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> SessionView {
        self.view
    }

    /// Apply an event to the view. Returns the new view if it changed.
    pub fn apply(&mut self, event: SessionEvent, policy: &LoginPolicy) -> Option<SessionView> {
        let next = transition(self.view, event, policy);
        if next == self.view {
            return None;
        }
        tracing::debug!(from = self.view.name(), to = next.name(), ?event, "View transition");
        self.view = next;
        Some(next)
    }

    pub fn options(&self, list: OptionList) -> &[SelectOption] {
        match list {
            OptionList::Supervisor => &self.supervisor_options,
            OptionList::Skill => &self.skill_options,
        }
    }

    /// Append without de-duplication; repeated lists accumulate.
    pub fn append_options(&mut self, list: OptionList, options: &[SelectOption]) {
        let target = match list {
            OptionList::Supervisor => &mut self.supervisor_options,
            OptionList::Skill => &mut self.skill_options,
        };
        target.extend_from_slice(options);
    }
}
