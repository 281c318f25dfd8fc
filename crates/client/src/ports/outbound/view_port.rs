//! View Port - renders session state
//!
//! Implemented by the console adapter in this crate; a browser build would
//! implement it over the page's elements.

use oracle_domain::Notification;

use crate::state::SessionState;

/// Port for the rendering side of the session client.
///
/// Calls happen only after the session state has already changed; the port
/// reads the state it is given and never keeps or decides anything.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait ViewPort: Send {
    /// Show the current view of `state`, with its selection lists, and hide
    /// every other page.
    fn render(&mut self, state: &SessionState);

    /// Show a one-shot notification.
    fn notify(&mut self, notification: &Notification);
}
