//! Oracle Admin domain vocabulary.
//!
//! The admin console is a tiny state machine: which page is visible, which
//! dashboard panel is open, and what the two selection lists currently hold.
//! Everything here is pure data plus transition functions; transport and
//! rendering live in the client crate.

pub mod error;
pub mod notification;
pub mod options;
pub mod policy;
pub mod session;

pub use error::DomainError;
pub use notification::{Notification, NotificationKind};
pub use options::{OptionList, SelectOption};
pub use policy::{LoginFailureMode, LoginPolicy, PostLoginView};
pub use session::{transition, DashboardPanel, FormKind, SessionEvent, SessionView};
