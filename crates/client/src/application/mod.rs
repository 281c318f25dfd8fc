//! Application layer: form snapshots, reply dispatch, and the session service.

pub mod dispatch;
pub mod forms;
pub mod intent;
pub mod session_service;

pub use dispatch::{dispatch, Effect};
pub use forms::{FormError, LoginForm, RoleForm, UserForm};
pub use intent::UiIntent;
pub use session_service::SessionService;
