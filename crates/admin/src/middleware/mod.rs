//! HTTP middleware: sessions, auth extractors, and the page gate.

pub mod auth;
pub mod gate;
pub mod session;

pub use auth::{RequireAdmin, RequireSuperAdmin};
pub use session::create_session_layer;
