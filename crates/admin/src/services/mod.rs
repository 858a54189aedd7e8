//! Business logic services.

pub mod audit;
pub mod auth;
pub mod authz;

pub use audit::AuditRecorder;
pub use auth::AuthService;
pub use authz::AuthzService;
