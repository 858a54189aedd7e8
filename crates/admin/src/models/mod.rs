//! Domain types for the admin panel.
//!
//! These are the validated shapes handed between repositories, services, and
//! route handlers. They serialize directly into the JSON `data` payloads.

pub mod admin_user;
pub mod alimtalk;
pub mod application;
pub mod audit;
pub mod notice;
pub mod profile;
pub mod project;
pub mod team;
