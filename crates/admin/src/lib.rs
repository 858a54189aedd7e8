//! TechMeet Admin library.
//!
//! This crate provides the back-office functionality as a library,
//! allowing it to be tested and reused (the CLI links against it for
//! admin provisioning).
//!
//! # Security
//!
//! This crate holds privileged database access: every handler runs with
//! full read/write capability over platform data, gated only by the
//! authorization layer in [`services::authz`]. Only deploy on internal,
//! VPN-protected infrastructure.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod csv;
pub mod db;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod models;
pub mod response;
pub mod routes;
pub mod services;
pub mod state;
