//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                     - Liveness check
//! GET  /health/ready               - Readiness check (DB ping)
//!
//! # Pages (behind the perimeter gate)
//! GET  /                           - Redirect to dashboard
//! GET  /login                      - Login page shell
//! GET  /dashboard                  - Dashboard shell
//!
//! # Auth
//! POST /api/auth/login             - Password login
//! POST /api/auth/logout            - Logout
//!
//! # Users (platform profiles)
//! GET  /api/users                  - List users
//! GET  /api/users/{id}             - User detail
//! PUT  /api/users/{id}             - Edit user
//! DELETE /api/users/{id}           - Soft-withdraw user
//!
//! # Projects
//! GET/POST /api/projects           - List / create
//! GET/PUT/DELETE /api/projects/{id}
//! PATCH  /api/projects/bulk        - Bulk status change
//! DELETE /api/projects/bulk        - Bulk delete
//!
//! # Applications
//! GET  /api/applications           - List (joined with project + applicant)
//! GET/PUT /api/applications/{id}   - Detail / review
//! PATCH /api/applications/bulk     - Bulk status change
//!
//! # Notices
//! GET/POST /api/notices            - List / create
//! GET/PUT/DELETE /api/notices/{id}
//!
//! # Teams
//! GET/POST /api/teams              - List / create
//! GET/PUT/DELETE /api/teams/{id}
//! POST/PATCH/DELETE /api/teams/{id}/members
//!
//! # Admin accounts (super admin only)
//! GET/POST /api/admins             - List / create
//! DELETE /api/admins/{id}          - Remove admin
//!
//! # Logs & export
//! GET  /api/audit-logs             - Recent audit trail
//! GET  /api/alimtalk               - Recent dispatch log
//! POST /api/alimtalk/send          - Record a dispatch
//! GET  /api/export?type=...        - CSV export
//! ```

pub mod admins;
pub mod alimtalk;
pub mod applications;
pub mod audit_logs;
pub mod auth;
pub mod export;
pub mod health;
pub mod notices;
pub mod pages;
pub mod projects;
pub mod teams;
pub mod users;

use axum::{
    Router, middleware as axum_middleware,
    routing::{delete, get, patch, post},
};

use crate::middleware::gate;
use crate::state::AppState;

/// All `/api` routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/users", get(users::list))
        .route(
            "/users/{id}",
            get(users::show).put(users::update).delete(users::remove),
        )
        .route("/projects", get(projects::list).post(projects::create))
        .route(
            "/projects/bulk",
            patch(projects::bulk_update_status).delete(projects::bulk_delete),
        )
        .route(
            "/projects/{id}",
            get(projects::show)
                .put(projects::update)
                .delete(projects::remove),
        )
        .route("/applications", get(applications::list))
        .route(
            "/applications/bulk",
            patch(applications::bulk_update_status),
        )
        .route(
            "/applications/{id}",
            get(applications::show).put(applications::update),
        )
        .route("/notices", get(notices::list).post(notices::create))
        .route(
            "/notices/{id}",
            get(notices::show)
                .put(notices::update)
                .delete(notices::remove),
        )
        .route("/teams", get(teams::list).post(teams::create))
        .route(
            "/teams/{id}",
            get(teams::show).put(teams::update).delete(teams::remove),
        )
        .route(
            "/teams/{id}/members",
            post(teams::add_member)
                .patch(teams::update_member_role)
                .delete(teams::remove_member),
        )
        .route("/admins", get(admins::list).post(admins::create))
        .route("/admins/{id}", delete(admins::remove))
        .route("/audit-logs", get(audit_logs::list))
        .route("/alimtalk", get(alimtalk::list))
        .route("/alimtalk/send", post(alimtalk::send))
        .route("/export", get(export::export))
}

/// Page routes, wrapped in the perimeter redirect gate.
pub fn page_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(pages::index))
        .route("/login", get(pages::login))
        .route("/dashboard", get(pages::dashboard))
        .layer(axum_middleware::from_fn_with_state(state, gate::page_gate))
}

/// Health endpoints, outside both the gate and the session layer.
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::ready))
}
