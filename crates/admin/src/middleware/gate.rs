//! Perimeter redirect gate for page navigation.
//!
//! Applied to page routes only. API routes perform their own per-call check
//! through the same [`AuthzService`]; they never rely on this gate, because
//! they can be invoked directly.
//!
//! Decision table:
//!
//! | Path      | Unauthenticated   | Non-admin                       | Admin        |
//! |-----------|-------------------|---------------------------------|--------------|
//! | `/login`  | render            | redirect `/dashboard`           | redirect `/dashboard` |
//! | other     | redirect `/login` | redirect `/login?error=unauthorized` | pass through |

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::services::{AuthzService, authz::AccessState};
use crate::state::AppState;

/// Gate middleware, installed with `axum::middleware::from_fn_with_state`.
pub async fn page_gate(
    State(state): State<AppState>,
    session: Session,
    request: Request,
    next: Next,
) -> Response {
    let on_login_page = request.uri().path().starts_with("/login");

    let access = match AuthzService::new(state.pool()).access_state(&session).await {
        Ok(access) => access,
        Err(e) => return e.into_response(),
    };

    if on_login_page {
        // Any valid session skips the login form.
        return match access {
            AccessState::Unauthenticated => next.run(request).await,
            AccessState::NonAdmin | AccessState::Admin(_) => {
                Redirect::to("/dashboard").into_response()
            }
        };
    }

    match access {
        AccessState::Unauthenticated => Redirect::to("/login").into_response(),
        AccessState::NonAdmin => Redirect::to("/login?error=unauthorized").into_response(),
        AccessState::Admin(_) => next.run(request).await,
    }
}
