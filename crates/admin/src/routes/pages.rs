//! Minimal page shells behind the perimeter gate.
//!
//! The admin UI proper is a separate frontend; these handlers exist so the
//! gate's redirect targets resolve.

use axum::response::{Html, Redirect};
use tracing::instrument;

/// `GET /` - everything starts at the dashboard.
#[instrument]
pub async fn index() -> Redirect {
    Redirect::to("/dashboard")
}

/// `GET /login`
///
/// The login API only accepts JSON bodies, so the shell submits the form
/// through `fetch` instead of a native form post.
#[instrument]
pub async fn login() -> Html<&'static str> {
    Html(
        r#"<!DOCTYPE html>
<html><head><meta charset="utf-8"><title>TechMeet Admin</title></head>
<body><h1>TechMeet Admin</h1>
<form id="login-form">
<input type="email" name="email" placeholder="Email" required>
<input type="password" name="password" placeholder="Password" required>
<button type="submit">Log in</button>
</form>
<p id="login-error" hidden>Login failed</p>
<script>
document.getElementById('login-form').addEventListener('submit', async (event) => {
  event.preventDefault();
  const response = await fetch('/api/auth/login', {
    method: 'POST',
    headers: { 'Content-Type': 'application/json' },
    body: JSON.stringify(Object.fromEntries(new FormData(event.target))),
  });
  if (response.ok) {
    window.location.assign('/dashboard');
  } else {
    document.getElementById('login-error').hidden = false;
  }
});
</script>
</body></html>"#,
    )
}

/// `GET /dashboard`
#[instrument]
pub async fn dashboard() -> Html<&'static str> {
    Html(
        "<!DOCTYPE html>\
         <html><head><meta charset=\"utf-8\"><title>TechMeet Admin</title></head>\
         <body><h1>Dashboard</h1></body></html>",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_login_shell_submits_json_to_the_auth_api() {
        let Html(shell) = login().await;

        assert!(shell.contains("fetch('/api/auth/login'"));
        assert!(shell.contains("'Content-Type': 'application/json'"));
        // A native form post would send urlencoded, which the API rejects.
        assert!(!shell.contains("method=\"post\""));
    }
}
