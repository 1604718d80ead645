//! Session cookie middleware.
//!
//! Resolves the session cookie to a live session (creating one when the
//! cookie is missing, unknown, or expired), places the [`SessionId`] in the
//! request extensions, and sets the cookie on the response when a new
//! session was created.

use axum::{
    extract::{Request, State},
    http::{
        header::{COOKIE, SET_COOKIE},
        HeaderMap, HeaderValue, StatusCode,
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::error;

use super::handlers::AppState;
use crate::session::{SessionConfig, SessionId};

/// Find the value of cookie `name` in the request headers.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
}

/// Build the `Set-Cookie` value for a session.
pub fn session_cookie(config: &SessionConfig, id: &SessionId) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax",
        config.cookie_name, id
    );
    if config.secure_cookie {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Session middleware for axum.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let config = state.store.config();
    let token = read_cookie(request.headers(), &config.cookie_name);

    let (id, created) = match state.store.resolve(token.as_deref()) {
        Ok(resolved) => resolved,
        Err(e) => {
            error!(error = %e, "Failed to resolve session");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response();
        }
    };

    let cookie = created.then(|| session_cookie(config, &id));
    request.extensions_mut().insert(id);

    let mut response = next.run(request).await;

    if let Some(cookie) = cookie {
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().append(SET_COOKIE, value);
            }
            Err(e) => error!(error = %e, "Invalid session cookie"),
        }
    }

    response
}
