use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use crate::backend::BackendError;
use crate::models::user::AuthUser;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::redirect_with_message;

pub const SESSION_COOKIE: &str = "portal_session";

pub const LOGIN_PROMPT: &str = "Please log in to access the dashboard.";

pub const SESSION_CHECK_FAILED: &str = "Unable to verify your session. Please try again.";

/// Access token from the session cookie, if present.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

pub fn session_cookie(token: &str, max_age: i64, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE,
        token,
        max_age.max(0)
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

pub fn cleared_session_cookie(secure: bool) -> String {
    session_cookie("", 0, secure)
}

/// Attaches a `Set-Cookie` header to `response`.
pub fn with_cookie(response: impl IntoResponse, cookie: &str) -> Response {
    let mut response = response.into_response();
    match HeaderValue::from_str(cookie) {
        Ok(value) => {
            response.headers_mut().append(SET_COOKIE, value);
        }
        Err(e) => tracing::error!(error = %e, "Session cookie is not a valid header value"),
    }
    response
}

/// The signed-in group behind the current request.
///
/// Re-authenticated against the auth service on every request. Requests
/// without a valid session are redirected to the login page.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: AuthUser,
    pub token: String,
}

impl CurrentUser {
    pub fn id(&self) -> Uuid {
        self.user.id
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let login = || redirect_with_message("/login", LOGIN_PROMPT).into_response();

        let Some(token) = session_token(&parts.headers) else {
            return Err(login());
        };

        match state.backend.current_user(&token).await {
            Ok(user) => Ok(CurrentUser { user, token }),
            Err(BackendError::Unauthorized) => {
                tracing::debug!("Session rejected by auth service");
                Err(with_cookie(
                    login(),
                    &cleared_session_cookie(state.settings.secure_cookies),
                ))
            }
            // The session may still be valid; keep the cookie.
            Err(e) => Err(AppError::RemoteError {
                context: SESSION_CHECK_FAILED.to_string(),
                source: e,
            }
            .into_response()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_token_found_among_cookies() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; portal_session=abc.def; other=1"),
        );
        assert_eq!(session_token(&headers).as_deref(), Some("abc.def"));
    }

    #[test]
    fn test_empty_session_cookie_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("portal_session="));
        assert!(session_token(&headers).is_none());
        assert!(session_token(&HeaderMap::new()).is_none());
    }

    #[test]
    fn test_cookie_attributes() {
        let cookie = session_cookie("tok", 3600, true);
        assert_eq!(
            cookie,
            "portal_session=tok; Path=/; HttpOnly; SameSite=Lax; Max-Age=3600; Secure"
        );
        assert!(cleared_session_cookie(false).contains("Max-Age=0"));
        assert!(!cleared_session_cookie(false).contains("Secure"));
    }
}
