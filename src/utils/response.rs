use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect};
use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

pub fn success<T>(data: T, message: impl Into<String>) -> impl IntoResponse
where
    T: Serialize,
{
    let body = ApiResponse {
        success: true,
        data: Some(data),
        message: Some(message.into()),
    };
    (StatusCode::OK, Json(body))
}

/// Appends a one-shot notice (`message` or `error`) to `path`.
pub fn with_notice(path: &str, key: &str, text: &str) -> String {
    let separator = if path.contains('?') { '&' } else { '?' };
    format!("{}{}{}={}", path, separator, key, urlencoding::encode(text))
}

pub fn redirect_with_message(path: &str, message: &str) -> Redirect {
    Redirect::to(&with_notice(path, "message", message))
}

pub fn redirect_with_error(path: &str, error: &str) -> Redirect {
    Redirect::to(&with_notice(path, "error", error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::LOCATION;

    #[test]
    fn test_notice_is_encoded() {
        assert_eq!(
            with_notice("/dashboard/events", "error", "Event not found"),
            "/dashboard/events?error=Event%20not%20found"
        );
        assert_eq!(
            with_notice("/dashboard/events?q=bbq", "message", "Done & dusted"),
            "/dashboard/events?q=bbq&message=Done%20%26%20dusted"
        );
    }

    #[test]
    fn test_redirect_is_see_other() {
        let response = redirect_with_message("/login", "Signed out.").into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(LOCATION).unwrap(),
            "/login?message=Signed%20out."
        );
    }
}
