use axum::http::header::CONTENT_TYPE;
use axum::response::{Html, IntoResponse, Response};
use serde::Serialize;

use crate::utils::error::AppError;
use crate::utils::flash::Notice;
use crate::utils::response::success;
use crate::views::assets::{PORTAL_CSS, PORTAL_JS};
use crate::views::layout::{page, Chrome};

pub mod auth;
pub mod events;
pub mod pages;

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    service: &'static str,
}

pub async fn health_check() -> Response {
    let payload = HealthPayload {
        status: "ok",
        service: "group-portal",
    };

    success(payload, "Health check successful").into_response()
}

pub async fn not_found() -> Response {
    AppError::NotFound("The page you are looking for does not exist.".to_string()).into_response()
}

pub async fn stylesheet() -> impl IntoResponse {
    ([(CONTENT_TYPE, "text/css; charset=utf-8")], PORTAL_CSS)
}

pub async fn script() -> impl IntoResponse {
    ([(CONTENT_TYPE, "text/javascript; charset=utf-8")], PORTAL_JS)
}

/// Wraps a dashboard body in the navbar layout, with the request's notice as a toast.
pub(crate) fn render(title: &str, notice: &Notice, body: &str) -> Html<String> {
    Html(page(title, Chrome::Dashboard, Some(notice), body))
}
