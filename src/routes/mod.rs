use axum::response::Redirect;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::config::create_security_headers_layer;
use crate::handlers::{self, auth, events, pages};
use crate::state::AppState;

pub fn create_routes(state: AppState, production: bool) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::to("/dashboard") }))
        .route("/health", get(handlers::health_check))
        .route("/assets/portal.css", get(handlers::stylesheet))
        .route("/assets/portal.js", get(handlers::script))
        .route("/login", get(auth::login).post(auth::sign_in))
        .route("/logout", post(auth::sign_out))
        .route("/dashboard", get(pages::dashboard))
        .route("/dashboard/account", get(pages::account))
        .route("/dashboard/events", get(events::list_events))
        .route(
            "/dashboard/events/add",
            get(events::add_event_page).post(events::add_event),
        )
        .route(
            "/dashboard/events/:event_id/manage",
            get(events::manage_event_page).post(events::update_event),
        )
        .route("/dashboard/events/:event_id/delete", post(events::delete_event))
        .route("/dashboard/finance", get(pages::finance))
        .route("/dashboard/operations", get(pages::operations))
        .route("/dashboard/contact", get(pages::contact))
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(create_security_headers_layer(production))
}
