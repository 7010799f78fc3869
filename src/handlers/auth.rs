use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;
use tracing::{info, warn};

use crate::state::AppState;
use crate::utils::flash::Notice;
use crate::utils::response::redirect_with_error;
use crate::utils::session::{cleared_session_cookie, session_cookie, session_token, with_cookie};
use crate::views::layout::{page, Chrome};
use crate::views::login::login_page;

pub const SIGN_IN_FAILED: &str =
    "Could not authenticate user. Please check your credentials and try again.";
pub const NO_GROUP_ACCOUNT: &str =
    "User not found. Please contact us to ensure that you are properly added to the system.";

#[derive(Debug, Deserialize)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

pub async fn login(notice: Notice) -> Html<String> {
    Html(page("Sign in", Chrome::Bare, Some(&notice), &login_page()))
}

#[tracing::instrument(skip_all)]
pub async fn sign_in(State(state): State<AppState>, Form(form): Form<SignInForm>) -> Response {
    let email = form.email.trim();

    let session = match state.backend.sign_in(email, &form.password).await {
        Ok(session) => session,
        Err(e) => {
            warn!(error = %e, "Sign-in rejected");
            return redirect_with_error("/login", SIGN_IN_FAILED).into_response();
        }
    };

    // A login is only useful if it belongs to a group account.
    match state
        .backend
        .profile_by_email(&session.access_token, email)
        .await
    {
        Ok(Some(_)) => {}
        Ok(None) | Err(_) => {
            warn!(user_id = %session.user.id, "Signed-in user has no group account");
            if let Err(e) = state.backend.sign_out(&session.access_token).await {
                warn!(error = %e, "Failed to revoke session");
            }
            return redirect_with_error("/login", NO_GROUP_ACCOUNT).into_response();
        }
    }

    info!(user_id = %session.user.id, "Group signed in");
    let cookie = session_cookie(
        &session.access_token,
        session.expires_in,
        state.settings.secure_cookies,
    );
    with_cookie(Redirect::to("/dashboard"), &cookie)
}

pub async fn sign_out(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = session_token(&headers) {
        if let Err(e) = state.backend.sign_out(&token).await {
            warn!(error = %e, "Error signing out");
        }
    }

    with_cookie(
        Redirect::to("/login"),
        &cleared_session_cookie(state.settings.secure_cookies),
    )
}
