use axum::extract::State;
use axum::response::Html;
use tracing::warn;

use super::render;
use crate::state::AppState;
use crate::utils::flash::Notice;
use crate::utils::session::CurrentUser;
use crate::views::account::{account_page, account_unavailable};
use crate::views::resources::{contact_page, dashboard_home, finance_page, operations_page};

const UNKNOWN_USER: &str = "Unknown User";

/// Display name of the signed-in group. Lookup failures fall back to a placeholder.
pub(crate) async fn username_for(state: &AppState, user: &CurrentUser) -> String {
    match state.backend.profile_by_id(&user.token, user.id()).await {
        Ok(Some(profile)) => profile
            .username
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_USER.to_string()),
        Ok(None) => UNKNOWN_USER.to_string(),
        Err(e) => {
            warn!(user_id = %user.id(), error = %e, "Failed to load group profile");
            UNKNOWN_USER.to_string()
        }
    }
}

pub async fn dashboard(
    user: CurrentUser,
    State(state): State<AppState>,
    notice: Notice,
) -> Html<String> {
    let username = username_for(&state, &user).await;
    render("Dashboard", &notice, &dashboard_home(&username))
}

pub async fn account(
    user: CurrentUser,
    State(state): State<AppState>,
    notice: Notice,
) -> Html<String> {
    let body = match state.backend.profile_by_id(&user.token, user.id()).await {
        Ok(Some(profile)) => account_page(
            &profile,
            user.user.created_at,
            state.settings.utc_offset,
        ),
        Ok(None) => {
            warn!(user_id = %user.id(), "No group profile for signed-in user");
            account_unavailable()
        }
        Err(e) => {
            warn!(user_id = %user.id(), error = %e, "Failed to load account");
            account_unavailable()
        }
    };

    render("Account", &notice, &body)
}

pub async fn finance(_user: CurrentUser, notice: Notice) -> Html<String> {
    render("Finance", &notice, &finance_page())
}

pub async fn operations(_user: CurrentUser, notice: Notice) -> Html<String> {
    render("Operations", &notice, &operations_page())
}

pub async fn contact(_user: CurrentUser, notice: Notice) -> Html<String> {
    render("Contact", &notice, &contact_page())
}
