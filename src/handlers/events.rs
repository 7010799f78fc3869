use axum::extract::{Path, Query, State};
use axum::response::{Html, Redirect};
use axum::Form;
use chrono::Utc;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use super::pages::username_for;
use super::render;
use crate::backend::Backend;
use crate::models::event::{
    paginate, past, upcoming, Event, EventId, ListedEvent, PAST_EVENTS_PER_PAGE,
};
use crate::models::event_form::EventSubmission;
use crate::models::user::Group;
use crate::state::AppState;
use crate::utils::error::{AppError, RemoteContext};
use crate::utils::flash::Notice;
use crate::utils::response::redirect_with_message;
use crate::utils::session::CurrentUser;
use crate::views::events::{event_form, events_page, EventsPage, FormMode, FormValues};

pub const EVENTS_PATH: &str = "/dashboard/events";
const ADD_EVENT_PATH: &str = "/dashboard/events/add";

const EVENT_NOT_FOUND: &str = "Event not found";
const MANAGE_DENIED: &str = "You can only manage your own events.";
const DELETE_DENIED: &str = "Only the creator can delete this event";

fn manage_path(id: EventId) -> String {
    format!("/dashboard/events/{}/manage", id)
}

/// Events `uid` created or organizes, flagged with whether it may manage them.
pub async fn get_events_for_user(
    backend: &dyn Backend,
    token: &str,
    uid: Uuid,
) -> Result<Vec<ListedEvent>, AppError> {
    let organized = backend
        .organizer_event_ids(token, uid)
        .await
        .remote_context("Failed to fetch organizer events")?;

    let events = backend
        .events_created_by_or_in(token, uid, &organized)
        .await
        .remote_context("Failed to fetch events")?;

    Ok(events
        .into_iter()
        .map(|event| ListedEvent::for_viewer(event, uid))
        .collect())
}

pub async fn get_organizers_for_event(
    backend: &dyn Backend,
    token: &str,
    event_id: EventId,
) -> Result<Vec<Group>, AppError> {
    backend
        .organizers_for_event(token, event_id)
        .await
        .remote_context("Failed to fetch organizers")
}

fn parse_event_id(raw: &str) -> Result<EventId, AppError> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::NotFound(EVENT_NOT_FOUND.to_string()))
}

/// Loads the event and checks the signed-in group created it.
async fn owned_event(
    backend: &dyn Backend,
    user: &CurrentUser,
    id: EventId,
    denied: &str,
) -> Result<Event, AppError> {
    let event = backend
        .event(&user.token, id)
        .await
        .remote_context("Failed to load event")?
        .ok_or_else(|| AppError::NotFound(EVENT_NOT_FOUND.to_string()))?;

    if event.created_by != user.id() {
        return Err(AppError::Forbidden(denied.to_string()));
    }

    Ok(event)
}

async fn load_groups(backend: &dyn Backend, token: &str) -> Result<Vec<Group>, AppError> {
    backend
        .groups(token)
        .await
        .remote_context("Failed to fetch groups.")
}

#[derive(Debug, Default, Deserialize)]
pub struct EventsQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub past_q: String,
    pub past_page: Option<String>,
}

impl EventsQuery {
    /// Requested past-events page. Non-numeric input means the first page; a
    /// number too large for `usize` is left for `paginate` to clamp.
    fn past_page(&self) -> usize {
        let Some(raw) = self.past_page.as_deref().map(str::trim) else {
            return 1;
        };
        match raw.parse() {
            Ok(page) => page,
            Err(_) if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) => usize::MAX,
            Err(_) => 1,
        }
    }
}

pub async fn list_events(
    user: CurrentUser,
    State(state): State<AppState>,
    notice: Notice,
    Query(query): Query<EventsQuery>,
) -> Html<String> {
    let now = Utc::now();
    let offset = state.settings.utc_offset;
    let username = username_for(&state, &user).await;

    let (events, load_error) =
        match get_events_for_user(state.backend.as_ref(), &user.token, user.id()).await {
            Ok(events) => (events, None),
            Err(e) => {
                e.log();
                (Vec::new(), Some(e.public_message()))
            }
        };

    let q = query.q.trim();
    let past_q = query.past_q.trim();
    let page = EventsPage {
        username: &username,
        upcoming: upcoming(&events, now, q),
        past: paginate(past(&events, now, past_q), query.past_page(), PAST_EVENTS_PER_PAGE),
        q,
        past_q,
        load_error: load_error.as_deref(),
    };

    render("Events", &notice, &events_page(&page, now, offset))
}

pub async fn add_event_page(
    user: CurrentUser,
    State(state): State<AppState>,
    notice: Notice,
) -> Result<Html<String>, Redirect> {
    let groups = load_groups(state.backend.as_ref(), &user.token)
        .await
        .map_err(|e| e.redirect_to(EVENTS_PATH))?;

    let body = event_form(
        FormMode::Create,
        &FormValues::default(),
        &groups,
        Utc::now(),
        state.settings.utc_offset,
    );
    Ok(render("Add Event", &notice, &body))
}

#[tracing::instrument(skip_all, fields(user_id = %user.id()))]
pub async fn add_event(
    user: CurrentUser,
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Redirect {
    let result = async {
        let event = EventSubmission::from_pairs(pairs).into_new_event(
            user.id(),
            Utc::now(),
            state.settings.utc_offset,
        )?;

        state
            .backend
            .create_event(&user.token, &event)
            .await
            .remote_context("Failed to create event")?;

        info!(title = %event.title, organizers = event.organizer_ids.len(), "Event created");
        Ok::<_, AppError>(())
    }
    .await;

    match result {
        Ok(()) => redirect_with_message(EVENTS_PATH, "Event created successfully."),
        Err(e) => e.redirect_to(ADD_EVENT_PATH),
    }
}

pub async fn manage_event_page(
    user: CurrentUser,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    notice: Notice,
) -> Result<Html<String>, Redirect> {
    let backend = state.backend.as_ref();

    let result = async {
        let id = parse_event_id(&raw_id)?;
        let event = owned_event(backend, &user, id, MANAGE_DENIED).await?;
        let organizers = get_organizers_for_event(backend, &user.token, id).await?;
        let groups = load_groups(backend, &user.token).await?;
        Ok::<_, AppError>((event, organizers, groups))
    }
    .await;

    let (event, organizers, groups) = result.map_err(|e| e.redirect_to(EVENTS_PATH))?;

    let values = FormValues {
        title: event.title,
        description: event.description,
        location: event.location,
        address: event.address,
        start: Some(event.start_time),
        end: Some(event.end_time),
        group_ids: organizers.into_iter().map(|group| group.id).collect(),
    };
    let body = event_form(
        FormMode::Edit(event.id),
        &values,
        &groups,
        Utc::now(),
        state.settings.utc_offset,
    );
    Ok(render("Manage Event", &notice, &body))
}

#[tracing::instrument(skip_all, fields(user_id = %user.id(), event_id = %raw_id))]
pub async fn update_event(
    user: CurrentUser,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Redirect {
    let id = match parse_event_id(&raw_id) {
        Ok(id) => id,
        Err(e) => return e.redirect_to(EVENTS_PATH),
    };
    let backend = state.backend.as_ref();

    let result = async {
        let current = owned_event(backend, &user, id, MANAGE_DENIED).await?;
        let patch = EventSubmission::from_pairs(pairs).into_patch(
            &current,
            Utc::now(),
            state.settings.utc_offset,
        )?;

        backend
            .update_event(&user.token, &patch)
            .await
            .remote_context("Failed to update event")?;

        info!("Event updated");
        Ok::<_, AppError>(())
    }
    .await;

    match result {
        Ok(()) => redirect_with_message(EVENTS_PATH, "Event updated successfully."),
        // Nothing to edit: back to the list.
        Err(e @ (AppError::NotFound(_) | AppError::Forbidden(_))) => e.redirect_to(EVENTS_PATH),
        Err(e) => e.redirect_to(&manage_path(id)),
    }
}

#[tracing::instrument(skip_all, fields(user_id = %user.id(), event_id = %raw_id))]
pub async fn delete_event(
    user: CurrentUser,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Redirect {
    let backend = state.backend.as_ref();

    let result = async {
        let id = parse_event_id(&raw_id)?;
        owned_event(backend, &user, id, DELETE_DENIED).await?;

        backend
            .delete_event(&user.token, id)
            .await
            .remote_context("Failed to delete event")?;

        info!("Event deleted");
        Ok::<_, AppError>(())
    }
    .await;

    match result {
        Ok(()) => redirect_with_message(EVENTS_PATH, "Event deleted successfully."),
        Err(e) => e.redirect_to(EVENTS_PATH),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: Option<&str>) -> EventsQuery {
        EventsQuery {
            past_page: page.map(str::to_string),
            ..EventsQuery::default()
        }
    }

    #[test]
    fn test_past_page_parsing() {
        assert_eq!(query(None).past_page(), 1);
        assert_eq!(query(Some(" 3 ")).past_page(), 3);
        assert_eq!(query(Some("next")).past_page(), 1);
        assert_eq!(query(Some("-2")).past_page(), 1);
        assert_eq!(query(Some("")).past_page(), 1);
        assert_eq!(query(Some("99999999999999999999999")).past_page(), usize::MAX);
    }
}
