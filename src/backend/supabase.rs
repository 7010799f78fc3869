use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use super::{Backend, BackendError, Session};
use crate::models::event::{Event, EventId, EventPatch, NewEvent};
use crate::models::organizer::OrganizerLink;
use crate::models::user::{AuthUser, Group, Profile};

pub const CREATE_EVENT_PROCEDURE: &str = "create_event_with_organizers";
pub const UPDATE_EVENT_PROCEDURE: &str = "update_event_with_organizers";
pub const DELETE_EVENT_PROCEDURE: &str = "delete_event_and_organizers_secured";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Client for a Supabase project: GoTrue for auth, PostgREST for tables and procedures.
#[derive(Clone)]
pub struct SupabaseBackend {
    client: Client,
    base_url: String,
    anon_key: String,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: i64,
    user: AuthUser,
}

#[derive(Deserialize)]
struct EventIdRow {
    event_id: EventId,
}

#[derive(Serialize)]
struct CreateEventArgs<'a> {
    p_title: &'a str,
    p_description: &'a str,
    p_location: &'a str,
    p_address: &'a str,
    p_start_time: DateTime<Utc>,
    p_end_time: DateTime<Utc>,
    p_created_by: Uuid,
    p_organizer_ids: &'a [Uuid],
}

impl<'a> From<&'a NewEvent> for CreateEventArgs<'a> {
    fn from(event: &'a NewEvent) -> Self {
        Self {
            p_title: &event.title,
            p_description: &event.description,
            p_location: &event.location,
            p_address: &event.address,
            p_start_time: event.start_time,
            p_end_time: event.end_time,
            p_created_by: event.created_by,
            p_organizer_ids: &event.organizer_ids,
        }
    }
}

// Unchanged columns go out as null; the procedure keeps their stored value.
#[derive(Serialize)]
struct UpdateEventArgs<'a> {
    p_event_id: EventId,
    p_title: Option<&'a str>,
    p_description: Option<&'a str>,
    p_location: Option<&'a str>,
    p_address: Option<&'a str>,
    p_start_time: Option<DateTime<Utc>>,
    p_end_time: Option<DateTime<Utc>>,
    p_organizer_ids: Option<&'a [Uuid]>,
}

impl<'a> From<&'a EventPatch> for UpdateEventArgs<'a> {
    fn from(patch: &'a EventPatch) -> Self {
        Self {
            p_event_id: patch.event_id,
            p_title: patch.title.as_deref(),
            p_description: patch.description.as_deref(),
            p_location: patch.location.as_deref(),
            p_address: patch.address.as_deref(),
            p_start_time: patch.start_time,
            p_end_time: patch.end_time,
            p_organizer_ids: patch.organizer_ids.as_deref(),
        }
    }
}

#[derive(Serialize)]
struct DeleteEventArgs {
    p_event_id: EventId,
}

impl SupabaseBackend {
    pub fn new(base_url: &str, anon_key: &str) -> Result<Self, BackendError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
        })
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    fn rest_url(&self, path: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, path)
    }

    /// Requests without a user token run as the anonymous role.
    fn request(&self, method: Method, url: String, token: Option<&str>) -> RequestBuilder {
        self.client
            .request(method, url)
            .header("apikey", &self.anon_key)
            .bearer_auth(token.unwrap_or(&self.anon_key))
    }

    async fn select<T: DeserializeOwned>(
        &self,
        token: &str,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, BackendError> {
        let response = self
            .request(Method::GET, self.rest_url(table), Some(token))
            .query(query)
            .send()
            .await?;

        decode(ensure_success(response).await?).await
    }

    async fn rpc<A: Serialize + Sync>(
        &self,
        token: &str,
        procedure: &str,
        args: &A,
    ) -> Result<(), BackendError> {
        let response = self
            .request(
                Method::POST,
                self.rest_url(&format!("rpc/{}", procedure)),
                Some(token),
            )
            .json(args)
            .send()
            .await?;

        ensure_success(response).await?;
        tracing::debug!(procedure, "Remote procedure completed");
        Ok(())
    }
}

async fn ensure_success(response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    match status {
        StatusCode::UNAUTHORIZED => Err(BackendError::Unauthorized),
        _ => Err(BackendError::Status {
            status: status.as_u16(),
            body,
        }),
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// PostgREST `in.(...)` list.
fn in_list<T: ToString>(values: &[T]) -> String {
    let joined = values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",");
    format!("in.({})", joined)
}

/// Query for events created by `creator` or linked through `ids`.
fn created_by_or_in_query(creator: Uuid, ids: &[EventId]) -> Vec<(&'static str, String)> {
    let mut query = vec![("select", "*".to_string())];
    if ids.is_empty() {
        query.push(("created_by", format!("eq.{}", creator)));
    } else {
        query.push((
            "or",
            format!("(created_by.eq.{},id.{})", creator, in_list(ids)),
        ));
    }
    query
}

#[async_trait]
impl Backend for SupabaseBackend {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, BackendError> {
        let response = self
            .request(Method::POST, self.auth_url("token"), None)
            .query(&[("grant_type", "password")])
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        // GoTrue answers bad credentials with 400.
        if response.status() == StatusCode::BAD_REQUEST {
            return Err(BackendError::InvalidCredentials);
        }

        let token: TokenResponse = decode(ensure_success(response).await?).await?;
        Ok(Session {
            access_token: token.access_token,
            expires_in: token.expires_in,
            user: token.user,
        })
    }

    async fn sign_out(&self, token: &str) -> Result<(), BackendError> {
        let response = self
            .request(Method::POST, self.auth_url("logout"), Some(token))
            .send()
            .await?;

        ensure_success(response).await?;
        Ok(())
    }

    async fn current_user(&self, token: &str) -> Result<AuthUser, BackendError> {
        let response = self
            .request(Method::GET, self.auth_url("user"), Some(token))
            .send()
            .await?;

        if response.status() == StatusCode::FORBIDDEN {
            return Err(BackendError::Unauthorized);
        }
        decode(ensure_success(response).await?).await
    }

    async fn profile_by_id(&self, token: &str, id: Uuid) -> Result<Option<Profile>, BackendError> {
        let rows: Vec<Profile> = self
            .select(
                token,
                "users",
                &[("select", "*".to_string()), ("id", format!("eq.{}", id))],
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn profile_by_email(
        &self,
        token: &str,
        email: &str,
    ) -> Result<Option<Profile>, BackendError> {
        let rows: Vec<Profile> = self
            .select(
                token,
                "users",
                &[("select", "*".to_string()), ("email", format!("eq.{}", email))],
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn groups(&self, token: &str) -> Result<Vec<Group>, BackendError> {
        self.select(
            token,
            "users",
            &[
                ("select", "id,username".to_string()),
                ("order", "username.asc".to_string()),
            ],
        )
        .await
    }

    async fn event(&self, token: &str, id: EventId) -> Result<Option<Event>, BackendError> {
        let rows: Vec<Event> = self
            .select(
                token,
                "events",
                &[("select", "*".to_string()), ("id", format!("eq.{}", id))],
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn organizer_event_ids(
        &self,
        token: &str,
        group: Uuid,
    ) -> Result<Vec<EventId>, BackendError> {
        let rows: Vec<EventIdRow> = self
            .select(
                token,
                "organizers",
                &[
                    ("select", "event_id".to_string()),
                    ("group_id", format!("eq.{}", group)),
                ],
            )
            .await?;
        Ok(rows.into_iter().map(|r| r.event_id).collect())
    }

    async fn events_created_by_or_in(
        &self,
        token: &str,
        creator: Uuid,
        ids: &[EventId],
    ) -> Result<Vec<Event>, BackendError> {
        self.select(token, "events", &created_by_or_in_query(creator, ids))
            .await
    }

    async fn organizers_for_event(
        &self,
        token: &str,
        event: EventId,
    ) -> Result<Vec<Group>, BackendError> {
        let links: Vec<OrganizerLink> = self
            .select(
                token,
                "organizers",
                &[
                    ("select", "event_id,group_id".to_string()),
                    ("event_id", format!("eq.{}", event)),
                ],
            )
            .await?;
        if links.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = links.into_iter().map(|l| l.group_id).collect();
        self.select(
            token,
            "users",
            &[("select", "id,username".to_string()), ("id", in_list(&ids))],
        )
        .await
    }

    async fn create_event(&self, token: &str, event: &NewEvent) -> Result<(), BackendError> {
        self.rpc(token, CREATE_EVENT_PROCEDURE, &CreateEventArgs::from(event))
            .await
    }

    async fn update_event(&self, token: &str, patch: &EventPatch) -> Result<(), BackendError> {
        self.rpc(token, UPDATE_EVENT_PROCEDURE, &UpdateEventArgs::from(patch))
            .await
    }

    async fn delete_event(&self, token: &str, id: EventId) -> Result<(), BackendError> {
        self.rpc(token, DELETE_EVENT_PROCEDURE, &DeleteEventArgs { p_event_id: id })
            .await
    }
}
