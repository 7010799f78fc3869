//! The hosted data/auth service the portal delegates to.
//!
//! Persistence, authentication and row-level authorization all live on the
//! remote side. Every call that reads or writes group data carries the
//! caller's access token so the service can apply its own policies.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::event::{Event, EventId, EventPatch, NewEvent};
use crate::models::user::{AuthUser, Group, Profile};

pub mod supabase;

#[cfg(test)]
pub mod memory;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("request to backend failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend responded with {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected backend payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid login credentials")]
    InvalidCredentials,

    #[error("session is missing or expired")]
    Unauthorized,
}

/// A signed-in session as issued by the auth service.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub access_token: String,
    /// Lifetime of the access token in seconds.
    pub expires_in: i64,
    pub user: AuthUser,
}

#[async_trait]
pub trait Backend: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, BackendError>;

    async fn sign_out(&self, token: &str) -> Result<(), BackendError>;

    async fn current_user(&self, token: &str) -> Result<AuthUser, BackendError>;

    async fn profile_by_id(&self, token: &str, id: Uuid) -> Result<Option<Profile>, BackendError>;

    async fn profile_by_email(
        &self,
        token: &str,
        email: &str,
    ) -> Result<Option<Profile>, BackendError>;

    /// All groups, for the organizer picker.
    async fn groups(&self, token: &str) -> Result<Vec<Group>, BackendError>;

    async fn event(&self, token: &str, id: EventId) -> Result<Option<Event>, BackendError>;

    /// Ids of the events `group` is linked to as an organizer.
    async fn organizer_event_ids(
        &self,
        token: &str,
        group: Uuid,
    ) -> Result<Vec<EventId>, BackendError>;

    /// Events created by `creator` or whose id is in `ids`.
    async fn events_created_by_or_in(
        &self,
        token: &str,
        creator: Uuid,
        ids: &[EventId],
    ) -> Result<Vec<Event>, BackendError>;

    async fn organizers_for_event(
        &self,
        token: &str,
        event: EventId,
    ) -> Result<Vec<Group>, BackendError>;

    /// `create_event_with_organizers`
    async fn create_event(&self, token: &str, event: &NewEvent) -> Result<(), BackendError>;

    /// `update_event_with_organizers`
    async fn update_event(&self, token: &str, patch: &EventPatch) -> Result<(), BackendError>;

    /// `delete_event_and_organizers_secured`
    async fn delete_event(&self, token: &str, id: EventId) -> Result<(), BackendError>;
}
