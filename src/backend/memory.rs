//! In-process stand-in for the hosted service, used by handler tests.
//!
//! Remote procedures are applied to in-memory tables and recorded so tests
//! can assert on what would have been sent.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{Backend, BackendError, Session};
use crate::models::event::{Event, EventId, EventPatch, NewEvent};
use crate::models::organizer::OrganizerLink;
use crate::models::user::{AuthUser, Group, Profile};

#[derive(Debug, Clone, PartialEq)]
pub enum RemoteCall {
    Create(NewEvent),
    Update(EventPatch),
    Delete(EventId),
    SignOut(String),
}

#[derive(Default)]
struct Tables {
    accounts: Vec<(Profile, String)>,
    // Auth accounts without a matching `users` row.
    orphans: Vec<(AuthUser, String)>,
    events: Vec<Event>,
    organizers: Vec<OrganizerLink>,
    sessions: HashMap<String, Uuid>,
    calls: Vec<RemoteCall>,
    next_event_id: EventId,
    fail_procedures: bool,
    auth_unavailable: bool,
}

#[derive(Default)]
pub struct MemoryBackend {
    tables: Mutex<Tables>,
}

fn created_at() -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339("2025-08-14T15:30:00Z")
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a group account and returns its id.
    pub fn add_group(&self, username: &str, email: &str, password: &str) -> Uuid {
        let id = Uuid::new_v4();
        let profile = Profile {
            id,
            username: Some(username.to_string()),
            group_name: Some(format!("{} Society", username)),
            email: email.to_string(),
        };
        self.tables
            .lock()
            .unwrap()
            .accounts
            .push((profile, password.to_string()));
        id
    }

    /// An auth account that has no `users` row.
    pub fn add_orphan_login(&self, email: &str, password: &str) -> Uuid {
        let user = AuthUser {
            id: Uuid::new_v4(),
            email: Some(email.to_string()),
            created_at: created_at(),
        };
        let id = user.id;
        self.tables
            .lock()
            .unwrap()
            .orphans
            .push((user, password.to_string()));
        id
    }

    /// Issues a session token for `user` without going through sign-in.
    pub fn session_for(&self, user: Uuid) -> String {
        let token = format!("token-{}", Uuid::new_v4());
        self.tables
            .lock()
            .unwrap()
            .sessions
            .insert(token.clone(), user);
        token
    }

    pub fn insert_event(&self, event: Event, organizers: &[Uuid]) {
        let mut tables = self.tables.lock().unwrap();
        tables.next_event_id = tables.next_event_id.max(event.id);
        for group in organizers {
            tables.organizers.push(OrganizerLink {
                event_id: event.id,
                group_id: *group,
            });
        }
        tables.events.push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.tables.lock().unwrap().events.clone()
    }

    pub fn calls(&self) -> Vec<RemoteCall> {
        self.tables.lock().unwrap().calls.clone()
    }

    pub fn fail_procedures(&self) {
        self.tables.lock().unwrap().fail_procedures = true;
    }

    /// Makes session checks fail as if the auth service were down.
    pub fn make_auth_unavailable(&self) {
        self.tables.lock().unwrap().auth_unavailable = true;
    }

    fn authorize(&self, token: &str) -> Result<Uuid, BackendError> {
        self.tables
            .lock()
            .unwrap()
            .sessions
            .get(token)
            .copied()
            .ok_or(BackendError::Unauthorized)
    }

    fn procedure_failure(tables: &Tables) -> Result<(), BackendError> {
        if tables.fail_procedures {
            return Err(BackendError::Status {
                status: 500,
                body: "procedure failed".to_string(),
            });
        }
        Ok(())
    }

    fn group_rows(tables: &Tables, ids: &[Uuid]) -> Vec<Group> {
        tables
            .accounts
            .iter()
            .filter(|(p, _)| ids.contains(&p.id))
            .map(|(p, _)| Group {
                id: p.id,
                username: p.username.clone().unwrap_or_default(),
            })
            .collect()
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, BackendError> {
        let user = {
            let tables = self.tables.lock().unwrap();
            let account = tables
                .accounts
                .iter()
                .find(|(p, pw)| p.email == email && pw == password)
                .map(|(p, _)| AuthUser {
                    id: p.id,
                    email: Some(p.email.clone()),
                    created_at: created_at(),
                });
            let orphan = tables
                .orphans
                .iter()
                .find(|(u, pw)| u.email.as_deref() == Some(email) && pw == password)
                .map(|(u, _)| u.clone());
            account.or(orphan).ok_or(BackendError::InvalidCredentials)?
        };

        let access_token = self.session_for(user.id);
        Ok(Session {
            access_token,
            expires_in: 3600,
            user,
        })
    }

    async fn sign_out(&self, token: &str) -> Result<(), BackendError> {
        let mut tables = self.tables.lock().unwrap();
        tables.sessions.remove(token);
        tables.calls.push(RemoteCall::SignOut(token.to_string()));
        Ok(())
    }

    async fn current_user(&self, token: &str) -> Result<AuthUser, BackendError> {
        if self.tables.lock().unwrap().auth_unavailable {
            return Err(BackendError::Status {
                status: 503,
                body: "auth service unavailable".to_string(),
            });
        }
        let id = self.authorize(token)?;
        let tables = self.tables.lock().unwrap();
        let from_account = tables
            .accounts
            .iter()
            .find(|(p, _)| p.id == id)
            .map(|(p, _)| AuthUser {
                id,
                email: Some(p.email.clone()),
                created_at: created_at(),
            });
        let from_orphan = tables
            .orphans
            .iter()
            .find(|(u, _)| u.id == id)
            .map(|(u, _)| u.clone());
        from_account.or(from_orphan).ok_or(BackendError::Unauthorized)
    }

    async fn profile_by_id(&self, token: &str, id: Uuid) -> Result<Option<Profile>, BackendError> {
        self.authorize(token)?;
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .accounts
            .iter()
            .find(|(p, _)| p.id == id)
            .map(|(p, _)| p.clone()))
    }

    async fn profile_by_email(
        &self,
        token: &str,
        email: &str,
    ) -> Result<Option<Profile>, BackendError> {
        self.authorize(token)?;
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .accounts
            .iter()
            .find(|(p, _)| p.email == email)
            .map(|(p, _)| p.clone()))
    }

    async fn groups(&self, token: &str) -> Result<Vec<Group>, BackendError> {
        self.authorize(token)?;
        let tables = self.tables.lock().unwrap();
        let ids: Vec<Uuid> = tables.accounts.iter().map(|(p, _)| p.id).collect();
        Ok(Self::group_rows(&tables, &ids))
    }

    async fn event(&self, token: &str, id: EventId) -> Result<Option<Event>, BackendError> {
        self.authorize(token)?;
        let tables = self.tables.lock().unwrap();
        Ok(tables.events.iter().find(|e| e.id == id).cloned())
    }

    async fn organizer_event_ids(
        &self,
        token: &str,
        group: Uuid,
    ) -> Result<Vec<EventId>, BackendError> {
        self.authorize(token)?;
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .organizers
            .iter()
            .filter(|l| l.group_id == group)
            .map(|l| l.event_id)
            .collect())
    }

    async fn events_created_by_or_in(
        &self,
        token: &str,
        creator: Uuid,
        ids: &[EventId],
    ) -> Result<Vec<Event>, BackendError> {
        self.authorize(token)?;
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .events
            .iter()
            .filter(|e| e.created_by == creator || ids.contains(&e.id))
            .cloned()
            .collect())
    }

    async fn organizers_for_event(
        &self,
        token: &str,
        event: EventId,
    ) -> Result<Vec<Group>, BackendError> {
        self.authorize(token)?;
        let tables = self.tables.lock().unwrap();
        let ids: Vec<Uuid> = tables
            .organizers
            .iter()
            .filter(|l| l.event_id == event)
            .map(|l| l.group_id)
            .collect();
        Ok(Self::group_rows(&tables, &ids))
    }

    async fn create_event(&self, token: &str, event: &NewEvent) -> Result<(), BackendError> {
        self.authorize(token)?;
        let mut tables = self.tables.lock().unwrap();
        tables.calls.push(RemoteCall::Create(event.clone()));
        Self::procedure_failure(&tables)?;

        tables.next_event_id += 1;
        let id = tables.next_event_id;
        tables.events.push(Event {
            id,
            title: event.title.clone(),
            description: event.description.clone(),
            location: event.location.clone(),
            address: event.address.clone(),
            start_time: event.start_time,
            end_time: event.end_time,
            created_by: event.created_by,
        });
        for group in &event.organizer_ids {
            tables.organizers.push(OrganizerLink {
                event_id: id,
                group_id: *group,
            });
        }
        Ok(())
    }

    async fn update_event(&self, token: &str, patch: &EventPatch) -> Result<(), BackendError> {
        self.authorize(token)?;
        let mut tables = self.tables.lock().unwrap();
        tables.calls.push(RemoteCall::Update(patch.clone()));
        Self::procedure_failure(&tables)?;

        if let Some(event) = tables.events.iter_mut().find(|e| e.id == patch.event_id) {
            if let Some(title) = &patch.title {
                event.title = title.clone();
            }
            if let Some(description) = &patch.description {
                event.description = description.clone();
            }
            if let Some(location) = &patch.location {
                event.location = location.clone();
            }
            if let Some(address) = &patch.address {
                event.address = address.clone();
            }
            if let Some(start) = patch.start_time {
                event.start_time = start;
            }
            if let Some(end) = patch.end_time {
                event.end_time = end;
            }
        }
        if let Some(groups) = &patch.organizer_ids {
            tables.organizers.retain(|l| l.event_id != patch.event_id);
            for group in groups {
                tables.organizers.push(OrganizerLink {
                    event_id: patch.event_id,
                    group_id: *group,
                });
            }
        }
        Ok(())
    }

    async fn delete_event(&self, token: &str, id: EventId) -> Result<(), BackendError> {
        self.authorize(token)?;
        let mut tables = self.tables.lock().unwrap();
        tables.calls.push(RemoteCall::Delete(id));
        Self::procedure_failure(&tables)?;

        tables.events.retain(|e| e.id != id);
        tables.organizers.retain(|l| l.event_id != id);
        Ok(())
    }
}
