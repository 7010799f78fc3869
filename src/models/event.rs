use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::null_as_empty;

pub type EventId = i64;

/// Past events are shown four at a time.
pub const PAST_EVENTS_PER_PAGE: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    #[serde(deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub location: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub address: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub created_by: Uuid,
}

/// An event as seen by a particular group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListedEvent {
    #[serde(flatten)]
    pub event: Event,
    pub can_manage: bool,
}

impl ListedEvent {
    pub fn for_viewer(event: Event, viewer: Uuid) -> Self {
        let can_manage = event.created_by == viewer;
        Self { event, can_manage }
    }

    /// Every field rendered as text and joined, lowercased, for substring search.
    fn haystack(&self) -> String {
        let e = &self.event;
        [
            e.id.to_string(),
            e.title.clone(),
            e.description.clone(),
            e.start_time.to_rfc3339(),
            e.end_time.to_rfc3339(),
            e.location.clone(),
            e.address.clone(),
            e.created_by.to_string(),
            self.can_manage.to_string(),
        ]
        .join(" ")
        .to_lowercase()
    }

    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        term.is_empty() || self.haystack().contains(&term)
    }
}

/// Arguments for `create_event_with_organizers`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub location: String,
    pub address: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub created_by: Uuid,
    pub organizer_ids: Vec<Uuid>,
}

/// Arguments for `update_event_with_organizers`. `None` leaves the column untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EventPatch {
    pub event_id: EventId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub address: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub organizer_ids: Option<Vec<Uuid>>,
}

impl EventPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.location.is_none()
            && self.address.is_none()
            && self.start_time.is_none()
            && self.end_time.is_none()
            && self.organizer_ids.is_none()
    }
}

/// Events that have not finished yet, soonest first.
pub fn upcoming<'a>(
    events: &'a [ListedEvent],
    now: DateTime<Utc>,
    term: &str,
) -> Vec<&'a ListedEvent> {
    let mut found: Vec<&ListedEvent> = events
        .iter()
        .filter(|e| e.event.end_time >= now)
        .filter(|e| e.matches(term))
        .collect();
    found.sort_by_key(|e| e.event.start_time);
    found
}

/// Finished events, most recently ended first.
pub fn past<'a>(events: &'a [ListedEvent], now: DateTime<Utc>, term: &str) -> Vec<&'a ListedEvent> {
    let mut found: Vec<&ListedEvent> = events
        .iter()
        .filter(|e| e.event.end_time < now)
        .filter(|e| e.matches(term))
        .collect();
    found.sort_by(|a, b| b.event.end_time.cmp(&a.event.end_time));
    found
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pagination<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
}

impl<T> Pagination<T> {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn shows_controls(&self) -> bool {
        self.total_pages > 1
    }
}

/// Slices one page out of `items`. The requested page is clamped into range.
pub fn paginate<T>(items: Vec<T>, requested: usize, per_page: usize) -> Pagination<T> {
    let per_page = per_page.max(1);
    let total_pages = items.len().div_ceil(per_page);
    let page = requested.clamp(1, total_pages.max(1));

    let items = items
        .into_iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .collect();

    Pagination {
        items,
        page,
        total_pages,
    }
}
