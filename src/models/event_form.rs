//! Parsing and validation of the add/manage event form.
//!
//! The browser enforces the same rules through input attributes, but the
//! form is re-checked here before any remote procedure is called.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, FixedOffset, NaiveDateTime, TimeZone, Utc};
use thiserror::Error;
use uuid::Uuid;

use super::event::{Event, EventPatch, NewEvent};

/// Format produced by `<input type="datetime-local">`.
pub const LOCAL_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Minimum gap between start and end.
pub fn minimum_duration() -> Duration {
    Duration::hours(1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Title,
    Description,
    Location,
    Address,
    Start,
    End,
    OrganizingGroups,
}

impl FormField {
    pub const ALL: [FormField; 7] = [
        FormField::Title,
        FormField::Description,
        FormField::Location,
        FormField::Address,
        FormField::Start,
        FormField::End,
        FormField::OrganizingGroups,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FormField::Title => "title",
            FormField::Description => "description",
            FormField::Location => "location",
            FormField::Address => "address",
            FormField::Start => "start",
            FormField::End => "end",
            FormField::OrganizingGroups => "organizingGroups",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::Title => "Event title",
            FormField::Description => "Event description",
            FormField::Location => "TMU building",
            FormField::Address => "Full address",
            FormField::Start => "Start date & time",
            FormField::End => "End date & time",
            FormField::OrganizingGroups => "Organizing groups",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    /// Character bounds for the free-text fields.
    pub fn length_bounds(self) -> Option<(usize, usize)> {
        match self {
            FormField::Title | FormField::Location | FormField::Address => Some((3, 100)),
            FormField::Description => Some((10, 1000)),
            _ => None,
        }
    }
}

/// Fields the user touched, as carried by the hidden `dirty` input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirtyFields(BTreeSet<FormField>);

impl DirtyFields {
    pub fn all() -> Self {
        Self(FormField::ALL.into_iter().collect())
    }

    /// Unknown names are ignored.
    pub fn parse(raw: &str) -> Self {
        Self(
            raw.split(',')
                .map(str::trim)
                .filter_map(FormField::from_name)
                .collect(),
        )
    }

    pub fn contains(&self, field: FormField) -> bool {
        self.0.contains(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn encode(&self) -> String {
        self.0
            .iter()
            .map(|f| f.name())
            .collect::<Vec<_>>()
            .join(",")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{} is required.", .0.label())]
    Missing(FormField),

    #[error("{} must be between {min} and {max} characters.", .field.label())]
    Length {
        field: FormField,
        min: usize,
        max: usize,
    },

    #[error("{} is not a valid date and time.", .0.label())]
    InvalidDateTime(FormField),

    #[error("Start time cannot be in the past.")]
    StartInPast,

    #[error("End time cannot be before {earliest}.")]
    EndTooEarly { earliest: String },

    #[error("You must pick at least one organizing group to submit.")]
    NoOrganizers,

    #[error("One of the selected organizing groups is not valid.")]
    InvalidGroup,

    #[error("No changes to save.")]
    NoChanges,
}

/// Raw values posted by the event form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventSubmission {
    pub title: String,
    pub description: String,
    pub location: String,
    pub address: String,
    pub start: String,
    pub end: String,
    pub organizing_groups: Vec<String>,
    pub dirty: DirtyFields,
}

impl EventSubmission {
    /// Builds a submission from url-encoded pairs. `organizingGroups` may repeat.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut submission = Self::default();

        for (key, value) in pairs {
            match key.as_str() {
                "title" => submission.title = value,
                "description" => submission.description = value,
                "location" => submission.location = value,
                "address" => submission.address = value,
                "start" => submission.start = value,
                "end" => submission.end = value,
                "organizingGroups" => submission.organizing_groups.push(value),
                "dirty" => submission.dirty = DirtyFields::parse(&value),
                _ => {}
            }
        }

        submission
    }

    fn organizers(&self) -> Result<Vec<Uuid>, FormError> {
        let mut ids = Vec::with_capacity(self.organizing_groups.len());
        for raw in &self.organizing_groups {
            let id = Uuid::parse_str(raw.trim()).map_err(|_| FormError::InvalidGroup)?;
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        if ids.is_empty() {
            return Err(FormError::NoOrganizers);
        }
        Ok(ids)
    }

    /// Validates every field for a new event created by `created_by`.
    pub fn into_new_event(
        self,
        created_by: Uuid,
        now: DateTime<Utc>,
        offset: FixedOffset,
    ) -> Result<NewEvent, FormError> {
        let title = checked_text(FormField::Title, &self.title)?;
        let description = checked_text(FormField::Description, &self.description)?;
        let organizer_ids = self.organizers()?;
        let location = checked_text(FormField::Location, &self.location)?;
        let address = checked_text(FormField::Address, &self.address)?;

        let start_time = parse_local_input(&self.start, FormField::Start, offset)?;
        let end_time = parse_local_input(&self.end, FormField::End, offset)?;
        check_start_not_past(start_time, now)?;
        check_schedule(start_time, end_time, offset)?;

        Ok(NewEvent {
            title,
            description,
            location,
            address,
            start_time,
            end_time,
            created_by,
            organizer_ids,
        })
    }

    /// Validates only the dirty fields against the stored `current` event.
    pub fn into_patch(
        self,
        current: &Event,
        now: DateTime<Utc>,
        offset: FixedOffset,
    ) -> Result<EventPatch, FormError> {
        if self.dirty.is_empty() {
            return Err(FormError::NoChanges);
        }

        let dirty = |field| self.dirty.contains(field);
        let mut patch = EventPatch {
            event_id: current.id,
            ..EventPatch::default()
        };

        if dirty(FormField::Title) {
            patch.title = Some(checked_text(FormField::Title, &self.title)?);
        }
        if dirty(FormField::Description) {
            patch.description = Some(checked_text(FormField::Description, &self.description)?);
        }
        if dirty(FormField::OrganizingGroups) {
            patch.organizer_ids = Some(self.organizers()?);
        }
        if dirty(FormField::Location) {
            patch.location = Some(checked_text(FormField::Location, &self.location)?);
        }
        if dirty(FormField::Address) {
            patch.address = Some(checked_text(FormField::Address, &self.address)?);
        }

        if dirty(FormField::Start) || dirty(FormField::End) {
            let start = if dirty(FormField::Start) {
                let start = parse_local_input(&self.start, FormField::Start, offset)?;
                check_start_not_past(start, now)?;
                patch.start_time = Some(start);
                start
            } else {
                current.start_time
            };
            let end = if dirty(FormField::End) {
                let end = parse_local_input(&self.end, FormField::End, offset)?;
                patch.end_time = Some(end);
                end
            } else {
                current.end_time
            };
            check_schedule(start, end, offset)?;
        }

        if patch.is_empty() {
            return Err(FormError::NoChanges);
        }
        Ok(patch)
    }
}

fn checked_text(field: FormField, raw: &str) -> Result<String, FormError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(FormError::Missing(field));
    }
    if let Some((min, max)) = field.length_bounds() {
        let len = value.chars().count();
        if len < min || len > max {
            return Err(FormError::Length { field, min, max });
        }
    }
    Ok(value.to_string())
}

fn check_start_not_past(start: DateTime<Utc>, now: DateTime<Utc>) -> Result<(), FormError> {
    // The picker works in whole minutes, so the current minute is still allowed.
    if start + Duration::minutes(1) <= now {
        return Err(FormError::StartInPast);
    }
    Ok(())
}

fn check_schedule(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    offset: FixedOffset,
) -> Result<(), FormError> {
    let earliest = earliest_end(start);
    if end < earliest {
        return Err(FormError::EndTooEarly {
            earliest: to_local_input(earliest, offset).replace('T', " "),
        });
    }
    Ok(())
}

pub fn earliest_end(start: DateTime<Utc>) -> DateTime<Utc> {
    start + minimum_duration()
}

/// Reads a `datetime-local` value as wall-clock time at `offset`.
pub fn parse_local_input(
    raw: &str,
    field: FormField,
    offset: FixedOffset,
) -> Result<DateTime<Utc>, FormError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(FormError::Missing(field));
    }
    let naive = NaiveDateTime::parse_from_str(raw, LOCAL_INPUT_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|_| FormError::InvalidDateTime(field))?;

    offset
        .from_local_datetime(&naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or(FormError::InvalidDateTime(field))
}

pub fn to_local_input(value: DateTime<Utc>, offset: FixedOffset) -> String {
    value
        .with_timezone(&offset)
        .format(LOCAL_INPUT_FORMAT)
        .to_string()
}
