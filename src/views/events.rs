use chrono::{DateTime, Datelike, FixedOffset, Utc};
use uuid::Uuid;

use super::escape;
use crate::models::event::{EventId, ListedEvent, Pagination};
use crate::models::event_form::{earliest_end, to_local_input, DirtyFields};
use crate::models::user::Group;

/// `June 3` for upcoming dates this year, `June 3, 2025` otherwise.
fn card_date(date: DateTime<FixedOffset>, now: DateTime<FixedOffset>) -> String {
    if date.year() != now.year() || date < now {
        date.format("%B %-d, %Y").to_string()
    } else {
        date.format("%B %-d").to_string()
    }
}

fn card_time(date: DateTime<FixedOffset>) -> String {
    date.format("%-I:%M %p").to_string()
}

/// Date line shown on an event card. Multi-day events take two lines.
pub fn format_event_date(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    now: DateTime<Utc>,
    offset: FixedOffset,
) -> String {
    let start = start.with_timezone(&offset);
    let end = end.with_timezone(&offset);
    let now = now.with_timezone(&offset);

    if start.date_naive() == end.date_naive() {
        format!(
            "{} — {} to {}",
            card_date(start, now),
            card_time(start),
            card_time(end)
        )
    } else {
        format!(
            "Starts: {} — {}\nEnds: {} — {}",
            card_date(start, now),
            card_time(start),
            card_date(end, now),
            card_time(end)
        )
    }
}

/// Link to the events page with the given search state.
pub fn events_url(q: &str, past_q: &str, past_page: usize) -> String {
    let mut params = Vec::new();
    if !q.is_empty() {
        params.push(format!("q={}", urlencoding::encode(q)));
    }
    if !past_q.is_empty() {
        params.push(format!("past_q={}", urlencoding::encode(past_q)));
    }
    if past_page > 1 {
        params.push(format!("past_page={}", past_page));
    }

    if params.is_empty() {
        "/dashboard/events".to_string()
    } else {
        format!("/dashboard/events?{}", params.join("&"))
    }
}

fn delete_dialog(id: EventId, title: &str) -> String {
    format!(
        r#"<button type="button" class="button danger small" data-dialog-open="delete-{id}">Delete</button>
<dialog id="delete-{id}" class="confirm-dialog">
  <h3>Confirm Delete</h3>
  <p>Are you sure you want to delete &quot;{title}&quot;? This cannot be undone.</p>
  <form method="post" action="/dashboard/events/{id}/delete" class="dialog-actions">
    <button type="button" class="button muted" data-dialog-close>Cancel</button>
    <button type="submit" class="button danger">Delete</button>
  </form>
</dialog>"#,
        id = id,
        title = escape(title),
    )
}

pub fn event_card(listed: &ListedEvent, now: DateTime<Utc>, offset: FixedOffset) -> String {
    let event = &listed.event;
    // Only the creating group may manage or delete.
    let controls = if listed.can_manage {
        format!(
            r#"<div class="card-actions">
  <a class="button small" href="/dashboard/events/{id}/manage">Manage</a>
  {delete}
</div>"#,
            id = event.id,
            delete = delete_dialog(event.id, &event.title),
        )
    } else {
        String::new()
    };

    format!(
        r#"<article class="card event-card">
  <h2>{title}</h2>
  <p class="event-date">{date}</p>
  <p>{description}</p>
  <p class="meta">TMU Location: {location}</p>
  <p class="meta">Full Address: {address}</p>
  {controls}
</article>"#,
        title = escape(&event.title),
        date = escape(&format_event_date(event.start_time, event.end_time, now, offset)),
        description = escape(&event.description),
        location = escape(&event.location),
        address = escape(&event.address),
        controls = controls,
    )
}

fn search_form(
    name: &str,
    value: &str,
    placeholder: &str,
    keep: &[(&str, &str)],
    clear_href: &str,
) -> String {
    let hidden: String = keep
        .iter()
        .filter(|(_, v)| !v.is_empty())
        .map(|(k, v)| format!(r#"<input type="hidden" name="{}" value="{}">"#, k, escape(v)))
        .collect();

    format!(
        r#"<form method="get" action="/dashboard/events" class="search">
  {hidden}
  <input type="text" name="{name}" value="{value}" placeholder="{placeholder}" aria-label="{placeholder}">
  <button type="submit" class="button" aria-label="Search">Search</button>
  <a class="button muted" href="{clear}" aria-label="Clear search">Clear</a>
</form>"#,
        hidden = hidden,
        name = name,
        value = escape(value),
        placeholder = escape(placeholder),
        clear = escape(clear_href),
    )
}

pub struct EventsPage<'a> {
    pub username: &'a str,
    pub upcoming: Vec<&'a ListedEvent>,
    pub past: Pagination<&'a ListedEvent>,
    pub q: &'a str,
    pub past_q: &'a str,
    /// Set when the events could not be loaded.
    pub load_error: Option<&'a str>,
}

fn pagination_controls(page: &EventsPage<'_>) -> String {
    if !page.past.shows_controls() {
        return String::new();
    }
    let current = page.past.page;
    let link = |target: usize, label: &str, enabled: bool| {
        if enabled {
            format!(
                r#"<a class="page-link" href="{}">{}</a>"#,
                escape(&events_url(page.q, page.past_q, target)),
                label
            )
        } else {
            format!(r#"<span class="page-link disabled" aria-disabled="true">{}</span>"#, label)
        }
    };

    format!(
        r#"<nav class="pagination" aria-label="Past events pages">
  {prev}
  <span>Page {current} of {total}</span>
  {next}
</nav>"#,
        prev = link(current.saturating_sub(1), "Prev", page.past.has_previous()),
        current = current,
        total = page.past.total_pages,
        next = link(current + 1, "Next", page.past.has_next()),
    )
}

pub fn events_page(page: &EventsPage<'_>, now: DateTime<Utc>, offset: FixedOffset) -> String {
    let name = escape(page.username);
    let header = format!(
        r#"<header class="page-header">
  <div>
    <h1>{name}&#39;s Upcoming Events</h1>
    <p class="muted">Manage your events: create new ones, edit, or delete existing.</p>
  </div>
  <a class="button" href="/dashboard/events/add">Add New Event</a>
</header>
{search}"#,
        name = name,
        search = search_form(
            "q",
            page.q,
            "Search upcoming events...",
            &[("past_q", page.past_q)],
            &events_url("", page.past_q, page.past.page),
        ),
    );

    if let Some(error) = page.load_error {
        return format!(r#"{}<p class="error center">{}</p>"#, header, escape(error));
    }

    let upcoming = if page.upcoming.is_empty() {
        r#"<p class="muted center">No upcoming events found.</p>"#.to_string()
    } else {
        let cards: String = page
            .upcoming
            .iter()
            .map(|e| event_card(e, now, offset))
            .collect();
        format!(r#"<div id="upcoming-events" class="grid">{}</div>"#, cards)
    };

    let past = if page.past.items.is_empty() {
        r#"<p class="muted center">No past events found.</p>"#.to_string()
    } else {
        let cards: String = page
            .past
            .items
            .iter()
            .map(|e| event_card(e, now, offset))
            .collect();
        format!(
            r#"<div id="past-events" class="grid">{}</div>{}"#,
            cards,
            pagination_controls(page)
        )
    };

    format!(
        r#"<div class="container">
{header}
{upcoming}
<h2>{name}&#39;s Past Events</h2>
{search}
{past}
</div>"#,
        header = header,
        upcoming = upcoming,
        name = name,
        search = search_form(
            "past_q",
            page.past_q,
            "Search past events...",
            &[("q", page.q)],
            &events_url(page.q, "", 1),
        ),
        past = past,
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(EventId),
}

/// Values prefilled into the event form.
#[derive(Debug, Clone, Default)]
pub struct FormValues {
    pub title: String,
    pub description: String,
    pub location: String,
    pub address: String,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub group_ids: Vec<Uuid>,
}

fn group_label(group: &Group) -> &str {
    if group.username.trim().is_empty() {
        "Unnamed group"
    } else {
        &group.username
    }
}

pub fn event_form(
    mode: FormMode,
    values: &FormValues,
    groups: &[Group],
    now: DateTime<Utc>,
    offset: FixedOffset,
) -> String {
    let (action, heading, button, pending, dirty) = match mode {
        FormMode::Create => (
            "/dashboard/events/add".to_string(),
            "Add New Event",
            "Add Event",
            "Adding...",
            DirtyFields::all().encode(),
        ),
        FormMode::Edit(id) => (
            format!("/dashboard/events/{}/manage", id),
            "Manage Event",
            "Save Changes",
            "Saving...",
            String::new(),
        ),
    };
    let no_groups = values.group_ids.is_empty();
    // Create needs a group; edit needs at least one change.
    let disabled = match mode {
        FormMode::Create => no_groups,
        FormMode::Edit(_) => true,
    };

    let min_now = to_local_input(now, offset);
    // A stored start already in the past must stay submittable for edits
    // that leave it alone; the script restores `min_now` once start changes.
    let start_min = match (mode, values.start) {
        (FormMode::Edit(_), Some(start)) if start < now => to_local_input(start, offset),
        _ => min_now.clone(),
    };
    let start_value = values
        .start
        .map(|s| to_local_input(s, offset))
        .unwrap_or_default();
    let end_value = values
        .end
        .map(|e| to_local_input(e, offset))
        .unwrap_or_default();
    let (end_min, end_hint) = match values.start {
        Some(start) => {
            let earliest = to_local_input(earliest_end(start), offset);
            let hint = format!("End time cannot be before {}.", earliest.replace('T', " "));
            (earliest, hint)
        }
        None => (min_now.clone(), String::new()),
    };

    let options: String = groups
        .iter()
        .map(|g| {
            let selected = if values.group_ids.contains(&g.id) {
                " selected"
            } else {
                ""
            };
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                g.id,
                selected,
                escape(group_label(g))
            )
        })
        .collect();

    format!(
        r#"<section class="card form-card">
<h1>{heading}</h1>
<form method="post" action="{action}" class="event-form" aria-label="Event Form" data-event-form data-mode="{mode}">
  <input type="hidden" name="dirty" value="{dirty}">
  <label for="title">Event Title<span class="required">*</span></label>
  <input type="text" id="title" name="title" required minlength="3" maxlength="100" autocomplete="off" placeholder="Enter event title" value="{title}">

  <label for="description">Event Description<span class="required">*</span></label>
  <textarea id="description" name="description" required minlength="10" maxlength="1000" rows="4" placeholder="Describe the event">{description}</textarea>

  <label for="organizingGroups">Organizing Group(s)<span class="required">*</span></label>
  <select id="organizingGroups" name="organizingGroups" multiple size="{size}">{options}</select>
  <p class="hint">You can pick multiple groups from the list.</p>
  <p class="hint" data-groups-warning{warning_hidden}>You must pick at least one organizing group to submit.</p>

  <div class="row">
    <div>
      <label for="location">TMU Building (N/A if not in TMU)<span class="required">*</span></label>
      <input type="text" id="location" name="location" required minlength="3" maxlength="100" autocomplete="off" placeholder="Enter event location" value="{location}">
    </div>
    <div>
      <label for="address">Full Address (Street Address or Online Link)<span class="required">*</span></label>
      <input type="text" id="address" name="address" required minlength="3" maxlength="100" autocomplete="off" placeholder="Enter event address" value="{address}">
    </div>
  </div>

  <div class="row">
    <div>
      <label for="start">Start Date &amp; Time<span class="required">*</span></label>
      <input type="datetime-local" id="start" name="start" required min="{start_min}" data-min-now="{min_now}" value="{start}">
    </div>
    <div>
      <label for="end">End Date &amp; Time<span class="required">*</span></label>
      <input type="datetime-local" id="end" name="end" required min="{end_min}" value="{end}">
      <p class="hint" data-end-hint>{end_hint}</p>
    </div>
  </div>

  <div class="center">
    <button type="submit" class="button" data-pending-text="{pending}"{disabled}>{button}</button>
  </div>
</form>
</section>"#,
        heading = heading,
        action = action,
        mode = if matches!(mode, FormMode::Create) { "create" } else { "edit" },
        dirty = dirty,
        title = escape(&values.title),
        description = escape(&values.description),
        size = groups.len().clamp(1, 8),
        options = options,
        warning_hidden = if no_groups { "" } else { " hidden" },
        location = escape(&values.location),
        address = escape(&values.address),
        start_min = start_min,
        min_now = min_now,
        start = start_value,
        end_min = end_min,
        end = end_value,
        end_hint = escape(&end_hint),
        pending = pending,
        disabled = if disabled { " disabled" } else { "" },
        button = button,
    )
}
