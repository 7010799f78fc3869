use chrono::{DateTime, FixedOffset, Utc};

use super::{copy_button, escape};
use crate::models::user::Profile;
use crate::views::resources::{OPERATIONS_EMAIL, TECH_EMAIL};

fn row(label: &str, value: &str) -> String {
    format!(
        r#"<div class="account-row"><span class="label">{}</span><span>{}</span></div>"#,
        label,
        escape(value)
    )
}

fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or("-")
}

pub fn account_page(
    profile: &Profile,
    created_at: Option<DateTime<Utc>>,
    offset: FixedOffset,
) -> String {
    let created = created_at
        .map(|c| c.with_timezone(&offset).format("%B %-d, %Y").to_string())
        .unwrap_or_else(|| "-".to_string());

    format!(
        r#"<section class="card narrow">
  <h1>Account Information</h1>
  <div class="stack">
    {username}
    {group}
    {email}
    {created}
  </div>
  <div class="callout">
    <span>Need to update your info? Contact us at:</span>
    {tech}
    {ops}
  </div>
</section>"#,
        username = row("Group Username:", or_dash(profile.username.as_deref())),
        group = row("Group Full Name:", or_dash(profile.group_name.as_deref())),
        email = row("Email:", &profile.email),
        created = row("Account Created:", &created),
        tech = copy_button(TECH_EMAIL, "email address"),
        ops = copy_button(OPERATIONS_EMAIL, "email address"),
    )
}

pub fn account_unavailable() -> String {
    r#"<section class="card narrow center">
  <h1>Account Information</h1>
  <p class="error">Unable to load your account information. Please <a href="/dashboard/contact">contact us</a> if this issue persists.</p>
</section>"#
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Offset, TimeZone};
    use uuid::Uuid;

    #[test]
    fn test_account_rows() {
        let profile = Profile {
            id: Uuid::new_v4(),
            username: Some("pacs".to_string()),
            group_name: None,
            email: "pacs@torontomu.ca".to_string(),
        };
        let created = Utc.with_ymd_and_hms(2025, 8, 14, 15, 30, 0).unwrap();

        let html = account_page(&profile, Some(created), Utc.fix());
        assert!(html.contains("pacs@torontomu.ca"));
        assert!(html.contains(r#"<span class="label">Group Full Name:</span><span>-</span>"#));
        assert!(html.contains("August 14, 2025"));
        assert!(html.contains(TECH_EMAIL));
    }
}
