use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::null_as_empty;

/// Identity reported by the auth service for a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Row of the `users` table. One per student group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub group_name: Option<String>,
    pub email: String,
}

/// A group as offered in the organizer picker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: Uuid,
    #[serde(deserialize_with = "null_as_empty")]
    pub username: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_without_username_decodes() {
        let id = Uuid::new_v4();
        let rows = serde_json::json!([
            { "id": id, "username": null },
            { "id": Uuid::new_v4(), "username": "physics" },
        ]);

        let groups: Vec<Group> = serde_json::from_value(rows).unwrap();
        assert_eq!(groups[0].id, id);
        assert_eq!(groups[0].username, "");
        assert_eq!(groups[1].username, "physics");
    }

    #[test]
    fn test_profile_optional_columns() {
        let row = serde_json::json!({
            "id": Uuid::nil(),
            "username": null,
            "email": "club@example.com",
        });

        let profile: Profile = serde_json::from_value(row).unwrap();
        assert!(profile.username.is_none());
        assert!(profile.group_name.is_none());
    }
}
