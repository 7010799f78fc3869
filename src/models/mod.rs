use serde::{Deserialize, Deserializer};

pub mod event;
pub mod event_form;
pub mod organizer;
pub mod user;

/// Nullable text columns decode as an empty string.
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
