use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::event::EventId;

/// Row of the `organizers` relation, written only by the remote procedures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizerLink {
    pub event_id: EventId,
    pub group_id: Uuid,
}
