use serde::{Deserialize, Serialize};

use crate::domain::types::{OwnerId, PersonName, RecordId};

/// Planner, florist, venue coordinator or other supplier working an event.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Vendor {
    pub id: RecordId,
    pub owner: OwnerId,
    pub event_id: RecordId,
    pub kind: String,
    pub name: PersonName,
    pub contact: Option<String>,
    pub notes: Option<String>,
}
