use serde::{Deserialize, Serialize};

use crate::domain::types::{OwnerId, Priority, RecordId, RequestStatus};

/// Something the couple asked for that must not be forgotten on the day.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SpecialRequest {
    pub id: RecordId,
    pub owner: OwnerId,
    pub event_id: RecordId,
    pub category: String,
    pub priority: Priority,
    pub description: String,
    pub status: RequestStatus,
}

impl SpecialRequest {
    /// Flips open <-> done.
    pub fn toggle_status(&mut self) {
        self.status = match self.status {
            RequestStatus::Open => RequestStatus::Done,
            RequestStatus::Done => RequestStatus::Open,
        };
    }

    pub fn is_open(&self) -> bool {
        self.status == RequestStatus::Open
    }
}
