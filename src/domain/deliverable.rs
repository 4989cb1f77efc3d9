use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::types::{DeliveryLink, OwnerId, RecordId};

/// Gallery, album or video promised to the couple.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Deliverable {
    pub id: RecordId,
    pub owner: OwnerId,
    pub event_id: RecordId,
    pub kind: String,
    pub due_date: Option<NaiveDate>,
    pub delivered_date: Option<NaiveDate>,
    pub revision_date: Option<NaiveDate>,
    pub link: Option<DeliveryLink>,
}

impl Deliverable {
    pub fn mark_delivered(&mut self, today: NaiveDate) {
        self.delivered_date = Some(today);
    }

    pub fn is_delivered(&self) -> bool {
        self.delivered_date.is_some()
    }
}
