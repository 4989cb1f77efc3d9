use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::types::{Amount, Currency, EventStatus, OwnerId, RecordId};

/// A booked (or prospective) wedding shoot.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Event {
    pub id: RecordId,
    pub owner: OwnerId,
    pub client_id: RecordId,
    pub date: NaiveDate,
    pub venue: String,
    pub package: String,
    pub status: EventStatus,
    pub currency: Currency,
    pub deposit_amount: Amount,
    pub deposit_due: Option<NaiveDate>,
    pub balance_amount: Amount,
    pub balance_due: Option<NaiveDate>,
}

impl Event {
    /// Status changes are free-standing: any status may follow any other.
    pub fn set_status(&mut self, status: EventStatus) {
        self.status = status;
    }

    /// Deposit plus balance.
    pub fn contract_total(&self) -> f64 {
        (self.deposit_amount + self.balance_amount).get()
    }
}
