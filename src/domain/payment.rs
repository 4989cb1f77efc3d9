use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::types::{Amount, Currency, OwnerId, PaymentStatus, RecordId};

/// An installment owed for an event.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Payment {
    pub id: RecordId,
    pub owner: OwnerId,
    pub event_id: RecordId,
    pub kind: String,
    pub currency: Currency,
    pub amount: Amount,
    pub due_date: NaiveDate,
    pub paid_date: Option<NaiveDate>,
    pub status: PaymentStatus,
}

impl Payment {
    /// Records the payment as received today. `overdue` is never assigned
    /// here; it only arrives from the backend or an import.
    pub fn mark_paid(&mut self, today: NaiveDate) {
        self.status = PaymentStatus::Paid;
        self.paid_date = Some(today);
    }

    pub fn is_paid(&self) -> bool {
        self.status == PaymentStatus::Paid
    }
}
