//! Forms for the events screen.

use serde::Deserialize;
use validator::Validate;

use crate::domain::event::Event;
use crate::domain::types::{Currency, EventStatus, OwnerId, RecordId};
use crate::forms::{FormError, amount, choice, optional_date, required_date, required_reference};

#[derive(Debug, Default, Deserialize, Validate)]
/// Form data for booking an event.
pub struct AddEventForm {
    pub id: Option<String>,
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub date: String,
    #[validate(length(max = 200))]
    #[serde(default)]
    pub venue: String,
    #[validate(length(max = 200))]
    #[serde(default)]
    pub package: String,
    pub status: Option<String>,
    pub currency: Option<String>,
    pub deposit_amount: Option<String>,
    pub deposit_due: Option<String>,
    pub balance_amount: Option<String>,
    pub balance_due: Option<String>,
}

impl AddEventForm {
    pub fn into_domain(self, owner: OwnerId) -> Result<Event, FormError> {
        self.validate()?;

        Ok(Event {
            id: RecordId::or_generate(self.id.as_deref()),
            owner,
            client_id: required_reference(&self.client_id, "client")?,
            date: required_date(&self.date, "date")?,
            venue: self.venue.trim().to_string(),
            package: self.package.trim().to_string(),
            status: choice(self.status.as_deref(), "status", EventStatus::Lead)?,
            currency: choice(self.currency.as_deref(), "currency", Currency::default())?,
            deposit_amount: amount(self.deposit_amount.as_deref(), "deposit amount")?,
            deposit_due: optional_date(self.deposit_due.as_deref(), "deposit due date")?,
            balance_amount: amount(self.balance_amount.as_deref(), "balance amount")?,
            balance_due: optional_date(self.balance_due.as_deref(), "balance due date")?,
        })
    }
}

#[derive(Debug, Deserialize)]
/// Form data for moving an event to another sales stage.
pub struct SetEventStatusForm {
    pub status: String,
}

impl SetEventStatusForm {
    pub fn status(&self) -> Result<EventStatus, FormError> {
        choice(Some(self.status.as_str()), "status", EventStatus::Lead)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner() -> OwnerId {
        OwnerId::new("studio@example.com").unwrap()
    }

    #[test]
    fn event_requires_client_and_date() {
        let form = AddEventForm {
            date: "2026-02-14".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            form.into_domain(owner()),
            Err(FormError::Missing("client"))
        ));

        let form = AddEventForm {
            client_id: "C-001".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            form.into_domain(owner()),
            Err(FormError::Missing("date"))
        ));
    }

    #[test]
    fn defaults_apply_to_blank_choices() {
        let form = AddEventForm {
            client_id: "C-001".to_string(),
            date: "2026-02-14".to_string(),
            deposit_amount: Some("1200".to_string()),
            status: Some("".to_string()),
            ..Default::default()
        };

        let event = form.into_domain(owner()).unwrap();
        assert_eq!(event.status, EventStatus::Lead);
        assert_eq!(event.currency, Currency::Usd);
        assert_eq!(event.deposit_amount.get(), 1200.0);
        assert_eq!(event.balance_amount.get(), 0.0);
    }

    #[test]
    fn unknown_status_is_rejected() {
        let form = SetEventStatusForm {
            status: "cancelled".to_string(),
        };
        assert!(form.status().is_err());
    }
}
