//! Diesel models for event records.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::event::Event as DomainEvent;
use crate::domain::types::{Amount, OwnerId, RecordId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::events)]
#[diesel(primary_key(owner, id))]
/// Diesel model for [`crate::domain::event::Event`].
pub struct Event {
    pub id: String,
    pub owner: String,
    pub client_id: String,
    pub date: NaiveDate,
    pub venue: String,
    pub package: String,
    pub status: String,
    pub currency: String,
    pub deposit_amount: f64,
    pub deposit_due: Option<NaiveDate>,
    pub balance_amount: f64,
    pub balance_due: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::events)]
pub struct NewEvent<'a> {
    pub id: &'a str,
    pub owner: &'a str,
    pub client_id: &'a str,
    pub date: NaiveDate,
    pub venue: &'a str,
    pub package: &'a str,
    pub status: &'a str,
    pub currency: &'a str,
    pub deposit_amount: f64,
    pub deposit_due: Option<NaiveDate>,
    pub balance_amount: f64,
    pub balance_due: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::events)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateEvent<'a> {
    pub client_id: &'a str,
    pub date: NaiveDate,
    pub venue: &'a str,
    pub package: &'a str,
    pub status: &'a str,
    pub currency: &'a str,
    pub deposit_amount: f64,
    pub deposit_due: Option<NaiveDate>,
    pub balance_amount: f64,
    pub balance_due: Option<NaiveDate>,
}

impl TryFrom<Event> for DomainEvent {
    type Error = TypeConstraintError;

    fn try_from(event: Event) -> Result<Self, Self::Error> {
        Ok(Self {
            id: RecordId::new(event.id)?,
            owner: OwnerId::new(event.owner)?,
            client_id: RecordId::new(event.client_id)?,
            date: event.date,
            venue: event.venue,
            package: event.package,
            status: event.status.parse()?,
            currency: event.currency.parse()?,
            deposit_amount: Amount::new(event.deposit_amount)?,
            deposit_due: event.deposit_due,
            balance_amount: Amount::new(event.balance_amount)?,
            balance_due: event.balance_due,
        })
    }
}

impl<'a> NewEvent<'a> {
    pub fn new(event: &'a DomainEvent, owner: &'a OwnerId, created_at: NaiveDateTime) -> Self {
        Self {
            id: event.id.as_str(),
            owner: owner.as_str(),
            client_id: event.client_id.as_str(),
            date: event.date,
            venue: event.venue.as_str(),
            package: event.package.as_str(),
            status: event.status.as_str(),
            currency: event.currency.as_str(),
            deposit_amount: event.deposit_amount.get(),
            deposit_due: event.deposit_due,
            balance_amount: event.balance_amount.get(),
            balance_due: event.balance_due,
            created_at,
        }
    }
}

impl<'a> From<&'a DomainEvent> for UpdateEvent<'a> {
    fn from(event: &'a DomainEvent) -> Self {
        Self {
            client_id: event.client_id.as_str(),
            date: event.date,
            venue: event.venue.as_str(),
            package: event.package.as_str(),
            status: event.status.as_str(),
            currency: event.currency.as_str(),
            deposit_amount: event.deposit_amount.get(),
            deposit_due: event.deposit_due,
            balance_amount: event.balance_amount.get(),
            balance_due: event.balance_due,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{Currency, EventStatus};
    use chrono::Utc;

    fn db_event(status: &str) -> Event {
        let now = Utc::now().naive_utc();
        Event {
            id: "e-1".to_string(),
            owner: "studio".to_string(),
            client_id: "c-1".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 5, 2).unwrap(),
            venue: "Chapel".to_string(),
            package: "Half day".to_string(),
            status: status.to_string(),
            currency: "MXN".to_string(),
            deposit_amount: 500.0,
            deposit_due: None,
            balance_amount: 1500.0,
            balance_due: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn event_into_domain_parses_enums() {
        let domain = DomainEvent::try_from(db_event("signed")).expect("valid event");
        assert_eq!(domain.status, EventStatus::Signed);
        assert_eq!(domain.currency, Currency::Mxn);
        assert_eq!(domain.contract_total(), 2000.0);
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(DomainEvent::try_from(db_event("cancelled")).is_err());
    }
}
