//! Diesel models for payment records.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::payment::Payment as DomainPayment;
use crate::domain::types::{Amount, OwnerId, RecordId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::payments)]
#[diesel(primary_key(owner, id))]
pub struct Payment {
    pub id: String,
    pub owner: String,
    pub event_id: String,
    pub kind: String,
    pub currency: String,
    pub amount: f64,
    pub due_date: NaiveDate,
    pub paid_date: Option<NaiveDate>,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::payments)]
pub struct NewPayment<'a> {
    pub id: &'a str,
    pub owner: &'a str,
    pub event_id: &'a str,
    pub kind: &'a str,
    pub currency: &'a str,
    pub amount: f64,
    pub due_date: NaiveDate,
    pub paid_date: Option<NaiveDate>,
    pub status: &'a str,
    pub created_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::payments)]
#[diesel(treat_none_as_null = true)]
pub struct UpdatePayment<'a> {
    pub event_id: &'a str,
    pub kind: &'a str,
    pub currency: &'a str,
    pub amount: f64,
    pub due_date: NaiveDate,
    pub paid_date: Option<NaiveDate>,
    pub status: &'a str,
}

impl TryFrom<Payment> for DomainPayment {
    type Error = TypeConstraintError;

    fn try_from(payment: Payment) -> Result<Self, Self::Error> {
        Ok(Self {
            id: RecordId::new(payment.id)?,
            owner: OwnerId::new(payment.owner)?,
            event_id: RecordId::new(payment.event_id)?,
            kind: payment.kind,
            currency: payment.currency.parse()?,
            amount: Amount::new(payment.amount)?,
            due_date: payment.due_date,
            paid_date: payment.paid_date,
            status: payment.status.parse()?,
        })
    }
}

impl<'a> NewPayment<'a> {
    pub fn new(payment: &'a DomainPayment, owner: &'a OwnerId, created_at: NaiveDateTime) -> Self {
        Self {
            id: payment.id.as_str(),
            owner: owner.as_str(),
            event_id: payment.event_id.as_str(),
            kind: payment.kind.as_str(),
            currency: payment.currency.as_str(),
            amount: payment.amount.get(),
            due_date: payment.due_date,
            paid_date: payment.paid_date,
            status: payment.status.as_str(),
            created_at,
        }
    }
}

impl<'a> From<&'a DomainPayment> for UpdatePayment<'a> {
    fn from(payment: &'a DomainPayment) -> Self {
        Self {
            event_id: payment.event_id.as_str(),
            kind: payment.kind.as_str(),
            currency: payment.currency.as_str(),
            amount: payment.amount.get(),
            due_date: payment.due_date,
            paid_date: payment.paid_date,
            status: payment.status.as_str(),
        }
    }
}
