//! Diesel models for deliverable records.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::deliverable::Deliverable as DomainDeliverable;
use crate::domain::types::{DeliveryLink, OwnerId, RecordId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::deliverables)]
#[diesel(primary_key(owner, id))]
pub struct Deliverable {
    pub id: String,
    pub owner: String,
    pub event_id: String,
    pub kind: String,
    pub due_date: Option<NaiveDate>,
    pub delivered_date: Option<NaiveDate>,
    pub revision_date: Option<NaiveDate>,
    pub link: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::deliverables)]
pub struct NewDeliverable<'a> {
    pub id: &'a str,
    pub owner: &'a str,
    pub event_id: &'a str,
    pub kind: &'a str,
    pub due_date: Option<NaiveDate>,
    pub delivered_date: Option<NaiveDate>,
    pub revision_date: Option<NaiveDate>,
    pub link: Option<&'a str>,
    pub created_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::deliverables)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateDeliverable<'a> {
    pub event_id: &'a str,
    pub kind: &'a str,
    pub due_date: Option<NaiveDate>,
    pub delivered_date: Option<NaiveDate>,
    pub revision_date: Option<NaiveDate>,
    pub link: Option<&'a str>,
}

impl TryFrom<Deliverable> for DomainDeliverable {
    type Error = TypeConstraintError;

    fn try_from(deliverable: Deliverable) -> Result<Self, Self::Error> {
        Ok(Self {
            id: RecordId::new(deliverable.id)?,
            owner: OwnerId::new(deliverable.owner)?,
            event_id: RecordId::new(deliverable.event_id)?,
            kind: deliverable.kind,
            due_date: deliverable.due_date,
            delivered_date: deliverable.delivered_date,
            revision_date: deliverable.revision_date,
            link: deliverable.link.map(DeliveryLink::new).transpose()?,
        })
    }
}

impl<'a> NewDeliverable<'a> {
    pub fn new(
        deliverable: &'a DomainDeliverable,
        owner: &'a OwnerId,
        created_at: NaiveDateTime,
    ) -> Self {
        Self {
            id: deliverable.id.as_str(),
            owner: owner.as_str(),
            event_id: deliverable.event_id.as_str(),
            kind: deliverable.kind.as_str(),
            due_date: deliverable.due_date,
            delivered_date: deliverable.delivered_date,
            revision_date: deliverable.revision_date,
            link: deliverable.link.as_ref().map(DeliveryLink::as_str),
            created_at,
        }
    }
}

impl<'a> From<&'a DomainDeliverable> for UpdateDeliverable<'a> {
    fn from(deliverable: &'a DomainDeliverable) -> Self {
        Self {
            event_id: deliverable.event_id.as_str(),
            kind: deliverable.kind.as_str(),
            due_date: deliverable.due_date,
            delivered_date: deliverable.delivered_date,
            revision_date: deliverable.revision_date,
            link: deliverable.link.as_ref().map(DeliveryLink::as_str),
        }
    }
}
