//! Diesel models for vendor records.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::types::{OwnerId, PersonName, RecordId, TypeConstraintError};
use crate::domain::vendor::Vendor as DomainVendor;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::vendors)]
#[diesel(primary_key(owner, id))]
pub struct Vendor {
    pub id: String,
    pub owner: String,
    pub event_id: String,
    pub kind: String,
    pub name: String,
    pub contact: Option<String>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::vendors)]
pub struct NewVendor<'a> {
    pub id: &'a str,
    pub owner: &'a str,
    pub event_id: &'a str,
    pub kind: &'a str,
    pub name: &'a str,
    pub contact: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub created_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::vendors)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateVendor<'a> {
    pub event_id: &'a str,
    pub kind: &'a str,
    pub name: &'a str,
    pub contact: Option<&'a str>,
    pub notes: Option<&'a str>,
}

impl TryFrom<Vendor> for DomainVendor {
    type Error = TypeConstraintError;

    fn try_from(vendor: Vendor) -> Result<Self, Self::Error> {
        Ok(Self {
            id: RecordId::new(vendor.id)?,
            owner: OwnerId::new(vendor.owner)?,
            event_id: RecordId::new(vendor.event_id)?,
            kind: vendor.kind,
            name: PersonName::new(vendor.name)?,
            contact: vendor.contact,
            notes: vendor.notes,
        })
    }
}

impl<'a> NewVendor<'a> {
    pub fn new(vendor: &'a DomainVendor, owner: &'a OwnerId, created_at: NaiveDateTime) -> Self {
        Self {
            id: vendor.id.as_str(),
            owner: owner.as_str(),
            event_id: vendor.event_id.as_str(),
            kind: vendor.kind.as_str(),
            name: vendor.name.as_str(),
            contact: vendor.contact.as_deref(),
            notes: vendor.notes.as_deref(),
            created_at,
        }
    }
}

impl<'a> From<&'a DomainVendor> for UpdateVendor<'a> {
    fn from(vendor: &'a DomainVendor) -> Self {
        Self {
            event_id: vendor.event_id.as_str(),
            kind: vendor.kind.as_str(),
            name: vendor.name.as_str(),
            contact: vendor.contact.as_deref(),
            notes: vendor.notes.as_deref(),
        }
    }
}
