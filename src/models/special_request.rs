//! Diesel models for special request records.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::special_request::SpecialRequest as DomainSpecialRequest;
use crate::domain::types::{OwnerId, RecordId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::special_requests)]
#[diesel(primary_key(owner, id))]
pub struct SpecialRequest {
    pub id: String,
    pub owner: String,
    pub event_id: String,
    pub category: String,
    pub priority: String,
    pub description: String,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::special_requests)]
pub struct NewSpecialRequest<'a> {
    pub id: &'a str,
    pub owner: &'a str,
    pub event_id: &'a str,
    pub category: &'a str,
    pub priority: &'a str,
    pub description: &'a str,
    pub status: &'a str,
    pub created_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::special_requests)]
pub struct UpdateSpecialRequest<'a> {
    pub event_id: &'a str,
    pub category: &'a str,
    pub priority: &'a str,
    pub description: &'a str,
    pub status: &'a str,
}

impl TryFrom<SpecialRequest> for DomainSpecialRequest {
    type Error = TypeConstraintError;

    fn try_from(request: SpecialRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            id: RecordId::new(request.id)?,
            owner: OwnerId::new(request.owner)?,
            event_id: RecordId::new(request.event_id)?,
            category: request.category,
            priority: request.priority.parse()?,
            description: request.description,
            status: request.status.parse()?,
        })
    }
}

impl<'a> NewSpecialRequest<'a> {
    pub fn new(
        request: &'a DomainSpecialRequest,
        owner: &'a OwnerId,
        created_at: NaiveDateTime,
    ) -> Self {
        Self {
            id: request.id.as_str(),
            owner: owner.as_str(),
            event_id: request.event_id.as_str(),
            category: request.category.as_str(),
            priority: request.priority.as_str(),
            description: request.description.as_str(),
            status: request.status.as_str(),
            created_at,
        }
    }
}

impl<'a> From<&'a DomainSpecialRequest> for UpdateSpecialRequest<'a> {
    fn from(request: &'a DomainSpecialRequest) -> Self {
        Self {
            event_id: request.event_id.as_str(),
            category: request.category.as_str(),
            priority: request.priority.as_str(),
            description: request.description.as_str(),
            status: request.status.as_str(),
        }
    }
}
