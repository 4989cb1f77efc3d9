//! Diesel models for client records.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::client::Client as DomainClient;
use crate::domain::types::{
    ContactEmail, OwnerId, PersonName, RecordId, TypeConstraintError,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::clients)]
#[diesel(primary_key(owner, id))]
/// Diesel model for [`crate::domain::client::Client`].
pub struct Client {
    pub id: String,
    pub owner: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::clients)]
/// Insertable form of [`Client`].
pub struct NewClient<'a> {
    pub id: &'a str,
    pub owner: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub created_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::clients)]
#[diesel(treat_none_as_null = true)]
/// Data used when updating a [`Client`] record.
pub struct UpdateClient<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub notes: Option<&'a str>,
}

impl TryFrom<Client> for DomainClient {
    type Error = TypeConstraintError;

    fn try_from(client: Client) -> Result<Self, Self::Error> {
        Ok(Self {
            id: RecordId::new(client.id)?,
            owner: OwnerId::new(client.owner)?,
            first_name: client.first_name,
            last_name: PersonName::new(client.last_name)?,
            email: client.email.map(ContactEmail::new).transpose()?,
            phone: client.phone,
            notes: client.notes,
        })
    }
}

impl<'a> NewClient<'a> {
    pub fn new(client: &'a DomainClient, owner: &'a OwnerId, created_at: NaiveDateTime) -> Self {
        Self {
            id: client.id.as_str(),
            owner: owner.as_str(),
            first_name: client.first_name.as_str(),
            last_name: client.last_name.as_str(),
            email: client.email.as_ref().map(ContactEmail::as_str),
            phone: client.phone.as_deref(),
            notes: client.notes.as_deref(),
            created_at,
        }
    }
}

impl<'a> From<&'a DomainClient> for UpdateClient<'a> {
    fn from(client: &'a DomainClient) -> Self {
        Self {
            first_name: client.first_name.as_str(),
            last_name: client.last_name.as_str(),
            email: client.email.as_ref().map(ContactEmail::as_str),
            phone: client.phone.as_deref(),
            notes: client.notes.as_deref(),
        }
    }
}
