//! Owner-scoped queries on the `clients` table.

use chrono::Utc;
use diesel::prelude::*;

use crate::{
    domain::{
        client::Client,
        snapshot::{Record, Row},
        types::{OwnerId, RecordId},
    },
    models::client::{Client as DbClient, NewClient, UpdateClient},
    repository::errors::{RepositoryError, RepositoryResult},
    schema::clients,
};

pub(super) fn list(conn: &mut SqliteConnection, owner: &OwnerId) -> RepositoryResult<Vec<Row>> {
    clients::table
        .filter(clients::owner.eq(owner.as_str()))
        .order((clients::created_at.desc(), clients::id.desc()))
        .select(DbClient::as_select())
        .load::<DbClient>(conn)?
        .into_iter()
        .map(|client| -> RepositoryResult<Row> {
            Ok(Client::try_from(client)?.into_row())
        })
        .collect()
}

pub(super) fn insert(
    conn: &mut SqliteConnection,
    owner: &OwnerId,
    client: &Client,
) -> RepositoryResult<Row> {
    let new_client = NewClient::new(client, owner, Utc::now().naive_utc());

    let stored = diesel::insert_into(clients::table)
        .values(&new_client)
        .get_result::<DbClient>(conn)?;

    Ok(Client::try_from(stored)?.into_row())
}

pub(super) fn update(
    conn: &mut SqliteConnection,
    owner: &OwnerId,
    client: &Client,
) -> RepositoryResult<Row> {
    let changes = UpdateClient::from(client);

    let stored = diesel::update(
        clients::table
            .filter(clients::id.eq(client.id.as_str()))
            .filter(clients::owner.eq(owner.as_str())),
    )
    .set(&changes)
    .get_result::<DbClient>(conn)?;

    Ok(Client::try_from(stored)?.into_row())
}

pub(super) fn delete(
    conn: &mut SqliteConnection,
    owner: &OwnerId,
    id: &RecordId,
) -> RepositoryResult<()> {
    let affected = diesel::delete(
        clients::table
            .filter(clients::id.eq(id.as_str()))
            .filter(clients::owner.eq(owner.as_str())),
    )
    .execute(conn)?;

    if affected == 0 {
        return Err(RepositoryError::NotFound);
    }
    Ok(())
}
