//! Owner-scoped queries on the `events` table.

use chrono::Utc;
use diesel::prelude::*;

use crate::{
    domain::{
        event::Event,
        snapshot::{Record, Row},
        types::{OwnerId, RecordId},
    },
    models::event::{Event as DbEvent, NewEvent, UpdateEvent},
    repository::errors::{RepositoryError, RepositoryResult},
    schema::events,
};

pub(super) fn list(conn: &mut SqliteConnection, owner: &OwnerId) -> RepositoryResult<Vec<Row>> {
    events::table
        .filter(events::owner.eq(owner.as_str()))
        .order((events::created_at.desc(), events::id.desc()))
        .select(DbEvent::as_select())
        .load::<DbEvent>(conn)?
        .into_iter()
        .map(|event| -> RepositoryResult<Row> {
            Ok(Event::try_from(event)?.into_row())
        })
        .collect()
}

pub(super) fn insert(
    conn: &mut SqliteConnection,
    owner: &OwnerId,
    event: &Event,
) -> RepositoryResult<Row> {
    let new_event = NewEvent::new(event, owner, Utc::now().naive_utc());

    let stored = diesel::insert_into(events::table)
        .values(&new_event)
        .get_result::<DbEvent>(conn)?;

    Ok(Event::try_from(stored)?.into_row())
}

pub(super) fn update(
    conn: &mut SqliteConnection,
    owner: &OwnerId,
    event: &Event,
) -> RepositoryResult<Row> {
    let changes = UpdateEvent::from(event);

    let stored = diesel::update(
        events::table
            .filter(events::id.eq(event.id.as_str()))
            .filter(events::owner.eq(owner.as_str())),
    )
    .set(&changes)
    .get_result::<DbEvent>(conn)?;

    Ok(Event::try_from(stored)?.into_row())
}

pub(super) fn delete(
    conn: &mut SqliteConnection,
    owner: &OwnerId,
    id: &RecordId,
) -> RepositoryResult<()> {
    let affected = diesel::delete(
        events::table
            .filter(events::id.eq(id.as_str()))
            .filter(events::owner.eq(owner.as_str())),
    )
    .execute(conn)?;

    if affected == 0 {
        return Err(RepositoryError::NotFound);
    }
    Ok(())
}
