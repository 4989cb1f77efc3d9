//! Owner-scoped queries on the `deliverables` table.

use chrono::Utc;
use diesel::prelude::*;

use crate::{
    domain::{
        deliverable::Deliverable,
        snapshot::{Record, Row},
        types::{OwnerId, RecordId},
    },
    models::deliverable::{Deliverable as DbDeliverable, NewDeliverable, UpdateDeliverable},
    repository::errors::{RepositoryError, RepositoryResult},
    schema::deliverables,
};

pub(super) fn list(conn: &mut SqliteConnection, owner: &OwnerId) -> RepositoryResult<Vec<Row>> {
    deliverables::table
        .filter(deliverables::owner.eq(owner.as_str()))
        .order((deliverables::created_at.desc(), deliverables::id.desc()))
        .select(DbDeliverable::as_select())
        .load::<DbDeliverable>(conn)?
        .into_iter()
        .map(|deliverable| -> RepositoryResult<Row> {
            Ok(Deliverable::try_from(deliverable)?.into_row())
        })
        .collect()
}

pub(super) fn insert(
    conn: &mut SqliteConnection,
    owner: &OwnerId,
    deliverable: &Deliverable,
) -> RepositoryResult<Row> {
    let new_deliverable = NewDeliverable::new(deliverable, owner, Utc::now().naive_utc());

    let stored = diesel::insert_into(deliverables::table)
        .values(&new_deliverable)
        .get_result::<DbDeliverable>(conn)?;

    Ok(Deliverable::try_from(stored)?.into_row())
}

pub(super) fn update(
    conn: &mut SqliteConnection,
    owner: &OwnerId,
    deliverable: &Deliverable,
) -> RepositoryResult<Row> {
    let changes = UpdateDeliverable::from(deliverable);

    let stored = diesel::update(
        deliverables::table
            .filter(deliverables::id.eq(deliverable.id.as_str()))
            .filter(deliverables::owner.eq(owner.as_str())),
    )
    .set(&changes)
    .get_result::<DbDeliverable>(conn)?;

    Ok(Deliverable::try_from(stored)?.into_row())
}

pub(super) fn delete(
    conn: &mut SqliteConnection,
    owner: &OwnerId,
    id: &RecordId,
) -> RepositoryResult<()> {
    let affected = diesel::delete(
        deliverables::table
            .filter(deliverables::id.eq(id.as_str()))
            .filter(deliverables::owner.eq(owner.as_str())),
    )
    .execute(conn)?;

    if affected == 0 {
        return Err(RepositoryError::NotFound);
    }
    Ok(())
}
