//! Owner-scoped queries on the `special_requests` table.

use chrono::Utc;
use diesel::prelude::*;

use crate::{
    domain::{
        special_request::SpecialRequest,
        snapshot::{Record, Row},
        types::{OwnerId, RecordId},
    },
    models::special_request::{SpecialRequest as DbSpecialRequest, NewSpecialRequest, UpdateSpecialRequest},
    repository::errors::{RepositoryError, RepositoryResult},
    schema::special_requests,
};

pub(super) fn list(conn: &mut SqliteConnection, owner: &OwnerId) -> RepositoryResult<Vec<Row>> {
    special_requests::table
        .filter(special_requests::owner.eq(owner.as_str()))
        .order((special_requests::created_at.desc(), special_requests::id.desc()))
        .select(DbSpecialRequest::as_select())
        .load::<DbSpecialRequest>(conn)?
        .into_iter()
        .map(|request| -> RepositoryResult<Row> {
            Ok(SpecialRequest::try_from(request)?.into_row())
        })
        .collect()
}

pub(super) fn insert(
    conn: &mut SqliteConnection,
    owner: &OwnerId,
    request: &SpecialRequest,
) -> RepositoryResult<Row> {
    let new_request = NewSpecialRequest::new(request, owner, Utc::now().naive_utc());

    let stored = diesel::insert_into(special_requests::table)
        .values(&new_request)
        .get_result::<DbSpecialRequest>(conn)?;

    Ok(SpecialRequest::try_from(stored)?.into_row())
}

pub(super) fn update(
    conn: &mut SqliteConnection,
    owner: &OwnerId,
    request: &SpecialRequest,
) -> RepositoryResult<Row> {
    let changes = UpdateSpecialRequest::from(request);

    let stored = diesel::update(
        special_requests::table
            .filter(special_requests::id.eq(request.id.as_str()))
            .filter(special_requests::owner.eq(owner.as_str())),
    )
    .set(&changes)
    .get_result::<DbSpecialRequest>(conn)?;

    Ok(SpecialRequest::try_from(stored)?.into_row())
}

pub(super) fn delete(
    conn: &mut SqliteConnection,
    owner: &OwnerId,
    id: &RecordId,
) -> RepositoryResult<()> {
    let affected = diesel::delete(
        special_requests::table
            .filter(special_requests::id.eq(id.as_str()))
            .filter(special_requests::owner.eq(owner.as_str())),
    )
    .execute(conn)?;

    if affected == 0 {
        return Err(RepositoryError::NotFound);
    }
    Ok(())
}
