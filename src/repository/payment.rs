//! Owner-scoped queries on the `payments` table.

use chrono::Utc;
use diesel::prelude::*;

use crate::{
    domain::{
        payment::Payment,
        snapshot::{Record, Row},
        types::{OwnerId, RecordId},
    },
    models::payment::{Payment as DbPayment, NewPayment, UpdatePayment},
    repository::errors::{RepositoryError, RepositoryResult},
    schema::payments,
};

pub(super) fn list(conn: &mut SqliteConnection, owner: &OwnerId) -> RepositoryResult<Vec<Row>> {
    payments::table
        .filter(payments::owner.eq(owner.as_str()))
        .order((payments::created_at.desc(), payments::id.desc()))
        .select(DbPayment::as_select())
        .load::<DbPayment>(conn)?
        .into_iter()
        .map(|payment| -> RepositoryResult<Row> {
            Ok(Payment::try_from(payment)?.into_row())
        })
        .collect()
}

pub(super) fn insert(
    conn: &mut SqliteConnection,
    owner: &OwnerId,
    payment: &Payment,
) -> RepositoryResult<Row> {
    let new_payment = NewPayment::new(payment, owner, Utc::now().naive_utc());

    let stored = diesel::insert_into(payments::table)
        .values(&new_payment)
        .get_result::<DbPayment>(conn)?;

    Ok(Payment::try_from(stored)?.into_row())
}

pub(super) fn update(
    conn: &mut SqliteConnection,
    owner: &OwnerId,
    payment: &Payment,
) -> RepositoryResult<Row> {
    let changes = UpdatePayment::from(payment);

    let stored = diesel::update(
        payments::table
            .filter(payments::id.eq(payment.id.as_str()))
            .filter(payments::owner.eq(owner.as_str())),
    )
    .set(&changes)
    .get_result::<DbPayment>(conn)?;

    Ok(Payment::try_from(stored)?.into_row())
}

pub(super) fn delete(
    conn: &mut SqliteConnection,
    owner: &OwnerId,
    id: &RecordId,
) -> RepositoryResult<()> {
    let affected = diesel::delete(
        payments::table
            .filter(payments::id.eq(id.as_str()))
            .filter(payments::owner.eq(owner.as_str())),
    )
    .execute(conn)?;

    if affected == 0 {
        return Err(RepositoryError::NotFound);
    }
    Ok(())
}
