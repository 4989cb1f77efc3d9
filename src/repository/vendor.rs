//! Owner-scoped queries on the `vendors` table.

use chrono::Utc;
use diesel::prelude::*;

use crate::{
    domain::{
        vendor::Vendor,
        snapshot::{Record, Row},
        types::{OwnerId, RecordId},
    },
    models::vendor::{Vendor as DbVendor, NewVendor, UpdateVendor},
    repository::errors::{RepositoryError, RepositoryResult},
    schema::vendors,
};

pub(super) fn list(conn: &mut SqliteConnection, owner: &OwnerId) -> RepositoryResult<Vec<Row>> {
    vendors::table
        .filter(vendors::owner.eq(owner.as_str()))
        .order((vendors::created_at.desc(), vendors::id.desc()))
        .select(DbVendor::as_select())
        .load::<DbVendor>(conn)?
        .into_iter()
        .map(|vendor| -> RepositoryResult<Row> {
            Ok(Vendor::try_from(vendor)?.into_row())
        })
        .collect()
}

pub(super) fn insert(
    conn: &mut SqliteConnection,
    owner: &OwnerId,
    vendor: &Vendor,
) -> RepositoryResult<Row> {
    let new_vendor = NewVendor::new(vendor, owner, Utc::now().naive_utc());

    let stored = diesel::insert_into(vendors::table)
        .values(&new_vendor)
        .get_result::<DbVendor>(conn)?;

    Ok(Vendor::try_from(stored)?.into_row())
}

pub(super) fn update(
    conn: &mut SqliteConnection,
    owner: &OwnerId,
    vendor: &Vendor,
) -> RepositoryResult<Row> {
    let changes = UpdateVendor::from(vendor);

    let stored = diesel::update(
        vendors::table
            .filter(vendors::id.eq(vendor.id.as_str()))
            .filter(vendors::owner.eq(owner.as_str())),
    )
    .set(&changes)
    .get_result::<DbVendor>(conn)?;

    Ok(Vendor::try_from(stored)?.into_row())
}

pub(super) fn delete(
    conn: &mut SqliteConnection,
    owner: &OwnerId,
    id: &RecordId,
) -> RepositoryResult<()> {
    let affected = diesel::delete(
        vendors::table
            .filter(vendors::id.eq(id.as_str()))
            .filter(vendors::owner.eq(owner.as_str())),
    )
    .execute(conn)?;

    if affected == 0 {
        return Err(RepositoryError::NotFound);
    }
    Ok(())
}
