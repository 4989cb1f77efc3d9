//! Owner-scoped queries on the `tasks` table.

use chrono::Utc;
use diesel::prelude::*;

use crate::{
    domain::{
        task::Task,
        snapshot::{Record, Row},
        types::{OwnerId, RecordId},
    },
    models::task::{Task as DbTask, NewTask, UpdateTask},
    repository::errors::{RepositoryError, RepositoryResult},
    schema::tasks,
};

pub(super) fn list(conn: &mut SqliteConnection, owner: &OwnerId) -> RepositoryResult<Vec<Row>> {
    tasks::table
        .filter(tasks::owner.eq(owner.as_str()))
        .order((tasks::created_at.desc(), tasks::id.desc()))
        .select(DbTask::as_select())
        .load::<DbTask>(conn)?
        .into_iter()
        .map(|task| -> RepositoryResult<Row> {
            Ok(Task::try_from(task)?.into_row())
        })
        .collect()
}

pub(super) fn insert(
    conn: &mut SqliteConnection,
    owner: &OwnerId,
    task: &Task,
) -> RepositoryResult<Row> {
    let new_task = NewTask::new(task, owner, Utc::now().naive_utc());

    let stored = diesel::insert_into(tasks::table)
        .values(&new_task)
        .get_result::<DbTask>(conn)?;

    Ok(Task::try_from(stored)?.into_row())
}

pub(super) fn update(
    conn: &mut SqliteConnection,
    owner: &OwnerId,
    task: &Task,
) -> RepositoryResult<Row> {
    let changes = UpdateTask::from(task);

    let stored = diesel::update(
        tasks::table
            .filter(tasks::id.eq(task.id.as_str()))
            .filter(tasks::owner.eq(owner.as_str())),
    )
    .set(&changes)
    .get_result::<DbTask>(conn)?;

    Ok(Task::try_from(stored)?.into_row())
}

pub(super) fn delete(
    conn: &mut SqliteConnection,
    owner: &OwnerId,
    id: &RecordId,
) -> RepositoryResult<()> {
    let affected = diesel::delete(
        tasks::table
            .filter(tasks::id.eq(id.as_str()))
            .filter(tasks::owner.eq(owner.as_str())),
    )
    .execute(conn)?;

    if affected == 0 {
        return Err(RepositoryError::NotFound);
    }
    Ok(())
}
