//! Diesel models for task records.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::task::Task as DomainTask;
use crate::domain::types::{OwnerId, RecordId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::tasks)]
#[diesel(primary_key(owner, id))]
pub struct Task {
    pub id: String,
    pub owner: String,
    pub event_id: Option<String>,
    pub title: String,
    pub assignee: String,
    pub due_date: Option<NaiveDate>,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::tasks)]
pub struct NewTask<'a> {
    pub id: &'a str,
    pub owner: &'a str,
    pub event_id: Option<&'a str>,
    pub title: &'a str,
    pub assignee: &'a str,
    pub due_date: Option<NaiveDate>,
    pub status: &'a str,
    pub created_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::tasks)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateTask<'a> {
    pub event_id: Option<&'a str>,
    pub title: &'a str,
    pub assignee: &'a str,
    pub due_date: Option<NaiveDate>,
    pub status: &'a str,
}

impl TryFrom<Task> for DomainTask {
    type Error = TypeConstraintError;

    fn try_from(task: Task) -> Result<Self, Self::Error> {
        Ok(Self {
            id: RecordId::new(task.id)?,
            owner: OwnerId::new(task.owner)?,
            event_id: task.event_id.map(RecordId::new).transpose()?,
            title: task.title,
            assignee: task.assignee,
            due_date: task.due_date,
            status: task.status.parse()?,
        })
    }
}

impl<'a> NewTask<'a> {
    pub fn new(task: &'a DomainTask, owner: &'a OwnerId, created_at: NaiveDateTime) -> Self {
        Self {
            id: task.id.as_str(),
            owner: owner.as_str(),
            event_id: task.event_id.as_ref().map(RecordId::as_str),
            title: task.title.as_str(),
            assignee: task.assignee.as_str(),
            due_date: task.due_date,
            status: task.status.as_str(),
            created_at,
        }
    }
}

impl<'a> From<&'a DomainTask> for UpdateTask<'a> {
    fn from(task: &'a DomainTask) -> Self {
        Self {
            event_id: task.event_id.as_ref().map(RecordId::as_str),
            title: task.title.as_str(),
            assignee: task.assignee.as_str(),
            due_date: task.due_date,
            status: task.status.as_str(),
        }
    }
}
