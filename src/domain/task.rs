use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::types::{OwnerId, RecordId, TaskStatus};

/// Internal to-do item, optionally tied to an event.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Task {
    pub id: RecordId,
    pub owner: OwnerId,
    pub event_id: Option<RecordId>,
    pub title: String,
    pub assignee: String,
    pub due_date: Option<NaiveDate>,
    pub status: TaskStatus,
}

impl Task {
    /// Anything unfinished becomes done; done reopens as todo.
    pub fn toggle_done(&mut self) {
        self.status = match self.status {
            TaskStatus::Done => TaskStatus::Todo,
            TaskStatus::Todo | TaskStatus::Doing => TaskStatus::Done,
        };
    }
}
