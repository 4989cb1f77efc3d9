//! Forms for the tasks screen.

use serde::Deserialize;
use validator::Validate;

use crate::domain::task::Task;
use crate::domain::types::{OwnerId, RecordId, TaskStatus};
use crate::forms::{FormError, choice, optional_date, optional_reference, required_text};

#[derive(Debug, Default, Deserialize, Validate)]
/// Form data for an internal to-do item.
pub struct AddTaskForm {
    pub id: Option<String>,
    pub event_id: Option<String>,
    #[validate(length(max = 200))]
    #[serde(default)]
    pub title: String,
    #[validate(length(max = 100))]
    #[serde(default)]
    pub assignee: String,
    pub due_date: Option<String>,
    pub status: Option<String>,
}

impl AddTaskForm {
    pub fn into_domain(self, owner: OwnerId) -> Result<Task, FormError> {
        self.validate()?;

        Ok(Task {
            id: RecordId::or_generate(self.id.as_deref()),
            owner,
            event_id: optional_reference(self.event_id.as_deref()),
            title: required_text(&self.title, "title")?,
            assignee: self.assignee.trim().to_string(),
            due_date: optional_date(self.due_date.as_deref(), "due date")?,
            status: choice(self.status.as_deref(), "status", TaskStatus::Todo)?,
        })
    }
}
