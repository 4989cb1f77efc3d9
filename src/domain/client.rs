use serde::{Deserialize, Serialize};

use crate::domain::types::{ContactEmail, OwnerId, PersonName, RecordId};

/// A couple (or their planner) booking the studio.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Client {
    pub id: RecordId,
    pub owner: OwnerId,
    pub first_name: String,
    pub last_name: PersonName,
    pub email: Option<ContactEmail>,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

impl Client {
    #[must_use]
    pub fn new(
        id: RecordId,
        owner: OwnerId,
        first_name: String,
        last_name: PersonName,
        email: Option<ContactEmail>,
        phone: Option<String>,
        notes: Option<String>,
    ) -> Self {
        Self {
            id,
            owner,
            first_name: first_name.trim().to_string(),
            last_name,
            email,
            phone: phone
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            notes: notes
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }

    /// "First Last", or just the last name when no first name was given.
    pub fn full_name(&self) -> String {
        if self.first_name.is_empty() {
            self.last_name.to_string()
        } else {
            format!("{} {}", self.first_name, self.last_name)
        }
    }
}
