//! Forms for the vendors screen.

use serde::Deserialize;
use validator::Validate;

use crate::domain::types::{OwnerId, PersonName, RecordId};
use crate::domain::vendor::Vendor;
use crate::forms::{FormError, optional_text, required_reference};

#[derive(Debug, Default, Deserialize, Validate)]
/// Form data for a supplier working an event.
pub struct AddVendorForm {
    pub id: Option<String>,
    #[serde(default)]
    pub event_id: String,
    #[validate(length(max = 100))]
    #[serde(default)]
    pub kind: String,
    #[validate(length(max = 200))]
    #[serde(default)]
    pub name: String,
    #[validate(length(max = 200))]
    pub contact: Option<String>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

impl AddVendorForm {
    pub fn into_domain(self, owner: OwnerId) -> Result<Vendor, FormError> {
        self.validate()?;

        Ok(Vendor {
            id: RecordId::or_generate(self.id.as_deref()),
            owner,
            event_id: required_reference(&self.event_id, "event")?,
            kind: self.kind.trim().to_string(),
            name: PersonName::new(self.name).map_err(|_| FormError::Missing("name"))?,
            contact: optional_text(self.contact),
            notes: optional_text(self.notes),
        })
    }
}
