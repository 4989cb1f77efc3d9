//! Forms for the deliverables screen.

use serde::Deserialize;
use validator::Validate;

use crate::domain::deliverable::Deliverable;
use crate::domain::types::{DeliveryLink, OwnerId, RecordId};
use crate::forms::{FormError, optional_date, optional_text, required_reference};

#[derive(Debug, Default, Deserialize, Validate)]
/// Form data for a promised gallery, album or video.
pub struct AddDeliverableForm {
    pub id: Option<String>,
    #[serde(default)]
    pub event_id: String,
    #[validate(length(max = 100))]
    #[serde(default)]
    pub kind: String,
    pub due_date: Option<String>,
    pub delivered_date: Option<String>,
    pub revision_date: Option<String>,
    pub link: Option<String>,
}

impl AddDeliverableForm {
    pub fn into_domain(self, owner: OwnerId) -> Result<Deliverable, FormError> {
        self.validate()?;

        let link = optional_text(self.link)
            .map(DeliveryLink::new)
            .transpose()
            .map_err(|_| FormError::InvalidUrl)?;

        Ok(Deliverable {
            id: RecordId::or_generate(self.id.as_deref()),
            owner,
            event_id: required_reference(&self.event_id, "event")?,
            kind: self.kind.trim().to_string(),
            due_date: optional_date(self.due_date.as_deref(), "due date")?,
            delivered_date: optional_date(self.delivered_date.as_deref(), "delivered date")?,
            revision_date: optional_date(self.revision_date.as_deref(), "revision date")?,
            link,
        })
    }
}
