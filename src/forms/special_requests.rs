//! Forms for the special requests screen.

use serde::Deserialize;
use validator::Validate;

use crate::domain::special_request::SpecialRequest;
use crate::domain::types::{OwnerId, Priority, RecordId, RequestStatus};
use crate::forms::{FormError, choice, required_reference, required_text};

#[derive(Debug, Default, Deserialize, Validate)]
/// Form data for noting a couple's special request.
pub struct AddSpecialRequestForm {
    pub id: Option<String>,
    #[serde(default)]
    pub event_id: String,
    #[validate(length(max = 100))]
    #[serde(default)]
    pub category: String,
    pub priority: Option<String>,
    #[validate(length(max = 2000))]
    #[serde(default)]
    pub description: String,
}

impl AddSpecialRequestForm {
    pub fn into_domain(self, owner: OwnerId) -> Result<SpecialRequest, FormError> {
        self.validate()?;

        Ok(SpecialRequest {
            id: RecordId::or_generate(self.id.as_deref()),
            owner,
            event_id: required_reference(&self.event_id, "event")?,
            category: self.category.trim().to_string(),
            priority: choice(self.priority.as_deref(), "priority", Priority::Normal)?,
            description: required_text(&self.description, "description")?,
            status: RequestStatus::Open,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_requests_start_open_with_normal_priority() {
        let form = AddSpecialRequestForm {
            event_id: "E-001".to_string(),
            category: "Family".to_string(),
            description: "Portrait with both grandmothers".to_string(),
            ..Default::default()
        };

        let request = form
            .into_domain(OwnerId::new("studio@example.com").unwrap())
            .unwrap();
        assert_eq!(request.status, RequestStatus::Open);
        assert_eq!(request.priority, Priority::Normal);
    }

    #[test]
    fn description_is_stored_as_typed() {
        let form = AddSpecialRequestForm {
            event_id: "E-001".to_string(),
            description: " Bride & groom by the <old> well ".to_string(),
            ..Default::default()
        };

        let request = form
            .into_domain(OwnerId::new("studio@example.com").unwrap())
            .unwrap();
        assert_eq!(request.description, "Bride & groom by the <old> well");
    }

    #[test]
    fn event_reference_is_required() {
        let form = AddSpecialRequestForm {
            description: "Drone shots".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            form.into_domain(OwnerId::new("studio@example.com").unwrap()),
            Err(FormError::Missing("event"))
        ));
    }
}
