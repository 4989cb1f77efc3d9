//! Forms for the clients screen.

use serde::Deserialize;
use validator::Validate;

use crate::domain::client::Client;
use crate::domain::types::{ContactEmail, OwnerId, PersonName, RecordId};
use crate::forms::{FormError, optional_text};

#[derive(Debug, Default, Deserialize, Validate)]
/// Form data for adding a client.
pub struct AddClientForm {
    /// Optional business id; generated when blank.
    pub id: Option<String>,
    #[validate(length(max = 100))]
    #[serde(default)]
    pub first_name: String,
    #[validate(length(max = 100))]
    #[serde(default)]
    pub last_name: String,
    pub email: Option<String>,
    #[validate(length(max = 50))]
    pub phone: Option<String>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

impl AddClientForm {
    /// Validates the form and builds the client owned by `owner`.
    pub fn into_domain(self, owner: OwnerId) -> Result<Client, FormError> {
        self.validate()?;

        let last_name = PersonName::new(self.last_name).map_err(|_| FormError::Missing("last name"))?;
        let email = optional_text(self.email)
            .map(ContactEmail::new)
            .transpose()
            .map_err(|_| FormError::InvalidEmail)?;

        Ok(Client::new(
            RecordId::or_generate(self.id.as_deref()),
            owner,
            self.first_name,
            last_name,
            email,
            self.phone,
            self.notes,
        ))
    }
}
