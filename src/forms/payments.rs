//! Forms for the payments screen.

use serde::Deserialize;
use validator::Validate;

use crate::domain::payment::Payment;
use crate::domain::types::{Currency, OwnerId, PaymentStatus, RecordId};
use crate::forms::{FormError, amount, choice, optional_date, required_date, required_reference};

#[derive(Debug, Default, Deserialize, Validate)]
/// Form data for scheduling a payment.
pub struct AddPaymentForm {
    pub id: Option<String>,
    #[serde(default)]
    pub event_id: String,
    #[validate(length(max = 50))]
    #[serde(default)]
    pub kind: String,
    pub currency: Option<String>,
    pub amount: Option<String>,
    #[serde(default)]
    pub due_date: String,
    pub paid_date: Option<String>,
    pub status: Option<String>,
}

impl AddPaymentForm {
    pub fn into_domain(self, owner: OwnerId) -> Result<Payment, FormError> {
        self.validate()?;

        Ok(Payment {
            id: RecordId::or_generate(self.id.as_deref()),
            owner,
            event_id: required_reference(&self.event_id, "event")?,
            kind: self.kind.trim().to_string(),
            currency: choice(self.currency.as_deref(), "currency", Currency::default())?,
            amount: amount(self.amount.as_deref(), "amount")?,
            due_date: required_date(&self.due_date, "due date")?,
            paid_date: optional_date(self.paid_date.as_deref(), "paid date")?,
            status: choice(self.status.as_deref(), "status", PaymentStatus::Pending)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_form_parses_amount_and_dates() {
        let form = AddPaymentForm {
            id: Some("P-003".to_string()),
            event_id: "E-001".to_string(),
            kind: "deposit".to_string(),
            currency: Some("MXN".to_string()),
            amount: Some("1200.50".to_string()),
            due_date: "2025-12-12".to_string(),
            ..Default::default()
        };

        let payment = form
            .into_domain(OwnerId::new("studio@example.com").unwrap())
            .unwrap();
        assert_eq!(payment.id.as_str(), "P-003");
        assert_eq!(payment.currency, Currency::Mxn);
        assert_eq!(payment.amount.get(), 1200.5);
        assert_eq!(payment.status, PaymentStatus::Pending);
        assert_eq!(payment.paid_date, None);
    }

    #[test]
    fn due_date_is_required() {
        let form = AddPaymentForm {
            event_id: "E-001".to_string(),
            amount: Some("10".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            form.into_domain(OwnerId::new("studio@example.com").unwrap()),
            Err(FormError::Missing("due date"))
        ));
    }
}
