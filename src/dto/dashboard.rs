//! DTOs used on the dashboard.

use serde::Serialize;

use crate::domain::event::Event;
use crate::domain::payment::Payment;
use crate::domain::special_request::SpecialRequest;
use crate::dto::Labeled;

/// Sum of all payment amounts in one currency.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CurrencyTotal {
    pub currency: String,
    pub total: f64,
    pub formatted: String,
}

/// Record count of one collection.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CollectionCount {
    pub collection: &'static str,
    pub count: usize,
}

/// Data required to render the dashboard.
#[derive(Debug, Serialize)]
pub struct DashboardPageData {
    pub upcoming_payments: Vec<Labeled<Payment>>,
    pub open_requests: Vec<Labeled<SpecialRequest>>,
    pub upcoming_events: Vec<Labeled<Event>>,
    pub totals: Vec<CurrencyTotal>,
    pub counts: Vec<CollectionCount>,
}
