//! DTOs used on the accounting page.

use serde::{Deserialize, Serialize};

use crate::domain::payment::Payment;
use crate::dto::Labeled;

/// Query parameters of the accounting page.
#[derive(Debug, Default, Deserialize)]
pub struct AccountingQuery {
    /// Month as `YYYY-MM`; defaults to the current month.
    pub month: Option<String>,
    /// Currency code; defaults to USD.
    pub currency: Option<String>,
}

/// Due, paid and pending sums of one month in one currency.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq)]
pub struct MonthlyTotals {
    pub due: f64,
    pub paid: f64,
    pub pending: f64,
}

#[derive(Debug, Serialize)]
pub struct AccountingPageData {
    /// Selected month as `YYYY-MM`.
    pub month: String,
    pub currency: String,
    pub totals: MonthlyTotals,
    pub formatted: FormattedTotals,
    /// Payments due or paid within the month.
    pub payments: Vec<Labeled<Payment>>,
}

#[derive(Debug, Serialize)]
pub struct FormattedTotals {
    pub due: String,
    pub paid: String,
    pub pending: String,
}
