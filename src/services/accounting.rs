//! Monthly accounting rollups over the payments collection.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};

use crate::domain::payment::Payment;
use crate::domain::types::{Amount, Currency, TypeConstraintError, cents_to_units};
use crate::dto::Labeled;
use crate::dto::accounting::{AccountingPageData, AccountingQuery, FormattedTotals, MonthlyTotals};
use crate::models::auth::AuthenticatedUser;
use crate::services::{ServiceError, ServiceResult, owner_of};
use crate::store::Store;

/// A calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearMonth {
    first_day: NaiveDate,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first_day| Self { first_day })
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first_day: date.with_day(1).unwrap_or(date),
        }
    }

    pub fn first_day(self) -> NaiveDate {
        self.first_day
    }

    pub fn last_day(self) -> NaiveDate {
        self.first_day
            .checked_add_months(chrono::Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    /// Whether `date` falls between the first and last day, inclusive.
    pub fn contains(self, date: NaiveDate) -> bool {
        date >= self.first_day() && date <= self.last_day()
    }
}

impl FromStr for YearMonth {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TypeConstraintError::InvalidValue(format!("`{s}` is not a YYYY-MM month"));
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year = year.parse().map_err(|_| invalid())?;
        let month = month.parse().map_err(|_| invalid())?;
        YearMonth::new(year, month).ok_or_else(invalid)
    }
}

impl Display for YearMonth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.first_day.format("%Y-%m"))
    }
}

/// Due, paid and pending totals of `currency` payments in `month`.
pub fn monthly_totals(payments: &[Payment], month: YearMonth, currency: Currency) -> MonthlyTotals {
    let in_currency = payments.iter().filter(|p| p.currency == currency);

    let due: Amount = in_currency
        .clone()
        .filter(|p| month.contains(p.due_date))
        .map(|p| p.amount)
        .sum();
    let paid: Amount = in_currency
        .filter(|p| p.paid_date.is_some_and(|date| month.contains(date)))
        .map(|p| p.amount)
        .sum();

    MonthlyTotals {
        due: due.get(),
        paid: paid.get(),
        pending: cents_to_units(due.cents() - paid.cents()),
    }
}

/// `$` amount with thousands separators and two decimals, e.g. `$1,200.00`.
pub fn format_money(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${grouped}.{:02}", cents % 100)
}

pub fn load_accounting_page(
    store: &Store,
    user: &AuthenticatedUser,
    query: AccountingQuery,
    today: NaiveDate,
) -> ServiceResult<AccountingPageData> {
    let owner = owner_of(user)?;

    let month = match query.month.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(text) => text
            .parse::<YearMonth>()
            .map_err(|err| ServiceError::Form(err.to_string()))?,
        None => YearMonth::containing(today),
    };
    let currency = match query.currency.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(code) => code
            .parse::<Currency>()
            .map_err(|err| ServiceError::Form(err.to_string()))?,
        None => Currency::default(),
    };

    let snapshot = store.snapshot(&owner)?;
    let totals = monthly_totals(&snapshot.payments, month, currency);

    let mut payments: Vec<_> = snapshot
        .payments
        .iter()
        .filter(|p| p.currency == currency)
        .filter(|p| month.contains(p.due_date) || p.paid_date.is_some_and(|d| month.contains(d)))
        .map(|p| Labeled {
            event_label: snapshot.event_label(&p.event_id),
            record: p.clone(),
        })
        .collect();
    payments.sort_by_key(|row| row.record.due_date);

    Ok(AccountingPageData {
        month: month.to_string(),
        currency: currency.to_string(),
        formatted: FormattedTotals {
            due: format_money(totals.due),
            paid: format_money(totals.paid),
            pending: format_money(totals.pending),
        },
        totals,
        payments,
    })
}
