//! Dashboard summaries. Everything here is derived from the snapshot on each
//! render.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};

use crate::domain::event::Event;
use crate::domain::payment::Payment;
use crate::domain::snapshot::{Collection, Snapshot};
use crate::domain::special_request::SpecialRequest;
use crate::domain::types::{Amount, Currency};
use crate::dto::Labeled;
use crate::dto::dashboard::{CollectionCount, CurrencyTotal, DashboardPageData};
use crate::models::auth::AuthenticatedUser;
use crate::services::accounting::format_money;
use crate::services::{ServiceResult, owner_of};
use crate::store::Store;

/// How far ahead the dashboard looks for due payments.
pub const UPCOMING_PAYMENT_DAYS: i64 = 14;

/// Unpaid payments due between today and `today + days`, both inclusive.
/// Past-due payments are not included.
pub fn upcoming_payments(payments: &[Payment], today: NaiveDate, days: i64) -> Vec<&Payment> {
    let horizon = today + Duration::days(days);
    let mut upcoming: Vec<&Payment> = payments
        .iter()
        .filter(|payment| !payment.is_paid())
        .filter(|payment| payment.due_date >= today && payment.due_date <= horizon)
        .collect();
    upcoming.sort_by_key(|payment| payment.due_date);
    upcoming
}

pub fn open_requests(requests: &[SpecialRequest]) -> Vec<&SpecialRequest> {
    requests.iter().filter(|request| request.is_open()).collect()
}

/// Events from today on, soonest first.
pub fn upcoming_events(events: &[Event], today: NaiveDate) -> Vec<&Event> {
    let mut upcoming: Vec<&Event> = events.iter().filter(|event| event.date >= today).collect();
    upcoming.sort_by_key(|event| event.date);
    upcoming
}

/// Sum of every payment amount per currency, ordered by currency code.
pub fn totals_by_currency(payments: &[Payment]) -> Vec<(Currency, f64)> {
    let mut totals: BTreeMap<&'static str, (Currency, Amount)> = BTreeMap::new();
    for payment in payments {
        let entry = totals
            .entry(payment.currency.as_str())
            .or_insert((payment.currency, Amount::ZERO));
        entry.1 = entry.1 + payment.amount;
    }
    totals
        .into_values()
        .map(|(currency, total)| (currency, total.get()))
        .collect()
}

fn counts(snapshot: &Snapshot) -> Vec<CollectionCount> {
    Collection::ALL
        .into_iter()
        .map(|collection| CollectionCount {
            collection: collection.as_str(),
            count: snapshot.len(collection),
        })
        .collect()
}

pub fn load_dashboard(
    store: &Store,
    user: &AuthenticatedUser,
    today: NaiveDate,
) -> ServiceResult<DashboardPageData> {
    let owner = owner_of(user)?;
    let snapshot = store.snapshot(&owner)?;

    let upcoming_payments = upcoming_payments(&snapshot.payments, today, UPCOMING_PAYMENT_DAYS)
        .into_iter()
        .map(|payment| Labeled {
            event_label: snapshot.event_label(&payment.event_id),
            record: payment.clone(),
        })
        .collect();
    let open_requests = open_requests(&snapshot.special_requests)
        .into_iter()
        .map(|request| Labeled {
            event_label: snapshot.event_label(&request.event_id),
            record: request.clone(),
        })
        .collect();
    let upcoming_events = upcoming_events(&snapshot.events, today)
        .into_iter()
        .map(|event| Labeled {
            event_label: snapshot.event_label(&event.id),
            record: event.clone(),
        })
        .collect();
    let totals = totals_by_currency(&snapshot.payments)
        .into_iter()
        .map(|(currency, total)| CurrencyTotal {
            currency: currency.to_string(),
            total,
            formatted: format_money(total),
        })
        .collect();

    Ok(DashboardPageData {
        upcoming_payments,
        open_requests,
        upcoming_events,
        totals,
        counts: counts(&snapshot),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{Amount, OwnerId, PaymentStatus, RecordId};
    use crate::services::test_support::{day, demo_store, user};

    fn payment(id: &str, due: NaiveDate, status: PaymentStatus, currency: Currency) -> Payment {
        Payment {
            id: RecordId::new(id).unwrap(),
            owner: OwnerId::new("studio").unwrap(),
            event_id: RecordId::new("E-001").unwrap(),
            kind: "deposit".to_string(),
            currency,
            amount: Amount::new(100.0).unwrap(),
            due_date: due,
            paid_date: None,
            status,
        }
    }

    #[test]
    fn upcoming_window_is_inclusive_and_skips_paid_and_past_due() {
        let today = day(2026, 1, 1);
        let payments = vec![
            payment("yesterday", day(2025, 12, 31), PaymentStatus::Pending, Currency::Usd),
            payment("today", today, PaymentStatus::Overdue, Currency::Usd),
            payment("edge", day(2026, 1, 15), PaymentStatus::Pending, Currency::Usd),
            payment("beyond", day(2026, 1, 16), PaymentStatus::Pending, Currency::Usd),
            payment("paid", day(2026, 1, 5), PaymentStatus::Paid, Currency::Usd),
        ];

        let ids: Vec<_> = upcoming_payments(&payments, today, 14)
            .into_iter()
            .map(|p| p.id.as_str())
            .collect();

        assert_eq!(ids, vec!["today", "edge"]);
    }

    #[test]
    fn totals_are_grouped_by_currency_code() {
        let today = day(2026, 1, 1);
        let payments = vec![
            payment("a", today, PaymentStatus::Pending, Currency::Usd),
            payment("b", today, PaymentStatus::Paid, Currency::Mxn),
            payment("c", today, PaymentStatus::Paid, Currency::Usd),
        ];

        assert_eq!(
            totals_by_currency(&payments),
            vec![(Currency::Mxn, 100.0), (Currency::Usd, 200.0)]
        );
    }

    #[test]
    fn events_from_today_onwards() {
        let demo = Snapshot::demo();
        assert_eq!(upcoming_events(&demo.events, day(2026, 2, 14)).len(), 1);
        assert!(upcoming_events(&demo.events, day(2026, 2, 15)).is_empty());
    }

    #[test]
    fn dashboard_over_demo_data() {
        let store = demo_store();
        let data = load_dashboard(&store, &user(), day(2026, 1, 20)).unwrap();

        assert_eq!(data.upcoming_payments.len(), 1);
        assert_eq!(data.open_requests.len(), 1);
        assert_eq!(data.upcoming_events.len(), 1);
        assert_eq!(data.totals[0].formatted, "$4,000.00");
        assert_eq!(data.counts.len(), 7);
    }
}
