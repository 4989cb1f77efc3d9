//! Services behind the payments screen.

use chrono::NaiveDate;

use crate::domain::payment::Payment;
use crate::domain::types::RecordId;
use crate::dto::{Labeled, ListPageData, ListQuery, SelectOption};
use crate::forms::payments::AddPaymentForm;
use crate::models::auth::AuthenticatedUser;
use crate::services::{ServiceResult, matches_search, normalize_search, owner_of};
use crate::store::Store;

/// Payments matching the search, by due date ascending.
pub fn load_payments_page(
    store: &Store,
    user: &AuthenticatedUser,
    query: ListQuery,
) -> ServiceResult<ListPageData<Labeled<Payment>>> {
    let owner = owner_of(user)?;
    let snapshot = store.snapshot(&owner)?;
    let search_query = normalize_search(query.q);

    let mut items: Vec<_> = snapshot
        .payments
        .iter()
        .map(|payment| Labeled {
            event_label: snapshot.event_label(&payment.event_id),
            record: payment.clone(),
        })
        .filter(|row| {
            matches_search(
                search_query.as_deref(),
                &[
                    &row.record.kind,
                    row.record.currency.as_str(),
                    row.record.status.as_str(),
                    &row.event_label,
                ],
            )
        })
        .collect();
    items.sort_by_key(|row| row.record.due_date);

    Ok(ListPageData {
        items,
        options: SelectOption::events(&snapshot),
        search_query,
    })
}

pub fn add_payment(
    store: &Store,
    user: &AuthenticatedUser,
    form: AddPaymentForm,
) -> ServiceResult<Payment> {
    let owner = owner_of(user)?;
    let payment = form.into_domain(owner.clone())?;
    Ok(store.create(&owner, payment)?)
}

/// Records the payment as received today.
pub fn mark_payment_paid(
    store: &Store,
    user: &AuthenticatedUser,
    id: &str,
    today: NaiveDate,
) -> ServiceResult<Payment> {
    let owner = owner_of(user)?;
    let id = RecordId::new(id)?;
    Ok(store.update_with::<Payment>(&owner, &id, |payment| payment.mark_paid(today))?)
}

pub fn delete_payment(store: &Store, user: &AuthenticatedUser, id: &str) -> ServiceResult<()> {
    let owner = owner_of(user)?;
    store.remove::<Payment>(&owner, &RecordId::new(id)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::PaymentStatus;
    use crate::services::dashboard::upcoming_payments;
    use crate::services::test_support::{day, demo_store, user};

    #[test]
    fn payments_sorted_by_due_date() {
        let store = demo_store();
        let page = load_payments_page(&store, &user(), ListQuery::default()).unwrap();
        let ids: Vec<_> = page.items.iter().map(|r| r.record.id.as_str()).collect();
        assert_eq!(ids, vec!["P-001", "P-002"]);
    }

    #[test]
    fn search_matches_event_label() {
        let store = demo_store();
        let page = load_payments_page(
            &store,
            &user(),
            ListQuery {
                q: Some("hernandez".to_string()),
            },
        )
        .unwrap();
        assert_eq!(page.items.len(), 2);
    }

    #[test]
    fn paid_payment_leaves_upcoming_view() {
        let store = demo_store();
        let today = day(2026, 1, 20);
        let owner = user().owner().unwrap();

        let before = store.snapshot(&owner).unwrap();
        assert_eq!(upcoming_payments(&before.payments, today, 14).len(), 1);

        let paid = mark_payment_paid(&store, &user(), "P-002", today).unwrap();
        assert_eq!(paid.status, PaymentStatus::Paid);
        assert_eq!(paid.paid_date, Some(today));

        let after = store.snapshot(&owner).unwrap();
        assert!(upcoming_payments(&after.payments, today, 14).is_empty());
    }
}
