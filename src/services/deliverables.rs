//! Services behind the deliverables screen.

use chrono::NaiveDate;

use crate::domain::deliverable::Deliverable;
use crate::domain::types::RecordId;
use crate::dto::{Labeled, ListPageData, ListQuery, SelectOption};
use crate::forms::deliverables::AddDeliverableForm;
use crate::models::auth::AuthenticatedUser;
use crate::services::{
    ServiceResult, by_optional_date, matches_search, normalize_search, owner_of,
};
use crate::store::Store;

pub fn load_deliverables_page(
    store: &Store,
    user: &AuthenticatedUser,
    query: ListQuery,
) -> ServiceResult<ListPageData<Labeled<Deliverable>>> {
    let owner = owner_of(user)?;
    let snapshot = store.snapshot(&owner)?;
    let search_query = normalize_search(query.q);

    let mut items: Vec<_> = snapshot
        .deliverables
        .iter()
        .filter(|deliverable| {
            matches_search(
                search_query.as_deref(),
                &[
                    &deliverable.kind,
                    deliverable.link.as_ref().map_or("", |link| link.as_str()),
                ],
            )
        })
        .map(|deliverable| Labeled {
            event_label: snapshot.event_label(&deliverable.event_id),
            record: deliverable.clone(),
        })
        .collect();
    items.sort_by(|a, b| by_optional_date(a.record.due_date, b.record.due_date));

    Ok(ListPageData {
        items,
        options: SelectOption::events(&snapshot),
        search_query,
    })
}

pub fn add_deliverable(
    store: &Store,
    user: &AuthenticatedUser,
    form: AddDeliverableForm,
) -> ServiceResult<Deliverable> {
    let owner = owner_of(user)?;
    let deliverable = form.into_domain(owner.clone())?;
    Ok(store.create(&owner, deliverable)?)
}

pub fn mark_deliverable_delivered(
    store: &Store,
    user: &AuthenticatedUser,
    id: &str,
    today: NaiveDate,
) -> ServiceResult<Deliverable> {
    let owner = owner_of(user)?;
    let id = RecordId::new(id)?;
    Ok(store.update_with::<Deliverable>(&owner, &id, |deliverable| {
        deliverable.mark_delivered(today)
    })?)
}

pub fn delete_deliverable(store: &Store, user: &AuthenticatedUser, id: &str) -> ServiceResult<()> {
    let owner = owner_of(user)?;
    store.remove::<Deliverable>(&owner, &RecordId::new(id)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ServiceError;
    use crate::services::test_support::{day, demo_store, user};

    #[test]
    fn delivered_date_is_today() {
        let store = demo_store();
        let today = day(2026, 3, 1);

        let deliverable = mark_deliverable_delivered(&store, &user(), "D-001", today).unwrap();

        assert_eq!(deliverable.delivered_date, Some(today));
        assert!(deliverable.is_delivered());
    }

    #[test]
    fn search_matches_link() {
        let store = demo_store();
        let page = load_deliverables_page(
            &store,
            &user(),
            ListQuery {
                q: Some("gallery.example".to_string()),
            },
        )
        .unwrap();
        assert_eq!(page.items.len(), 1);
    }

    #[test]
    fn unknown_deliverable_is_not_found() {
        let store = demo_store();
        let result = mark_deliverable_delivered(&store, &user(), "D-404", day(2026, 3, 1));
        assert!(matches!(result, Err(ServiceError::NotFound)));
    }
}
