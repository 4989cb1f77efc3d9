//! Services behind the events screen.

use crate::domain::client::Client;
use crate::domain::event::Event;
use crate::domain::types::RecordId;
use crate::dto::{EventRow, ListPageData, ListQuery, SelectOption};
use crate::forms::events::{AddEventForm, SetEventStatusForm};
use crate::models::auth::AuthenticatedUser;
use crate::services::{ServiceResult, matches_search, normalize_search, owner_of};
use crate::store::Store;

/// Events matching the search, by date ascending.
pub fn load_events_page(
    store: &Store,
    user: &AuthenticatedUser,
    query: ListQuery,
) -> ServiceResult<ListPageData<EventRow>> {
    let owner = owner_of(user)?;
    let snapshot = store.snapshot(&owner)?;
    let search_query = normalize_search(query.q);

    let mut items: Vec<EventRow> = snapshot
        .events
        .iter()
        .map(|event| EventRow {
            client_name: snapshot
                .client(&event.client_id)
                .map(Client::full_name)
                .unwrap_or_else(|| event.client_id.to_string()),
            event: event.clone(),
        })
        .filter(|row| {
            matches_search(
                search_query.as_deref(),
                &[
                    &row.client_name,
                    &row.event.venue,
                    &row.event.package,
                    row.event.status.as_str(),
                ],
            )
        })
        .collect();
    items.sort_by_key(|row| row.event.date);

    Ok(ListPageData {
        items,
        options: SelectOption::clients(&snapshot),
        search_query,
    })
}

pub fn add_event(
    store: &Store,
    user: &AuthenticatedUser,
    form: AddEventForm,
) -> ServiceResult<Event> {
    let owner = owner_of(user)?;
    let event = form.into_domain(owner.clone())?;
    Ok(store.create(&owner, event)?)
}

pub fn set_event_status(
    store: &Store,
    user: &AuthenticatedUser,
    id: &str,
    form: SetEventStatusForm,
) -> ServiceResult<Event> {
    let owner = owner_of(user)?;
    let id = RecordId::new(id)?;
    let status = form.status()?;
    Ok(store.update_with::<Event>(&owner, &id, |event| event.set_status(status))?)
}

pub fn delete_event(store: &Store, user: &AuthenticatedUser, id: &str) -> ServiceResult<()> {
    let owner = owner_of(user)?;
    store.remove::<Event>(&owner, &RecordId::new(id)?)?;
    Ok(())
}
