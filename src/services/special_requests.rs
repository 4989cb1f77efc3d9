//! Services behind the special requests screen.

use crate::domain::special_request::SpecialRequest;
use crate::domain::types::RecordId;
use crate::dto::{Labeled, ListPageData, ListQuery, SelectOption};
use crate::forms::special_requests::AddSpecialRequestForm;
use crate::models::auth::AuthenticatedUser;
use crate::services::{ServiceResult, matches_search, normalize_search, owner_of};
use crate::store::Store;

pub fn load_special_requests_page(
    store: &Store,
    user: &AuthenticatedUser,
    query: ListQuery,
) -> ServiceResult<ListPageData<Labeled<SpecialRequest>>> {
    let owner = owner_of(user)?;
    let snapshot = store.snapshot(&owner)?;
    let search_query = normalize_search(query.q);

    let items = snapshot
        .special_requests
        .iter()
        .filter(|request| {
            matches_search(
                search_query.as_deref(),
                &[
                    &request.category,
                    &request.description,
                    request.priority.as_str(),
                    request.status.as_str(),
                ],
            )
        })
        .map(|request| Labeled {
            event_label: snapshot.event_label(&request.event_id),
            record: request.clone(),
        })
        .collect();

    Ok(ListPageData {
        items,
        options: SelectOption::events(&snapshot),
        search_query,
    })
}

pub fn add_special_request(
    store: &Store,
    user: &AuthenticatedUser,
    form: AddSpecialRequestForm,
) -> ServiceResult<SpecialRequest> {
    let owner = owner_of(user)?;
    let request = form.into_domain(owner.clone())?;
    Ok(store.create(&owner, request)?)
}

/// Flips the request between open and done.
pub fn toggle_special_request(
    store: &Store,
    user: &AuthenticatedUser,
    id: &str,
) -> ServiceResult<SpecialRequest> {
    let owner = owner_of(user)?;
    let id = RecordId::new(id)?;
    Ok(store.update_with::<SpecialRequest>(&owner, &id, SpecialRequest::toggle_status)?)
}

pub fn delete_special_request(
    store: &Store,
    user: &AuthenticatedUser,
    id: &str,
) -> ServiceResult<()> {
    let owner = owner_of(user)?;
    store.remove::<SpecialRequest>(&owner, &RecordId::new(id)?)?;
    Ok(())
}
