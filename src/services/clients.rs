//! Services behind the clients screen.

use crate::domain::client::Client;
use crate::domain::types::RecordId;
use crate::dto::{ListPageData, ListQuery};
use crate::forms::clients::AddClientForm;
use crate::models::auth::AuthenticatedUser;
use crate::services::{ServiceResult, matches_search, normalize_search, owner_of};
use crate::store::Store;

/// Clients matching the search, newest first.
pub fn load_clients_page(
    store: &Store,
    user: &AuthenticatedUser,
    query: ListQuery,
) -> ServiceResult<ListPageData<Client>> {
    let owner = owner_of(user)?;
    let snapshot = store.snapshot(&owner)?;
    let search_query = normalize_search(query.q);

    let items = snapshot
        .clients
        .into_iter()
        .filter(|client| {
            matches_search(
                search_query.as_deref(),
                &[
                    &client.full_name(),
                    client.email.as_ref().map_or("", |e| e.as_str()),
                    client.phone.as_deref().unwrap_or_default(),
                ],
            )
        })
        .collect();

    Ok(ListPageData {
        items,
        options: Vec::new(),
        search_query,
    })
}

pub fn add_client(
    store: &Store,
    user: &AuthenticatedUser,
    form: AddClientForm,
) -> ServiceResult<Client> {
    let owner = owner_of(user)?;
    let client = form.into_domain(owner.clone()).map_err(|err| {
        log::warn!("Rejected client form: {err}");
        err
    })?;

    Ok(store.create(&owner, client)?)
}

/// Deleting a client also removes its events and everything under them.
pub fn delete_client(store: &Store, user: &AuthenticatedUser, id: &str) -> ServiceResult<()> {
    let owner = owner_of(user)?;
    let id = RecordId::new(id)?;
    store.remove::<Client>(&owner, &id)?;
    Ok(())
}
