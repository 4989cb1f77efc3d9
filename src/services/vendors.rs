//! Services behind the vendors screen.

use crate::domain::types::RecordId;
use crate::domain::vendor::Vendor;
use crate::dto::{Labeled, ListPageData, ListQuery, SelectOption};
use crate::forms::vendors::AddVendorForm;
use crate::models::auth::AuthenticatedUser;
use crate::services::{ServiceResult, matches_search, normalize_search, owner_of};
use crate::store::Store;

pub fn load_vendors_page(
    store: &Store,
    user: &AuthenticatedUser,
    query: ListQuery,
) -> ServiceResult<ListPageData<Labeled<Vendor>>> {
    let owner = owner_of(user)?;
    let snapshot = store.snapshot(&owner)?;
    let search_query = normalize_search(query.q);

    let items = snapshot
        .vendors
        .iter()
        .filter(|vendor| {
            matches_search(
                search_query.as_deref(),
                &[
                    &vendor.kind,
                    vendor.name.as_str(),
                    vendor.contact.as_deref().unwrap_or_default(),
                ],
            )
        })
        .map(|vendor| Labeled {
            event_label: snapshot.event_label(&vendor.event_id),
            record: vendor.clone(),
        })
        .collect();

    Ok(ListPageData {
        items,
        options: SelectOption::events(&snapshot),
        search_query,
    })
}

pub fn add_vendor(
    store: &Store,
    user: &AuthenticatedUser,
    form: AddVendorForm,
) -> ServiceResult<Vendor> {
    let owner = owner_of(user)?;
    let vendor = form.into_domain(owner.clone())?;
    Ok(store.create(&owner, vendor)?)
}

pub fn delete_vendor(store: &Store, user: &AuthenticatedUser, id: &str) -> ServiceResult<()> {
    let owner = owner_of(user)?;
    store.remove::<Vendor>(&owner, &RecordId::new(id)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{demo_store, user};

    #[test]
    fn vendor_search_and_delete() {
        let store = demo_store();
        let search = |term: &str| {
            load_vendors_page(
                &store,
                &user(),
                ListQuery {
                    q: Some(term.to_string()),
                },
            )
            .unwrap()
            .items
            .len()
        };
        assert_eq!(search("planner"), 1);
        assert_eq!(search("casabonita"), 1);

        delete_vendor(&store, &user(), "V-001").unwrap();
        assert_eq!(search("planner"), 0);
    }
}
