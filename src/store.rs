//! In-memory application state, one [`Snapshot`] per signed-in owner.
//!
//! Writes are applied to the local snapshot first and then sent to the
//! backend. When the backend rejects a write the local change is reverted and
//! the error is returned to the caller. The lock is never held across a
//! backend call: change notifications re-enter the store from inside the
//! backend's write path.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::thread;

use crate::domain::snapshot::{Collection, Record, Row, Snapshot};
use crate::domain::types::{OwnerId, RecordId};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{Backend, ChangeEvent};

pub struct Store {
    backend: Option<Arc<dyn Backend>>,
    snapshots: RwLock<HashMap<OwnerId, Snapshot>>,
}

impl Store {
    /// Builds the store and subscribes it to the backend's change feed.
    /// Without a backend every owner starts from the demo snapshot and writes
    /// stay local.
    pub fn new(backend: Option<Arc<dyn Backend>>) -> Arc<Self> {
        let store = Arc::new(Self {
            backend,
            snapshots: RwLock::new(HashMap::new()),
        });

        if let Some(backend) = &store.backend {
            let weak = Arc::downgrade(&store);
            backend.subscribe(Box::new(move |event| {
                if let Some(store) = weak.upgrade() {
                    store.apply_change(event);
                }
            }));
        }

        store
    }

    pub fn is_connected(&self) -> bool {
        self.backend.is_some()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<OwnerId, Snapshot>> {
        self.snapshots.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<OwnerId, Snapshot>> {
        self.snapshots.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_loaded(&self, owner: &OwnerId) -> bool {
        self.read().contains_key(owner)
    }

    /// Fetches the seven collections concurrently.
    fn fetch_all(&self, owner: &OwnerId) -> RepositoryResult<Snapshot> {
        let Some(backend) = &self.backend else {
            return Ok(Snapshot::demo());
        };

        let results = thread::scope(|scope| {
            let handles: Vec<_> = Collection::ALL
                .into_iter()
                .map(|collection| {
                    let backend = Arc::clone(backend);
                    (
                        collection,
                        scope.spawn(move || backend.list(owner, collection)),
                    )
                })
                .collect();

            handles
                .into_iter()
                .map(|(collection, handle)| {
                    let rows = handle.join().map_err(|_| {
                        RepositoryError::Unexpected(format!("fetching {collection} panicked"))
                    })??;
                    Ok((collection, rows))
                })
                .collect::<RepositoryResult<Vec<(Collection, Vec<Row>)>>>()
        })?;

        let mut snapshot = Snapshot::default();
        for (collection, rows) in results {
            snapshot.replace_collection(collection, rows);
        }
        Ok(snapshot)
    }

    /// Loads the owner's snapshot on first access.
    pub fn load(&self, owner: &OwnerId) -> RepositoryResult<()> {
        if self.is_loaded(owner) {
            return Ok(());
        }
        let snapshot = self.fetch_all(owner)?;
        self.write().entry(owner.clone()).or_insert(snapshot);
        Ok(())
    }

    /// Refetches every collection and replaces the snapshot wholesale. A no-op
    /// in demo mode, where local edits are the only copy.
    pub fn refresh(&self, owner: &OwnerId) -> RepositoryResult<()> {
        if self.backend.is_none() && self.is_loaded(owner) {
            return Ok(());
        }
        let snapshot = self.fetch_all(owner)?;
        self.write().insert(owner.clone(), snapshot);
        Ok(())
    }

    /// Copy of the owner's current snapshot, loading it if needed.
    pub fn snapshot(&self, owner: &OwnerId) -> RepositoryResult<Snapshot> {
        self.load(owner)?;
        Ok(self.read().get(owner).cloned().unwrap_or_default())
    }

    /// Refetches the single collection named by a change notification.
    fn apply_change(&self, event: &ChangeEvent) {
        let Some(backend) = &self.backend else {
            return;
        };
        if !self.is_loaded(&event.owner) {
            return;
        }
        match backend.list(&event.owner, event.collection) {
            Ok(rows) => {
                if let Some(snapshot) = self.write().get_mut(&event.owner) {
                    snapshot.replace_collection(event.collection, rows);
                }
            }
            Err(err) => {
                log::error!(
                    "Failed to refetch {} after {:?}: {err}",
                    event.collection,
                    event.kind
                );
            }
        }
    }

    fn with_snapshot<R>(&self, owner: &OwnerId, f: impl FnOnce(&mut Snapshot) -> R) -> R {
        let mut snapshots = self.write();
        f(snapshots.entry(owner.clone()).or_default())
    }

    /// Prepends `record` locally, then inserts it remotely.
    pub fn create<T: Record>(&self, owner: &OwnerId, mut record: T) -> RepositoryResult<T> {
        self.load(owner)?;
        record.set_owner(owner.clone());
        let id = record.id().clone();

        self.with_snapshot(owner, |snapshot| {
            T::list_mut(snapshot).insert(0, record.clone())
        });

        let Some(backend) = &self.backend else {
            return Ok(record);
        };

        match backend.insert(owner, &record.clone().into_row()) {
            Ok(row) => {
                let stored = T::from_row(row).unwrap_or(record);
                self.with_snapshot(owner, |snapshot| {
                    if let Some(slot) = T::list_mut(snapshot).iter_mut().find(|r| r.id() == &id) {
                        *slot = stored.clone();
                    }
                });
                Ok(stored)
            }
            Err(err) => {
                log::warn!("Reverting local insert into {}: {err}", T::COLLECTION);
                self.with_snapshot(owner, |snapshot| {
                    let list = T::list_mut(snapshot);
                    if let Some(position) = list.iter().position(|r| r.id() == &id) {
                        list.remove(position);
                    }
                });
                Err(err)
            }
        }
    }

    /// Swaps the record with the same id locally, then updates it remotely.
    pub fn replace<T: Record>(&self, owner: &OwnerId, mut record: T) -> RepositoryResult<T> {
        self.load(owner)?;
        record.set_owner(owner.clone());
        let id = record.id().clone();

        let previous = self.with_snapshot(owner, |snapshot| {
            T::list_mut(snapshot)
                .iter_mut()
                .find(|r| r.id() == &id)
                .map(|slot| std::mem::replace(slot, record.clone()))
        });
        let Some(previous) = previous else {
            return Err(RepositoryError::NotFound);
        };

        let Some(backend) = &self.backend else {
            return Ok(record);
        };

        match backend.update(owner, &record.clone().into_row()) {
            Ok(row) => Ok(T::from_row(row).unwrap_or(record)),
            Err(err) => {
                log::warn!("Reverting local update of {} {id}: {err}", T::COLLECTION);
                self.with_snapshot(owner, |snapshot| {
                    if let Some(slot) = T::list_mut(snapshot).iter_mut().find(|r| r.id() == &id) {
                        *slot = previous;
                    }
                });
                Err(err)
            }
        }
    }

    /// Applies `change` to a copy of the stored record and replaces it.
    pub fn update_with<T: Record>(
        &self,
        owner: &OwnerId,
        id: &RecordId,
        change: impl FnOnce(&mut T),
    ) -> RepositoryResult<T> {
        self.load(owner)?;
        let mut record = self
            .read()
            .get(owner)
            .and_then(|snapshot| snapshot.find::<T>(id).cloned())
            .ok_or(RepositoryError::NotFound)?;
        change(&mut record);
        self.replace(owner, record)
    }

    /// Removes the record locally, then deletes it remotely.
    pub fn remove<T: Record>(&self, owner: &OwnerId, id: &RecordId) -> RepositoryResult<()> {
        self.load(owner)?;

        let removed = self.with_snapshot(owner, |snapshot| {
            let list = T::list_mut(snapshot);
            list.iter()
                .position(|r| r.id() == id)
                .map(|position| (position, list.remove(position)))
        });
        let Some((position, record)) = removed else {
            return Err(RepositoryError::NotFound);
        };

        let Some(backend) = &self.backend else {
            self.with_snapshot(owner, |snapshot| {
                snapshot.remove_dependents(T::COLLECTION, id)
            });
            return Ok(());
        };

        backend.delete(owner, T::COLLECTION, id).inspect_err(|err| {
            log::warn!("Reverting local delete of {} {id}: {err}", T::COLLECTION);
            self.with_snapshot(owner, |snapshot| {
                let list = T::list_mut(snapshot);
                if !list.iter().any(|r| r.id() == id) {
                    list.insert(position.min(list.len()), record);
                }
            });
        })
    }

    /// Replaces the owner's local snapshot without touching the backend.
    pub fn import(&self, owner: &OwnerId, snapshot: Snapshot) {
        self.write().insert(owner.clone(), snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::client::Client;
    use crate::domain::payment::Payment;
    use crate::domain::types::{PaymentStatus, PersonName};
    use crate::repository::mock::MockRepository;
    use chrono::NaiveDate;

    fn owner() -> OwnerId {
        OwnerId::new("studio@example.com").unwrap()
    }

    fn client(id: &str, last_name: &str) -> Client {
        Client::new(
            RecordId::new(id).unwrap(),
            owner(),
            "Ana".to_string(),
            PersonName::new(last_name).unwrap(),
            None,
            None,
            None,
        )
    }

    fn connected(mock: MockRepository) -> Arc<Store> {
        Store::new(Some(Arc::new(mock)))
    }

    fn empty_lists(mock: &mut MockRepository) {
        mock.expect_subscribe().returning(|_| ());
        mock.expect_list().returning(|_, _| Ok(Vec::new()));
    }

    #[test]
    fn demo_mode_starts_from_demo_snapshot_and_keeps_local_writes() {
        let store = Store::new(None);
        let owner = owner();

        assert_eq!(store.snapshot(&owner).unwrap(), Snapshot::demo());

        store.create(&owner, client("C-002", "Ruiz")).unwrap();
        store.refresh(&owner).unwrap();

        let snapshot = store.snapshot(&owner).unwrap();
        assert_eq!(snapshot.clients.len(), 2);
        assert_eq!(snapshot.clients[0].id.as_str(), "C-002");
    }

    #[test]
    fn demo_mode_delete_cascades_locally() {
        let store = Store::new(None);
        let owner = owner();

        store
            .remove::<Client>(&owner, &RecordId::new("C-001").unwrap())
            .unwrap();

        let snapshot = store.snapshot(&owner).unwrap();
        assert!(snapshot.clients.is_empty());
        assert!(snapshot.events.is_empty());
        assert!(snapshot.payments.is_empty());
    }

    #[test]
    fn load_fetches_every_collection() {
        let mut mock = MockRepository::new();
        mock.expect_subscribe().times(1).returning(|_| ());
        mock.expect_list()
            .times(7)
            .returning(|_, collection| match collection {
                Collection::Clients => Ok(vec![client("C-001", "Hernandez").into_row()]),
                _ => Ok(Vec::new()),
            });

        let store = connected(mock);
        let snapshot = store.snapshot(&owner()).unwrap();
        store.snapshot(&owner()).unwrap();

        assert_eq!(snapshot.clients.len(), 1);
        assert!(snapshot.events.is_empty());
    }

    #[test]
    fn failed_load_leaves_nothing_cached() {
        let mut mock = MockRepository::new();
        mock.expect_subscribe().returning(|_| ());
        mock.expect_list()
            .returning(|_, _| Err(RepositoryError::ConnectionError("offline".to_string())));

        let store = connected(mock);
        assert!(store.snapshot(&owner()).is_err());
        assert!(!store.is_loaded(&owner()));
    }

    #[test]
    fn create_prepends_and_keeps_the_stored_row() {
        let mut mock = MockRepository::new();
        empty_lists(&mut mock);
        mock.expect_insert()
            .times(2)
            .returning(|_, row| Ok(row.clone()));

        let store = connected(mock);
        store.create(&owner(), client("C-001", "Hernandez")).unwrap();
        store.create(&owner(), client("C-002", "Ruiz")).unwrap();

        let ids: Vec<_> = store
            .snapshot(&owner())
            .unwrap()
            .clients
            .iter()
            .map(|c| c.id.to_string())
            .collect();
        assert_eq!(ids, vec!["C-002", "C-001"]);
    }

    #[test]
    fn rejected_create_is_reverted() {
        let mut mock = MockRepository::new();
        empty_lists(&mut mock);
        mock.expect_insert().returning(|_, _| {
            Err(RepositoryError::ConstraintViolation(
                "Unique constraint violation: clients.id".to_string(),
            ))
        });

        let store = connected(mock);
        let err = store
            .create(&owner(), client("C-001", "Hernandez"))
            .unwrap_err();

        assert!(err.to_string().contains("clients.id"));
        assert!(store.snapshot(&owner()).unwrap().clients.is_empty());
    }

    #[test]
    fn rejected_update_restores_previous_record() {
        let mut mock = MockRepository::new();
        mock.expect_subscribe().returning(|_| ());
        mock.expect_list().returning(|_, collection| match collection {
            Collection::Payments => Ok(Snapshot::demo().rows(Collection::Payments)),
            _ => Ok(Vec::new()),
        });
        mock.expect_update()
            .returning(|_, _| Err(RepositoryError::DatabaseError("read only".to_string())));

        let store = connected(mock);
        let today = NaiveDate::from_ymd_opt(2026, 1, 20).unwrap();
        let result = store.update_with::<Payment>(
            &owner(),
            &RecordId::new("P-001").unwrap(),
            |payment| payment.mark_paid(today),
        );

        assert!(result.is_err());
        let snapshot = store.snapshot(&owner()).unwrap();
        assert!(
            snapshot
                .payments
                .iter()
                .all(|p| p.status == PaymentStatus::Pending)
        );
    }

    #[test]
    fn rejected_delete_restores_position() {
        let mut mock = MockRepository::new();
        mock.expect_subscribe().returning(|_| ());
        mock.expect_list().returning(|_, collection| match collection {
            Collection::Payments => Ok(Snapshot::demo().rows(Collection::Payments)),
            _ => Ok(Vec::new()),
        });
        mock.expect_delete()
            .returning(|_, _, _| Err(RepositoryError::ConnectionError("offline".to_string())));

        let store = connected(mock);
        let before = store.snapshot(&owner()).unwrap().payments;
        assert!(
            store
                .remove::<Payment>(&owner(), &RecordId::new("P-002").unwrap())
                .is_err()
        );

        assert_eq!(store.snapshot(&owner()).unwrap().payments, before);
    }

    #[test]
    fn change_notification_refetches_one_collection() {
        use std::sync::Mutex;
        use std::sync::atomic::{AtomicBool, Ordering};

        use crate::domain::task::Task;
        use crate::repository::{ChangeKind, ChangeListener};

        let listener: Arc<Mutex<Option<ChangeListener>>> = Arc::new(Mutex::new(None));
        let loaded = Arc::new(AtomicBool::new(false));

        let mut mock = MockRepository::new();
        let slot = Arc::clone(&listener);
        mock.expect_subscribe()
            .times(1)
            .returning(move |l| *slot.lock().unwrap() = Some(l));
        let flag = Arc::clone(&loaded);
        mock.expect_list().returning(move |_, collection| {
            match (collection, flag.load(Ordering::SeqCst)) {
                (Collection::Tasks, true) => Ok(Snapshot::demo().rows(Collection::Tasks)),
                (Collection::Clients, true) => panic!("clients must not be refetched"),
                _ => Ok(Vec::new()),
            }
        });

        let store = connected(mock);
        store.load(&owner()).unwrap();
        loaded.store(true, Ordering::SeqCst);

        let notify = listener.lock().unwrap();
        let notify = notify.as_ref().unwrap();
        notify(&ChangeEvent::new(
            OwnerId::new("someone-else").unwrap(),
            Collection::Clients,
            ChangeKind::Insert,
        ));
        notify(&ChangeEvent::new(owner(), Collection::Tasks, ChangeKind::Insert));

        let snapshot = store.snapshot(&owner()).unwrap();
        assert_eq!(snapshot.tasks, Snapshot::demo().tasks);
        assert!(snapshot.find::<Task>(&RecordId::new("T-001").unwrap()).is_some());
        assert!(snapshot.clients.is_empty());
    }

    #[test]
    fn removing_unknown_record_is_not_found() {
        let store = Store::new(None);
        let result = store.remove::<Client>(&owner(), &RecordId::new("C-404").unwrap());
        assert!(matches!(result, Err(RepositoryError::NotFound)));
    }

    #[test]
    fn import_replaces_local_state_only() {
        let mut mock = MockRepository::new();
        empty_lists(&mut mock);
        mock.expect_insert().times(0);
        mock.expect_update().times(0);
        mock.expect_delete().times(0);

        let store = connected(mock);
        store.load(&owner()).unwrap();
        store.import(&owner(), Snapshot::demo());

        assert_eq!(store.snapshot(&owner()).unwrap(), Snapshot::demo());
    }
}
