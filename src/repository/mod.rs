//! Access to the hosted tables.
//!
//! [`Backend`] is the seam the [`Store`](crate::store::Store) talks through;
//! [`DieselRepository`] implements it over SQLite. Every query is scoped to
//! the calling owner, so one principal can never observe or touch another
//! principal's rows.

use std::sync::{Arc, PoisonError, RwLock};

use diesel::sqlite::SqliteConnection;

use crate::db::{DbConnection, DbPool};
use crate::domain::snapshot::{Collection, Row};
use crate::domain::types::{OwnerId, RecordId};
use crate::repository::errors::RepositoryResult;

pub mod client;
pub mod deliverable;
pub mod errors;
pub mod event;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod payment;
pub mod special_request;
pub mod task;
pub mod vendor;

/// Kind of write that produced a [`ChangeEvent`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

/// Notification that a collection of one owner changed remotely.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChangeEvent {
    pub owner: OwnerId,
    pub collection: Collection,
    pub kind: ChangeKind,
}

impl ChangeEvent {
    pub fn new(owner: OwnerId, collection: Collection, kind: ChangeKind) -> Self {
        Self {
            owner,
            collection,
            kind,
        }
    }
}

pub type ChangeListener = Box<dyn Fn(&ChangeEvent) + Send + Sync>;

/// Fan-out of change events to every subscriber, across all collections.
#[derive(Default)]
pub struct ChangeFeed {
    listeners: RwLock<Vec<ChangeListener>>,
}

impl ChangeFeed {
    pub fn subscribe(&self, listener: ChangeListener) {
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(listener);
    }

    pub fn publish(&self, event: &ChangeEvent) {
        let listeners = self.listeners.read().unwrap_or_else(PoisonError::into_inner);
        log::debug!(
            "{:?} on {} for {} ({} listeners)",
            event.kind,
            event.collection,
            event.owner,
            listeners.len()
        );
        for listener in listeners.iter() {
            listener(event);
        }
    }
}

/// Collections whose contents change when a row of `collection` is deleted,
/// following the `ON DELETE` actions of the schema.
pub fn affected_by_delete(collection: Collection) -> &'static [Collection] {
    match collection {
        Collection::Clients => &Collection::ALL,
        Collection::Events => &[
            Collection::Events,
            Collection::SpecialRequests,
            Collection::Payments,
            Collection::Tasks,
            Collection::Deliverables,
            Collection::Vendors,
        ],
        Collection::SpecialRequests => &[Collection::SpecialRequests],
        Collection::Payments => &[Collection::Payments],
        Collection::Tasks => &[Collection::Tasks],
        Collection::Deliverables => &[Collection::Deliverables],
        Collection::Vendors => &[Collection::Vendors],
    }
}

/// Remote data client. All operations act on behalf of `owner`.
pub trait Backend: Send + Sync {
    /// Rows of one collection, most recently inserted first.
    fn list(&self, owner: &OwnerId, collection: Collection) -> RepositoryResult<Vec<Row>>;
    /// Stores a new row; the owner column is always set to `owner`.
    fn insert(&self, owner: &OwnerId, row: &Row) -> RepositoryResult<Row>;
    /// Overwrites the row with the same id.
    fn update(&self, owner: &OwnerId, row: &Row) -> RepositoryResult<Row>;
    fn delete(&self, owner: &OwnerId, collection: Collection, id: &RecordId)
    -> RepositoryResult<()>;
    /// Registers a listener called after every successful write.
    fn subscribe(&self, listener: ChangeListener);
}

/// Diesel-backed [`Backend`].
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
    changes: Arc<ChangeFeed>,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            changes: Arc::new(ChangeFeed::default()),
        }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }

    fn notify(&self, owner: &OwnerId, collection: Collection, kind: ChangeKind) {
        self.changes
            .publish(&ChangeEvent::new(owner.clone(), collection, kind));
    }
}

fn list_rows(
    conn: &mut SqliteConnection,
    owner: &OwnerId,
    collection: Collection,
) -> RepositoryResult<Vec<Row>> {
    match collection {
        Collection::Clients => client::list(conn, owner),
        Collection::Events => event::list(conn, owner),
        Collection::SpecialRequests => special_request::list(conn, owner),
        Collection::Payments => payment::list(conn, owner),
        Collection::Tasks => task::list(conn, owner),
        Collection::Deliverables => deliverable::list(conn, owner),
        Collection::Vendors => vendor::list(conn, owner),
    }
}

impl Backend for DieselRepository {
    fn list(&self, owner: &OwnerId, collection: Collection) -> RepositoryResult<Vec<Row>> {
        let mut conn = self.conn()?;
        list_rows(&mut conn, owner, collection)
    }

    fn insert(&self, owner: &OwnerId, row: &Row) -> RepositoryResult<Row> {
        let mut conn = self.conn()?;
        let stored = match row {
            Row::Client(record) => client::insert(&mut conn, owner, record)?,
            Row::Event(record) => event::insert(&mut conn, owner, record)?,
            Row::SpecialRequest(record) => special_request::insert(&mut conn, owner, record)?,
            Row::Payment(record) => payment::insert(&mut conn, owner, record)?,
            Row::Task(record) => task::insert(&mut conn, owner, record)?,
            Row::Deliverable(record) => deliverable::insert(&mut conn, owner, record)?,
            Row::Vendor(record) => vendor::insert(&mut conn, owner, record)?,
        };
        drop(conn);

        self.notify(owner, row.collection(), ChangeKind::Insert);
        Ok(stored)
    }

    fn update(&self, owner: &OwnerId, row: &Row) -> RepositoryResult<Row> {
        let mut conn = self.conn()?;
        let stored = match row {
            Row::Client(record) => client::update(&mut conn, owner, record)?,
            Row::Event(record) => event::update(&mut conn, owner, record)?,
            Row::SpecialRequest(record) => special_request::update(&mut conn, owner, record)?,
            Row::Payment(record) => payment::update(&mut conn, owner, record)?,
            Row::Task(record) => task::update(&mut conn, owner, record)?,
            Row::Deliverable(record) => deliverable::update(&mut conn, owner, record)?,
            Row::Vendor(record) => vendor::update(&mut conn, owner, record)?,
        };
        drop(conn);

        self.notify(owner, row.collection(), ChangeKind::Update);
        Ok(stored)
    }

    fn delete(
        &self,
        owner: &OwnerId,
        collection: Collection,
        id: &RecordId,
    ) -> RepositoryResult<()> {
        let mut conn = self.conn()?;
        match collection {
            Collection::Clients => client::delete(&mut conn, owner, id)?,
            Collection::Events => event::delete(&mut conn, owner, id)?,
            Collection::SpecialRequests => special_request::delete(&mut conn, owner, id)?,
            Collection::Payments => payment::delete(&mut conn, owner, id)?,
            Collection::Tasks => task::delete(&mut conn, owner, id)?,
            Collection::Deliverables => deliverable::delete(&mut conn, owner, id)?,
            Collection::Vendors => vendor::delete(&mut conn, owner, id)?,
        }
        drop(conn);

        for affected in affected_by_delete(collection) {
            self.notify(owner, *affected, ChangeKind::Delete);
        }
        Ok(())
    }

    fn subscribe(&self, listener: ChangeListener) {
        self.changes.subscribe(listener);
    }
}
