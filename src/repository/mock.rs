//! Mock backend for isolating the store and services in tests.

use mockall::mock;

use crate::domain::snapshot::{Collection, Row};
use crate::domain::types::{OwnerId, RecordId};
use crate::repository::errors::RepositoryResult;
use crate::repository::{Backend, ChangeListener};

mock! {
    pub Repository {}

    impl Backend for Repository {
        fn list(&self, owner: &OwnerId, collection: Collection) -> RepositoryResult<Vec<Row>>;
        fn insert(&self, owner: &OwnerId, row: &Row) -> RepositoryResult<Row>;
        fn update(&self, owner: &OwnerId, row: &Row) -> RepositoryResult<Row>;
        fn delete(
            &self,
            owner: &OwnerId,
            collection: Collection,
            id: &RecordId,
        ) -> RepositoryResult<()>;
        fn subscribe(&self, listener: ChangeListener);
    }
}
