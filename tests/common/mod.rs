#![allow(dead_code)]

use std::sync::Arc;

use chrono::NaiveDate;
use studio_desk::db::{DbPool, establish_connection_pool, run_migrations};
use studio_desk::domain::client::Client;
use studio_desk::domain::event::Event;
use studio_desk::domain::task::Task;
use studio_desk::domain::types::{
    Amount, ContactEmail, Currency, EventStatus, OwnerId, PersonName, RecordId, TaskStatus,
};
use studio_desk::repository::{Backend, DieselRepository};
use tempfile::TempDir;

/// Migrated SQLite file living in a temporary directory for one test.
pub struct TestDb {
    _dir: TempDir,
    pool: DbPool,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(name);
        let pool = establish_connection_pool(path.to_str().expect("utf-8 path"))
            .expect("create pool");
        run_migrations(&pool).expect("run migrations");
        Self { _dir: dir, pool }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn backend(&self) -> Arc<DieselRepository> {
        Arc::new(DieselRepository::new(self.pool()))
    }

    pub fn dyn_backend(&self) -> Arc<dyn Backend> {
        self.backend()
    }
}

pub fn owner(email: &str) -> OwnerId {
    OwnerId::new(email).expect("valid owner")
}

pub fn client(id: &str, last_name: &str) -> Client {
    Client::new(
        RecordId::new(id).expect("valid id"),
        owner("placeholder@example.com"),
        "Ana".to_string(),
        PersonName::new(last_name).expect("valid name"),
        Some(ContactEmail::new("ana@example.com").expect("valid email")),
        None,
        None,
    )
}

pub fn event(id: &str, client_id: &str, date: NaiveDate) -> Event {
    Event {
        id: RecordId::new(id).expect("valid id"),
        owner: owner("placeholder@example.com"),
        client_id: RecordId::new(client_id).expect("valid id"),
        date,
        venue: "Hacienda".to_string(),
        package: "Full day".to_string(),
        status: EventStatus::Signed,
        currency: Currency::Usd,
        deposit_amount: Amount::new(500.0).expect("valid amount"),
        deposit_due: None,
        balance_amount: Amount::new(1500.0).expect("valid amount"),
        balance_due: None,
    }
}

pub fn task(id: &str, event_id: Option<&str>) -> Task {
    Task {
        id: RecordId::new(id).expect("valid id"),
        owner: owner("placeholder@example.com"),
        event_id: event_id.map(|id| RecordId::new(id).expect("valid id")),
        title: "Back up cards".to_string(),
        assignee: "Luis".to_string(),
        due_date: None,
        status: TaskStatus::Todo,
    }
}
