use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use studio_desk::domain::snapshot::{Collection, Record, Row};
use studio_desk::repository::errors::RepositoryError;
use studio_desk::repository::{Backend, ChangeKind};

mod common;

use common::{client, event, owner, task};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_insert_stamps_owner_and_lists_newest_first() {
    let test_db = common::TestDb::new("test_insert_stamps_owner.db");
    let repo = test_db.backend();
    let studio = owner("studio@example.com");

    let stored = repo.insert(&studio, &client("c-1", "Lopez").into_row()).unwrap();
    repo.insert(&studio, &client("c-2", "Garcia").into_row()).unwrap();

    match stored {
        Row::Client(stored) => assert_eq!(stored.owner, studio),
        other => panic!("unexpected row {other:?}"),
    }

    let ids: Vec<_> = repo
        .list(&studio, Collection::Clients)
        .unwrap()
        .iter()
        .map(|row| row.id().to_string())
        .collect();
    assert_eq!(ids, vec!["c-2", "c-1"]);
}

#[test]
fn test_rows_are_scoped_to_owner() {
    let test_db = common::TestDb::new("test_rows_are_scoped_to_owner.db");
    let repo = test_db.backend();
    let studio = owner("studio@example.com");
    let stranger = owner("stranger@example.com");

    repo.insert(&studio, &client("c-1", "Lopez").into_row()).unwrap();

    assert!(repo.list(&stranger, Collection::Clients).unwrap().is_empty());

    let mut renamed = client("c-1", "Hijacked");
    renamed.first_name = "Mallory".to_string();
    assert!(matches!(
        repo.update(&stranger, &renamed.into_row()),
        Err(RepositoryError::NotFound)
    ));
    assert!(matches!(
        repo.delete(&stranger, Collection::Clients, &client("c-1", "x").id),
        Err(RepositoryError::NotFound)
    ));
    assert_eq!(repo.list(&studio, Collection::Clients).unwrap().len(), 1);
}

#[test]
fn test_update_overwrites_fields() {
    let test_db = common::TestDb::new("test_update_overwrites_fields.db");
    let repo = test_db.backend();
    let studio = owner("studio@example.com");

    repo.insert(&studio, &client("c-1", "Lopez").into_row()).unwrap();
    repo.insert(&studio, &event("e-1", "c-1", date(2026, 6, 1)).into_row())
        .unwrap();

    let mut moved = event("e-1", "c-1", date(2026, 7, 15));
    moved.venue = "Beach".to_string();
    repo.update(&studio, &moved.into_row()).unwrap();

    let rows = repo.list(&studio, Collection::Events).unwrap();
    match &rows[0] {
        Row::Event(stored) => {
            assert_eq!(stored.date, date(2026, 7, 15));
            assert_eq!(stored.venue, "Beach");
        }
        other => panic!("unexpected row {other:?}"),
    }
}

#[test]
fn test_deleting_client_cascades_and_notifies() {
    let test_db = common::TestDb::new("test_deleting_client_cascades.db");
    let repo = test_db.backend();
    let studio = owner("studio@example.com");

    repo.insert(&studio, &client("c-1", "Lopez").into_row()).unwrap();
    repo.insert(&studio, &event("e-1", "c-1", date(2026, 6, 1)).into_row())
        .unwrap();
    repo.insert(&studio, &task("t-1", Some("e-1")).into_row())
        .unwrap();

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    repo.subscribe(Box::new(move |change| {
        sink.lock().unwrap().push((change.collection, change.kind));
    }));

    repo.delete(&studio, Collection::Clients, &client("c-1", "x").id)
        .unwrap();

    assert!(repo.list(&studio, Collection::Events).unwrap().is_empty());
    match &repo.list(&studio, Collection::Tasks).unwrap()[..] {
        [Row::Task(stored)] => assert_eq!(stored.event_id, None),
        other => panic!("unexpected rows {other:?}"),
    }
    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), Collection::ALL.len());
    assert!(seen.contains(&(Collection::Events, ChangeKind::Delete)));
}

#[test]
fn test_failed_write_is_not_published() {
    let test_db = common::TestDb::new("test_failed_write_is_not_published.db");
    let repo = test_db.backend();
    let studio = owner("studio@example.com");

    let seen = Arc::new(Mutex::new(0));
    let sink = Arc::clone(&seen);
    repo.subscribe(Box::new(move |_| *sink.lock().unwrap() += 1));

    // Unknown client: the foreign key rejects the event.
    let result = repo.insert(&studio, &event("e-1", "missing", date(2026, 6, 1)).into_row());

    assert!(result.is_err());
    assert_eq!(*seen.lock().unwrap(), 0);
}

#[test]
fn test_same_id_is_allowed_for_different_owners() {
    let test_db = common::TestDb::new("test_same_id_different_owners.db");
    let repo = test_db.backend();
    let studio = owner("studio@example.com");
    let other = owner("other@example.com");

    repo.insert(&studio, &client("c-1", "Lopez").into_row()).unwrap();
    repo.insert(&other, &client("c-1", "Garcia").into_row()).unwrap();

    repo.delete(&other, Collection::Clients, &client("c-1", "x").id)
        .unwrap();

    match &repo.list(&studio, Collection::Clients).unwrap()[..] {
        [Row::Client(stored)] => assert_eq!(stored.last_name.as_str(), "Lopez"),
        other => panic!("unexpected rows {other:?}"),
    }
}

#[test]
fn test_references_cannot_cross_owners() {
    let test_db = common::TestDb::new("test_references_cannot_cross_owners.db");
    let repo = test_db.backend();
    let studio = owner("studio@example.com");
    let stranger = owner("stranger@example.com");

    repo.insert(&studio, &client("c-1", "Lopez").into_row()).unwrap();

    let foreign = repo.insert(&stranger, &event("e-1", "c-1", date(2026, 6, 1)).into_row());
    assert!(foreign.is_err());

    repo.insert(&stranger, &client("c-9", "Garcia").into_row())
        .unwrap();
    repo.insert(&stranger, &event("e-1", "c-9", date(2026, 6, 1)).into_row())
        .unwrap();
    repo.insert(&stranger, &task("t-1", Some("e-1")).into_row())
        .unwrap();

    repo.delete(&studio, Collection::Clients, &client("c-1", "x").id)
        .unwrap();

    assert_eq!(repo.list(&stranger, Collection::Events).unwrap().len(), 1);
    match &repo.list(&stranger, Collection::Tasks).unwrap()[..] {
        [Row::Task(stored)] => assert_eq!(
            stored.event_id.as_ref().map(|id| id.to_string()),
            Some("e-1".to_string())
        ),
        other => panic!("unexpected rows {other:?}"),
    }
}
