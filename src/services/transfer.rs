//! JSON import and export of the whole snapshot.

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::snapshot::Snapshot;
use crate::models::auth::AuthenticatedUser;
use crate::services::{ServiceResult, owner_of};
use crate::store::Store;

#[derive(Debug, Error)]
pub enum TransferError {
    /// The document does not have the snapshot shape. Carries the position
    /// of the problem and the text of the offending line.
    #[error("invalid import file (line {line}, column {column}): {message}; near `{excerpt}`")]
    Invalid {
        line: usize,
        column: usize,
        message: String,
        excerpt: String,
    },

    #[error("import file is empty")]
    Empty,

    #[error("failed to read import file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize snapshot: {0}")]
    Serialize(serde_json::Error),
}

/// Pretty-printed JSON document of the snapshot.
pub fn export_snapshot(snapshot: &Snapshot) -> Result<String, TransferError> {
    serde_json::to_string_pretty(snapshot).map_err(TransferError::Serialize)
}

/// Parses a snapshot document, rejecting unknown or missing fields and
/// invalid values.
pub fn parse_snapshot(bytes: &[u8]) -> Result<Snapshot, TransferError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(TransferError::Empty);
    }
    serde_json::from_slice(bytes).map_err(|err| invalid(bytes, &err))
}

fn invalid(bytes: &[u8], err: &serde_json::Error) -> TransferError {
    let excerpt = String::from_utf8_lossy(bytes)
        .lines()
        .nth(err.line().saturating_sub(1))
        .map(|line| line.trim().chars().take(80).collect())
        .unwrap_or_default();
    // serde_json appends the position to its message; it is reported separately.
    let message = err.to_string();
    let message = message
        .rsplit_once(" at line ")
        .map_or(message.as_str(), |(head, _)| head)
        .to_string();

    TransferError::Invalid {
        line: err.line(),
        column: err.column(),
        message,
        excerpt,
    }
}

/// File name offered for a download made on `today`.
pub fn export_file_name(today: NaiveDate) -> String {
    format!("studio-desk-{}.json", today.format("%Y-%m-%d"))
}

pub fn export_data(store: &Store, user: &AuthenticatedUser) -> ServiceResult<String> {
    let owner = owner_of(user)?;
    let snapshot = store.snapshot(&owner)?;
    Ok(export_snapshot(&snapshot)?)
}

/// Replaces the local snapshot with the document's contents. Nothing is
/// written to the backend; on error the current state is left untouched.
pub fn import_data(store: &Store, user: &AuthenticatedUser, bytes: &[u8]) -> ServiceResult<Snapshot> {
    let owner = owner_of(user)?;
    let snapshot = parse_snapshot(bytes).map_err(|err| {
        log::warn!("Rejected import: {err}");
        err
    })?;
    store.import(&owner, snapshot.clone());
    Ok(snapshot)
}

/// Drops local edits and reloads every collection from the backend.
pub fn refresh_data(store: &Store, user: &AuthenticatedUser) -> ServiceResult<()> {
    let owner = owner_of(user)?;
    store.refresh(&owner)?;
    log::info!("Reloaded data for {owner}");
    Ok(())
}
