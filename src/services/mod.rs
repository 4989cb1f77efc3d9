//! Business operations behind the HTTP routes.
//!
//! Services take the [`Store`](crate::store::Store) and the signed-in user,
//! validate input and return page data or a [`ServiceError`].

use std::cmp::Ordering;

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::types::OwnerId;
use crate::forms::FormError;
use crate::models::auth::AuthenticatedUser;
use crate::repository::errors::RepositoryError;
use crate::services::transfer::TransferError;

pub mod accounting;
pub mod auth;
pub mod clients;
pub mod dashboard;
pub mod deliverables;
pub mod events;
pub mod payments;
pub mod special_requests;
pub mod tasks;
pub mod transfer;
pub mod vendors;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("record not found")]
    NotFound,

    #[error("{0}")]
    Form(String),

    #[error("type constraint violation: {0}")]
    TypeConstraint(String),

    /// Failure reported by the backend; the message is shown to the user.
    #[error("{0}")]
    Repository(RepositoryError),

    #[error(transparent)]
    Import(#[from] TransferError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            other => ServiceError::Repository(other),
        }
    }
}

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        ServiceError::Form(err.to_string())
    }
}

/// Owner id of the signed-in user.
pub(crate) fn owner_of(user: &AuthenticatedUser) -> ServiceResult<OwnerId> {
    user.owner().map_err(|_| ServiceError::Unauthorized)
}

/// Trimmed, non-empty search term.
pub(crate) fn normalize_search(search: Option<String>) -> Option<String> {
    search
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Case-insensitive substring match of `term` against any of `fields`.
/// No term matches everything.
pub(crate) fn matches_search(term: Option<&str>, fields: &[&str]) -> bool {
    let Some(term) = term else {
        return true;
    };
    let term = term.to_lowercase();
    fields
        .iter()
        .any(|field| field.to_lowercase().contains(&term))
}

/// Ascending by date with undated records last.
pub(crate) fn by_optional_date(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
