//! Data transfer objects shaping what the templates render.

use serde::{Deserialize, Serialize};

use crate::domain::snapshot::Snapshot;

pub mod accounting;
pub mod dashboard;

/// Query parameters accepted by every list screen.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Optional search string entered by the user.
    pub q: Option<String>,
}

/// Entry of a `<select>` referencing another record.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SelectOption {
    pub id: String,
    pub label: String,
}

impl SelectOption {
    /// Clients, by full name.
    pub fn clients(snapshot: &Snapshot) -> Vec<Self> {
        snapshot
            .clients
            .iter()
            .map(|client| Self {
                id: client.id.to_string(),
                label: client.full_name(),
            })
            .collect()
    }

    /// Events, labelled with client name and date.
    pub fn events(snapshot: &Snapshot) -> Vec<Self> {
        snapshot
            .events
            .iter()
            .map(|event| Self {
                id: event.id.to_string(),
                label: snapshot.event_label(&event.id),
            })
            .collect()
    }
}

/// A record together with the human label of the event it belongs to.
#[derive(Debug, Clone, Serialize)]
pub struct Labeled<T> {
    #[serde(flatten)]
    pub record: T,
    pub event_label: String,
}

/// Data required to render one of the per-collection list screens.
#[derive(Debug)]
pub struct ListPageData<T> {
    pub items: Vec<T>,
    /// Choices for the reference field of the add form.
    pub options: Vec<SelectOption>,
    /// Search query echoed back to the template when present.
    pub search_query: Option<String>,
}

/// An event with its client's name resolved.
#[derive(Debug, Clone, Serialize)]
pub struct EventRow {
    #[serde(flatten)]
    pub event: crate::domain::event::Event,
    pub client_name: String,
}
