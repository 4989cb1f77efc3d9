//! The complete in-memory copy of all seven collections.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::client::Client;
use crate::domain::deliverable::Deliverable;
use crate::domain::event::Event;
use crate::domain::payment::Payment;
use crate::domain::special_request::SpecialRequest;
use crate::domain::task::Task;
use crate::domain::types::{
    Amount, ContactEmail, Currency, DeliveryLink, EventStatus, OwnerId, PaymentStatus,
    PersonName, Priority, RecordId, RequestStatus, TaskStatus, TypeConstraintError,
};
use crate::domain::vendor::Vendor;

/// Named collections (backend tables).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Clients,
    Events,
    SpecialRequests,
    Payments,
    Tasks,
    Deliverables,
    Vendors,
}

impl Collection {
    pub const ALL: [Collection; 7] = [
        Collection::Clients,
        Collection::Events,
        Collection::SpecialRequests,
        Collection::Payments,
        Collection::Tasks,
        Collection::Deliverables,
        Collection::Vendors,
    ];

    /// Table name, also the key of the collection in exported files.
    pub const fn as_str(self) -> &'static str {
        match self {
            Collection::Clients => "clients",
            Collection::Events => "events",
            Collection::SpecialRequests => "special_requests",
            Collection::Payments => "payments",
            Collection::Tasks => "tasks",
            Collection::Deliverables => "deliverables",
            Collection::Vendors => "vendors",
        }
    }
}

impl Display for Collection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Collection {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Collection::ALL
            .into_iter()
            .find(|collection| collection.as_str() == s)
            .ok_or_else(|| TypeConstraintError::InvalidValue(format!("unknown collection `{s}`")))
    }
}

/// One record of any collection.
#[derive(Clone, Debug, PartialEq)]
pub enum Row {
    Client(Client),
    Event(Event),
    SpecialRequest(SpecialRequest),
    Payment(Payment),
    Task(Task),
    Deliverable(Deliverable),
    Vendor(Vendor),
}

impl Row {
    pub fn collection(&self) -> Collection {
        match self {
            Row::Client(_) => Collection::Clients,
            Row::Event(_) => Collection::Events,
            Row::SpecialRequest(_) => Collection::SpecialRequests,
            Row::Payment(_) => Collection::Payments,
            Row::Task(_) => Collection::Tasks,
            Row::Deliverable(_) => Collection::Deliverables,
            Row::Vendor(_) => Collection::Vendors,
        }
    }

    pub fn id(&self) -> &RecordId {
        match self {
            Row::Client(r) => &r.id,
            Row::Event(r) => &r.id,
            Row::SpecialRequest(r) => &r.id,
            Row::Payment(r) => &r.id,
            Row::Task(r) => &r.id,
            Row::Deliverable(r) => &r.id,
            Row::Vendor(r) => &r.id,
        }
    }
}

/// Ties a record type to its collection and its list inside a [`Snapshot`].
pub trait Record: Clone + Send + Sync + 'static {
    const COLLECTION: Collection;

    fn id(&self) -> &RecordId;
    fn set_owner(&mut self, owner: OwnerId);
    fn into_row(self) -> Row;
    fn from_row(row: Row) -> Option<Self>;
    fn list(snapshot: &Snapshot) -> &Vec<Self>;
    fn list_mut(snapshot: &mut Snapshot) -> &mut Vec<Self>;
}

macro_rules! impl_record {
    ($ty:ident, $collection:ident, $field:ident) => {
        impl Record for $ty {
            const COLLECTION: Collection = Collection::$collection;

            fn id(&self) -> &RecordId {
                &self.id
            }

            fn set_owner(&mut self, owner: OwnerId) {
                self.owner = owner;
            }

            fn into_row(self) -> Row {
                Row::$ty(self)
            }

            fn from_row(row: Row) -> Option<Self> {
                match row {
                    Row::$ty(record) => Some(record),
                    _ => None,
                }
            }

            fn list(snapshot: &Snapshot) -> &Vec<Self> {
                &snapshot.$field
            }

            fn list_mut(snapshot: &mut Snapshot) -> &mut Vec<Self> {
                &mut snapshot.$field
            }
        }
    };
}

impl_record!(Client, Clients, clients);
impl_record!(Event, Events, events);
impl_record!(SpecialRequest, SpecialRequests, special_requests);
impl_record!(Payment, Payments, payments);
impl_record!(Task, Tasks, tasks);
impl_record!(Deliverable, Deliverables, deliverables);
impl_record!(Vendor, Vendors, vendors);

/// One ordered list per collection, newest first. This is also the exact
/// shape of the import/export document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Snapshot {
    pub clients: Vec<Client>,
    pub events: Vec<Event>,
    pub special_requests: Vec<SpecialRequest>,
    pub payments: Vec<Payment>,
    pub tasks: Vec<Task>,
    pub deliverables: Vec<Deliverable>,
    pub vendors: Vec<Vendor>,
}

fn typed<T: Record>(rows: Vec<Row>) -> Vec<T> {
    rows.into_iter().filter_map(T::from_row).collect()
}

fn untyped<T: Record>(records: &[T]) -> Vec<Row> {
    records.iter().cloned().map(Record::into_row).collect()
}

impl Snapshot {
    /// Replaces one collection with freshly fetched rows. Rows belonging to
    /// another collection are ignored.
    pub fn replace_collection(&mut self, collection: Collection, rows: Vec<Row>) {
        match collection {
            Collection::Clients => self.clients = typed(rows),
            Collection::Events => self.events = typed(rows),
            Collection::SpecialRequests => self.special_requests = typed(rows),
            Collection::Payments => self.payments = typed(rows),
            Collection::Tasks => self.tasks = typed(rows),
            Collection::Deliverables => self.deliverables = typed(rows),
            Collection::Vendors => self.vendors = typed(rows),
        }
    }

    pub fn rows(&self, collection: Collection) -> Vec<Row> {
        match collection {
            Collection::Clients => untyped(&self.clients),
            Collection::Events => untyped(&self.events),
            Collection::SpecialRequests => untyped(&self.special_requests),
            Collection::Payments => untyped(&self.payments),
            Collection::Tasks => untyped(&self.tasks),
            Collection::Deliverables => untyped(&self.deliverables),
            Collection::Vendors => untyped(&self.vendors),
        }
    }

    pub fn len(&self, collection: Collection) -> usize {
        match collection {
            Collection::Clients => self.clients.len(),
            Collection::Events => self.events.len(),
            Collection::SpecialRequests => self.special_requests.len(),
            Collection::Payments => self.payments.len(),
            Collection::Tasks => self.tasks.len(),
            Collection::Deliverables => self.deliverables.len(),
            Collection::Vendors => self.vendors.len(),
        }
    }

    pub fn find<T: Record>(&self, id: &RecordId) -> Option<&T> {
        T::list(self).iter().find(|record| record.id() == id)
    }

    pub fn client(&self, id: &RecordId) -> Option<&Client> {
        self.find::<Client>(id)
    }

    pub fn event(&self, id: &RecordId) -> Option<&Event> {
        self.find::<Event>(id)
    }

    /// Human label for an event: "<client name> · <date>", falling back to
    /// the raw id for dangling references.
    pub fn event_label(&self, id: &RecordId) -> String {
        match self.event(id) {
            Some(event) => {
                let client = self
                    .client(&event.client_id)
                    .map(Client::full_name)
                    .unwrap_or_else(|| event.client_id.to_string());
                format!("{client} · {}", event.date)
            }
            None => id.to_string(),
        }
    }

    /// Drops the records that depend on a deleted row, following the same
    /// `ON DELETE` rules as the database: children of an event are removed,
    /// tasks are detached.
    pub fn remove_dependents(&mut self, collection: Collection, id: &RecordId) {
        let event_ids: Vec<RecordId> = match collection {
            Collection::Clients => {
                let ids = self
                    .events
                    .iter()
                    .filter(|event| &event.client_id == id)
                    .map(|event| event.id.clone())
                    .collect();
                self.events.retain(|event| &event.client_id != id);
                ids
            }
            Collection::Events => vec![id.clone()],
            _ => return,
        };

        let orphaned = |event_id: &RecordId| event_ids.contains(event_id);
        self.special_requests.retain(|r| !orphaned(&r.event_id));
        self.payments.retain(|p| !orphaned(&p.event_id));
        self.deliverables.retain(|d| !orphaned(&d.event_id));
        self.vendors.retain(|v| !orphaned(&v.event_id));
        for task in &mut self.tasks {
            if task.event_id.as_ref().is_some_and(orphaned) {
                task.event_id = None;
            }
        }
    }

    /// Built-in data shown when no backend is configured.
    pub fn demo() -> Self {
        fn id(value: &'static str) -> RecordId {
            RecordId::from_static(value)
        }
        fn day(y: i32, m: u32, d: u32) -> NaiveDate {
            NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
        }
        fn amount(value: f64) -> Amount {
            Amount::new(value).unwrap_or(Amount::ZERO)
        }
        let owner = OwnerId::from_static("demo");
        let surname = PersonName::from_static;

        Self {
            clients: vec![Client {
                id: id("C-001"),
                owner: owner.clone(),
                first_name: "Sofia".to_string(),
                last_name: surname("Hernandez"),
                email: ContactEmail::new("sofia@example.com").ok(),
                phone: Some("+52 55 1234 5678".to_string()),
                notes: Some("Prefers WhatsApp".to_string()),
            }],
            events: vec![Event {
                id: id("E-001"),
                owner: owner.clone(),
                client_id: id("C-001"),
                date: day(2026, 2, 14),
                venue: "Hacienda San Gabriel".to_string(),
                package: "Full day".to_string(),
                status: EventStatus::Signed,
                currency: Currency::Usd,
                deposit_amount: amount(1200.0),
                deposit_due: Some(day(2025, 12, 12)),
                balance_amount: amount(2800.0),
                balance_due: Some(day(2026, 2, 1)),
            }],
            special_requests: vec![SpecialRequest {
                id: id("R-001"),
                owner: owner.clone(),
                event_id: id("E-001"),
                category: "Family".to_string(),
                priority: Priority::High,
                description: "Portrait with both grandmothers".to_string(),
                status: RequestStatus::Open,
            }],
            payments: vec![
                Payment {
                    id: id("P-002"),
                    owner: owner.clone(),
                    event_id: id("E-001"),
                    kind: "balance".to_string(),
                    currency: Currency::Usd,
                    amount: amount(2800.0),
                    due_date: day(2026, 2, 1),
                    paid_date: None,
                    status: PaymentStatus::Pending,
                },
                Payment {
                    id: id("P-001"),
                    owner: owner.clone(),
                    event_id: id("E-001"),
                    kind: "deposit".to_string(),
                    currency: Currency::Usd,
                    amount: amount(1200.0),
                    due_date: day(2025, 12, 12),
                    paid_date: None,
                    status: PaymentStatus::Pending,
                },
            ],
            tasks: vec![Task {
                id: id("T-001"),
                owner: owner.clone(),
                event_id: Some(id("E-001")),
                title: "Scout venue light".to_string(),
                assignee: "Second shooter".to_string(),
                due_date: Some(day(2026, 2, 7)),
                status: TaskStatus::Todo,
            }],
            deliverables: vec![Deliverable {
                id: id("D-001"),
                owner: owner.clone(),
                event_id: id("E-001"),
                kind: "Online gallery".to_string(),
                due_date: Some(day(2026, 3, 14)),
                delivered_date: None,
                revision_date: None,
                link: DeliveryLink::new("https://gallery.example.com/hernandez").ok(),
            }],
            vendors: vec![Vendor {
                id: id("V-001"),
                owner,
                event_id: id("E-001"),
                kind: "Planner".to_string(),
                name: surname("Casa Bonita Planning"),
                contact: Some("hola@casabonita.example.com".to_string()),
                notes: None,
            }],
        }
    }
}
