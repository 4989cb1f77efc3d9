//! Domain records managed by the studio dashboard.

pub mod client;
pub mod deliverable;
pub mod event;
pub mod payment;
pub mod snapshot;
pub mod special_request;
pub mod task;
pub mod types;
pub mod vendor;
