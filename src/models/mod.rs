//! Database and configuration models.

pub mod auth;
pub mod client;
pub mod config;
pub mod deliverable;
pub mod event;
pub mod payment;
pub mod special_request;
pub mod task;
pub mod vendor;
