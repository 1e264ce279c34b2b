//! In-memory data layer for the MediFlow clinic dashboard.
//!
//! Each entity (doctors, patients, appointments, bills, prescriptions,
//! feedback) is backed by a [`Store`] seeded from static fixtures and exposed
//! through an async service facade that simulates network latency. Nothing is
//! persisted: collections live for the lifetime of the process and are
//! re-seeded on every start.

mod clock;
mod error;
mod latency;

pub mod fixtures;
pub mod models;
pub mod services;
pub mod store;

pub use clock::Clock;
pub use error::{Result, ServiceError};
pub use latency::{Latency, LatencyProfile};
pub use store::{parse_id, Record, Store};
