//! Async service facades, one per entity.
//!
//! Each facade wraps its [`Store`](crate::Store) with simulated latency,
//! id-keyed lookups that reject with a not-found error, default assignment on
//! create, and shallow typed-partial merges on update. The facades never
//! validate cross-entity references: a bill may outlive the patient it names.

mod appointment;
mod bill;
mod doctor;
mod feedback;
mod patient;
mod prescription;

pub use appointment::AppointmentService;
pub use bill::BillService;
pub use doctor::DoctorService;
pub use feedback::FeedbackService;
pub use patient::PatientService;
pub use prescription::PrescriptionService;
