//! Entity records and their create/update payloads.
//!
//! Field names serialize to the dashboard's external shape: `Id` for the
//! identifier, camelCase for everything else, lowercase strings for statuses.
//! Update payloads are typed partials — every field optional, no id field —
//! so a shallow merge can never rename or renumber a record.

mod appointment;
mod bill;
mod doctor;
mod feedback;
mod patient;
mod prescription;

pub use appointment::{Appointment, AppointmentStatus, AppointmentUpdate, NewAppointment};
pub use bill::{Bill, BillItem, BillStatus, BillUpdate, NewBill, TAX_RATE};
pub use doctor::{Doctor, DoctorStatus, DoctorUpdate, NewDoctor, RatingSummary};
pub use feedback::{Feedback, FeedbackStats, FeedbackStatus, FeedbackUpdate, NewFeedback};
pub use patient::{NewPatient, Patient, PatientStatus, PatientUpdate};
pub use prescription::{Medicine, NewPrescription, Prescription, PrescriptionStatus, PrescriptionUpdate};
