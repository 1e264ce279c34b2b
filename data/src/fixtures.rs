//! Static seed data, embedded at compile time.
//!
//! Every collection is re-seeded from these documents on process start;
//! nothing survives a restart. Fixture shape must match the models' external
//! field names, so parsing them is a startup invariant.

use crate::models::{Appointment, Bill, Doctor, Feedback, Patient, Prescription};

pub fn doctors() -> Vec<Doctor> {
    serde_json::from_str(include_str!("../fixtures/doctors.json"))
        .expect("doctors fixture is valid")
}

pub fn patients() -> Vec<Patient> {
    serde_json::from_str(include_str!("../fixtures/patients.json"))
        .expect("patients fixture is valid")
}

pub fn appointments() -> Vec<Appointment> {
    serde_json::from_str(include_str!("../fixtures/appointments.json"))
        .expect("appointments fixture is valid")
}

pub fn bills() -> Vec<Bill> {
    serde_json::from_str(include_str!("../fixtures/bills.json")).expect("bills fixture is valid")
}

pub fn prescriptions() -> Vec<Prescription> {
    serde_json::from_str(include_str!("../fixtures/prescriptions.json"))
        .expect("prescriptions fixture is valid")
}

pub fn feedback() -> Vec<Feedback> {
    serde_json::from_str(include_str!("../fixtures/feedback.json"))
        .expect("feedback fixture is valid")
}
