use std::sync::Arc;

use mediflow_data::services::{
    AppointmentService, BillService, DoctorService, FeedbackService, PatientService,
    PrescriptionService,
};
use mediflow_data::{fixtures, Clock, LatencyProfile, Store};

/// Shared handles to the per-entity services. Each page clones the handle it
/// needs; the dashboard fans out across four of them.
#[derive(Clone)]
pub struct AppState {
    pub doctors: Arc<DoctorService>,
    pub patients: Arc<PatientService>,
    pub appointments: Arc<AppointmentService>,
    pub bills: Arc<BillService>,
    pub prescriptions: Arc<PrescriptionService>,
    pub feedback: Arc<FeedbackService>,
    pub clock: Clock,
}

impl AppState {
    /// Build every service over its fixture-seeded store.
    pub fn seeded(latency: LatencyProfile, clock: Clock) -> Self {
        Self {
            doctors: Arc::new(DoctorService::new(Store::new(fixtures::doctors()), latency)),
            patients: Arc::new(PatientService::new(
                Store::new(fixtures::patients()),
                latency,
            )),
            appointments: Arc::new(AppointmentService::new(
                Store::new(fixtures::appointments()),
                latency,
            )),
            bills: Arc::new(BillService::new(
                Store::new(fixtures::bills()),
                latency,
                clock,
            )),
            prescriptions: Arc::new(PrescriptionService::new(
                Store::new(fixtures::prescriptions()),
                latency,
                clock,
            )),
            feedback: Arc::new(FeedbackService::new(
                Store::new(fixtures::feedback()),
                latency,
                clock,
            )),
            clock,
        }
    }
}
