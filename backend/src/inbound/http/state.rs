//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see driving ports, so
//! they can be exercised with mocks and no I/O.

use std::sync::Arc;

use crate::domain::ports::{
    FixturePatientRegistration, FixturePatientsQuery, FixturePrescriptionCheckCommand,
    PatientRegistration, PatientsQuery, PrescriptionCheckCommand,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub patients: Arc<dyn PatientsQuery>,
    pub registration: Arc<dyn PatientRegistration>,
    pub prescriptions: Arc<dyn PrescriptionCheckCommand>,
}

impl HttpState {
    pub fn new(
        patients: Arc<dyn PatientsQuery>,
        registration: Arc<dyn PatientRegistration>,
        prescriptions: Arc<dyn PrescriptionCheckCommand>,
    ) -> Self {
        Self {
            patients,
            registration,
            prescriptions,
        }
    }

    /// State backed entirely by fixture ports.
    pub fn fixture() -> Self {
        Self::new(
            Arc::new(FixturePatientsQuery),
            Arc::new(FixturePatientRegistration),
            Arc::new(FixturePrescriptionCheckCommand),
        )
    }

    /// Replace the prescription check port.
    pub fn with_prescriptions(mut self, prescriptions: Arc<dyn PrescriptionCheckCommand>) -> Self {
        self.prescriptions = prescriptions;
        self
    }

    /// Replace both patient ports.
    pub fn with_patients<S>(mut self, service: Arc<S>) -> Self
    where
        S: PatientsQuery + PatientRegistration + 'static,
    {
        self.patients = service.clone();
        self.registration = service;
        self
    }
}
