//! Driving port for registering patients.

use async_trait::async_trait;

use crate::domain::{Error, Patient, PatientDraft};

/// Domain use-case port for adding a patient.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PatientRegistration: Send + Sync {
    /// Validate and store a patient.
    ///
    /// Validation failures and duplicate phone numbers or emails are
    /// reported as [`crate::domain::ErrorCode::InvalidRequest`] with
    /// `{"field", "code"}` details.
    async fn register_patient(&self, draft: PatientDraft) -> Result<Patient, Error>;
}

/// Fixture registration that rejects every request.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePatientRegistration;

#[async_trait]
impl PatientRegistration for FixturePatientRegistration {
    async fn register_patient(&self, _draft: PatientDraft) -> Result<Patient, Error> {
        Err(Error::service_unavailable("patient store is not configured"))
    }
}
