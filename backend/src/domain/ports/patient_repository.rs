//! Port for patient persistence.

use async_trait::async_trait;

use crate::domain::{NewPatient, Patient, PatientId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by patient repository adapters.
    pub enum PatientRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "patient repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "patient repository query failed: {message}",
        /// A unique column already holds the submitted value.
        Duplicate { field: String } =>
            "patient with this {field} already exists",
    }
}

/// Port for patient storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PatientRepository: Send + Sync {
    /// Fetch a patient by identifier.
    async fn find_by_id(&self, id: PatientId) -> Result<Option<Patient>, PatientRepositoryError>;

    /// List all patients ordered by identifier.
    async fn list(&self) -> Result<Vec<Patient>, PatientRepositoryError>;

    /// Insert a patient and return the stored row.
    ///
    /// Unique phone number or email collisions surface as
    /// [`PatientRepositoryError::Duplicate`].
    async fn create(&self, patient: &NewPatient) -> Result<Patient, PatientRepositoryError>;
}

/// Fixture implementation with no stored patients.
///
/// `create` fails because there is nowhere to put the row.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePatientRepository;

#[async_trait]
impl PatientRepository for FixturePatientRepository {
    async fn find_by_id(&self, _id: PatientId) -> Result<Option<Patient>, PatientRepositoryError> {
        Ok(None)
    }

    async fn list(&self) -> Result<Vec<Patient>, PatientRepositoryError> {
        Ok(Vec::new())
    }

    async fn create(&self, _patient: &NewPatient) -> Result<Patient, PatientRepositoryError> {
        Err(PatientRepositoryError::connection(
            "no patient store is configured",
        ))
    }
}
