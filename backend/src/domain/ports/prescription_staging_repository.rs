//! Port for prescriptions staged while a check runs.

use async_trait::async_trait;

use crate::domain::{PatientId, StagedPrescription};

use super::define_port_error;

define_port_error! {
    /// Errors raised by staging adapters.
    pub enum PrescriptionStagingRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "prescription staging connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "prescription staging query failed: {message}",
    }
}

/// Port for the single live staged prescription of each patient.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PrescriptionStagingRepository: Send + Sync {
    /// Insert or replace the staged row keyed by patient.
    async fn put_or_replace(
        &self,
        staged: &StagedPrescription,
    ) -> Result<(), PrescriptionStagingRepositoryError>;

    /// Staged row for the patient, if any.
    async fn find(
        &self,
        patient_id: PatientId,
    ) -> Result<Option<StagedPrescription>, PrescriptionStagingRepositoryError>;

    /// Remove the staged row. Succeeds when none exists.
    async fn delete(&self, patient_id: PatientId)
    -> Result<(), PrescriptionStagingRepositoryError>;
}

/// Fixture implementation that stores nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePrescriptionStagingRepository;

#[async_trait]
impl PrescriptionStagingRepository for FixturePrescriptionStagingRepository {
    async fn put_or_replace(
        &self,
        _staged: &StagedPrescription,
    ) -> Result<(), PrescriptionStagingRepositoryError> {
        Ok(())
    }

    async fn find(
        &self,
        _patient_id: PatientId,
    ) -> Result<Option<StagedPrescription>, PrescriptionStagingRepositoryError> {
        Ok(None)
    }

    async fn delete(
        &self,
        _patient_id: PatientId,
    ) -> Result<(), PrescriptionStagingRepositoryError> {
        Ok(())
    }
}
