//! Prescription check use-case.
//!
//! Stages the proposed medications against the patient's current list,
//! resolves every pair, and removes the staged row whatever the outcome.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{
    InteractionOracle, PatientRepository, PatientRepositoryError, PrescriptionCheckCommand,
    PrescriptionCheckRequest, PrescriptionStagingRepository, PrescriptionStagingRepositoryError,
    ReferenceInteractionRepository, SavedInteractionRepository,
};
use crate::domain::{
    Error, InteractionFinding, InteractionResolver, PatientLocks, StagedPrescription,
};

/// Service implementing [`PrescriptionCheckCommand`].
pub struct PrescriptionCheckService<P: ?Sized, T: ?Sized, S: ?Sized, R: ?Sized, O: ?Sized> {
    patients: Arc<P>,
    staging: Arc<T>,
    resolver: InteractionResolver<S, R, O>,
    locks: PatientLocks,
}

impl<P, T, S, R, O> PrescriptionCheckService<P, T, S, R, O>
where
    P: ?Sized,
    T: ?Sized,
    S: ?Sized,
    R: ?Sized,
    O: ?Sized,
{
    /// Create the service; each instance owns its own patient lock registry.
    pub fn new(patients: Arc<P>, staging: Arc<T>, resolver: InteractionResolver<S, R, O>) -> Self {
        Self {
            patients,
            staging,
            resolver,
            locks: PatientLocks::new(),
        }
    }
}

#[async_trait]
impl<P, T, S, R, O> PrescriptionCheckCommand for PrescriptionCheckService<P, T, S, R, O>
where
    P: PatientRepository + ?Sized,
    T: PrescriptionStagingRepository + ?Sized,
    S: SavedInteractionRepository + ?Sized,
    R: ReferenceInteractionRepository + ?Sized,
    O: InteractionOracle + ?Sized,
{
    async fn check(
        &self,
        request: PrescriptionCheckRequest,
    ) -> Result<Vec<InteractionFinding>, Error> {
        let patient_id = request.patient_id();
        let _guard = self.locks.lock(patient_id).await;

        let patient = self
            .patients
            .find_by_id(patient_id)
            .await
            .map_err(map_patient_error)?
            .ok_or_else(|| Error::not_found(format!("patient {patient_id} not found")))?;

        let staged = StagedPrescription::new(
            patient_id,
            request.new_medications(),
            patient.current_medications,
        );
        self.staging
            .put_or_replace(&staged)
            .await
            .map_err(map_staging_error)?;

        let outcome = self.consume(&request).await;

        if let Err(err) = self.staging.delete(patient_id).await {
            warn!(patient_id = %patient_id, error = %err, "failed to clear staged prescription");
            if outcome.is_ok() {
                return Err(map_staging_error(err));
            }
        }

        if let Ok(findings) = &outcome {
            info!(
                patient_id = %patient_id,
                findings = findings.len(),
                "prescription check completed"
            );
        }
        outcome
    }
}

impl<P, T, S, R, O> PrescriptionCheckService<P, T, S, R, O>
where
    P: PatientRepository + ?Sized,
    T: PrescriptionStagingRepository + ?Sized,
    S: SavedInteractionRepository + ?Sized,
    R: ReferenceInteractionRepository + ?Sized,
    O: InteractionOracle + ?Sized,
{
    async fn consume(
        &self,
        request: &PrescriptionCheckRequest,
    ) -> Result<Vec<InteractionFinding>, Error> {
        let patient_id = request.patient_id();
        let staged = self
            .staging
            .find(patient_id)
            .await
            .map_err(map_staging_error)?
            .ok_or_else(|| {
                Error::not_found(format!("no staged prescription for patient {patient_id}"))
            })?;
        self.resolver.resolve(&staged).await
    }
}

fn map_patient_error(error: PatientRepositoryError) -> Error {
    match error {
        PatientRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("patient store unavailable: {message}"))
        }
        PatientRepositoryError::Query { message } => {
            Error::internal(format!("patient store error: {message}"))
        }
        PatientRepositoryError::Duplicate { field } => {
            Error::internal(format!("unexpected duplicate patient {field}"))
        }
    }
}

fn map_staging_error(error: PrescriptionStagingRepositoryError) -> Error {
    match error {
        PrescriptionStagingRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("prescription staging unavailable: {message}"))
        }
        PrescriptionStagingRepositoryError::Query { message } => {
            Error::internal(format!("prescription staging error: {message}"))
        }
    }
}

#[cfg(test)]
#[path = "prescription_check_service_tests.rs"]
mod tests;
