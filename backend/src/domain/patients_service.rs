//! Patient listing and registration services.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::ports::{
    PatientRegistration, PatientRepository, PatientRepositoryError, PatientsQuery,
};
use crate::domain::{Error, NewPatient, Patient, PatientDraft, PatientValidationError};

/// Service implementing [`PatientsQuery`] and [`PatientRegistration`].
pub struct PatientsService<P: ?Sized> {
    patients: Arc<P>,
}

impl<P: ?Sized> PatientsService<P> {
    pub fn new(patients: Arc<P>) -> Self {
        Self { patients }
    }
}

#[async_trait]
impl<P> PatientsQuery for PatientsService<P>
where
    P: PatientRepository + ?Sized,
{
    async fn list_patients(&self) -> Result<Vec<Patient>, Error> {
        self.patients.list().await.map_err(map_repository_error)
    }
}

#[async_trait]
impl<P> PatientRegistration for PatientsService<P>
where
    P: PatientRepository + ?Sized,
{
    async fn register_patient(&self, draft: PatientDraft) -> Result<Patient, Error> {
        let patient = NewPatient::try_from(draft).map_err(map_validation_error)?;
        self.patients
            .create(&patient)
            .await
            .map_err(map_repository_error)
    }
}

fn map_validation_error(error: PatientValidationError) -> Error {
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": error.field(),
        "code": error.code(),
    }))
}

fn map_repository_error(error: PatientRepositoryError) -> Error {
    match error {
        PatientRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("patient store unavailable: {message}"))
        }
        PatientRepositoryError::Query { message } => {
            Error::internal(format!("patient store error: {message}"))
        }
        PatientRepositoryError::Duplicate { field } => {
            Error::invalid_request(format!("patient with this {field} already exists"))
                .with_details(json!({ "field": field, "code": "duplicate" }))
        }
    }
}
