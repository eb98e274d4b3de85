//! Driving port for checking a proposed prescription.
//!
//! Inbound adapters hand over a validated request and receive the list of
//! interacting pairs. An empty list is a successful outcome.

use async_trait::async_trait;

use crate::domain::{Error, InteractionFinding, PatientId};

/// Message returned when the request lacks a patient or medications.
pub const MISSING_FIELDS_MESSAGE: &str = "Patient ID and new medications are required.";

/// Validated prescription check request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrescriptionCheckRequest {
    patient_id: PatientId,
    new_medications: Vec<String>,
}

impl PrescriptionCheckRequest {
    /// Build a request, rejecting a missing patient or an empty list.
    ///
    /// # Examples
    /// ```
    /// use medcheck::domain::PatientId;
    /// use medcheck::domain::ports::PrescriptionCheckRequest;
    ///
    /// let request =
    ///     PrescriptionCheckRequest::new(Some(PatientId::new(1)), vec!["Warfarin".into()])
    ///         .expect("valid request");
    /// assert_eq!(request.new_medications(), ["Warfarin"]);
    /// assert!(PrescriptionCheckRequest::new(None, vec!["Warfarin".into()]).is_err());
    /// ```
    pub fn new(patient_id: Option<PatientId>, new_medications: Vec<String>) -> Result<Self, Error> {
        match patient_id {
            Some(patient_id) if !new_medications.is_empty() => Ok(Self {
                patient_id,
                new_medications,
            }),
            _ => Err(Error::invalid_request(MISSING_FIELDS_MESSAGE)),
        }
    }

    pub fn patient_id(&self) -> PatientId {
        self.patient_id
    }

    pub fn new_medications(&self) -> &[String] {
        self.new_medications.as_slice()
    }
}

/// Domain use-case port for prescription checks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PrescriptionCheckCommand: Send + Sync {
    /// Report interactions between the new and current medications.
    async fn check(
        &self,
        request: PrescriptionCheckRequest,
    ) -> Result<Vec<InteractionFinding>, Error>;
}

/// Fixture command used when no stores are wired; every patient is unknown.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePrescriptionCheckCommand;

#[async_trait]
impl PrescriptionCheckCommand for FixturePrescriptionCheckCommand {
    async fn check(
        &self,
        request: PrescriptionCheckRequest,
    ) -> Result<Vec<InteractionFinding>, Error> {
        Err(Error::not_found(format!(
            "patient {} not found",
            request.patient_id()
        )))
    }
}
