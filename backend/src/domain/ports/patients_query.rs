//! Driving port for reading patients.

use async_trait::async_trait;

use crate::domain::{Error, Patient};

/// Domain use-case port for listing patients.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PatientsQuery: Send + Sync {
    /// All patients ordered by identifier.
    async fn list_patients(&self) -> Result<Vec<Patient>, Error>;
}

/// Fixture query with no patients.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePatientsQuery;

#[async_trait]
impl PatientsQuery for FixturePatientsQuery {
    async fn list_patients(&self) -> Result<Vec<Patient>, Error> {
        Ok(Vec::new())
    }
}
