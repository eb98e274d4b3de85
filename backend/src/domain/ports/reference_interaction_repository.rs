//! Port for the curated reference table of drug interactions.

use async_trait::async_trait;

use crate::domain::DrugPair;

use super::define_port_error;

define_port_error! {
    /// Errors raised by reference interaction adapters.
    pub enum ReferenceInteractionRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "reference interaction repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } =>
            "reference interaction repository query failed: {message}",
    }
}

/// Read-only lookup of curated interaction descriptions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReferenceInteractionRepository: Send + Sync {
    /// Description for the pair, matched case-insensitively.
    async fn find(
        &self,
        pair: &DrugPair,
    ) -> Result<Option<String>, ReferenceInteractionRepositoryError>;
}

/// Fixture implementation with an empty table.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureReferenceInteractionRepository;

#[async_trait]
impl ReferenceInteractionRepository for FixtureReferenceInteractionRepository {
    async fn find(
        &self,
        _pair: &DrugPair,
    ) -> Result<Option<String>, ReferenceInteractionRepositoryError> {
        Ok(None)
    }
}
