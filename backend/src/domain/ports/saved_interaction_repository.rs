//! Port for the append-only log of resolved interactions.
//!
//! Rows written here short-circuit future lookups for the same pair,
//! including negative answers carrying the sentinel text.

use async_trait::async_trait;

use crate::domain::{DrugPair, SavedInteractionRecord};

use super::define_port_error;

define_port_error! {
    /// Errors raised by saved interaction adapters.
    pub enum SavedInteractionRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "saved interaction repository connection failed: {message}",
        /// Query or insert failed during execution.
        Query { message: String } =>
            "saved interaction repository query failed: {message}",
    }
}

/// Port for reading and appending saved interactions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SavedInteractionRepository: Send + Sync {
    /// Most recent description saved for the pair.
    ///
    /// Matching is case-insensitive on both stored names. When several rows
    /// match, the newest one wins.
    async fn find(&self, pair: &DrugPair)
    -> Result<Option<String>, SavedInteractionRepositoryError>;

    /// Append a row. Existing rows for the pair are left untouched.
    async fn record(
        &self,
        record: &SavedInteractionRecord,
    ) -> Result<(), SavedInteractionRepositoryError>;
}

/// Fixture implementation that remembers nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSavedInteractionRepository;

#[async_trait]
impl SavedInteractionRepository for FixtureSavedInteractionRepository {
    async fn find(
        &self,
        _pair: &DrugPair,
    ) -> Result<Option<String>, SavedInteractionRepositoryError> {
        Ok(None)
    }

    async fn record(
        &self,
        _record: &SavedInteractionRecord,
    ) -> Result<(), SavedInteractionRepositoryError> {
        Ok(())
    }
}
