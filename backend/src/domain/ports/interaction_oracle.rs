//! Driven port for the external text-generation service.
//!
//! The oracle answers free text for a pair of drug names. Failures are typed
//! here; the resolver decides that none of them reach the caller.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors surfaced while calling the oracle.
    pub enum InteractionOracleError {
        /// Network transport failed before receiving a response.
        Transport { message: String } =>
            "oracle transport failed: {message}",
        /// The call exceeded the configured timeout.
        Timeout { message: String } =>
            "oracle timeout: {message}",
        /// The service answered with a non-success status.
        Status { status: u16, message: String } =>
            "oracle returned status {status}: {message}",
        /// The response body could not be decoded.
        Decode { message: String } =>
            "oracle response decode failed: {message}",
    }
}

/// Port for asking the oracle about a pair of drugs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InteractionOracle: Send + Sync {
    /// Free-text answer for the two names as the caller supplied them.
    ///
    /// `Ok(None)` means the oracle produced no usable text.
    async fn query(
        &self,
        drug_1: &str,
        drug_2: &str,
    ) -> Result<Option<String>, InteractionOracleError>;
}

/// Fixture oracle that never answers.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureInteractionOracle;

#[async_trait]
impl InteractionOracle for FixtureInteractionOracle {
    async fn query(
        &self,
        _drug_1: &str,
        _drug_2: &str,
    ) -> Result<Option<String>, InteractionOracleError> {
        Ok(None)
    }
}
