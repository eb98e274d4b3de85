//! Interaction resolution pipeline.
//!
//! For each (new, current) pair the resolver consults, in order:
//! - the saved-interaction log;
//! - the curated reference table;
//! - the external oracle.
//!
//! A saved negative answer stops the search after the reference table, so
//! the oracle is never asked twice about a pair it cleared. Oracle answers
//! are appended to the saved log; oracle failures are logged and treated as
//! no answer.

use std::sync::Arc;

use mockable::Clock;
use tracing::{debug, warn};

use crate::domain::ports::{
    InteractionOracle, ReferenceInteractionRepository, ReferenceInteractionRepositoryError,
    SavedInteractionRepository, SavedInteractionRepositoryError,
};
use crate::domain::{
    DrugPair, Error, InteractionFinding, InteractionSource, InteractionVerdict, PatientId,
    SavedInteractionRecord, StagedPrescription,
};

/// A resolved description and the store that supplied it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub description: String,
    pub source: InteractionSource,
}

/// Resolves interaction descriptions for staged prescriptions.
pub struct InteractionResolver<S: ?Sized, R: ?Sized, O: ?Sized> {
    saved: Arc<S>,
    reference: Arc<R>,
    oracle: Arc<O>,
    clock: Arc<dyn Clock>,
}

impl<S: ?Sized, R: ?Sized, O: ?Sized> InteractionResolver<S, R, O> {
    /// Create a resolver over the three interaction sources.
    pub fn new(saved: Arc<S>, reference: Arc<R>, oracle: Arc<O>, clock: Arc<dyn Clock>) -> Self {
        Self {
            saved,
            reference,
            oracle,
            clock,
        }
    }
}

impl<S, R, O> InteractionResolver<S, R, O>
where
    S: SavedInteractionRepository + ?Sized,
    R: ReferenceInteractionRepository + ?Sized,
    O: InteractionOracle + ?Sized,
{
    /// Findings for every new × current pair of the staged prescription.
    ///
    /// Pairs are visited in input order, new medications outermost. Blank
    /// entries are skipped. Pairs without a positive description are
    /// omitted from the result.
    pub async fn resolve(
        &self,
        staged: &StagedPrescription,
    ) -> Result<Vec<InteractionFinding>, Error> {
        let mut findings = Vec::new();
        for new in staged.new_medication_names() {
            for current in staged.current_medication_names() {
                let resolution = self.resolve_pair(new, current, staged.patient_id).await?;
                if let Some(Resolution { description, .. }) = resolution {
                    findings.push(InteractionFinding {
                        drug_1: new.to_owned(),
                        drug_2: current.to_owned(),
                        interaction: description,
                    });
                }
            }
        }
        Ok(findings)
    }

    /// Resolve a single pair of trimmed, non-blank names.
    pub async fn resolve_pair(
        &self,
        new: &str,
        current: &str,
        patient_id: PatientId,
    ) -> Result<Option<Resolution>, Error> {
        let pair = DrugPair::new(new, current);

        let saved = self.saved.find(&pair).await.map_err(map_saved_error)?;
        let saved_negative = match saved.map(InteractionVerdict::from_description) {
            Some(InteractionVerdict::Reported(description)) => {
                return Ok(Some(found(&pair, description, InteractionSource::Saved)));
            }
            Some(InteractionVerdict::NoKnownInteraction) => true,
            None => false,
        };

        if let Some(description) = self
            .reference
            .find(&pair)
            .await
            .map_err(map_reference_error)?
        {
            return Ok(Some(found(&pair, description, InteractionSource::Reference)));
        }

        if saved_negative {
            debug!(pair = %pair, "pair cleared by saved negative answer");
            return Ok(None);
        }

        let answer = match self.oracle.query(new, current).await {
            Ok(answer) => answer,
            Err(err) => {
                warn!(pair = %pair, error = %err, "oracle lookup failed; treating as no answer");
                None
            }
        };

        match answer.map(InteractionVerdict::from_description) {
            Some(InteractionVerdict::Reported(description)) => {
                let record = SavedInteractionRecord::reported(
                    pair.clone(),
                    description.clone(),
                    patient_id,
                    self.clock.utc(),
                );
                self.saved.record(&record).await.map_err(map_saved_error)?;
                Ok(Some(found(&pair, description, InteractionSource::Oracle)))
            }
            Some(InteractionVerdict::NoKnownInteraction) => {
                let record =
                    SavedInteractionRecord::no_known_interaction(pair.clone(), self.clock.utc());
                self.saved.record(&record).await.map_err(map_saved_error)?;
                debug!(pair = %pair, "oracle reported no known interaction");
                Ok(None)
            }
            None => {
                debug!(pair = %pair, "no interaction source answered");
                Ok(None)
            }
        }
    }
}

fn found(pair: &DrugPair, description: String, source: InteractionSource) -> Resolution {
    debug!(pair = %pair, source = source.as_str(), "interaction found");
    Resolution {
        description,
        source,
    }
}

fn map_saved_error(error: SavedInteractionRepositoryError) -> Error {
    match error {
        SavedInteractionRepositoryError::Connection { message } => Error::service_unavailable(
            format!("saved interaction store unavailable: {message}"),
        ),
        SavedInteractionRepositoryError::Query { message } => {
            Error::internal(format!("saved interaction store error: {message}"))
        }
    }
}

fn map_reference_error(error: ReferenceInteractionRepositoryError) -> Error {
    match error {
        ReferenceInteractionRepositoryError::Connection { message } => Error::service_unavailable(
            format!("reference interaction table unavailable: {message}"),
        ),
        ReferenceInteractionRepositoryError::Query { message } => {
            Error::internal(format!("reference interaction table error: {message}"))
        }
    }
}

#[cfg(test)]
#[path = "interaction_resolver_tests.rs"]
mod tests;
