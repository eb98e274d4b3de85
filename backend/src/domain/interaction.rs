//! Interaction descriptions, verdicts, and reported findings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{DrugPair, PatientId};

/// Text stored for a pair the oracle reported as non-interacting.
///
/// Historical cache rows carry this exact phrase, so detection is substring
/// containment rather than equality.
pub const NEGATIVE_SENTINEL: &str = "There are no known significant interactions";

/// Returns `true` when `description` marks a known non-interaction.
///
/// # Examples
/// ```
/// use medcheck::domain::is_negative_sentinel;
///
/// assert!(is_negative_sentinel(
///     "There are no known significant interactions between A and B."
/// ));
/// assert!(!is_negative_sentinel("Increased bleeding risk."));
/// ```
pub fn is_negative_sentinel(description: &str) -> bool {
    description.contains(NEGATIVE_SENTINEL)
}

/// Structured reading of an interaction description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionVerdict {
    /// A reportable interaction with its description.
    Reported(String),
    /// The pair is known not to interact.
    NoKnownInteraction,
}

impl InteractionVerdict {
    /// Classify free text using the sentinel rule.
    pub fn from_description(description: impl Into<String>) -> Self {
        let description = description.into();
        if is_negative_sentinel(&description) {
            Self::NoKnownInteraction
        } else {
            Self::Reported(description)
        }
    }

    /// Text to report, if any.
    pub fn reported(&self) -> Option<&str> {
        match self {
            Self::Reported(text) => Some(text.as_str()),
            Self::NoKnownInteraction => None,
        }
    }
}

/// Where a finding's description came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionSource {
    /// Previously saved resolution.
    Saved,
    /// Curated reference table.
    Reference,
    /// External oracle answer.
    Oracle,
}

impl InteractionSource {
    /// Short label used in log events.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Saved => "saved",
            Self::Reference => "reference",
            Self::Oracle => "oracle",
        }
    }
}

/// One interacting pair reported to the caller.
///
/// `drug_1` is the new medication and `drug_2` the current one, both
/// trimmed but in the caller's casing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionFinding {
    /// Newly prescribed medication.
    pub drug_1: String,
    /// Medication the patient already takes.
    pub drug_2: String,
    /// Human-readable description of the interaction.
    pub interaction: String,
}

/// Row appended to the saved-interaction log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedInteractionRecord {
    /// Normalised pair the row answers for.
    pub pair: DrugPair,
    /// Interaction text, or the no-interaction sentinel.
    pub description: String,
    /// Patient whose check produced a positive answer; `None` for negatives.
    pub patient_id: Option<PatientId>,
    /// Insertion time; the newest row for a pair wins.
    pub created_at: DateTime<Utc>,
}

impl SavedInteractionRecord {
    /// Record a positive answer attributed to a patient.
    pub fn reported(
        pair: DrugPair,
        description: impl Into<String>,
        patient_id: PatientId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            pair,
            description: description.into(),
            patient_id: Some(patient_id),
            created_at,
        }
    }

    /// Record a negative answer; never attributed to a patient.
    pub fn no_known_interaction(pair: DrugPair, created_at: DateTime<Utc>) -> Self {
        Self {
            pair,
            description: NEGATIVE_SENTINEL.to_owned(),
            patient_id: None,
            created_at,
        }
    }
}
