//! Prescription awaiting an interaction check.

use super::PatientId;

/// Separator used for medication lists stored as a single string.
pub const MEDICATION_SEPARATOR: char = ',';

/// Short-lived record pairing proposed and current medications.
///
/// Both lists are stored verbatim as comma-joined strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedPrescription {
    pub patient_id: PatientId,
    pub new_medications: String,
    pub current_medications: String,
}

impl StagedPrescription {
    /// Stage `new_medications` for a patient taking `current_medications`.
    pub fn new<S: AsRef<str>>(
        patient_id: PatientId,
        new_medications: &[S],
        current_medications: impl Into<String>,
    ) -> Self {
        Self {
            patient_id,
            new_medications: join_medications(new_medications),
            current_medications: current_medications.into(),
        }
    }

    /// Newly prescribed names with blank entries skipped.
    pub fn new_medication_names(&self) -> impl Iterator<Item = &str> {
        split_medications(&self.new_medications)
    }

    /// Names from the patient's current medication list.
    pub fn current_medication_names(&self) -> impl Iterator<Item = &str> {
        split_medications(&self.current_medications)
    }
}

/// Join names with the storage separator.
pub fn join_medications<S: AsRef<str>>(names: &[S]) -> String {
    names
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(",")
}

/// Split a stored list into trimmed, non-blank names.
///
/// # Examples
/// ```
/// use medcheck::domain::split_medications;
///
/// let names: Vec<_> = split_medications(" Aspirin,, Zinc ,").collect();
/// assert_eq!(names, ["Aspirin", "Zinc"]);
/// ```
pub fn split_medications(list: &str) -> impl Iterator<Item = &str> {
    list.split(MEDICATION_SEPARATOR)
        .map(str::trim)
        .filter(|name| !name.is_empty())
}
