//! Patient data model and registration validation.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of characters in a phone number.
pub const PHONE_NUMBER_MAX: usize = 15;

/// Database identifier of a patient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatientId(i64);

impl PatientId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PatientId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl From<i64> for PatientId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// A registered patient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patient {
    pub id: PatientId,
    pub name: String,
    pub age: i32,
    pub registered_at: DateTime<Utc>,
    pub medical_condition: String,
    pub remarks: Option<String>,
    pub phone_number: String,
    pub email: String,
    /// Comma-separated list as entered at registration.
    pub current_medications: String,
}

/// Reasons a registration request is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatientValidationError {
    #[error("name must not be empty")]
    EmptyName,
    #[error("age must not be negative")]
    NegativeAge,
    #[error("medical condition must not be empty")]
    EmptyMedicalCondition,
    #[error("phone number must contain between 1 and {max} characters")]
    PhoneNumberLength { max: usize },
    #[error("email must be a valid address")]
    InvalidEmail,
}

impl PatientValidationError {
    /// Name of the offending field as exposed over HTTP.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyName => "name",
            Self::NegativeAge => "age",
            Self::EmptyMedicalCondition => "medical_condition",
            Self::PhoneNumberLength { .. } => "phone_number",
            Self::InvalidEmail => "email",
        }
    }

    /// Machine-readable failure code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyName | Self::EmptyMedicalCondition => "empty",
            Self::NegativeAge => "out_of_range",
            Self::PhoneNumberLength { .. } => "length",
            Self::InvalidEmail => "format",
        }
    }
}

/// Unvalidated registration input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientDraft {
    pub name: String,
    pub age: i32,
    pub medical_condition: String,
    pub remarks: Option<String>,
    pub phone_number: String,
    pub email: String,
    pub current_medications: String,
}

/// Registration input that passed validation.
///
/// # Examples
/// ```
/// use medcheck::domain::{NewPatient, PatientDraft};
///
/// let draft = PatientDraft {
///     name: "Ada".into(),
///     age: 36,
///     medical_condition: "Atrial fibrillation".into(),
///     phone_number: "5550100".into(),
///     email: "ada@example.org".into(),
///     current_medications: "Warfarin".into(),
///     ..PatientDraft::default()
/// };
/// let patient = NewPatient::try_from(draft).expect("valid draft");
/// assert_eq!(patient.name(), "Ada");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPatient(PatientDraft);

impl NewPatient {
    pub fn name(&self) -> &str {
        self.0.name.as_str()
    }

    pub fn age(&self) -> i32 {
        self.0.age
    }

    pub fn medical_condition(&self) -> &str {
        self.0.medical_condition.as_str()
    }

    pub fn remarks(&self) -> Option<&str> {
        self.0.remarks.as_deref()
    }

    pub fn phone_number(&self) -> &str {
        self.0.phone_number.as_str()
    }

    pub fn email(&self) -> &str {
        self.0.email.as_str()
    }

    pub fn current_medications(&self) -> &str {
        self.0.current_medications.as_str()
    }

    /// Attach server-assigned fields to form a stored patient.
    pub fn into_patient(self, id: PatientId, registered_at: DateTime<Utc>) -> Patient {
        let PatientDraft {
            name,
            age,
            medical_condition,
            remarks,
            phone_number,
            email,
            current_medications,
        } = self.0;
        Patient {
            id,
            name,
            age,
            registered_at,
            medical_condition,
            remarks,
            phone_number,
            email,
            current_medications,
        }
    }
}

impl TryFrom<PatientDraft> for NewPatient {
    type Error = PatientValidationError;

    fn try_from(draft: PatientDraft) -> Result<Self, Self::Error> {
        if draft.name.trim().is_empty() {
            return Err(PatientValidationError::EmptyName);
        }
        if draft.age < 0 {
            return Err(PatientValidationError::NegativeAge);
        }
        if draft.medical_condition.trim().is_empty() {
            return Err(PatientValidationError::EmptyMedicalCondition);
        }
        let phone_len = draft.phone_number.chars().count();
        if phone_len == 0 || phone_len > PHONE_NUMBER_MAX {
            return Err(PatientValidationError::PhoneNumberLength {
                max: PHONE_NUMBER_MAX,
            });
        }
        if !is_plausible_email(&draft.email) {
            return Err(PatientValidationError::InvalidEmail);
        }
        Ok(Self(draft))
    }
}

fn is_plausible_email(email: &str) -> bool {
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => !local.is_empty() && !domain.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn draft() -> PatientDraft {
        PatientDraft {
            name: "Grace".into(),
            age: 52,
            medical_condition: "Hypertension".into(),
            remarks: None,
            phone_number: "07700900123".into(),
            email: "grace@example.org".into(),
            current_medications: "Aspirin, Lisinopril".into(),
        }
    }

    #[rstest]
    fn accepts_valid_draft(draft: PatientDraft) {
        let patient = NewPatient::try_from(draft).expect("valid draft");
        assert_eq!(patient.current_medications(), "Aspirin, Lisinopril");
    }

    #[rstest]
    fn accepts_empty_medication_list(mut draft: PatientDraft) {
        draft.current_medications.clear();
        assert!(NewPatient::try_from(draft).is_ok());
    }

    #[rstest]
    #[case::blank_name(|d: &mut PatientDraft| d.name = "  ".into(), "name")]
    #[case::negative_age(|d: &mut PatientDraft| d.age = -1, "age")]
    #[case::blank_condition(|d: &mut PatientDraft| d.medical_condition.clear(), "medical_condition")]
    #[case::empty_phone(|d: &mut PatientDraft| d.phone_number.clear(), "phone_number")]
    #[case::long_phone(|d: &mut PatientDraft| d.phone_number = "1".repeat(16), "phone_number")]
    #[case::no_at(|d: &mut PatientDraft| d.email = "grace.example.org".into(), "email")]
    #[case::two_ats(|d: &mut PatientDraft| d.email = "a@b@c".into(), "email")]
    #[case::empty_domain(|d: &mut PatientDraft| d.email = "grace@".into(), "email")]
    fn rejects_invalid_fields(
        mut draft: PatientDraft,
        #[case] mutate: fn(&mut PatientDraft),
        #[case] field: &str,
    ) {
        mutate(&mut draft);
        let err = NewPatient::try_from(draft).expect_err("draft should be rejected");
        assert_eq!(err.field(), field);
    }

    #[rstest]
    fn patient_id_parses_numeric_strings() {
        assert_eq!(" 42 ".parse::<PatientId>().ok(), Some(PatientId::new(42)));
        assert!("forty-two".parse::<PatientId>().is_err());
    }

    #[rstest]
    fn into_patient_keeps_fields(draft: PatientDraft) {
        let at = chrono::DateTime::<Utc>::UNIX_EPOCH;
        let patient = NewPatient::try_from(draft)
            .expect("valid draft")
            .into_patient(PatientId::new(7), at);
        assert_eq!(patient.id, PatientId::new(7));
        assert_eq!(patient.name, "Grace");
        assert_eq!(patient.registered_at, at);
    }
}
