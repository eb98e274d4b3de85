//! Shared validation helpers for inbound HTTP adapters.

use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{Error, PatientId};

/// Validation error codes reported in `details.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidPatientId,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidPatientId => "invalid_patient_id",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("missing required field: {field}")).with_details(json!({
        "field": field,
        "code": ErrorCode::MissingField.as_str(),
    }))
}

fn invalid_patient_id_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("{field} must be an integer")).with_details(json!({
        "field": field,
        "value": value,
        "code": ErrorCode::InvalidPatientId.as_str(),
    }))
}

/// Patient identifier as clients send it: a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum PatientIdBody {
    Number(i64),
    Text(String),
}

/// Resolve an optional identifier; blank strings count as absent.
pub(crate) fn parse_patient_id(
    value: Option<PatientIdBody>,
    field: FieldName,
) -> Result<Option<PatientId>, Error> {
    match value {
        None => Ok(None),
        Some(PatientIdBody::Number(id)) => Ok(Some(PatientId::new(id))),
        Some(PatientIdBody::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(PatientIdBody::Text(text)) => text
            .parse::<PatientId>()
            .map(Some)
            .map_err(|_| invalid_patient_id_error(field, &text)),
    }
}

/// Require a field that serde left optional.
pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}
