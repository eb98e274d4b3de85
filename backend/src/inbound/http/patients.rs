//! Patient HTTP handlers.
//!
//! ```text
//! GET  /api/patients/
//! POST /api/patients/add/
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Patient, PatientDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, require};

/// Patient as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PatientBody {
    /// Identifier rendered as a string.
    #[schema(example = "1")]
    pub id: String,
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = 36)]
    pub age: i32,
    #[schema(format = "date-time", example = "2024-03-01T09:30:00+00:00")]
    pub registered_date: String,
    #[schema(example = "Atrial fibrillation")]
    pub medical_condition: String,
    pub remarks: Option<String>,
    #[schema(example = "5550100")]
    pub phone_number: String,
    #[schema(example = "ada@example.org")]
    pub email: String,
    /// Comma-separated medication names.
    #[schema(example = "Aspirin,Metformin")]
    pub current_medications: String,
}

impl From<Patient> for PatientBody {
    fn from(patient: Patient) -> Self {
        Self {
            id: patient.id.to_string(),
            name: patient.name,
            age: patient.age,
            registered_date: patient.registered_at.to_rfc3339(),
            medical_condition: patient.medical_condition,
            remarks: patient.remarks,
            phone_number: patient.phone_number,
            email: patient.email,
            current_medications: patient.current_medications,
        }
    }
}

/// Registration payload. The identifier and registration time are assigned
/// by the store.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct AddPatientRequestBody {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub medical_condition: Option<String>,
    pub remarks: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    /// Comma-separated medication names; may be omitted.
    pub current_medications: Option<String>,
}

impl TryFrom<AddPatientRequestBody> for PatientDraft {
    type Error = crate::domain::Error;

    fn try_from(body: AddPatientRequestBody) -> Result<Self, Self::Error> {
        Ok(Self {
            name: require(body.name, FieldName::new("name"))?,
            age: require(body.age, FieldName::new("age"))?,
            medical_condition: require(
                body.medical_condition,
                FieldName::new("medical_condition"),
            )?,
            remarks: body.remarks,
            phone_number: require(body.phone_number, FieldName::new("phone_number"))?,
            email: require(body.email, FieldName::new("email"))?,
            current_medications: body.current_medications.unwrap_or_default(),
        })
    }
}

/// List every registered patient ordered by identifier.
#[utoipa::path(
    get,
    path = "/api/patients/",
    responses(
        (status = 200, description = "Registered patients", body = [PatientBody]),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Patient store unavailable", body = ErrorSchema)
    ),
    tags = ["patients"],
    operation_id = "listPatients"
)]
#[get("/patients/")]
pub async fn list_patients(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<PatientBody>>> {
    let patients = state.patients.list_patients().await?;
    Ok(web::Json(
        patients.into_iter().map(PatientBody::from).collect(),
    ))
}

/// Register a new patient.
#[utoipa::path(
    post,
    path = "/api/patients/add/",
    request_body = AddPatientRequestBody,
    responses(
        (status = 201, description = "Patient registered", body = PatientBody),
        (status = 400, description = "Invalid or duplicate patient", body = ErrorSchema),
        (status = 503, description = "Patient store unavailable", body = ErrorSchema)
    ),
    tags = ["patients"],
    operation_id = "addPatient"
)]
#[post("/patients/add/")]
pub async fn add_patient(
    state: web::Data<HttpState>,
    payload: web::Json<AddPatientRequestBody>,
) -> ApiResult<HttpResponse> {
    let draft = PatientDraft::try_from(payload.into_inner())?;
    let patient = state.registration.register_patient(draft).await?;
    Ok(HttpResponse::Created().json(PatientBody::from(patient)))
}

#[cfg(test)]
#[path = "patients_tests.rs"]
mod tests;
