//! Prescription check HTTP handler.
//!
//! ```text
//! POST /api/prescriptions/check/
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::InteractionFinding;
use crate::domain::ports::PrescriptionCheckRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, InteractionFindingSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, PatientIdBody, parse_patient_id};

/// Message returned when no pair interacts.
pub const NO_INTERACTIONS_MESSAGE: &str = "No interactions found";

/// Request payload for a prescription check.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CheckPrescriptionRequestBody {
    /// Patient identifier as a JSON integer or numeric string.
    #[schema(value_type = Option<i64>, example = 1)]
    pub patient_id: Option<PatientIdBody>,
    /// Names of the medications to prescribe.
    #[serde(default)]
    #[schema(example = json!(["Warfarin"]))]
    pub new_medications: Vec<String>,
}

/// Response payload: either the interacting pairs or an explicit message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum CheckPrescriptionResponseBody {
    Interactions {
        #[schema(value_type = Vec<InteractionFindingSchema>)]
        interactions: Vec<InteractionFinding>,
    },
    NoInteractions {
        #[schema(example = "No interactions found")]
        message: String,
    },
}

impl From<Vec<InteractionFinding>> for CheckPrescriptionResponseBody {
    fn from(findings: Vec<InteractionFinding>) -> Self {
        if findings.is_empty() {
            Self::NoInteractions {
                message: NO_INTERACTIONS_MESSAGE.to_owned(),
            }
        } else {
            Self::Interactions {
                interactions: findings,
            }
        }
    }
}

/// Check proposed medications against the patient's current ones.
#[utoipa::path(
    post,
    path = "/api/prescriptions/check/",
    request_body = CheckPrescriptionRequestBody,
    responses(
        (status = 200, description = "Interacting pairs or an explicit empty result", body = CheckPrescriptionResponseBody),
        (status = 400, description = "Missing patient or medications", body = ErrorSchema),
        (status = 404, description = "Unknown patient or staged prescription", body = ErrorSchema),
        (status = 503, description = "A backing store is unavailable", body = ErrorSchema)
    ),
    tags = ["prescriptions"],
    operation_id = "checkPrescription"
)]
#[post("/prescriptions/check/")]
pub async fn check_prescription(
    state: web::Data<HttpState>,
    payload: web::Json<CheckPrescriptionRequestBody>,
) -> ApiResult<web::Json<CheckPrescriptionResponseBody>> {
    let CheckPrescriptionRequestBody {
        patient_id,
        new_medications,
    } = payload.into_inner();
    let patient_id = parse_patient_id(patient_id, FieldName::new("patient_id"))?;
    let request = PrescriptionCheckRequest::new(patient_id, new_medications)?;

    let findings = state.prescriptions.check(request).await?;
    Ok(web::Json(findings.into()))
}

#[cfg(test)]
#[path = "prescriptions_tests.rs"]
mod tests;
