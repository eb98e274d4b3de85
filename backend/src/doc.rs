//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP path plus the schema wrappers from
//! [`crate::inbound::http::schemas`], so domain types never depend on
//! utoipa. The document backs Swagger UI in debug builds and is exported by
//! `cargo run --bin openapi-dump`.

use crate::inbound::http::health::ProbeBody;
use crate::inbound::http::patients::{AddPatientRequestBody, PatientBody};
use crate::inbound::http::prescriptions::{
    CheckPrescriptionRequestBody, CheckPrescriptionResponseBody,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, InteractionFindingSchema};
use crate::inbound::http::validation::PatientIdBody;
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Medcheck backend API",
        description = "Patient records and drug-drug interaction checks for proposed prescriptions."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::patients::list_patients,
        crate::inbound::http::patients::add_patient,
        crate::inbound::http::prescriptions::check_prescription,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        PatientBody,
        AddPatientRequestBody,
        PatientIdBody,
        CheckPrescriptionRequestBody,
        CheckPrescriptionResponseBody,
        InteractionFindingSchema,
        ProbeBody,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "patients", description = "Patient registration and listing"),
        (name = "prescriptions", description = "Interaction checks for proposed medications"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
