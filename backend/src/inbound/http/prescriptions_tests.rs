//! Tests for the prescription check HTTP handler.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::{MISSING_FIELDS_MESSAGE, MockPrescriptionCheckCommand};
use crate::domain::{Error, PatientId};
use crate::inbound::http::json_config;

async fn post_check(command: MockPrescriptionCheckCommand, body: Value) -> (StatusCode, Value) {
    let state = HttpState::fixture().with_prescriptions(Arc::new(command));
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .app_data(json_config())
            .service(web::scope("/api").service(check_prescription)),
    )
    .await;
    let request = actix_test::TestRequest::post()
        .uri("/api/prescriptions/check/")
        .set_json(&body)
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    let status = response.status();
    let body = actix_test::read_body_json(response).await;
    (status, body)
}

fn warfarin_finding() -> InteractionFinding {
    InteractionFinding {
        drug_1: "Warfarin".to_owned(),
        drug_2: "Aspirin".to_owned(),
        interaction: "Increased risk of bleeding.".to_owned(),
    }
}

#[rstest]
#[case::integer_id(json!(1))]
#[case::string_id(json!("1"))]
#[actix_web::test]
async fn reports_interactions(#[case] patient_id: Value) {
    let mut command = MockPrescriptionCheckCommand::new();
    command
        .expect_check()
        .withf(|request| {
            request.patient_id() == PatientId::new(1) && request.new_medications() == ["Warfarin"]
        })
        .times(1)
        .return_once(|_| Ok(vec![warfarin_finding()]));

    let (status, body) = post_check(
        command,
        json!({ "patient_id": patient_id, "new_medications": ["Warfarin"] }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "interactions": [{
                "drug_1": "Warfarin",
                "drug_2": "Aspirin",
                "interaction": "Increased risk of bleeding."
            }]
        })
    );
}

#[rstest]
#[actix_web::test]
async fn empty_result_is_explicit_message() {
    let mut command = MockPrescriptionCheckCommand::new();
    command.expect_check().return_once(|_| Ok(Vec::new()));

    let (status, body) = post_check(
        command,
        json!({ "patient_id": 1, "new_medications": ["Vitamin C"] }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "No interactions found" }));
}

#[rstest]
#[case::missing_patient(json!({ "new_medications": ["Warfarin"] }))]
#[case::blank_patient(json!({ "patient_id": "", "new_medications": ["Warfarin"] }))]
#[case::null_patient(json!({ "patient_id": null, "new_medications": ["Warfarin"] }))]
#[case::empty_medications(json!({ "patient_id": 1, "new_medications": [] }))]
#[case::missing_medications(json!({ "patient_id": 1 }))]
#[actix_web::test]
async fn missing_fields_are_rejected_before_the_command(#[case] body: Value) {
    let mut command = MockPrescriptionCheckCommand::new();
    command.expect_check().times(0);

    let (status, body) = post_check(command, body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["message"], MISSING_FIELDS_MESSAGE);
}

#[rstest]
#[actix_web::test]
async fn non_numeric_patient_id_is_rejected() {
    let mut command = MockPrescriptionCheckCommand::new();
    command.expect_check().times(0);

    let (status, body) = post_check(
        command,
        json!({ "patient_id": "abc", "new_medications": ["Warfarin"] }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["code"], "invalid_patient_id");
}

#[rstest]
#[actix_web::test]
async fn unknown_patient_is_not_found() {
    let mut command = MockPrescriptionCheckCommand::new();
    command
        .expect_check()
        .return_once(|_| Err(Error::not_found("patient 99 not found")));

    let (status, body) = post_check(
        command,
        json!({ "patient_id": 99, "new_medications": ["Warfarin"] }),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
}

#[rstest]
fn response_body_picks_variant_by_emptiness() {
    assert_eq!(
        CheckPrescriptionResponseBody::from(Vec::new()),
        CheckPrescriptionResponseBody::NoInteractions {
            message: NO_INTERACTIONS_MESSAGE.to_owned(),
        }
    );
    assert!(matches!(
        CheckPrescriptionResponseBody::from(vec![warfarin_finding()]),
        CheckPrescriptionResponseBody::Interactions { interactions } if interactions.len() == 1
    ));
}
