//! Tests for domain error construction and serialisation.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::not_found("missing"), ErrorCode::NotFound)]
#[case(Error::service_unavailable("down"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
fn try_with_trace_id_rejects_empty_values() {
    let result = Error::invalid_request("bad").try_with_trace_id(" ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyTraceId)));
}

#[rstest]
fn trace_id_is_absent_out_of_scope() {
    assert!(Error::internal("boom").trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn new_captures_trace_id_in_scope(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id.parse().expect("valid UUID");
    let error = TraceId::scope(trace_id, async move { Error::not_found("patient not found") }).await;

    assert_eq!(error.trace_id(), Some(expected_trace_id.as_str()));
}

#[rstest]
#[tokio::test]
async fn deserialising_ignores_ambient_trace(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id.parse().expect("valid UUID");
    let payload = json!({ "code": "not_found", "message": "missing" });

    let error: Error = TraceId::scope(trace_id, async move {
        serde_json::from_value(payload).expect("payload decodes")
    })
    .await;

    assert!(error.trace_id().is_none());
}

#[rstest]
fn serialises_with_camel_case_keys(expected_trace_id: String) {
    let error = Error::invalid_request("Patient ID and new medications are required.")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({ "field": "patient_id", "code": "missing" }));

    let value = serde_json::to_value(&error).expect("error serialises");

    assert_eq!(
        value,
        json!({
            "code": "invalid_request",
            "message": "Patient ID and new medications are required.",
            "traceId": expected_trace_id,
            "details": { "field": "patient_id", "code": "missing" },
        })
    );
}

#[rstest]
fn serialisation_omits_absent_optionals() {
    let value = serde_json::to_value(Error::service_unavailable("database unavailable"))
        .expect("error serialises");

    assert_eq!(
        value,
        json!({ "code": "service_unavailable", "message": "database unavailable" })
    );
}

#[rstest]
fn deserialising_rejects_blank_messages() {
    let payload = json!({ "code": "internal_error", "message": "" });
    let result = serde_json::from_value::<Error>(payload);
    assert!(result.is_err());
}

#[rstest]
#[case(ErrorCode::NotFound, "Not found")]
#[case(ErrorCode::InternalError, "Internal server error")]
fn blank_messages_fall_back_per_code(#[case] code: ErrorCode, #[case] expected: &str) {
    assert_eq!(Error::new(code, "  ").message(), expected);
}

#[rstest]
fn blank_trace_id_is_ignored(expected_trace_id: String) {
    let error = Error::not_found("missing")
        .with_trace_id(expected_trace_id.clone())
        .with_trace_id("  ");
    assert_eq!(error.trace_id(), Some(expected_trace_id.as_str()));
}
