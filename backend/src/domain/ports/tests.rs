//! Fixture adapters behind trait objects, as the server wires them when no
//! infrastructure is configured.

use std::sync::Arc;

use super::*;
use crate::domain::{DrugPair, ErrorCode, PatientDraft, PatientId, StagedPrescription};
use rstest::rstest;

#[rstest]
#[tokio::test]
async fn fixture_staging_stores_nothing() {
    let staging: Arc<dyn PrescriptionStagingRepository> =
        Arc::new(FixturePrescriptionStagingRepository);
    let staged = StagedPrescription::new(PatientId::new(3), &["Warfarin"], "Aspirin");

    staging.put_or_replace(&staged).await.expect("put succeeds");
    let found = staging.find(PatientId::new(3)).await.expect("find succeeds");
    staging.delete(PatientId::new(3)).await.expect("delete succeeds");

    assert!(found.is_none());
}

#[rstest]
#[tokio::test]
async fn fixture_reference_table_is_empty() {
    let reference: Arc<dyn ReferenceInteractionRepository> =
        Arc::new(FixtureReferenceInteractionRepository);

    let found = reference
        .find(&DrugPair::new("Warfarin", "Aspirin"))
        .await
        .expect("lookup succeeds");

    assert!(found.is_none());
}

#[rstest]
#[tokio::test]
async fn fixture_patient_repository_has_no_patients() {
    let repo: Arc<dyn PatientRepository> = Arc::new(FixturePatientRepository);

    assert!(repo.list().await.expect("list succeeds").is_empty());
    assert!(
        repo.find_by_id(PatientId::new(1))
            .await
            .expect("lookup succeeds")
            .is_none()
    );
}

#[rstest]
#[tokio::test]
async fn fixture_patients_query_lists_nothing() {
    let query: Arc<dyn PatientsQuery> = Arc::new(FixturePatientsQuery);
    assert!(query.list_patients().await.expect("list succeeds").is_empty());
}

#[rstest]
#[tokio::test]
async fn fixture_registration_reports_unconfigured_store() {
    let registration: Arc<dyn PatientRegistration> = Arc::new(FixturePatientRegistration);

    let err = registration
        .register_patient(PatientDraft::default())
        .await
        .expect_err("fixture rejects registration");

    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}
