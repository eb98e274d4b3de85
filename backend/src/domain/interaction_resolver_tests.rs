//! Tests for the interaction resolution pipeline.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{
    InteractionOracleError, MockInteractionOracle, MockReferenceInteractionRepository,
    MockSavedInteractionRepository,
};
use crate::domain::{ErrorCode, NEGATIVE_SENTINEL};

type MockResolver = InteractionResolver<
    MockSavedInteractionRepository,
    MockReferenceInteractionRepository,
    MockInteractionOracle,
>;

struct FixtureClock(DateTime<Utc>);

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

#[fixture]
fn saved() -> MockSavedInteractionRepository {
    MockSavedInteractionRepository::new()
}

#[fixture]
fn reference() -> MockReferenceInteractionRepository {
    MockReferenceInteractionRepository::new()
}

#[fixture]
fn oracle() -> MockInteractionOracle {
    MockInteractionOracle::new()
}

fn make_resolver(
    saved: MockSavedInteractionRepository,
    reference: MockReferenceInteractionRepository,
    oracle: MockInteractionOracle,
) -> MockResolver {
    InteractionResolver::new(
        Arc::new(saved),
        Arc::new(reference),
        Arc::new(oracle),
        Arc::new(FixtureClock(fixture_timestamp())),
    )
}

fn staged(new: &str, current: &str) -> StagedPrescription {
    StagedPrescription {
        patient_id: PatientId::new(1),
        new_medications: new.to_owned(),
        current_medications: current.to_owned(),
    }
}

#[rstest]
#[tokio::test]
async fn saved_positive_short_circuits(
    mut saved: MockSavedInteractionRepository,
    mut reference: MockReferenceInteractionRepository,
    mut oracle: MockInteractionOracle,
) {
    saved
        .expect_find()
        .times(1)
        .return_once(|_| Ok(Some("Saved: bleeding".to_owned())));
    saved.expect_record().times(0);
    reference.expect_find().times(0);
    oracle.expect_query().times(0);
    let resolver = make_resolver(saved, reference, oracle);

    let resolution = resolver
        .resolve_pair("Warfarin", "Aspirin", PatientId::new(1))
        .await
        .expect("resolution succeeds");

    assert_eq!(
        resolution,
        Some(Resolution {
            description: "Saved: bleeding".to_owned(),
            source: InteractionSource::Saved,
        })
    );
}

#[rstest]
#[tokio::test]
async fn reference_answers_when_nothing_saved(
    mut saved: MockSavedInteractionRepository,
    mut reference: MockReferenceInteractionRepository,
    mut oracle: MockInteractionOracle,
) {
    saved.expect_find().times(1).return_once(|_| Ok(None));
    saved.expect_record().times(0);
    reference
        .expect_find()
        .withf(|pair| pair.low() == "aspirin" && pair.high() == "warfarin")
        .times(1)
        .return_once(|_| Ok(Some("Increased bleeding risk.".to_owned())));
    oracle.expect_query().times(0);
    let resolver = make_resolver(saved, reference, oracle);

    let findings = resolver
        .resolve(&staged(" Warfarin ", "ASPIRIN"))
        .await
        .expect("resolution succeeds");

    assert_eq!(
        findings,
        vec![InteractionFinding {
            drug_1: "Warfarin".to_owned(),
            drug_2: "ASPIRIN".to_owned(),
            interaction: "Increased bleeding risk.".to_owned(),
        }]
    );
}

#[rstest]
#[tokio::test]
async fn saved_negative_still_consults_reference(
    mut saved: MockSavedInteractionRepository,
    mut reference: MockReferenceInteractionRepository,
    mut oracle: MockInteractionOracle,
) {
    saved
        .expect_find()
        .return_once(|_| Ok(Some(NEGATIVE_SENTINEL.to_owned())));
    reference
        .expect_find()
        .times(1)
        .return_once(|_| Ok(Some("Curated description".to_owned())));
    oracle.expect_query().times(0);
    let resolver = make_resolver(saved, reference, oracle);

    let resolution = resolver
        .resolve_pair("a", "b", PatientId::new(1))
        .await
        .expect("resolution succeeds")
        .expect("reference answers");

    assert_eq!(resolution.source, InteractionSource::Reference);
}

#[rstest]
#[tokio::test]
async fn saved_negative_never_calls_oracle(
    mut saved: MockSavedInteractionRepository,
    mut reference: MockReferenceInteractionRepository,
    mut oracle: MockInteractionOracle,
) {
    saved
        .expect_find()
        .return_once(|_| Ok(Some(format!("{NEGATIVE_SENTINEL} between a and b."))));
    saved.expect_record().times(0);
    reference.expect_find().return_once(|_| Ok(None));
    oracle.expect_query().times(0);
    let resolver = make_resolver(saved, reference, oracle);

    let findings = resolver
        .resolve(&staged("a", "b"))
        .await
        .expect("resolution succeeds");

    assert!(findings.is_empty());
}

#[rstest]
#[tokio::test]
async fn oracle_positive_is_reported_and_attributed(
    mut saved: MockSavedInteractionRepository,
    mut reference: MockReferenceInteractionRepository,
    mut oracle: MockInteractionOracle,
) {
    saved.expect_find().return_once(|_| Ok(None));
    saved
        .expect_record()
        .withf(|record| {
            record.pair == DrugPair::new("Zinc", "Ciprofloxacin")
                && record.description == "Zinc reduces absorption."
                && record.patient_id == Some(PatientId::new(1))
                && record.created_at == fixture_timestamp()
        })
        .times(1)
        .return_once(|_| Ok(()));
    reference.expect_find().return_once(|_| Ok(None));
    oracle
        .expect_query()
        .withf(|a, b| a == "Zinc" && b == "Ciprofloxacin")
        .times(1)
        .return_once(|_, _| Ok(Some("Zinc reduces absorption.".to_owned())));
    let resolver = make_resolver(saved, reference, oracle);

    let findings = resolver
        .resolve(&staged("Zinc", "Ciprofloxacin"))
        .await
        .expect("resolution succeeds");

    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].interaction, "Zinc reduces absorption.");
}

#[rstest]
#[tokio::test]
async fn oracle_negative_is_cached_without_patient(
    mut saved: MockSavedInteractionRepository,
    mut reference: MockReferenceInteractionRepository,
    mut oracle: MockInteractionOracle,
) {
    saved.expect_find().return_once(|_| Ok(None));
    saved
        .expect_record()
        .withf(|record| record.description == NEGATIVE_SENTINEL && record.patient_id.is_none())
        .times(1)
        .return_once(|_| Ok(()));
    reference.expect_find().return_once(|_| Ok(None));
    oracle.expect_query().return_once(|_, _| {
        Ok(Some(format!(
            "{NEGATIVE_SENTINEL} between paracetamol and vitamin c."
        )))
    });
    let resolver = make_resolver(saved, reference, oracle);

    let findings = resolver
        .resolve(&staged("Paracetamol", "Vitamin C"))
        .await
        .expect("resolution succeeds");

    assert!(findings.is_empty());
}

#[rstest]
#[case::no_answer(Ok(None))]
#[case::transport(Err(InteractionOracleError::transport("connection reset")))]
#[case::timeout(Err(InteractionOracleError::timeout("deadline elapsed")))]
#[case::status(Err(InteractionOracleError::status(500_u16, "upstream")))]
#[tokio::test]
async fn missing_oracle_answer_reports_and_caches_nothing(
    mut saved: MockSavedInteractionRepository,
    mut reference: MockReferenceInteractionRepository,
    mut oracle: MockInteractionOracle,
    #[case] outcome: Result<Option<String>, InteractionOracleError>,
) {
    saved.expect_find().return_once(|_| Ok(None));
    saved.expect_record().times(0);
    reference.expect_find().return_once(|_| Ok(None));
    oracle.expect_query().times(1).return_once(move |_, _| outcome);
    let resolver = make_resolver(saved, reference, oracle);

    let findings = resolver
        .resolve(&staged("x", "y"))
        .await
        .expect("oracle failures never propagate");

    assert!(findings.is_empty());
}

#[rstest]
#[tokio::test]
async fn blank_entries_are_skipped(
    mut saved: MockSavedInteractionRepository,
    mut reference: MockReferenceInteractionRepository,
    mut oracle: MockInteractionOracle,
) {
    saved.expect_find().times(2).returning(|_| Ok(None));
    reference
        .expect_find()
        .times(2)
        .returning(|pair| Ok(Some(format!("{pair}"))));
    oracle.expect_query().times(0);
    let resolver = make_resolver(saved, reference, oracle);

    let findings = resolver
        .resolve(&staged("Warfarin, ,Zinc", ",Aspirin,"))
        .await
        .expect("resolution succeeds");

    let pairs: Vec<_> = findings
        .iter()
        .map(|f| (f.drug_1.as_str(), f.drug_2.as_str()))
        .collect();
    assert_eq!(pairs, [("Warfarin", "Aspirin"), ("Zinc", "Aspirin")]);
}

#[rstest]
#[case(SavedInteractionRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(SavedInteractionRepositoryError::query("syntax"), ErrorCode::InternalError)]
#[tokio::test]
async fn saved_store_failures_propagate(
    mut saved: MockSavedInteractionRepository,
    reference: MockReferenceInteractionRepository,
    oracle: MockInteractionOracle,
    #[case] failure: SavedInteractionRepositoryError,
    #[case] expected: ErrorCode,
) {
    saved.expect_find().return_once(move |_| Err(failure));
    let resolver = make_resolver(saved, reference, oracle);

    let err = resolver
        .resolve(&staged("a", "b"))
        .await
        .expect_err("store failure propagates");

    assert_eq!(err.code(), expected);
}

#[rstest]
#[tokio::test]
async fn reference_failures_propagate(
    mut saved: MockSavedInteractionRepository,
    mut reference: MockReferenceInteractionRepository,
    oracle: MockInteractionOracle,
) {
    saved.expect_find().return_once(|_| Ok(None));
    reference
        .expect_find()
        .return_once(|_| Err(ReferenceInteractionRepositoryError::connection("pool timeout")));
    let resolver = make_resolver(saved, reference, oracle);

    let err = resolver
        .resolve_pair("a", "b", PatientId::new(1))
        .await
        .expect_err("reference failure propagates");

    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}

#[rstest]
#[tokio::test]
async fn repeated_reference_lookups_are_stable_and_write_nothing(
    mut saved: MockSavedInteractionRepository,
    mut reference: MockReferenceInteractionRepository,
    mut oracle: MockInteractionOracle,
) {
    saved.expect_find().times(2).returning(|_| Ok(None));
    saved.expect_record().times(0);
    reference
        .expect_find()
        .withf(|pair| *pair == DrugPair::new("Aspirin", "Warfarin"))
        .times(2)
        .returning(|_| Ok(Some("Increased bleeding risk.".to_owned())));
    oracle.expect_query().times(0);
    let resolver = make_resolver(saved, reference, oracle);
    let prescription = staged("Aspirin", "Warfarin");

    let first = resolver
        .resolve(&prescription)
        .await
        .expect("first resolution succeeds");
    let second = resolver
        .resolve(&prescription)
        .await
        .expect("second resolution succeeds");

    assert_eq!(
        first,
        vec![InteractionFinding {
            drug_1: "Aspirin".to_owned(),
            drug_2: "Warfarin".to_owned(),
            interaction: "Increased bleeding risk.".to_owned(),
        }]
    );
    assert_eq!(first, second);
}
