//! Integration tests for `DieselSavedInteractionRepository`.

use chrono::{DateTime, Duration, Utc};
use medcheck::domain::ports::SavedInteractionRepository;
use medcheck::domain::{DrugPair, NEGATIVE_SENTINEL, SavedInteractionRecord};
use medcheck::outbound::persistence::DieselSavedInteractionRepository;
use rstest::{fixture, rstest};

mod support;

use support::{DieselContext, execute_sql, handle_cluster_setup_failure, setup_context};

#[fixture]
fn repo_context() -> Option<DieselContext> {
    match setup_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn negative(pair: DrugPair, created_at: DateTime<Utc>) -> SavedInteractionRecord {
    SavedInteractionRecord::no_known_interaction(pair, created_at)
}

fn unattributed(pair: DrugPair, text: &str, created_at: DateTime<Utc>) -> SavedInteractionRecord {
    SavedInteractionRecord {
        pair,
        description: text.to_owned(),
        patient_id: None,
        created_at,
    }
}

#[rstest]
fn newest_row_wins(repo_context: Option<DieselContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: newest_row_wins skipped");
        return;
    };
    let repository = DieselSavedInteractionRepository::new(context.pool.clone());
    let pair = DrugPair::new("Vitamin C", "Zinc");
    let now = Utc::now();

    let found = context.runtime.block_on(async {
        repository
            .record(&unattributed(pair.clone(), "Reduced zinc uptake.", now))
            .await
            .expect("newer row");
        repository
            .record(&negative(pair.clone(), now - Duration::hours(1)))
            .await
            .expect("older row");
        repository.find(&pair).await.expect("lookup")
    });

    assert_eq!(found.as_deref(), Some("Reduced zinc uptake."));
}

#[rstest]
fn equal_timestamps_fall_back_to_highest_id(repo_context: Option<DieselContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: equal_timestamps_fall_back_to_highest_id skipped");
        return;
    };
    let repository = DieselSavedInteractionRepository::new(context.pool.clone());
    let pair = DrugPair::new("Warfarin", "Aspirin");
    let at = DateTime::<Utc>::UNIX_EPOCH;

    let found = context.runtime.block_on(async {
        repository
            .record(&negative(pair.clone(), at))
            .await
            .expect("first row");
        repository
            .record(&unattributed(pair.clone(), "Bleeding risk.", at))
            .await
            .expect("second row");
        repository.find(&pair).await.expect("lookup")
    });

    assert_eq!(found.as_deref(), Some("Bleeding risk."));
}

#[rstest]
fn lookup_ignores_case_of_stored_names(repo_context: Option<DieselContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: lookup_ignores_case_of_stored_names skipped");
        return;
    };
    execute_sql(
        &context.database_url,
        concat!(
            "INSERT INTO saved_interactions (drug_1, drug_2, description, created_at) ",
            "VALUES ('Aspirin', 'WARFARIN', 'Legacy mixed-case row.', now())"
        ),
    )
    .expect("legacy row inserted");
    let repository = DieselSavedInteractionRepository::new(context.pool.clone());

    let (found, reversed, unrelated) = context.runtime.block_on(async {
        (
            repository
                .find(&DrugPair::new("warfarin", " aspirin"))
                .await
                .expect("lookup"),
            repository
                .find(&DrugPair::new("Aspirin", "Warfarin"))
                .await
                .expect("lookup"),
            repository
                .find(&DrugPair::new("Aspirin", "Zinc"))
                .await
                .expect("lookup"),
        )
    });

    assert_eq!(found.as_deref(), Some("Legacy mixed-case row."));
    assert_eq!(reversed, found);
    assert!(unrelated.is_none());
}

#[rstest]
fn negative_rows_store_the_sentinel_without_patient(repo_context: Option<DieselContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: negative_rows_store_the_sentinel_without_patient skipped");
        return;
    };
    let repository = DieselSavedInteractionRepository::new(context.pool.clone());
    let pair = DrugPair::new("Zinc", "Vitamin C");

    let found = context.runtime.block_on(async {
        repository
            .record(&negative(pair.clone(), Utc::now()))
            .await
            .expect("negative row");
        repository.find(&pair).await.expect("lookup")
    });

    assert_eq!(found.as_deref(), Some(NEGATIVE_SENTINEL));
}
