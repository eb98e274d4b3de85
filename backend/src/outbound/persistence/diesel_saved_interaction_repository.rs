//! PostgreSQL-backed `SavedInteractionRepository`.
//!
//! Rows are only ever appended. Lookups return the newest matching row.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{SavedInteractionRepository, SavedInteractionRepositoryError};
use crate::domain::{DrugPair, SavedInteractionRecord};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::diesel_helpers::lower;
use super::models::NewSavedInteractionRow;
use super::pool::{DbPool, PoolError};
use super::schema::saved_interactions;

/// Diesel-backed saved-interaction log.
#[derive(Clone)]
pub struct DieselSavedInteractionRepository {
    pool: DbPool,
}

impl DieselSavedInteractionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> SavedInteractionRepositoryError {
    map_basic_pool_error(error, SavedInteractionRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> SavedInteractionRepositoryError {
    map_basic_diesel_error(
        error,
        SavedInteractionRepositoryError::query,
        SavedInteractionRepositoryError::connection,
    )
}

#[async_trait]
impl SavedInteractionRepository for DieselSavedInteractionRepository {
    async fn find(
        &self,
        pair: &DrugPair,
    ) -> Result<Option<String>, SavedInteractionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        saved_interactions::table
            .filter(lower(saved_interactions::drug_1).eq(pair.low()))
            .filter(lower(saved_interactions::drug_2).eq(pair.high()))
            .order((
                saved_interactions::created_at.desc(),
                saved_interactions::id.desc(),
            ))
            .select(saved_interactions::description)
            .first::<String>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)
    }

    async fn record(
        &self,
        record: &SavedInteractionRecord,
    ) -> Result<(), SavedInteractionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewSavedInteractionRow {
            drug_1: record.pair.low(),
            drug_2: record.pair.high(),
            description: record.description.as_str(),
            patient_id: record.patient_id.map(|id| id.get()),
            created_at: record.created_at,
        };
        diesel::insert_into(saved_interactions::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}
