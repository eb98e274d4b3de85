//! PostgreSQL-backed `ReferenceInteractionRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::DrugPair;
use crate::domain::ports::{ReferenceInteractionRepository, ReferenceInteractionRepositoryError};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::diesel_helpers::lower;
use super::pool::{DbPool, PoolError};
use super::schema::drug_interactions;

/// Diesel-backed reader for the curated `drug_interactions` table.
#[derive(Clone)]
pub struct DieselReferenceInteractionRepository {
    pool: DbPool,
}

impl DieselReferenceInteractionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ReferenceInteractionRepositoryError {
    map_basic_pool_error(error, ReferenceInteractionRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ReferenceInteractionRepositoryError {
    map_basic_diesel_error(
        error,
        ReferenceInteractionRepositoryError::query,
        ReferenceInteractionRepositoryError::connection,
    )
}

#[async_trait]
impl ReferenceInteractionRepository for DieselReferenceInteractionRepository {
    async fn find(
        &self,
        pair: &DrugPair,
    ) -> Result<Option<String>, ReferenceInteractionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        drug_interactions::table
            .filter(lower(drug_interactions::drug_1).eq(pair.low()))
            .filter(lower(drug_interactions::drug_2).eq(pair.high()))
            .order(drug_interactions::id.asc())
            .select(drug_interactions::description)
            .first::<String>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)
    }
}
