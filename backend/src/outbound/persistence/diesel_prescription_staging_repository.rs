//! PostgreSQL-backed `PrescriptionStagingRepository`.
//!
//! `staged_prescriptions` is keyed by patient, so staging is an upsert.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PrescriptionStagingRepository, PrescriptionStagingRepositoryError};
use crate::domain::{PatientId, StagedPrescription};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{StagedPrescriptionRecord, StagedPrescriptionRow};
use super::pool::{DbPool, PoolError};
use super::schema::staged_prescriptions;

/// Diesel-backed staging store.
#[derive(Clone)]
pub struct DieselPrescriptionStagingRepository {
    pool: DbPool,
}

impl DieselPrescriptionStagingRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PrescriptionStagingRepositoryError {
    map_basic_pool_error(error, PrescriptionStagingRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> PrescriptionStagingRepositoryError {
    map_basic_diesel_error(
        error,
        PrescriptionStagingRepositoryError::query,
        PrescriptionStagingRepositoryError::connection,
    )
}

#[async_trait]
impl PrescriptionStagingRepository for DieselPrescriptionStagingRepository {
    async fn put_or_replace(
        &self,
        staged: &StagedPrescription,
    ) -> Result<(), PrescriptionStagingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let record = StagedPrescriptionRecord {
            patient_id: staged.patient_id.get(),
            new_medications: staged.new_medications.as_str(),
            current_medications: staged.current_medications.as_str(),
        };
        diesel::insert_into(staged_prescriptions::table)
            .values(&record)
            .on_conflict(staged_prescriptions::patient_id)
            .do_update()
            .set((
                staged_prescriptions::new_medications
                    .eq(excluded(staged_prescriptions::new_medications)),
                staged_prescriptions::current_medications
                    .eq(excluded(staged_prescriptions::current_medications)),
            ))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find(
        &self,
        patient_id: PatientId,
    ) -> Result<Option<StagedPrescription>, PrescriptionStagingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<StagedPrescriptionRow> = staged_prescriptions::table
            .filter(staged_prescriptions::patient_id.eq(patient_id.get()))
            .select(StagedPrescriptionRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(StagedPrescription::from))
    }

    async fn delete(
        &self,
        patient_id: PatientId,
    ) -> Result<(), PrescriptionStagingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(
            staged_prescriptions::table
                .filter(staged_prescriptions::patient_id.eq(patient_id.get())),
        )
        .execute(&mut conn)
        .await
        .map(|_| ())
        .map_err(map_diesel_error)
    }
}
