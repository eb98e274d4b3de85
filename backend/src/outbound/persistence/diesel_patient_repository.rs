//! PostgreSQL-backed `PatientRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PatientRepository, PatientRepositoryError};
use crate::domain::{NewPatient, Patient, PatientId};

use super::diesel_basic_error_mapping::{
    map_basic_diesel_error, map_basic_pool_error, unique_violation_constraint,
};
use super::models::{NewPatientRow, PatientRow};
use super::pool::{DbPool, PoolError};
use super::schema::patients;

/// Diesel-backed patient store.
#[derive(Clone)]
pub struct DieselPatientRepository {
    pool: DbPool,
}

impl DieselPatientRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PatientRepositoryError {
    map_basic_pool_error(error, PatientRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> PatientRepositoryError {
    if let Some(field) = unique_violation_constraint(&error).and_then(duplicate_field) {
        return PatientRepositoryError::duplicate(field);
    }
    map_basic_diesel_error(
        error,
        PatientRepositoryError::query,
        PatientRepositoryError::connection,
    )
}

/// Field guarded by a unique constraint, derived from its name.
fn duplicate_field(constraint: &str) -> Option<&'static str> {
    if constraint.contains("phone_number") {
        Some("phone_number")
    } else if constraint.contains("email") {
        Some("email")
    } else {
        None
    }
}

#[async_trait]
impl PatientRepository for DieselPatientRepository {
    async fn find_by_id(&self, id: PatientId) -> Result<Option<Patient>, PatientRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<PatientRow> = patients::table
            .filter(patients::id.eq(id.get()))
            .select(PatientRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(Patient::from))
    }

    async fn list(&self) -> Result<Vec<Patient>, PatientRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<PatientRow> = patients::table
            .order(patients::id.asc())
            .select(PatientRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Patient::from).collect())
    }

    async fn create(&self, patient: &NewPatient) -> Result<Patient, PatientRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewPatientRow {
            name: patient.name(),
            age: patient.age(),
            medical_condition: patient.medical_condition(),
            remarks: patient.remarks(),
            phone_number: patient.phone_number(),
            email: patient.email(),
            current_medications: patient.current_medications(),
        };
        let stored: PatientRow = diesel::insert_into(patients::table)
            .values(&row)
            .returning(PatientRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(Patient::from(stored))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    #[rstest]
    #[case("patients_phone_number_key", Some("phone_number"))]
    #[case("patients_email_key", Some("email"))]
    #[case("patients_pkey", None)]
    fn maps_constraint_names(#[case] constraint: &str, #[case] expected: Option<&str>) {
        assert_eq!(duplicate_field(constraint), expected);
    }

    #[rstest]
    fn unnamed_unique_violation_is_query_error() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key value violates unique constraint".to_owned()),
        );
        assert!(matches!(
            map_diesel_error(error),
            PatientRepositoryError::Query { .. }
        ));
    }
}
