//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and never
//! leave it.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{Patient, PatientId, StagedPrescription};

use super::schema::{patients, saved_interactions, staged_prescriptions};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = patients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PatientRow {
    pub id: i64,
    pub name: String,
    pub age: i32,
    pub registered_date: DateTime<Utc>,
    pub medical_condition: String,
    pub remarks: Option<String>,
    pub phone_number: String,
    pub email: String,
    pub current_medications: String,
}

impl From<PatientRow> for Patient {
    fn from(row: PatientRow) -> Self {
        Self {
            id: PatientId::new(row.id),
            name: row.name,
            age: row.age,
            registered_at: row.registered_date,
            medical_condition: row.medical_condition,
            remarks: row.remarks,
            phone_number: row.phone_number,
            email: row.email,
            current_medications: row.current_medications,
        }
    }
}

/// `registered_date` is filled by the column default.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = patients)]
pub(crate) struct NewPatientRow<'a> {
    pub name: &'a str,
    pub age: i32,
    pub medical_condition: &'a str,
    pub remarks: Option<&'a str>,
    pub phone_number: &'a str,
    pub email: &'a str,
    pub current_medications: &'a str,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = saved_interactions)]
pub(crate) struct NewSavedInteractionRow<'a> {
    pub drug_1: &'a str,
    pub drug_2: &'a str,
    pub description: &'a str,
    pub patient_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = staged_prescriptions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct StagedPrescriptionRow {
    pub patient_id: i64,
    pub new_medications: String,
    pub current_medications: String,
}

impl From<StagedPrescriptionRow> for StagedPrescription {
    fn from(row: StagedPrescriptionRow) -> Self {
        Self {
            patient_id: PatientId::new(row.patient_id),
            new_medications: row.new_medications,
            current_medications: row.current_medications,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = staged_prescriptions)]
pub(crate) struct StagedPrescriptionRecord<'a> {
    pub patient_id: i64,
    pub new_medications: &'a str,
    pub current_medications: &'a str,
}
