//! Diesel table definitions for the PostgreSQL schema.
//!
//! Migrations are managed outside this crate; these definitions must match
//! the deployed tables. `diesel print-schema` regenerates them from a live
//! database.

diesel::table! {
    /// Registered patients.
    patients (id) {
        id -> Int8,
        name -> Varchar,
        age -> Int4,
        registered_date -> Timestamptz,
        medical_condition -> Varchar,
        remarks -> Nullable<Text>,
        /// Unique, at most 15 characters.
        phone_number -> Varchar,
        /// Unique.
        email -> Varchar,
        /// Comma-separated medication names.
        current_medications -> Text,
    }
}

diesel::table! {
    /// Curated reference interactions.
    ///
    /// `drug_1` and `drug_2` hold the normalised pair in sorted order and are
    /// unique together.
    drug_interactions (id) {
        id -> Int8,
        drug_1 -> Varchar,
        drug_2 -> Varchar,
        description -> Text,
        source -> Nullable<Varchar>,
    }
}

diesel::table! {
    /// Append-only log of resolved interactions, including negative answers.
    saved_interactions (id) {
        id -> Int8,
        drug_1 -> Varchar,
        drug_2 -> Varchar,
        description -> Text,
        patient_id -> Nullable<Int8>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// One live staged prescription per patient.
    staged_prescriptions (patient_id) {
        patient_id -> Int8,
        new_medications -> Text,
        current_medications -> Text,
    }
}

diesel::joinable!(saved_interactions -> patients (patient_id));
diesel::joinable!(staged_prescriptions -> patients (patient_id));

diesel::allow_tables_to_appear_in_same_query!(
    patients,
    drug_interactions,
    saved_interactions,
    staged_prescriptions,
);
