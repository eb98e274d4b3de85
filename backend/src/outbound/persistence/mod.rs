//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories are thin translators between Diesel rows and domain types.
//! Connections come from a shared `bb8` pool of `diesel-async` connections.
//! Row structs (`models.rs`) and table definitions (`schema.rs`) stay
//! private to this module.
//!
//! # Example
//!
//! ```no_run
//! use medcheck::outbound::persistence::{DbPool, DieselPatientRepository, PoolConfig};
//!
//! # async fn wire() -> Result<(), medcheck::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/medcheck")).await?;
//! let patients = DieselPatientRepository::new(pool);
//! # let _ = patients;
//! # Ok(())
//! # }
//! ```

mod diesel_basic_error_mapping;
mod diesel_helpers;
mod diesel_patient_repository;
mod diesel_prescription_staging_repository;
mod diesel_reference_interaction_repository;
mod diesel_saved_interaction_repository;
mod models;
mod pool;
mod schema;

pub use diesel_patient_repository::DieselPatientRepository;
pub use diesel_prescription_staging_repository::DieselPrescriptionStagingRepository;
pub use diesel_reference_interaction_repository::DieselReferenceInteractionRepository;
pub use diesel_saved_interaction_repository::DieselSavedInteractionRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
