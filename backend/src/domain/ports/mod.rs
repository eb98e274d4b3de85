//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories, the oracle) are implemented by outbound
//! adapters. Driving ports (commands, queries) are implemented by domain
//! services and called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod interaction_oracle;
mod patient_registration;
mod patient_repository;
mod patients_query;
mod prescription_check;
mod prescription_staging_repository;
mod reference_interaction_repository;
mod saved_interaction_repository;

#[cfg(test)]
pub use interaction_oracle::MockInteractionOracle;
pub use interaction_oracle::{FixtureInteractionOracle, InteractionOracle, InteractionOracleError};
#[cfg(test)]
pub use patient_registration::MockPatientRegistration;
pub use patient_registration::{FixturePatientRegistration, PatientRegistration};
#[cfg(test)]
pub use patient_repository::MockPatientRepository;
pub use patient_repository::{
    FixturePatientRepository, PatientRepository, PatientRepositoryError,
};
#[cfg(test)]
pub use patients_query::MockPatientsQuery;
pub use patients_query::{FixturePatientsQuery, PatientsQuery};
#[cfg(test)]
pub use prescription_check::MockPrescriptionCheckCommand;
pub use prescription_check::{
    FixturePrescriptionCheckCommand, MISSING_FIELDS_MESSAGE, PrescriptionCheckCommand,
    PrescriptionCheckRequest,
};
#[cfg(test)]
pub use prescription_staging_repository::MockPrescriptionStagingRepository;
pub use prescription_staging_repository::{
    FixturePrescriptionStagingRepository, PrescriptionStagingRepository,
    PrescriptionStagingRepositoryError,
};
#[cfg(test)]
pub use reference_interaction_repository::MockReferenceInteractionRepository;
pub use reference_interaction_repository::{
    FixtureReferenceInteractionRepository, ReferenceInteractionRepository,
    ReferenceInteractionRepositoryError,
};
#[cfg(test)]
pub use saved_interaction_repository::MockSavedInteractionRepository;
pub use saved_interaction_repository::{
    FixtureSavedInteractionRepository, SavedInteractionRepository,
    SavedInteractionRepositoryError,
};

#[cfg(test)]
mod tests;
