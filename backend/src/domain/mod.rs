//! Domain primitives, services, and ports.
//!
//! Purpose: model patients, staged prescriptions, and drug interactions
//! independently of HTTP and storage. Inbound adapters call the driving
//! ports in [`ports`]; outbound adapters implement the driven ones.
//!
//! Public surface:
//! - [`Error`] and [`ErrorCode`]: transport-agnostic failure payload.
//! - [`DrugPair`]: normalised identity of two drug names.
//! - [`InteractionResolver`]: saved → reference → oracle pipeline.
//! - [`PrescriptionCheckService`] and [`PatientsService`]: use-cases.

pub mod drug_pair;
pub mod error;
pub mod interaction;
pub mod interaction_resolver;
pub mod patient;
pub mod patient_locks;
pub mod patients_service;
pub mod ports;
pub mod prescription_check_service;
pub mod staged_prescription;
pub mod trace_id;

pub use self::drug_pair::DrugPair;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::interaction::{
    InteractionFinding, InteractionSource, InteractionVerdict, NEGATIVE_SENTINEL,
    SavedInteractionRecord, is_negative_sentinel,
};
pub use self::interaction_resolver::{InteractionResolver, Resolution};
pub use self::patient::{
    NewPatient, PHONE_NUMBER_MAX, Patient, PatientDraft, PatientId, PatientValidationError,
};
pub use self::patient_locks::{PatientLockGuard, PatientLocks};
pub use self::patients_service::PatientsService;
pub use self::prescription_check_service::PrescriptionCheckService;
pub use self::staged_prescription::{
    MEDICATION_SEPARATOR, StagedPrescription, join_medications, split_medications,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
