//! In-memory implementations of the driven ports.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{
    InteractionOracle, InteractionOracleError, PatientRepository, PatientRepositoryError,
    PrescriptionStagingRepository, PrescriptionStagingRepositoryError,
    ReferenceInteractionRepository, ReferenceInteractionRepositoryError,
    SavedInteractionRepository, SavedInteractionRepositoryError,
};
use crate::domain::{
    DrugPair, NewPatient, Patient, PatientId, SavedInteractionRecord, StagedPrescription,
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Patient store keyed by identifier.
#[derive(Debug, Default)]
pub struct InMemoryPatients {
    rows: Mutex<BTreeMap<PatientId, Patient>>,
}

impl InMemoryPatients {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a patient, replacing any with the same identifier.
    pub fn insert(&self, patient: Patient) {
        lock(&self.rows).insert(patient.id, patient);
    }
}

#[async_trait]
impl PatientRepository for InMemoryPatients {
    async fn find_by_id(&self, id: PatientId) -> Result<Option<Patient>, PatientRepositoryError> {
        Ok(lock(&self.rows).get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Patient>, PatientRepositoryError> {
        Ok(lock(&self.rows).values().cloned().collect())
    }

    async fn create(&self, patient: &NewPatient) -> Result<Patient, PatientRepositoryError> {
        let mut rows = lock(&self.rows);
        if rows
            .values()
            .any(|row| row.phone_number == patient.phone_number())
        {
            return Err(PatientRepositoryError::duplicate("phone_number"));
        }
        if rows.values().any(|row| row.email == patient.email()) {
            return Err(PatientRepositoryError::duplicate("email"));
        }
        let next = rows.keys().next_back().map_or(1, |id| id.get() + 1);
        let created = patient
            .clone()
            .into_patient(PatientId::new(next), DateTime::<Utc>::UNIX_EPOCH);
        rows.insert(created.id, created.clone());
        Ok(created)
    }
}

/// Append-only saved-interaction log.
#[derive(Debug, Default)]
pub struct InMemorySavedInteractions {
    records: Mutex<Vec<SavedInteractionRecord>>,
}

impl InMemorySavedInteractions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record as if it had been saved earlier.
    pub fn seed(&self, record: SavedInteractionRecord) {
        lock(&self.records).push(record);
    }

    /// Snapshot of every stored record in insertion order.
    pub fn records(&self) -> Vec<SavedInteractionRecord> {
        lock(&self.records).clone()
    }
}

#[async_trait]
impl SavedInteractionRepository for InMemorySavedInteractions {
    async fn find(&self, pair: &DrugPair) -> Result<Option<String>, SavedInteractionRepositoryError> {
        Ok(lock(&self.records)
            .iter()
            .rev()
            .find(|record| &record.pair == pair)
            .map(|record| record.description.clone()))
    }

    async fn record(
        &self,
        record: &SavedInteractionRecord,
    ) -> Result<(), SavedInteractionRepositoryError> {
        lock(&self.records).push(record.clone());
        Ok(())
    }
}

/// Read-only reference table.
#[derive(Debug, Default)]
pub struct InMemoryReferenceInteractions {
    entries: HashMap<DrugPair, String>,
}

impl InMemoryReferenceInteractions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a curated entry; the pair is normalised.
    #[must_use]
    pub fn with_entry(mut self, drug_1: &str, drug_2: &str, description: &str) -> Self {
        self.entries
            .insert(DrugPair::new(drug_1, drug_2), description.to_owned());
        self
    }
}

#[async_trait]
impl ReferenceInteractionRepository for InMemoryReferenceInteractions {
    async fn find(
        &self,
        pair: &DrugPair,
    ) -> Result<Option<String>, ReferenceInteractionRepositoryError> {
        Ok(self.entries.get(pair).cloned())
    }
}

/// Staging store with at most one row per patient.
#[derive(Debug, Default)]
pub struct InMemoryStaging {
    rows: Mutex<HashMap<PatientId, StagedPrescription>>,
}

impl InMemoryStaging {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, patient_id: PatientId) -> bool {
        lock(&self.rows).contains_key(&patient_id)
    }
}

#[async_trait]
impl PrescriptionStagingRepository for InMemoryStaging {
    async fn put_or_replace(
        &self,
        staged: &StagedPrescription,
    ) -> Result<(), PrescriptionStagingRepositoryError> {
        lock(&self.rows).insert(staged.patient_id, staged.clone());
        Ok(())
    }

    async fn find(
        &self,
        patient_id: PatientId,
    ) -> Result<Option<StagedPrescription>, PrescriptionStagingRepositoryError> {
        Ok(lock(&self.rows).get(&patient_id).cloned())
    }

    async fn delete(&self, patient_id: PatientId) -> Result<(), PrescriptionStagingRepositoryError> {
        lock(&self.rows).remove(&patient_id);
        Ok(())
    }
}

/// Oracle answering from a script and counting every query.
#[derive(Debug, Default)]
pub struct ScriptedOracle {
    answers: Mutex<HashMap<DrugPair, String>>,
    calls: AtomicUsize,
}

impl ScriptedOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the answer for a pair in either order.
    pub fn answer(&self, drug_1: &str, drug_2: &str, text: &str) {
        lock(&self.answers).insert(DrugPair::new(drug_1, drug_2), text.to_owned());
    }

    /// Number of queries received so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InteractionOracle for ScriptedOracle {
    async fn query(
        &self,
        drug_1: &str,
        drug_2: &str,
    ) -> Result<Option<String>, InteractionOracleError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(lock(&self.answers)
            .get(&DrugPair::new(drug_1, drug_2))
            .cloned())
    }
}
