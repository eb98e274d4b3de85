//! Per-patient mutual exclusion for staged prescriptions.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use super::PatientId;

/// Guard held while a patient's staged prescription is in use.
pub type PatientLockGuard = OwnedMutexGuard<()>;

/// Registry of async locks keyed by patient.
///
/// Entries no longer held by any caller are pruned on the next acquisition.
#[derive(Debug, Default)]
pub struct PatientLocks {
    locks: Mutex<HashMap<PatientId, Arc<AsyncMutex<()>>>>,
}

impl PatientLocks {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to the patient's staging slot.
    pub async fn lock(&self, patient_id: PatientId) -> PatientLockGuard {
        let slot = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            locks.retain(|id, slot| *id == patient_id || Arc::strong_count(slot) > 1);
            Arc::clone(locks.entry(patient_id).or_default())
        };
        slot.lock_owned().await
    }

    #[cfg(test)]
    fn tracked(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
