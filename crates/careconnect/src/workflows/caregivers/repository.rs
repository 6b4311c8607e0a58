use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use super::domain::{CaregiverId, CaregiverRecord, CaregiverUpdate, NewCaregiver};

/// Read side of the roster. The recommendation selector only ever needs a snapshot.
pub trait CaregiverRoster: Send + Sync {
    fn list(&self) -> Result<Vec<CaregiverRecord>, RepositoryError>;
}

/// Storage abstraction for admin CRUD so services can be exercised in isolation.
pub trait CaregiverRepository: CaregiverRoster {
    fn insert(&self, caregiver: NewCaregiver) -> Result<CaregiverRecord, RepositoryError>;
    fn update(
        &self,
        id: CaregiverId,
        update: CaregiverUpdate,
    ) -> Result<CaregiverRecord, RepositoryError>;
    fn delete(&self, ids: &[CaregiverId]) -> Result<usize, RepositoryError>;
    fn fetch(&self, id: CaregiverId) -> Result<Option<CaregiverRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("phone number {0} is already registered")]
    Conflict(String),
    #[error("caregiver {0} not found")]
    NotFound(CaregiverId),
    #[error("roster unavailable: {0}")]
    Unavailable(String),
}

/// Process-local roster keyed by id. Ids start at 1 and are never reused.
#[derive(Debug, Default)]
pub struct MemoryCaregiverRepository {
    state: Mutex<RosterState>,
}

#[derive(Debug, Default)]
struct RosterState {
    last_id: u64,
    records: BTreeMap<CaregiverId, CaregiverRecord>,
}

impl RosterState {
    fn phone_taken(&self, phone: &str, except: Option<CaregiverId>) -> bool {
        self.records
            .values()
            .any(|record| record.phone == phone && Some(record.id) != except)
    }
}

impl MemoryCaregiverRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> Result<usize, RepositoryError> {
        Ok(self.lock()?.records.len())
    }

    pub fn is_empty(&self) -> Result<bool, RepositoryError> {
        Ok(self.len()? == 0)
    }

    fn lock(&self) -> Result<MutexGuard<'_, RosterState>, RepositoryError> {
        self.state
            .lock()
            .map_err(|_| RepositoryError::Unavailable("roster lock poisoned".to_string()))
    }
}

impl CaregiverRoster for MemoryCaregiverRepository {
    /// Newest caregivers first.
    fn list(&self) -> Result<Vec<CaregiverRecord>, RepositoryError> {
        let state = self.lock()?;
        Ok(state.records.values().rev().cloned().collect())
    }
}

impl CaregiverRepository for MemoryCaregiverRepository {
    fn insert(&self, caregiver: NewCaregiver) -> Result<CaregiverRecord, RepositoryError> {
        let mut state = self.lock()?;
        if state.phone_taken(&caregiver.phone, None) {
            return Err(RepositoryError::Conflict(caregiver.phone));
        }

        state.last_id += 1;
        let id = CaregiverId(state.last_id);
        let record = caregiver.into_record(id);
        state.records.insert(id, record.clone());
        Ok(record)
    }

    fn update(
        &self,
        id: CaregiverId,
        update: CaregiverUpdate,
    ) -> Result<CaregiverRecord, RepositoryError> {
        let mut state = self.lock()?;
        if let Some(phone) = update.phone.as_deref() {
            if state.phone_taken(phone, Some(id)) {
                return Err(RepositoryError::Conflict(phone.to_string()));
            }
        }

        let record = state
            .records
            .get_mut(&id)
            .ok_or(RepositoryError::NotFound(id))?;
        update.apply(record);
        Ok(record.clone())
    }

    fn delete(&self, ids: &[CaregiverId]) -> Result<usize, RepositoryError> {
        let mut state = self.lock()?;
        Ok(ids
            .iter()
            .filter(|id| state.records.remove(*id).is_some())
            .count())
    }

    fn fetch(&self, id: CaregiverId) -> Result<Option<CaregiverRecord>, RepositoryError> {
        let state = self.lock()?;
        Ok(state.records.get(&id).cloned())
    }
}
