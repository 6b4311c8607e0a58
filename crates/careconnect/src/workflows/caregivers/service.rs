use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use super::domain::{non_blank, CaregiverId, CaregiverRecord, CaregiverUpdate, NewCaregiver};
use super::repository::{CaregiverRepository, RepositoryError};

/// Admin-facing roster operations with input validation in front of the repository.
pub struct CaregiverAdminService<R> {
    repository: Arc<R>,
}

impl<R> CaregiverAdminService<R>
where
    R: CaregiverRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    pub fn list(&self) -> Result<Vec<CaregiverRecord>, RosterServiceError> {
        Ok(self.repository.list()?)
    }

    pub fn get(&self, id: CaregiverId) -> Result<CaregiverRecord, RosterServiceError> {
        let record = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound(id))?;
        Ok(record)
    }

    /// Register a caregiver. New entries always start without blocked dates.
    pub fn add(&self, caregiver: NewCaregiver) -> Result<CaregiverRecord, RosterServiceError> {
        let caregiver = NewCaregiver {
            name: required("name", caregiver.name)?,
            phone: required("phone", caregiver.phone)?,
            photo_url: photo_url(caregiver.photo_url)?,
            certifications: caregiver.certifications.and_then(non_blank),
            experience: caregiver.experience.and_then(non_blank),
            special_notes: caregiver.special_notes.and_then(non_blank),
            unavailable_dates: BTreeSet::new(),
            ..caregiver
        };

        let stored = self.repository.insert(caregiver)?;
        info!(caregiver_id = %stored.id, "caregiver registered");
        Ok(stored)
    }

    pub fn update(
        &self,
        id: CaregiverId,
        update: CaregiverUpdate,
    ) -> Result<CaregiverRecord, RosterServiceError> {
        if update.is_empty() {
            return Err(RosterServiceError::Invalid(
                "no fields supplied for update".to_string(),
            ));
        }

        let update = CaregiverUpdate {
            name: update.name.map(|name| required("name", name)).transpose()?,
            phone: update
                .phone
                .map(|phone| required("phone", phone))
                .transpose()?,
            photo_url: match update.photo_url {
                // Blank clears the stored photo.
                Some(raw) if raw.trim().is_empty() => Some(String::new()),
                other => photo_url(other)?,
            },
            ..update
        };

        let stored = self.repository.update(id, update)?;
        info!(caregiver_id = %stored.id, "caregiver updated");
        Ok(stored)
    }

    pub fn delete(&self, ids: &[CaregiverId]) -> Result<usize, RosterServiceError> {
        if ids.is_empty() {
            return Err(RosterServiceError::Invalid(
                "at least one caregiver id is required".to_string(),
            ));
        }

        let removed = self.repository.delete(ids)?;
        info!(requested = ids.len(), removed, "caregivers deleted");
        Ok(removed)
    }

    /// Replace the caregiver's blocked calendar days.
    pub fn set_unavailable_dates(
        &self,
        id: CaregiverId,
        dates: impl IntoIterator<Item = NaiveDate>,
    ) -> Result<CaregiverRecord, RosterServiceError> {
        let update = CaregiverUpdate {
            unavailable_dates: Some(dates.into_iter().collect()),
            ..CaregiverUpdate::default()
        };
        Ok(self.repository.update(id, update)?)
    }
}

fn required(field: &'static str, value: String) -> Result<String, RosterServiceError> {
    non_blank(value).ok_or_else(|| RosterServiceError::Invalid(format!("{field} is required")))
}

fn photo_url(value: Option<String>) -> Result<Option<String>, RosterServiceError> {
    match value.and_then(non_blank) {
        Some(url) if url.starts_with("https://") || url.starts_with("http://") => Ok(Some(url)),
        Some(url) => Err(RosterServiceError::Invalid(format!(
            "photo url '{url}' must be an http(s) URL"
        ))),
        None => Ok(None),
    }
}

/// Error raised by the roster admin service.
#[derive(Debug, thiserror::Error)]
pub enum RosterServiceError {
    #[error("invalid caregiver data: {0}")]
    Invalid(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
