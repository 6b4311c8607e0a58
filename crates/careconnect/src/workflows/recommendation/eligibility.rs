use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::domain::RecommendationRequest;
use super::selector::SelectionError;
use crate::workflows::caregivers::{CaregiverRecord, CaregiverStatus, Gender};

/// Filter predicates derived once per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct EligibilityCriteria {
    female_caregiver_required: bool,
    window: Option<(NaiveDate, NaiveDate)>,
}

impl EligibilityCriteria {
    pub(crate) fn from_request(request: &RecommendationRequest) -> Result<Self, SelectionError> {
        let window = match request.requested_date_range.as_ref() {
            Some(range) => match range.from_value() {
                Some(raw_from) => {
                    let from = parse_day(raw_from)?;
                    let to = match range.to_value() {
                        Some(raw_to) => parse_day(raw_to)?,
                        None => from,
                    };
                    if to < from {
                        return Err(SelectionError::InvertedRange { from, to });
                    }
                    Some((from, to))
                }
                None => None,
            },
            None => None,
        };

        Ok(Self {
            female_caregiver_required: request.patient_gender == Some(Gender::Female),
            window,
        })
    }

    /// Female patients are only matched with female caregivers; male patients carry no constraint.
    pub(crate) fn admits(&self, caregiver: &CaregiverRecord) -> bool {
        if self.female_caregiver_required && caregiver.gender != Some(Gender::Female) {
            return false;
        }

        if let Some((from, to)) = self.window {
            if caregiver.is_unavailable_between(from, to) {
                return false;
            }
        }

        caregiver.status == CaregiverStatus::Available
    }
}

/// Accepts `YYYY-MM-DD` or a timestamp; any time of day is dropped.
pub(crate) fn parse_day(raw: &str) -> Result<NaiveDate, SelectionError> {
    let trimmed = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.date_naive());
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(dt.date());
    }

    Err(SelectionError::InvalidDate(raw.to_string()))
}
