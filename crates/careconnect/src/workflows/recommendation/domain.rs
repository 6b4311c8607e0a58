use serde::{Deserialize, Serialize};

use crate::workflows::caregivers::Gender;

/// Requested care period as typed into the form. `to` defaults to `from`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestedDateRange {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
}

impl RequestedDateRange {
    pub fn single(day: impl Into<String>) -> Self {
        Self {
            from: Some(day.into()),
            to: None,
        }
    }

    pub fn between(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: Some(from.into()),
            to: Some(to.into()),
        }
    }

    pub(crate) fn from_value(&self) -> Option<&str> {
        filled(self.from.as_deref())
    }

    pub(crate) fn to_value(&self) -> Option<&str> {
        filled(self.to.as_deref())
    }

    /// `from ~ to`, a single day, or "not specified".
    pub fn describe(&self) -> String {
        match (self.from_value(), self.to_value()) {
            (Some(from), Some(to)) if from != to => format!("{from} ~ {to}"),
            (Some(from), _) => from.to_string(),
            (None, _) => "not specified".to_string(),
        }
    }
}

fn filled(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// Patient needs submitted for matching. Not persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    #[serde(default)]
    pub patient_gender: Option<Gender>,
    #[serde(default)]
    pub patient_birth_date: Option<String>,
    /// Captured for the admin notification only; never a filter.
    #[serde(default)]
    pub care_type: String,
    #[serde(default)]
    pub requested_date_range: Option<RequestedDateRange>,
    /// Captured for the admin notification only; never a filter.
    #[serde(default)]
    pub requested_time: Option<String>,
    #[serde(default)]
    pub specific_needs: String,
}

/// Request plus the contact details of whoever filled in the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationInquiry {
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub user_phone: String,
    #[serde(flatten)]
    pub request: RecommendationRequest,
}

impl RecommendationInquiry {
    pub fn validate(&self) -> Result<(), RequestValidationError> {
        if self.user_name.trim().is_empty() {
            return Err(RequestValidationError::MissingField("userName"));
        }
        if self.user_phone.trim().is_empty() {
            return Err(RequestValidationError::MissingField("userPhone"));
        }
        if self.request.specific_needs.trim().is_empty() {
            return Err(RequestValidationError::MissingField("specificNeeds"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
}

/// Caregiver as shown to the family requesting care.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationProjection {
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub experience: String,
    pub certifications: Vec<String>,
    /// Display-only confidence between 50 and 85. Not derived from the request.
    pub suitability_score: u8,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub recommendations: Vec<RecommendationProjection>,
}

impl RecommendationResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.recommendations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.recommendations.len()
    }
}
