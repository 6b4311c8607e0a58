use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier assigned by the roster store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaregiverId(pub u64);

impl fmt::Display for CaregiverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const fn label(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Some(Gender::Male),
            "female" | "f" => Some(Gender::Female),
            _ => None,
        }
    }
}

/// Whether a caregiver is currently taking assignments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CaregiverStatus {
    #[default]
    Available,
    Unavailable,
}

impl CaregiverStatus {
    pub const fn label(self) -> &'static str {
        match self {
            CaregiverStatus::Available => "available",
            CaregiverStatus::Unavailable => "unavailable",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "available" => Some(CaregiverStatus::Available),
            "unavailable" => Some(CaregiverStatus::Unavailable),
            _ => None,
        }
    }
}

/// Caregiver as stored in the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaregiverRecord {
    pub id: CaregiverId,
    pub name: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub gender: Option<Gender>,
    /// Comma separated certification names.
    #[serde(default)]
    pub certifications: Option<String>,
    #[serde(default)]
    pub experience: Option<String>,
    #[serde(default)]
    pub special_notes: Option<String>,
    #[serde(default)]
    pub status: CaregiverStatus,
    #[serde(default)]
    pub unavailable_dates: BTreeSet<NaiveDate>,
}

impl CaregiverRecord {
    pub fn is_unavailable_between(&self, from: NaiveDate, to: NaiveDate) -> bool {
        self.unavailable_dates.range(from..=to).next().is_some()
    }
}

/// Admin supplied fields for a new roster entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCaregiver {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub photo_url: Option<String>,
    pub birth_date: NaiveDate,
    pub gender: Gender,
    #[serde(default)]
    pub certifications: Option<String>,
    #[serde(default)]
    pub experience: Option<String>,
    #[serde(default)]
    pub special_notes: Option<String>,
    #[serde(default)]
    pub status: CaregiverStatus,
    #[serde(default)]
    pub unavailable_dates: BTreeSet<NaiveDate>,
}

impl NewCaregiver {
    pub(crate) fn into_record(self, id: CaregiverId) -> CaregiverRecord {
        CaregiverRecord {
            id,
            name: self.name,
            phone: self.phone,
            photo_url: self.photo_url,
            birth_date: Some(self.birth_date),
            gender: Some(self.gender),
            certifications: self.certifications,
            experience: self.experience,
            special_notes: self.special_notes,
            status: self.status,
            unavailable_dates: self.unavailable_dates,
        }
    }
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaregiverUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certifications: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CaregiverStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unavailable_dates: Option<BTreeSet<NaiveDate>>,
}

impl CaregiverUpdate {
    pub fn is_empty(&self) -> bool {
        self == &CaregiverUpdate::default()
    }

    pub(crate) fn apply(self, record: &mut CaregiverRecord) {
        if let Some(name) = self.name {
            record.name = name;
        }
        if let Some(phone) = self.phone {
            record.phone = phone;
        }
        if let Some(photo_url) = self.photo_url {
            record.photo_url = non_blank(photo_url);
        }
        if let Some(birth_date) = self.birth_date {
            record.birth_date = Some(birth_date);
        }
        if let Some(gender) = self.gender {
            record.gender = Some(gender);
        }
        if let Some(certifications) = self.certifications {
            record.certifications = non_blank(certifications);
        }
        if let Some(experience) = self.experience {
            record.experience = non_blank(experience);
        }
        if let Some(special_notes) = self.special_notes {
            record.special_notes = non_blank(special_notes);
        }
        if let Some(status) = self.status {
            record.status = status;
        }
        if let Some(dates) = self.unavailable_dates {
            record.unavailable_dates = dates;
        }
    }
}

pub(crate) fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == value.len() {
        Some(value)
    } else {
        Some(trimmed.to_string())
    }
}
