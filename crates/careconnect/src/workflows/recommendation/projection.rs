use chrono::{Datelike, NaiveDate};

use super::domain::RecommendationProjection;
use crate::workflows::caregivers::CaregiverRecord;

pub(crate) const MISSING_NAME: &str = "no name";
pub(crate) const MISSING_EXPERIENCE: &str = "no experience info";
pub(crate) const MISSING_GENDER: &str = "unspecified";

pub(crate) fn project(
    caregiver: &CaregiverRecord,
    suitability_score: u8,
    today: NaiveDate,
) -> RecommendationProjection {
    RecommendationProjection {
        name: text_or(Some(caregiver.name.as_str()), MISSING_NAME),
        age: caregiver
            .birth_date
            .map(|birth_date| age_on(birth_date, today))
            .unwrap_or(0),
        gender: caregiver
            .gender
            .map(|gender| gender.label())
            .unwrap_or(MISSING_GENDER)
            .to_string(),
        experience: text_or(caregiver.experience.as_deref(), MISSING_EXPERIENCE),
        certifications: caregiver
            .certifications
            .as_deref()
            .map(split_certifications)
            .unwrap_or_default(),
        suitability_score,
        phone: caregiver.phone.clone(),
        photo_url: caregiver.photo_url.clone(),
    }
}

/// Whole years elapsed; a birth date after `today` yields 0.
pub(crate) fn age_on(birth_date: NaiveDate, today: NaiveDate) -> u32 {
    let mut years = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        years -= 1;
    }
    u32::try_from(years).unwrap_or(0)
}

pub(crate) fn split_certifications(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

fn text_or(value: Option<&str>, placeholder: &str) -> String {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => placeholder.to_string(),
    }
}
