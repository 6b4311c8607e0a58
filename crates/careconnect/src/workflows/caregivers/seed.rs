use std::collections::BTreeSet;

use chrono::NaiveDate;
use tracing::info;

use super::domain::{CaregiverStatus, Gender, NewCaregiver};
use super::repository::CaregiverRepository;
use super::service::{CaregiverAdminService, RosterServiceError};

/// Only ever evaluated in const context, so an invalid literal fails the build.
const fn sample_day(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None => panic!("sample roster date out of range"),
    }
}

const MINJUN_BIRTH_DATE: NaiveDate = sample_day(1978, 5, 15);
const SEOYEON_BIRTH_DATE: NaiveDate = sample_day(1985, 11, 20);
const SAMPLE_BLOCKED_DAY: NaiveDate = sample_day(2024, 8, 15);

/// Sample caregivers used when no roster export is configured.
pub fn sample_caregivers() -> Vec<NewCaregiver> {
    vec![
        NewCaregiver {
            name: "Minjun Kim".to_string(),
            phone: "010-1234-5678".to_string(),
            photo_url: Some(
                "https://images.unsplash.com/photo-1557862921-37829c790f19?w=640".to_string(),
            ),
            birth_date: MINJUN_BIRTH_DATE,
            gender: Gender::Male,
            certifications: Some("Care worker level 1, Certified caregiver".to_string()),
            experience: Some("10+ years".to_string()),
            special_notes: Some("Specializes in seniors with limited mobility.".to_string()),
            status: CaregiverStatus::Available,
            unavailable_dates: BTreeSet::new(),
        },
        NewCaregiver {
            name: "Seoyeon Lee".to_string(),
            phone: "010-9876-5432".to_string(),
            photo_url: Some(
                "https://images.unsplash.com/photo-1544717297-fa95b6ee8643?w=640".to_string(),
            ),
            birth_date: SEOYEON_BIRTH_DATE,
            gender: Gender::Female,
            certifications: Some("Nursing aide, Care worker level 1".to_string()),
            experience: Some("10+ years".to_string()),
            special_notes: Some(
                "Strong with female patients and post-surgery recovery.".to_string(),
            ),
            status: CaregiverStatus::Available,
            unavailable_dates: BTreeSet::new(),
        },
    ]
}

/// Seeds the sample roster, but only into an empty store.
pub fn seed_if_empty<R>(service: &CaregiverAdminService<R>) -> Result<usize, RosterServiceError>
where
    R: CaregiverRepository + 'static,
{
    if !service.list()?.is_empty() {
        return Ok(0);
    }

    let mut seeded = 0;
    for caregiver in sample_caregivers() {
        let stored = service.add(caregiver)?;
        if stored.gender == Some(Gender::Male) {
            // Sample block-out day for the male caregiver.
            service.set_unavailable_dates(stored.id, [SAMPLE_BLOCKED_DAY])?;
        }
        seeded += 1;
    }

    info!(seeded, "sample caregiver roster seeded");
    Ok(seeded)
}
