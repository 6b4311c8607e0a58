use std::sync::{Mutex, PoisonError};

use chrono::{Local, NaiveDate};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use super::domain::{RecommendationProjection, RecommendationRequest, RecommendationResult};
use super::eligibility::EligibilityCriteria;
use super::projection::project;
use crate::workflows::caregivers::CaregiverRecord;

pub const MAX_RECOMMENDATIONS: usize = 3;
pub const MIN_SUITABILITY_SCORE: u8 = 50;
pub const MAX_SUITABILITY_SCORE: u8 = 85;

/// Faults inside the pipeline. They never reach callers of [`RecommendationSelector::select`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("requested date '{0}' is not a calendar date")]
    InvalidDate(String),
    #[error("requested range ends ({to}) before it starts ({from})")]
    InvertedRange { from: NaiveDate, to: NaiveDate },
}

/// Picks up to three eligible caregivers in random order with a cosmetic score.
///
/// Every eligible caregiver is equally likely to be picked and the score does not measure fit.
/// Internal faults degrade to an empty result, so "nobody matched" and "something broke" only
/// differ in the logs.
pub struct RecommendationSelector {
    rng: Mutex<StdRng>,
}

impl Default for RecommendationSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl RecommendationSelector {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Reproducible selector for tests and demos.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }

    pub fn select(
        &self,
        request: &RecommendationRequest,
        roster: &[CaregiverRecord],
    ) -> RecommendationResult {
        self.select_on(request, roster, Local::now().date_naive())
    }

    /// Same as [`select`](Self::select) with an explicit "today" for age calculation.
    pub fn select_on(
        &self,
        request: &RecommendationRequest,
        roster: &[CaregiverRecord],
        today: NaiveDate,
    ) -> RecommendationResult {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        select_with_rng(request, roster, today, &mut *rng)
    }
}

/// Runs the whole pipeline against a caller supplied random source.
pub fn select_with_rng<G: Rng>(
    request: &RecommendationRequest,
    roster: &[CaregiverRecord],
    today: NaiveDate,
    rng: &mut G,
) -> RecommendationResult {
    match shortlist(request, roster, today, rng) {
        Ok(recommendations) => RecommendationResult { recommendations },
        Err(error) => {
            warn!(
                %error,
                roster_size = roster.len(),
                "recommendation failed, returning no matches"
            );
            RecommendationResult::empty()
        }
    }
}

fn shortlist<G: Rng>(
    request: &RecommendationRequest,
    roster: &[CaregiverRecord],
    today: NaiveDate,
    rng: &mut G,
) -> Result<Vec<RecommendationProjection>, SelectionError> {
    let criteria = EligibilityCriteria::from_request(request)?;

    let mut eligible: Vec<&CaregiverRecord> = roster
        .iter()
        .filter(|caregiver| criteria.admits(caregiver))
        .collect();

    if eligible.is_empty() {
        info!(
            roster_size = roster.len(),
            "no available caregivers match the requested conditions"
        );
        return Ok(Vec::new());
    }

    eligible.shuffle(rng);
    eligible.truncate(MAX_RECOMMENDATIONS);

    let mut recommendations: Vec<RecommendationProjection> = eligible
        .into_iter()
        .map(|caregiver| {
            let score = rng.gen_range(MIN_SUITABILITY_SCORE..=MAX_SUITABILITY_SCORE);
            project(caregiver, score, today)
        })
        .collect();

    recommendations.sort_by(|a, b| b.suitability_score.cmp(&a.suitability_score));

    debug!(
        roster_size = roster.len(),
        shortlisted = recommendations.len(),
        "caregiver shortlist ready"
    );
    Ok(recommendations)
}
