//! Caregiver recommendation: eligibility filter, randomized shortlist, and display scores.

pub mod domain;
pub(crate) mod eligibility;
pub(crate) mod projection;
pub mod router;
pub mod selector;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    RecommendationInquiry, RecommendationProjection, RecommendationRequest, RecommendationResult,
    RequestValidationError, RequestedDateRange,
};
pub use router::recommendation_router;
pub use selector::{
    select_with_rng, RecommendationSelector, SelectionError, MAX_RECOMMENDATIONS,
    MAX_SUITABILITY_SCORE, MIN_SUITABILITY_SCORE,
};
pub use service::RecommendationService;
