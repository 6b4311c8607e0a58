use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::common::*;
use crate::workflows::caregivers::{CaregiverStatus, Gender};
use crate::workflows::recommendation::{
    select_with_rng, RecommendationSelector, MAX_RECOMMENDATIONS, MAX_SUITABILITY_SCORE,
    MIN_SUITABILITY_SCORE,
};

#[test]
fn shortlist_never_exceeds_three() {
    let selector = RecommendationSelector::seeded(1);
    let result = selector.select_on(&request(), &mixed_roster(), today());

    assert_eq!(result.len(), MAX_RECOMMENDATIONS);
}

#[test]
fn small_pool_returns_every_eligible_caregiver() {
    let roster = vec![
        caregiver(1, "Minjun Kim", Gender::Male),
        caregiver(2, "Seoyeon Lee", Gender::Female),
    ];
    let selector = RecommendationSelector::seeded(2);

    let mut picked = names(&selector.select_on(&request(), &roster, today()));
    picked.sort();

    assert_eq!(picked, vec!["Minjun Kim", "Seoyeon Lee"]);
}

#[test]
fn female_patient_only_sees_female_caregivers() {
    let selector = RecommendationSelector::seeded(3);

    for _ in 0..50 {
        let result = selector.select_on(&female_request(), &mixed_roster(), today());
        assert_eq!(result.len(), 3);
        assert!(result
            .recommendations
            .iter()
            .all(|projection| projection.gender == "female"));
    }
}

#[test]
fn caregiver_without_gender_is_dropped_for_female_patient_only() {
    let mut unknown = caregiver(9, "Yuna Seo", Gender::Female);
    unknown.gender = None;
    let roster = vec![unknown];
    let selector = RecommendationSelector::seeded(4);

    assert!(selector
        .select_on(&female_request(), &roster, today())
        .is_empty());

    let result = selector.select_on(&request(), &roster, today());
    assert_eq!(names(&result), vec!["Yuna Seo"]);
    assert_eq!(result.recommendations[0].gender, "unspecified");
}

#[test]
fn male_patient_may_see_any_gender() {
    let roster = vec![caregiver(2, "Seoyeon Lee", Gender::Female)];
    let male_request = crate::workflows::recommendation::RecommendationRequest {
        patient_gender: Some(Gender::Male),
        ..request()
    };
    let selector = RecommendationSelector::seeded(5);

    assert_eq!(
        names(&selector.select_on(&male_request, &roster, today())),
        vec!["Seoyeon Lee"]
    );
}

#[test]
fn unavailable_status_is_never_recommended() {
    let mut roster = mixed_roster();
    for record in roster.iter_mut().skip(1) {
        record.status = CaregiverStatus::Unavailable;
    }
    let selector = RecommendationSelector::seeded(6);

    for _ in 0..20 {
        assert_eq!(
            names(&selector.select_on(&request(), &roster, today())),
            vec!["Minjun Kim"]
        );
    }
}

#[test]
fn blocked_day_inside_range_excludes_caregiver() {
    let mut blocked = caregiver(1, "Minjun Kim", Gender::Male);
    blocked.unavailable_dates = BTreeSet::from([date(2024, 8, 15)]);
    let roster = vec![blocked, caregiver(2, "Seoyeon Lee", Gender::Female)];
    let selector = RecommendationSelector::seeded(8);

    let in_range = dated_request("2024-08-14", Some("2024-08-16"));
    assert_eq!(
        names(&selector.select_on(&in_range, &roster, today())),
        vec!["Seoyeon Lee"]
    );

    let single_day = dated_request("2024-08-15", None);
    assert_eq!(
        names(&selector.select_on(&single_day, &roster, today())),
        vec!["Seoyeon Lee"]
    );
}

#[test]
fn range_boundaries_are_inclusive() {
    let mut blocked = caregiver(1, "Minjun Kim", Gender::Male);
    blocked.unavailable_dates = BTreeSet::from([date(2024, 8, 20)]);
    let roster = vec![blocked];
    let selector = RecommendationSelector::seeded(9);

    assert!(selector
        .select_on(&dated_request("2024-08-20", Some("2024-08-25")), &roster, today())
        .is_empty());
    assert!(selector
        .select_on(&dated_request("2024-08-10", Some("2024-08-20")), &roster, today())
        .is_empty());
    assert_eq!(
        selector
            .select_on(&dated_request("2024-08-21", Some("2024-08-25")), &roster, today())
            .len(),
        1
    );
}

#[test]
fn blank_from_disables_date_filter() {
    let mut blocked = caregiver(1, "Minjun Kim", Gender::Male);
    blocked.unavailable_dates = BTreeSet::from([date(2024, 8, 15)]);
    let roster = vec![blocked];
    let selector = RecommendationSelector::seeded(10);

    let blank_from = dated_request("  ", Some("2024-08-15"));
    assert_eq!(selector.select_on(&blank_from, &roster, today()).len(), 1);
}

#[test]
fn timestamps_match_on_their_calendar_day() {
    let mut blocked = caregiver(1, "Minjun Kim", Gender::Male);
    blocked.unavailable_dates = BTreeSet::from([date(2024, 8, 15)]);
    let roster = vec![blocked];
    let selector = RecommendationSelector::seeded(11);

    let stamped = dated_request("2024-08-15T09:30:00Z", None);
    assert!(selector.select_on(&stamped, &roster, today()).is_empty());
}

#[test]
fn malformed_or_inverted_dates_degrade_to_empty() {
    let selector = RecommendationSelector::seeded(12);

    let malformed = dated_request("next tuesday", None);
    assert!(selector
        .select_on(&malformed, &mixed_roster(), today())
        .is_empty());

    let inverted = dated_request("2024-08-20", Some("2024-08-10"));
    assert!(selector
        .select_on(&inverted, &mixed_roster(), today())
        .is_empty());
}

#[test]
fn empty_roster_returns_empty_result() {
    let selector = RecommendationSelector::seeded(13);
    let result = selector.select_on(&request(), &[], today());

    assert!(result.is_empty());
    assert_eq!(
        serde_json::to_value(&result).expect("serialize"),
        serde_json::json!({ "recommendations": [] })
    );
}

#[test]
fn scores_stay_in_band_and_sort_descending() {
    let selector = RecommendationSelector::seeded(14);

    for _ in 0..100 {
        let result = selector.select_on(&request(), &mixed_roster(), today());
        let scores: Vec<u8> = result
            .recommendations
            .iter()
            .map(|projection| projection.suitability_score)
            .collect();

        assert!(scores
            .iter()
            .all(|score| (MIN_SUITABILITY_SCORE..=MAX_SUITABILITY_SCORE).contains(score)));
        assert!(scores.windows(2).all(|pair| pair[0] >= pair[1]));
    }
}

#[test]
fn shortlist_has_no_duplicates() {
    let selector = RecommendationSelector::seeded(15);

    for _ in 0..50 {
        let result = selector.select_on(&request(), &mixed_roster(), today());
        let unique: BTreeSet<String> = names(&result).into_iter().collect();
        assert_eq!(unique.len(), result.len());
    }
}

#[test]
fn every_eligible_caregiver_gets_exposure() {
    let selector = RecommendationSelector::seeded(16);
    let mut seen = BTreeSet::new();

    for _ in 0..200 {
        seen.extend(names(&selector.select_on(&request(), &mixed_roster(), today())));
    }

    assert_eq!(seen.len(), mixed_roster().len());
}

#[test]
fn projection_reports_age_and_split_certifications() {
    let roster = vec![caregiver(1, "Minjun Kim", Gender::Male)];
    let selector = RecommendationSelector::seeded(17);
    let result = selector.select_on(&request(), &roster, today());
    let projection = &result.recommendations[0];

    assert_eq!(projection.age, 45);
    assert_eq!(
        projection.certifications,
        vec!["Care worker level 1", "Nursing aide"]
    );
    assert_eq!(projection.phone, "010-0000-0001");
    assert_eq!(
        projection.photo_url.as_deref(),
        Some("https://images.example/1.jpg")
    );
}

#[test]
fn same_seed_gives_same_shortlist() {
    let roster = mixed_roster();
    let first = select_with_rng(&request(), &roster, today(), &mut StdRng::seed_from_u64(99));
    let second = select_with_rng(&request(), &roster, today(), &mut StdRng::seed_from_u64(99));

    assert_eq!(first, second);
}
