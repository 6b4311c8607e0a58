use std::collections::BTreeSet;
use std::sync::Arc;

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::config::NotificationConfig;
use crate::workflows::caregivers::{
    CaregiverId, CaregiverRecord, CaregiverRoster, CaregiverStatus, Gender, RepositoryError,
};
use crate::workflows::notifications::{
    Envelope, MemoryNotificationPublisher, NotificationDispatcher, NotificationError,
    NotificationPublisher,
};
use crate::workflows::recommendation::{
    RecommendationInquiry, RecommendationRequest, RecommendationResult, RecommendationSelector,
    RecommendationService, RequestedDateRange,
};

pub(super) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub(super) fn today() -> NaiveDate {
    date(2025, 6, 15)
}

pub(super) fn caregiver(id: u64, name: &str, gender: Gender) -> CaregiverRecord {
    CaregiverRecord {
        id: CaregiverId(id),
        name: name.to_string(),
        phone: format!("010-0000-{id:04}"),
        photo_url: Some(format!("https://images.example/{id}.jpg")),
        birth_date: Some(date(1980, 1, 1)),
        gender: Some(gender),
        certifications: Some("Care worker level 1, Nursing aide".to_string()),
        experience: Some("5 years in hospital wards".to_string()),
        special_notes: None,
        status: CaregiverStatus::Available,
        unavailable_dates: BTreeSet::new(),
    }
}

/// Four men and four women, all available with clear calendars.
pub(super) fn mixed_roster() -> Vec<CaregiverRecord> {
    vec![
        caregiver(1, "Minjun Kim", Gender::Male),
        caregiver(2, "Seoyeon Lee", Gender::Female),
        caregiver(3, "Dohyun Park", Gender::Male),
        caregiver(4, "Jiwoo Choi", Gender::Female),
        caregiver(5, "Hajun Jung", Gender::Male),
        caregiver(6, "Suah Kang", Gender::Female),
        caregiver(7, "Eunwoo Cho", Gender::Male),
        caregiver(8, "Hayoon Yoon", Gender::Female),
    ]
}

pub(super) fn request() -> RecommendationRequest {
    RecommendationRequest {
        patient_gender: None,
        patient_birth_date: Some("1941-04-02".to_string()),
        care_type: "Hospital care".to_string(),
        requested_date_range: None,
        requested_time: Some("09:00 ~ 17:00".to_string()),
        specific_needs: "Medication management and walking support".to_string(),
    }
}

pub(super) fn female_request() -> RecommendationRequest {
    RecommendationRequest {
        patient_gender: Some(Gender::Female),
        ..request()
    }
}

pub(super) fn dated_request(from: &str, to: Option<&str>) -> RecommendationRequest {
    RecommendationRequest {
        requested_date_range: Some(RequestedDateRange {
            from: Some(from.to_string()),
            to: to.map(str::to_string),
        }),
        ..request()
    }
}

pub(super) fn inquiry(request: RecommendationRequest) -> RecommendationInquiry {
    RecommendationInquiry {
        user_name: "Jisoo Han".to_string(),
        user_phone: "010-2222-3333".to_string(),
        request,
    }
}

pub(super) fn names(result: &RecommendationResult) -> Vec<String> {
    result
        .recommendations
        .iter()
        .map(|projection| projection.name.clone())
        .collect()
}

pub(super) struct FixedRoster(pub(super) Vec<CaregiverRecord>);

impl CaregiverRoster for FixedRoster {
    fn list(&self) -> Result<Vec<CaregiverRecord>, RepositoryError> {
        Ok(self.0.clone())
    }
}

pub(super) struct OfflineRoster;

impl CaregiverRoster for OfflineRoster {
    fn list(&self) -> Result<Vec<CaregiverRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn notification_config(recipients: &[&str]) -> NotificationConfig {
    NotificationConfig {
        admin_recipients: recipients.iter().map(|value| value.to_string()).collect(),
        sender: "onboarding@resend.dev".to_string(),
    }
}

/// Mail relay that refuses every envelope.
pub(super) struct UnreachableRelay;

impl NotificationPublisher for UnreachableRelay {
    fn publish(&self, _envelope: &Envelope) -> Result<(), NotificationError> {
        Err(NotificationError::Transport("relay refused connection".to_string()))
    }
}

pub(super) fn build_service<R: CaregiverRoster + 'static>(
    roster: R,
    recipients: &[&str],
) -> (
    RecommendationService<R, MemoryNotificationPublisher>,
    Arc<MemoryNotificationPublisher>,
) {
    let publisher = Arc::new(MemoryNotificationPublisher::default());
    let service = build_service_with(roster, recipients, publisher.clone());
    (service, publisher)
}

pub(super) fn build_service_with<R, P>(
    roster: R,
    recipients: &[&str],
    publisher: Arc<P>,
) -> RecommendationService<R, P>
where
    R: CaregiverRoster + 'static,
    P: NotificationPublisher + 'static,
{
    let dispatcher = Arc::new(NotificationDispatcher::new(
        notification_config(recipients),
        publisher,
    ));
    RecommendationService::new(
        Arc::new(roster),
        Arc::new(RecommendationSelector::seeded(7)),
        dispatcher,
    )
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
