use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::{error, info, warn};

use super::domain::{RecommendationInquiry, RecommendationResult};
use super::selector::RecommendationSelector;
use crate::workflows::caregivers::CaregiverRoster;
use crate::workflows::notifications::{
    Notification, NotificationDispatcher, NotificationPublisher,
};

const NOT_SPECIFIED: &str = "not specified";

/// Fetches the roster, runs the selector, and tells the admins when matches were offered.
pub struct RecommendationService<R, P> {
    roster: Arc<R>,
    selector: Arc<RecommendationSelector>,
    notifications: Arc<NotificationDispatcher<P>>,
}

impl<R, P> RecommendationService<R, P>
where
    R: CaregiverRoster + 'static,
    P: NotificationPublisher + 'static,
{
    pub fn new(
        roster: Arc<R>,
        selector: Arc<RecommendationSelector>,
        notifications: Arc<NotificationDispatcher<P>>,
    ) -> Self {
        Self {
            roster,
            selector,
            notifications,
        }
    }

    pub fn recommend(&self, inquiry: &RecommendationInquiry) -> RecommendationResult {
        self.recommend_on(inquiry, Local::now().date_naive())
    }

    /// Never fails: a roster outage is logged and reported as "no matches".
    pub fn recommend_on(
        &self,
        inquiry: &RecommendationInquiry,
        today: NaiveDate,
    ) -> RecommendationResult {
        let roster = match self.roster.list() {
            Ok(roster) => roster,
            Err(err) => {
                error!(error = %err, "caregiver roster unavailable, returning no matches");
                return RecommendationResult::empty();
            }
        };

        let result = self.selector.select_on(&inquiry.request, &roster, today);
        info!(
            roster_size = roster.len(),
            recommended = result.len(),
            "caregiver recommendation served"
        );

        if !result.is_empty() {
            self.notify_admins(inquiry, &result);
        }

        result
    }

    fn notify_admins(&self, inquiry: &RecommendationInquiry, result: &RecommendationResult) {
        if !self.notifications.has_recipients() {
            warn!("no admin recipients configured, skipping recommendation notification");
            return;
        }

        if let Err(err) = self
            .notifications
            .dispatch(recommendation_notification(inquiry, result))
        {
            error!(error = %err, "recommendation notification failed");
        }
    }
}

pub(crate) fn recommendation_notification(
    inquiry: &RecommendationInquiry,
    result: &RecommendationResult,
) -> Notification {
    let request = &inquiry.request;
    let requested_dates = request
        .requested_date_range
        .as_ref()
        .map(|range| range.describe())
        .unwrap_or_else(|| NOT_SPECIFIED.to_string());
    let shortlisted = result
        .recommendations
        .iter()
        .map(|caregiver| caregiver.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    Notification::new(
        "recommendation_requested",
        format!("Caregiver recommendation request ({})", inquiry.user_name),
    )
    .field("Requester name", inquiry.user_name.as_str())
    .field("Requester phone", inquiry.user_phone.as_str())
    .field(
        "Patient gender",
        request
            .patient_gender
            .map(|gender| gender.label())
            .unwrap_or(NOT_SPECIFIED),
    )
    .field(
        "Patient birth date",
        or_not_specified(request.patient_birth_date.as_deref()),
    )
    .field("Care type", or_not_specified(Some(request.care_type.as_str())))
    .field("Requested dates", requested_dates)
    .field(
        "Requested time",
        or_not_specified(request.requested_time.as_deref()),
    )
    .field("Specific needs", request.specific_needs.as_str())
    .field("Shortlisted caregivers", shortlisted)
}

fn or_not_specified(value: Option<&str>) -> String {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(NOT_SPECIFIED)
        .to_string()
}
