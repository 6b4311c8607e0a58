use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;

use super::domain::RecommendationInquiry;
use super::service::RecommendationService;
use crate::workflows::caregivers::CaregiverRoster;
use crate::workflows::notifications::NotificationPublisher;

/// Router exposing the caregiver recommendation form endpoint.
pub fn recommendation_router<R, P>(service: Arc<RecommendationService<R, P>>) -> Router
where
    R: CaregiverRoster + 'static,
    P: NotificationPublisher + 'static,
{
    Router::new()
        .route("/api/v1/recommendations", post(recommend_handler::<R, P>))
        .with_state(service)
}

pub(crate) async fn recommend_handler<R, P>(
    State(service): State<Arc<RecommendationService<R, P>>>,
    payload: Result<axum::Json<RecommendationInquiry>, JsonRejection>,
) -> Response
where
    R: CaregiverRoster + 'static,
    P: NotificationPublisher + 'static,
{
    let axum::Json(inquiry) = match payload {
        Ok(inquiry) => inquiry,
        Err(rejection) => {
            let payload = json!({ "error": rejection.body_text() });
            return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
        }
    };
    if let Err(error) = inquiry.validate() {
        let payload = json!({ "error": error.to_string() });
        return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
    }

    let result = service.recommend(&inquiry);
    (StatusCode::OK, axum::Json(result)).into_response()
}
