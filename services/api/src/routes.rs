use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use careconnect::workflows::caregivers::{
    caregiver_router, CaregiverAdminService, CaregiverRepository,
};
use careconnect::workflows::inquiries::{inquiry_router, InquiryService};
use careconnect::workflows::notifications::NotificationPublisher;
use careconnect::workflows::recommendation::{recommendation_router, RecommendationService};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_careconnect_routes<R, P>(
    recommendations: Arc<RecommendationService<R, P>>,
    caregivers: Arc<CaregiverAdminService<R>>,
    inquiries: Arc<InquiryService<P>>,
) -> axum::Router
where
    R: CaregiverRepository + 'static,
    P: NotificationPublisher + 'static,
{
    recommendation_router(recommendations)
        .merge(caregiver_router(caregivers))
        .merge(inquiry_router(inquiries))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
