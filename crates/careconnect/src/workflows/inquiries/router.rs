use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;

use super::domain::InquirySubmission;
use super::service::{InquiryError, InquiryService};
use crate::workflows::notifications::{NotificationError, NotificationPublisher};

/// Router accepting every public contact form on one endpoint.
pub fn inquiry_router<P>(service: Arc<InquiryService<P>>) -> Router
where
    P: NotificationPublisher + 'static,
{
    Router::new()
        .route("/api/v1/inquiries", post(submit_handler::<P>))
        .with_state(service)
}

pub(crate) async fn submit_handler<P>(
    State(service): State<Arc<InquiryService<P>>>,
    payload: Result<axum::Json<InquirySubmission>, JsonRejection>,
) -> Response
where
    P: NotificationPublisher + 'static,
{
    let axum::Json(submission) = match payload {
        Ok(submission) => submission,
        Err(rejection) => {
            let payload = json!({ "error": rejection.body_text() });
            return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
        }
    };

    match service.submit(&submission) {
        Ok(message) => {
            let payload = json!({
                "kind": submission.kind(),
                "message": message,
            });
            (StatusCode::ACCEPTED, axum::Json(payload)).into_response()
        }
        Err(InquiryError::Invalid(error)) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
        }
        Err(InquiryError::Notification(NotificationError::NoRecipients)) => {
            let payload = json!({
                "error": "no admin recipients are configured",
            });
            (StatusCode::SERVICE_UNAVAILABLE, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
