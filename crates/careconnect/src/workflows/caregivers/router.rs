use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use super::domain::{CaregiverId, CaregiverUpdate, NewCaregiver};
use super::repository::{CaregiverRepository, RepositoryError};
use super::service::{CaregiverAdminService, RosterServiceError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateCaregiverRequest {
    id: CaregiverId,
    #[serde(flatten)]
    update: CaregiverUpdate,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DeleteCaregiversRequest {
    #[serde(default)]
    ids: Vec<CaregiverId>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UnavailableDatesRequest {
    dates: Vec<NaiveDate>,
}

/// Admin CRUD endpoints for the caregiver roster.
pub fn caregiver_router<R>(service: Arc<CaregiverAdminService<R>>) -> Router
where
    R: CaregiverRepository + 'static,
{
    Router::new()
        .route(
            "/api/caregivers",
            get(list_handler::<R>)
                .post(create_handler::<R>)
                .put(update_handler::<R>)
                .delete(delete_handler::<R>),
        )
        .route("/api/caregivers/:caregiver_id", get(detail_handler::<R>))
        .route(
            "/api/caregivers/:caregiver_id/unavailable-dates",
            put(unavailable_dates_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn list_handler<R>(
    State(service): State<Arc<CaregiverAdminService<R>>>,
) -> Response
where
    R: CaregiverRepository + 'static,
{
    match service.list() {
        Ok(records) => (StatusCode::OK, axum::Json(records)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn detail_handler<R>(
    State(service): State<Arc<CaregiverAdminService<R>>>,
    Path(caregiver_id): Path<u64>,
) -> Response
where
    R: CaregiverRepository + 'static,
{
    match service.get(CaregiverId(caregiver_id)) {
        Ok(record) => (
            StatusCode::OK,
            axum::Json(json!({ "success": true, "caregiver": record })),
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn create_handler<R>(
    State(service): State<Arc<CaregiverAdminService<R>>>,
    payload: Result<axum::Json<NewCaregiver>, JsonRejection>,
) -> Response
where
    R: CaregiverRepository + 'static,
{
    let axum::Json(caregiver) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(rejection),
    };

    match service.add(caregiver) {
        Ok(record) => (
            StatusCode::CREATED,
            axum::Json(json!({ "success": true, "caregiver": record })),
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn update_handler<R>(
    State(service): State<Arc<CaregiverAdminService<R>>>,
    payload: Result<axum::Json<UpdateCaregiverRequest>, JsonRejection>,
) -> Response
where
    R: CaregiverRepository + 'static,
{
    let axum::Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(rejection),
    };

    match service.update(request.id, request.update) {
        Ok(record) => (
            StatusCode::OK,
            axum::Json(json!({ "success": true, "caregiver": record })),
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn delete_handler<R>(
    State(service): State<Arc<CaregiverAdminService<R>>>,
    payload: Result<axum::Json<DeleteCaregiversRequest>, JsonRejection>,
) -> Response
where
    R: CaregiverRepository + 'static,
{
    let axum::Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(rejection),
    };

    match service.delete(&request.ids) {
        Ok(count) => (
            StatusCode::OK,
            axum::Json(json!({ "success": true, "count": count })),
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn unavailable_dates_handler<R>(
    State(service): State<Arc<CaregiverAdminService<R>>>,
    Path(caregiver_id): Path<u64>,
    payload: Result<axum::Json<UnavailableDatesRequest>, JsonRejection>,
) -> Response
where
    R: CaregiverRepository + 'static,
{
    let axum::Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(rejection),
    };

    match service.set_unavailable_dates(CaregiverId(caregiver_id), request.dates) {
        Ok(record) => (
            StatusCode::OK,
            axum::Json(json!({ "success": true, "caregiver": record })),
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}

/// Malformed or incomplete bodies get the same envelope as validation failures.
fn rejection_response(rejection: JsonRejection) -> Response {
    let payload = json!({
        "success": false,
        "error": rejection.body_text(),
    });
    (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
}

fn error_response(error: RosterServiceError) -> Response {
    let status = match &error {
        RosterServiceError::Invalid(_) => StatusCode::BAD_REQUEST,
        RosterServiceError::Repository(RepositoryError::Conflict(_)) => StatusCode::CONFLICT,
        RosterServiceError::Repository(RepositoryError::NotFound(_)) => StatusCode::NOT_FOUND,
        RosterServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let payload = json!({
        "success": false,
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
