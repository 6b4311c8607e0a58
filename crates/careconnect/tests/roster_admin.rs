//! Roster administration over HTTP: create, update, block out days, and delete caregivers.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use careconnect::workflows::caregivers::{
    caregiver_router, CaregiverAdminService, CaregiverRoster, MemoryCaregiverRepository,
};

fn app() -> (Router, Arc<MemoryCaregiverRepository>) {
    let repository = Arc::new(MemoryCaregiverRepository::new());
    let service = Arc::new(CaregiverAdminService::new(repository.clone()));
    (caregiver_router(service), repository)
}

fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json")
}

fn new_caregiver(name: &str, phone: &str) -> Value {
    json!({
        "name": name,
        "phone": phone,
        "birthDate": "1972-04-18",
        "gender": "female",
        "certifications": "Care worker level 1",
        "experience": "8 years"
    })
}

#[tokio::test]
async fn caregiver_lifecycle_over_http() {
    let (app, repository) = app();

    let created = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/caregivers",
            new_caregiver("Miran Go", "010-7777-8888"),
        ))
        .await
        .expect("response");
    assert_eq!(created.status(), StatusCode::CREATED);
    let created = body_json(created).await;
    let id = created["caregiver"]["id"].as_u64().expect("assigned id");
    assert_eq!(created["caregiver"]["status"], "AVAILABLE");

    let blocked = app
        .clone()
        .oneshot(json_request(
            Method::PUT,
            &format!("/api/caregivers/{id}/unavailable-dates"),
            json!({ "dates": ["2024-10-03", "2024-10-09"] }),
        ))
        .await
        .expect("response");
    assert_eq!(blocked.status(), StatusCode::OK);

    let updated = app
        .clone()
        .oneshot(json_request(
            Method::PUT,
            "/api/caregivers",
            json!({ "id": id, "experience": "9 years", "status": "UNAVAILABLE" }),
        ))
        .await
        .expect("response");
    assert_eq!(updated.status(), StatusCode::OK);

    let stored = repository.list().expect("list");
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].experience.as_deref(), Some("9 years"));
    assert_eq!(stored[0].unavailable_dates.len(), 2);

    let deleted = app
        .oneshot(json_request(
            Method::DELETE,
            "/api/caregivers",
            json!({ "ids": [id] }),
        ))
        .await
        .expect("response");
    assert_eq!(deleted.status(), StatusCode::OK);
    assert_eq!(body_json(deleted).await["count"], 1);
    assert!(repository.is_empty().expect("roster readable"));
}

#[tokio::test]
async fn duplicate_phone_is_a_conflict() {
    let (app, _) = app();

    let first = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/caregivers",
            new_caregiver("Miran Go", "010-7777-8888"),
        ))
        .await
        .expect("response");
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
        .oneshot(json_request(
            Method::POST,
            "/api/caregivers",
            new_caregiver("Miran Go", "010-7777-8888"),
        ))
        .await
        .expect("response");
    assert_eq!(second.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(second).await["success"], false);
}

#[tokio::test]
async fn updating_unknown_caregiver_is_not_found() {
    let (app, _) = app();

    let response = app
        .oneshot(json_request(
            Method::PUT,
            "/api/caregivers",
            json!({ "id": 404, "name": "Nobody" }),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
