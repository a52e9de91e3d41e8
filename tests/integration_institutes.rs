mod common;

use axum::http::StatusCode;
use seatrain::modules::institutes::model::VerifiedStatus;
use serde_json::json;

use common::{assert_error, body_json, get, json_request, seed_institute, seed_student, send, test_app};

#[tokio::test]
async fn public_lookup_by_id() {
    let (app, store) = test_app();
    let (institute, _token) = seed_institute(&store, VerifiedStatus::Verified, false).await;

    let response = send(&app, get(&format!("/institutes/{}", institute.instid), None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["instid"], institute.instid.to_string());
    assert_eq!(body["verified_status"], "verified");
}

#[tokio::test]
async fn missing_institute_is_a_404() {
    let (app, _store) = test_app();

    let response = send(
        &app,
        get("/institutes/00000000-0000-0000-0000-000000000000", None),
    )
    .await;

    assert_error(response, StatusCode::NOT_FOUND, "Institute not found").await;
}

#[tokio::test]
async fn own_profile_requires_institute_role() {
    let (app, store) = test_app();
    let (_student, token) = seed_student(&store).await;

    let response = send(&app, get("/institutes/me", Some(&token))).await;
    assert_error(
        response,
        StatusCode::FORBIDDEN,
        "Access denied. Institute role required.",
    )
    .await;
}

#[tokio::test]
async fn reactivation_refused_while_accreditation_valid() {
    let (app, store) = test_app();
    let (_institute, token) = seed_institute(&store, VerifiedStatus::Verified, false).await;

    let response = send(
        &app,
        json_request(
            "POST",
            "/institutes/reactivation-request",
            Some(&token),
            json!({
                "new_accreditation_no": "ACC-9000",
                "new_valid_from": "2026-09-01",
                "new_valid_to": "2031-09-01"
            }),
        ),
    )
    .await;

    assert_error(
        response,
        StatusCode::BAD_REQUEST,
        "Institute accreditation is still valid",
    )
    .await;
}

#[tokio::test]
async fn expired_institute_can_file_one_pending_request() {
    let (app, store) = test_app();
    let (_institute, token) = seed_institute(&store, VerifiedStatus::Verified, true).await;
    let payload = json!({
        "new_accreditation_no": "ACC-9000",
        "new_valid_from": "2026-09-01",
        "new_valid_to": "2031-09-01"
    });

    let first = send(
        &app,
        json_request(
            "POST",
            "/institutes/reactivation-request",
            Some(&token),
            payload.clone(),
        ),
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);
    let body = body_json(first).await;
    assert_eq!(body["status"], "pending");
    assert_eq!(body["new_accreditation_no"], "ACC-9000");

    let second = send(
        &app,
        json_request(
            "POST",
            "/institutes/reactivation-request",
            Some(&token),
            payload,
        ),
    )
    .await;
    assert_error(
        second,
        StatusCode::BAD_REQUEST,
        "You already have a pending reactivation request",
    )
    .await;
}

#[tokio::test]
async fn own_requests_are_listed_newest_first() {
    let (app, store) = test_app();
    let (_institute, token) = seed_institute(&store, VerifiedStatus::Verified, true).await;

    let created = send(
        &app,
        json_request(
            "POST",
            "/institutes/reactivation-request",
            Some(&token),
            json!({
                "new_accreditation_no": "ACC-9000",
                "new_valid_from": "2026-09-01",
                "new_valid_to": "2031-09-01"
            }),
        ),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);

    let response = send(&app, get("/institutes/reactivation-requests/me", Some(&token))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let requests = body.as_array().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0]["new_accreditation_no"], "ACC-9000");
}
