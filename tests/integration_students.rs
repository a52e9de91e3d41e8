mod common;

use axum::http::StatusCode;
use seatrain::modules::institutes::model::VerifiedStatus;
use serde_json::json;

use common::{
    assert_error, body_json, get, json_request, seed_institute, seed_student, send, test_app,
};

#[tokio::test]
async fn profile_requires_authentication() {
    let (app, _store) = test_app();

    let response = send(&app, get("/students/me", None)).await;
    assert_error(
        response,
        StatusCode::UNAUTHORIZED,
        "Missing authorization header",
    )
    .await;
}

#[tokio::test]
async fn profile_requires_student_role() {
    let (app, store) = test_app();
    let (_institute, token) = seed_institute(&store, VerifiedStatus::Verified, false).await;

    let response = send(&app, get("/students/me", Some(&token))).await;
    assert_error(
        response,
        StatusCode::FORBIDDEN,
        "Access denied. Student role required.",
    )
    .await;
}

#[tokio::test]
async fn get_own_profile() {
    let (app, store) = test_app();
    let (student, token) = seed_student(&store).await;

    let response = send(&app, get("/students/me", Some(&token))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["studid"], student.studid.to_string());
    assert_eq!(body["phone"], "555-0100");
}

#[tokio::test]
async fn update_applies_allowed_fields_only() {
    let (app, store) = test_app();
    let (student, token) = seed_student(&store).await;

    let response = send(
        &app,
        json_request(
            "PUT",
            "/students/me",
            Some(&token),
            json!({
                "phone": "555-0199",
                "rank": "Second Officer",
                "foo": "ignored",
                "role": "admin"
            }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["phone"], "555-0199");
    assert_eq!(body["rank"], "Second Officer");
    assert_eq!(body["studid"], student.studid.to_string());
    assert!(body.get("foo").is_none());
}

#[tokio::test]
async fn update_with_no_usable_fields_is_refused() {
    let (app, store) = test_app();
    let (_student, token) = seed_student(&store).await;

    let response = send(
        &app,
        json_request(
            "PUT",
            "/students/me",
            Some(&token),
            json!({ "foo": "bar", "userid": "11111111-1111-1111-1111-111111111111" }),
        ),
    )
    .await;

    assert_error(response, StatusCode::BAD_REQUEST, "No valid fields to update").await;
}

#[tokio::test]
async fn student_lookup_requires_authentication() {
    let (app, store) = test_app();
    let (student, _token) = seed_student(&store).await;

    let response = send(&app, get(&format!("/students/{}", student.studid), None)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn student_lookup_allows_any_signed_in_role() {
    let (app, store) = test_app();
    let (student, _token) = seed_student(&store).await;
    let (_institute, institute_token) =
        seed_institute(&store, VerifiedStatus::Verified, false).await;

    let response = send(
        &app,
        get(
            &format!("/students/{}", student.studid),
            Some(&institute_token),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["studid"], student.studid.to_string());
}

#[tokio::test]
async fn missing_student_is_a_404() {
    let (app, store) = test_app();
    let (_student, token) = seed_student(&store).await;

    let response = send(
        &app,
        get(
            "/students/00000000-0000-0000-0000-000000000000",
            Some(&token),
        ),
    )
    .await;

    assert_error(response, StatusCode::NOT_FOUND, "Student not found").await;
}
