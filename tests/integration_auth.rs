mod common;

use axum::http::StatusCode;
use seatrain::store::Store;
use serde_json::json;

use common::{
    assert_error, body_json, generate_unique_email, json_request, seed_master_course, send,
    test_app,
};

#[tokio::test]
async fn student_signup_creates_profile() {
    let (app, _store) = test_app();
    let email = generate_unique_email();

    let response = send(
        &app,
        json_request(
            "POST",
            "/auth/signup/student",
            None,
            json!({
                "email": email,
                "password": "testpass123",
                "full_name": "Asha Nair",
                "date_of_birth": "1995-06-15",
                "phone": "555-0100",
                "rank": "Deck Cadet"
            }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["full_name"], "Asha Nair");
    assert_eq!(body["rank"], "Deck Cadet");
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn signup_then_login_round_trip() {
    let (app, _store) = test_app();
    let email = generate_unique_email();

    let signup = send(
        &app,
        json_request(
            "POST",
            "/auth/signup/student",
            None,
            json!({
                "email": email,
                "password": "testpass123",
                "full_name": "Asha Nair",
                "date_of_birth": "1995-06-15",
                "phone": "555-0100"
            }),
        ),
    )
    .await;
    assert_eq!(signup.status(), StatusCode::CREATED);

    let login = send(
        &app,
        json_request(
            "POST",
            "/auth/login",
            None,
            json!({ "email": email, "password": "testpass123" }),
        ),
    )
    .await;

    assert_eq!(login.status(), StatusCode::OK);
    let body = body_json(login).await;
    assert!(body["access_token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(body["token_type"], "bearer");
    assert_eq!(body["role"], "student");
}

#[tokio::test]
async fn duplicate_email_is_refused() {
    let (app, _store) = test_app();
    let email = generate_unique_email();
    let payload = json!({
        "email": email,
        "password": "testpass123",
        "full_name": "Asha Nair",
        "date_of_birth": "1995-06-15",
        "phone": "555-0100"
    });

    let first = send(
        &app,
        json_request("POST", "/auth/signup/student", None, payload.clone()),
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = send(
        &app,
        json_request("POST", "/auth/signup/student", None, payload),
    )
    .await;
    assert_error(
        second,
        StatusCode::BAD_REQUEST,
        "An account with this email already exists",
    )
    .await;
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let (app, _store) = test_app();
    let email = generate_unique_email();

    send(
        &app,
        json_request(
            "POST",
            "/auth/signup/student",
            None,
            json!({
                "email": email,
                "password": "testpass123",
                "full_name": "Asha Nair",
                "date_of_birth": "1995-06-15",
                "phone": "555-0100"
            }),
        ),
    )
    .await;

    let response = send(
        &app,
        json_request(
            "POST",
            "/auth/login",
            None,
            json!({ "email": email, "password": "not-the-password" }),
        ),
    )
    .await;

    assert_error(response, StatusCode::UNAUTHORIZED, "Invalid credentials").await;
}

#[tokio::test]
async fn login_unknown_email_is_unauthorized() {
    let (app, _store) = test_app();

    let response = send(
        &app,
        json_request(
            "POST",
            "/auth/login",
            None,
            json!({ "email": "nobody@test.com", "password": "whatever1" }),
        ),
    )
    .await;

    assert_error(response, StatusCode::UNAUTHORIZED, "Invalid credentials").await;
}

#[tokio::test]
async fn short_password_fails_validation() {
    let (app, _store) = test_app();

    let response = send(
        &app,
        json_request(
            "POST",
            "/auth/signup/student",
            None,
            json!({
                "email": generate_unique_email(),
                "password": "abc",
                "full_name": "Asha Nair",
                "date_of_birth": "1995-06-15",
                "phone": "555-0100"
            }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn missing_field_is_a_bad_request() {
    let (app, _store) = test_app();

    let response = send(
        &app,
        json_request(
            "POST",
            "/auth/signup/student",
            None,
            json!({
                "email": generate_unique_email(),
                "password": "testpass123",
                "full_name": "Asha Nair",
                "date_of_birth": "1995-06-15"
            }),
        ),
    )
    .await;

    assert_error(response, StatusCode::BAD_REQUEST, "phone is required").await;
}

#[tokio::test]
async fn institute_signup_files_course_applications() {
    let (app, store) = test_app();
    let master = seed_master_course(&store, "Basic Safety Training", "BST-01").await;

    let response = send(
        &app,
        json_request(
            "POST",
            "/auth/signup/institute",
            None,
            json!({
                "email": generate_unique_email(),
                "password": "testpass123",
                "full_name": "Dinesh Rao",
                "institute_name": "Coastal Maritime Academy",
                "accreditation_no": "ACC-2001",
                "valid_from": "2024-01-01",
                "valid_to": "2029-01-01",
                "contact_phone": "555-0200",
                "selected_courses": [master.master_course_id]
            }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["verified_status"], "pending");
    assert_eq!(body["name"], "Coastal Maritime Academy");

    let applications = store.list_course_applications(None).await.unwrap();
    assert_eq!(applications.len(), 1);
    assert_eq!(applications[0].status, seatrain::modules::institutes::model::RequestStatus::Pending);
    assert_eq!(
        applications[0].course_name.as_deref(),
        Some("Basic Safety Training")
    );
}
