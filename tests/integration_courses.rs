mod common;

use axum::http::StatusCode;
use seatrain::modules::courses::model::CourseStatus;
use seatrain::modules::institutes::model::VerifiedStatus;
use seatrain::store::Store;
use serde_json::json;

use common::{
    assert_error, body_json, get, json_request, put, seed_course, seed_institute,
    seed_master_course, seed_student, send, test_app,
};

fn course_payload(title: &str) -> serde_json::Value {
    json!({
        "title": title,
        "type": "STCW",
        "duration": "5 days",
        "mode": "offline",
        "fees": 12000.0
    })
}

#[tokio::test]
async fn master_catalog_is_sorted_by_name() {
    let (app, store) = test_app();
    seed_master_course(&store, "Radar Observer", "RO-01").await;
    seed_master_course(&store, "Basic Safety Training", "BST-01").await;

    let response = send(&app, get("/courses/master-courses", None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["course_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Basic Safety Training", "Radar Observer"]);
}

#[tokio::test]
async fn verified_institute_publishes_a_course() {
    let (app, store) = test_app();
    let (institute, token) = seed_institute(&store, VerifiedStatus::Verified, false).await;

    let response = send(
        &app,
        json_request("POST", "/courses", Some(&token), course_payload("Basic Safety Training")),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["status"], "active");
    assert_eq!(body["type"], "STCW");
    assert_eq!(body["instid"], institute.instid.to_string());
    // Default certificate validity when the request omits it.
    assert_eq!(body["validity_months"], 60);
}

#[tokio::test]
async fn expired_accreditation_blocks_publishing() {
    let (app, store) = test_app();
    let (_institute, token) = seed_institute(&store, VerifiedStatus::Verified, true).await;

    let response = send(
        &app,
        json_request("POST", "/courses", Some(&token), course_payload("Basic Safety Training")),
    )
    .await;

    assert_error(
        response,
        StatusCode::FORBIDDEN,
        "Institute accreditation has expired. Cannot create courses.",
    )
    .await;
}

#[tokio::test]
async fn unverified_institute_cannot_publish() {
    let (app, store) = test_app();
    let (_institute, token) = seed_institute(&store, VerifiedStatus::Pending, false).await;

    let response = send(
        &app,
        json_request("POST", "/courses", Some(&token), course_payload("Basic Safety Training")),
    )
    .await;

    assert_error(
        response,
        StatusCode::FORBIDDEN,
        "Institute must be verified to create courses",
    )
    .await;
}

#[tokio::test]
async fn students_cannot_publish() {
    let (app, store) = test_app();
    let (_student, token) = seed_student(&store).await;

    let response = send(
        &app,
        json_request("POST", "/courses", Some(&token), course_payload("Basic Safety Training")),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn catalog_filters_and_search() {
    let (app, store) = test_app();
    let (institute, _token) = seed_institute(&store, VerifiedStatus::Verified, false).await;
    let bst = seed_course(&store, institute.instid).await;
    store
        .set_course_status(bst.courseid, CourseStatus::Inactive)
        .await
        .unwrap();
    let active = seed_course(&store, institute.instid).await;

    // Inactive courses never appear.
    let response = send(&app, get("/courses", None)).await;
    let body = body_json(response).await;
    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["courseid"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec![active.courseid.to_string().as_str()]);

    // Case-insensitive title search.
    let response = send(&app, get("/courses?search=basic+safety", None)).await;
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let response = send(&app, get("/courses?search=celestial", None)).await;
    let body = body_json(response).await;
    assert!(body.as_array().unwrap().is_empty());

    // Type filter uses the catalog vocabulary.
    let response = send(&app, get("/courses?type=STCW&mode=offline", None)).await;
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let response = send(&app, get("/courses?type=Refresher", None)).await;
    let body = body_json(response).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn catalog_limit_is_applied_and_never_negative() {
    let (app, store) = test_app();
    let (institute, _token) = seed_institute(&store, VerifiedStatus::Verified, false).await;
    seed_course(&store, institute.instid).await;
    seed_course(&store, institute.instid).await;

    let response = send(&app, get("/courses?limit=1", None)).await;
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    // A negative limit is floored to an empty page instead of erroring.
    let response = send(&app, get("/courses?limit=-5", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn missing_course_is_a_404() {
    let (app, _store) = test_app();

    let response = send(
        &app,
        get("/courses/00000000-0000-0000-0000-000000000000", None),
    )
    .await;

    assert_error(response, StatusCode::NOT_FOUND, "Course not found").await;
}

#[tokio::test]
async fn my_courses_lists_only_own() {
    let (app, store) = test_app();
    let (institute, token) = seed_institute(&store, VerifiedStatus::Verified, false).await;
    let (other, _other_token) = seed_institute(&store, VerifiedStatus::Verified, false).await;
    let own = seed_course(&store, institute.instid).await;
    seed_course(&store, other.instid).await;

    let response = send(&app, get("/courses/institute/my-courses", Some(&token))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let courses = body.as_array().unwrap();
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0]["courseid"], own.courseid.to_string());
}

#[tokio::test]
async fn status_update_is_owner_only() {
    let (app, store) = test_app();
    let (institute, token) = seed_institute(&store, VerifiedStatus::Verified, false).await;
    let (_other, other_token) = seed_institute(&store, VerifiedStatus::Verified, false).await;
    let course = seed_course(&store, institute.instid).await;

    let denied = send(
        &app,
        put(
            &format!("/courses/{}/status?status=archived", course.courseid),
            Some(&other_token),
        ),
    )
    .await;
    assert_error(
        denied,
        StatusCode::FORBIDDEN,
        "Not authorized to update this course",
    )
    .await;

    let response = send(
        &app,
        put(
            &format!("/courses/{}/status?status=archived", course.courseid),
            Some(&token),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Course status updated successfully");

    let stored = store.course_by_id(course.courseid).await.unwrap().unwrap();
    assert_eq!(stored.status, CourseStatus::Archived);
}

#[tokio::test]
async fn status_update_on_missing_course_is_a_404() {
    let (app, store) = test_app();
    let (_institute, token) = seed_institute(&store, VerifiedStatus::Verified, false).await;

    let response = send(
        &app,
        put(
            "/courses/00000000-0000-0000-0000-000000000000/status?status=inactive",
            Some(&token),
        ),
    )
    .await;

    assert_error(response, StatusCode::NOT_FOUND, "Course not found").await;
}
