mod common;

use axum::http::StatusCode;
use seatrain::modules::bookings::model::PaymentStatus;
use seatrain::modules::institutes::model::VerifiedStatus;
use seatrain::store::Store;
use serde_json::json;

use common::{
    assert_error, body_json, get, json_request, put, seed_batch, seed_course, seed_institute,
    seed_student, send, test_app,
};

#[tokio::test]
async fn booking_takes_a_seat() {
    let (app, store) = test_app();
    let (institute, _token) = seed_institute(&store, VerifiedStatus::Verified, false).await;
    let course = seed_course(&store, institute.instid).await;
    let batch = seed_batch(&store, course.courseid, 20).await;
    let (_student, token) = seed_student(&store).await;

    let response = send(
        &app,
        json_request(
            "POST",
            "/bookings",
            Some(&token),
            json!({ "batchid": batch.batchid, "amount": 12000.0 }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["payment_status"], "pending");
    assert_eq!(body["attendance_status"], "not_started");
    let confirmation = body["confirmation_number"].as_str().unwrap();
    assert!(confirmation.starts_with("BK"));
    assert_eq!(confirmation.len(), 18);

    let stored = store.batch_by_id(batch.batchid).await.unwrap().unwrap();
    assert_eq!(stored.seats_booked, 1);
}

#[tokio::test]
async fn full_batch_refuses_and_keeps_state() {
    let (app, store) = test_app();
    let (institute, _token) = seed_institute(&store, VerifiedStatus::Verified, false).await;
    let course = seed_course(&store, institute.instid).await;
    let batch = seed_batch(&store, course.courseid, 1).await;

    let (_first, first_token) = seed_student(&store).await;
    let taken = send(
        &app,
        json_request(
            "POST",
            "/bookings",
            Some(&first_token),
            json!({ "batchid": batch.batchid, "amount": 12000.0 }),
        ),
    )
    .await;
    assert_eq!(taken.status(), StatusCode::CREATED);

    let (_second, second_token) = seed_student(&store).await;
    let refused = send(
        &app,
        json_request(
            "POST",
            "/bookings",
            Some(&second_token),
            json!({ "batchid": batch.batchid, "amount": 12000.0 }),
        ),
    )
    .await;
    assert_error(
        refused,
        StatusCode::BAD_REQUEST,
        "Batch is full. No seats available.",
    )
    .await;

    // The refusal must not leak a seat or a booking row.
    let stored = store.batch_by_id(batch.batchid).await.unwrap().unwrap();
    assert_eq!(stored.seats_booked, 1);
    assert_eq!(store.count_bookings().await.unwrap(), 1);
}

#[tokio::test]
async fn double_booking_is_refused() {
    let (app, store) = test_app();
    let (institute, _token) = seed_institute(&store, VerifiedStatus::Verified, false).await;
    let course = seed_course(&store, institute.instid).await;
    let batch = seed_batch(&store, course.courseid, 20).await;
    let (_student, token) = seed_student(&store).await;
    let payload = json!({ "batchid": batch.batchid, "amount": 12000.0 });

    let first = send(&app, json_request("POST", "/bookings", Some(&token), payload.clone())).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = send(&app, json_request("POST", "/bookings", Some(&token), payload)).await;
    assert_error(
        second,
        StatusCode::BAD_REQUEST,
        "You have already booked this batch",
    )
    .await;

    let stored = store.batch_by_id(batch.batchid).await.unwrap().unwrap();
    assert_eq!(stored.seats_booked, 1);
}

#[tokio::test]
async fn booking_a_missing_batch_is_a_404() {
    let (app, store) = test_app();
    let (_student, token) = seed_student(&store).await;

    let response = send(
        &app,
        json_request(
            "POST",
            "/bookings",
            Some(&token),
            json!({ "batchid": uuid::Uuid::nil(), "amount": 12000.0 }),
        ),
    )
    .await;

    assert_error(response, StatusCode::NOT_FOUND, "Batch not found").await;
}

#[tokio::test]
async fn students_only_see_their_own_bookings() {
    let (app, store) = test_app();
    let (institute, _token) = seed_institute(&store, VerifiedStatus::Verified, false).await;
    let course = seed_course(&store, institute.instid).await;
    let batch = seed_batch(&store, course.courseid, 20).await;

    let (_owner, owner_token) = seed_student(&store).await;
    let created = send(
        &app,
        json_request(
            "POST",
            "/bookings",
            Some(&owner_token),
            json!({ "batchid": batch.batchid, "amount": 12000.0 }),
        ),
    )
    .await;
    let bookid = body_json(created).await["bookid"].as_str().unwrap().to_string();

    let mine = send(&app, get("/bookings/my-bookings", Some(&owner_token))).await;
    let body = body_json(mine).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let own = send(&app, get(&format!("/bookings/{bookid}"), Some(&owner_token))).await;
    assert_eq!(own.status(), StatusCode::OK);

    // Another student's id does not resolve, even though the row exists.
    let (_other, other_token) = seed_student(&store).await;
    let foreign = send(&app, get(&format!("/bookings/{bookid}"), Some(&other_token))).await;
    assert_error(foreign, StatusCode::NOT_FOUND, "Booking not found").await;
}

#[tokio::test]
async fn payment_status_update_is_owner_only() {
    let (app, store) = test_app();
    let (institute, _token) = seed_institute(&store, VerifiedStatus::Verified, false).await;
    let course = seed_course(&store, institute.instid).await;
    let batch = seed_batch(&store, course.courseid, 20).await;
    let (_student, token) = seed_student(&store).await;

    let created = send(
        &app,
        json_request(
            "POST",
            "/bookings",
            Some(&token),
            json!({ "batchid": batch.batchid, "amount": 12000.0 }),
        ),
    )
    .await;
    let bookid = body_json(created).await["bookid"].as_str().unwrap().to_string();

    let (_other, other_token) = seed_student(&store).await;
    let denied = send(
        &app,
        put(
            &format!("/bookings/{bookid}/payment-status?payment_status=completed"),
            Some(&other_token),
        ),
    )
    .await;
    assert_error(denied, StatusCode::NOT_FOUND, "Booking not found").await;

    let response = send(
        &app,
        put(
            &format!("/bookings/{bookid}/payment-status?payment_status=completed"),
            Some(&token),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Payment status updated successfully");

    let stored = store
        .booking_for_student(bookid.parse().unwrap(), _student.studid)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.payment_status, PaymentStatus::Completed);
}

#[tokio::test]
async fn batch_roster_is_for_the_owning_institute() {
    let (app, store) = test_app();
    let (institute, institute_token) = seed_institute(&store, VerifiedStatus::Verified, false).await;
    let (_other, other_token) = seed_institute(&store, VerifiedStatus::Verified, false).await;
    let course = seed_course(&store, institute.instid).await;
    let batch = seed_batch(&store, course.courseid, 20).await;

    let (_student, student_token) = seed_student(&store).await;
    send(
        &app,
        json_request(
            "POST",
            "/bookings",
            Some(&student_token),
            json!({ "batchid": batch.batchid, "amount": 12000.0 }),
        ),
    )
    .await;

    let uri = format!("/bookings/batch/{}/bookings", batch.batchid);

    let unauthenticated = send(&app, get(&uri, None)).await;
    assert_eq!(unauthenticated.status(), StatusCode::UNAUTHORIZED);

    let foreign = send(&app, get(&uri, Some(&other_token))).await;
    assert_error(
        foreign,
        StatusCode::FORBIDDEN,
        "Not authorized to view bookings for this batch",
    )
    .await;

    let response = send(&app, get(&uri, Some(&institute_token))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}
