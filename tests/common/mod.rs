#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use chrono::{Days, Utc};
use http_body_util::BodyExt;
use jsonwebtoken::Algorithm;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use seatrain::config::cors::CorsConfig;
use seatrain::config::jwt::JwtConfig;
use seatrain::modules::auth::model::{User, UserRole};
use seatrain::modules::batches::model::{Batch, BatchStatus};
use seatrain::modules::courses::model::{
    Course, CourseMode, CourseStatus, CourseType, MasterCourse,
};
use seatrain::modules::institutes::model::{Institute, VerifiedStatus};
use seatrain::modules::students::model::Student;
use seatrain::router::init_router;
use seatrain::state::AppState;
use seatrain::store::Store;
use seatrain::store::memory::MemStore;
use seatrain::utils::jwt::create_access_token;
use seatrain::utils::password::hash_password;

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret".to_string(),
        algorithm: Algorithm::HS256,
        access_token_expiry: 1800,
    }
}

/// Full application wired to the in-memory store; the store handle is
/// returned for seeding and assertions.
pub fn test_app() -> (Router, Arc<MemStore>) {
    let store = Arc::new(MemStore::new());
    let state = AppState {
        store: store.clone(),
        jwt_config: test_jwt_config(),
        cors_config: CorsConfig {
            allowed_origins: vec!["http://localhost:5173".to_string()],
        },
    };
    (init_router(state), store)
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

fn token_for(userid: Uuid, role: UserRole) -> String {
    create_access_token(userid, role, &test_jwt_config()).unwrap()
}

pub async fn seed_student(store: &MemStore) -> (Student, String) {
    let user = User {
        userid: Uuid::new_v4(),
        email: generate_unique_email(),
        full_name: "Test Seafarer".to_string(),
        role: UserRole::Student,
        password_hash: hash_password("testpass123").unwrap(),
        created_at: Utc::now(),
    };
    let student = Student {
        studid: Uuid::new_v4(),
        userid: user.userid,
        full_name: user.full_name.clone(),
        date_of_birth: "1995-06-15".parse().unwrap(),
        phone: "555-0100".to_string(),
        cdc_number: None,
        indos_number: None,
        rank: None,
        address: None,
        city: None,
        state: None,
        created_at: Utc::now(),
    };
    let token = token_for(user.userid, UserRole::Student);
    let student = store.create_student_account(&user, &student).await.unwrap();
    (student, token)
}

pub async fn seed_institute(
    store: &MemStore,
    verified_status: VerifiedStatus,
    accreditation_expired: bool,
) -> (Institute, String) {
    let today = Utc::now().date_naive();
    let valid_to = if accreditation_expired {
        today.checked_sub_days(Days::new(30)).unwrap()
    } else {
        today.checked_add_days(Days::new(365)).unwrap()
    };

    let user = User {
        userid: Uuid::new_v4(),
        email: generate_unique_email(),
        full_name: "Test Director".to_string(),
        role: UserRole::Institute,
        password_hash: hash_password("testpass123").unwrap(),
        created_at: Utc::now(),
    };
    let institute = Institute {
        instid: Uuid::new_v4(),
        userid: user.userid,
        name: format!("Maritime Academy {}", Uuid::new_v4()),
        accreditation_no: "ACC-1001".to_string(),
        valid_from: today.checked_sub_days(Days::new(1000)).unwrap(),
        valid_to,
        contact_email: user.email.clone(),
        contact_phone: Some("555-0200".to_string()),
        address: None,
        city: None,
        state: None,
        verified_status,
        documents: None,
        created_at: Utc::now(),
    };
    let token = token_for(user.userid, UserRole::Institute);
    let institute = store
        .create_institute_account(&user, &institute, &[])
        .await
        .unwrap();
    (institute, token)
}

pub async fn seed_admin(store: &MemStore) -> String {
    let user = User {
        userid: Uuid::new_v4(),
        email: generate_unique_email(),
        full_name: "Platform Admin".to_string(),
        role: UserRole::Admin,
        password_hash: hash_password("testpass123").unwrap(),
        created_at: Utc::now(),
    };
    let token = token_for(user.userid, UserRole::Admin);
    store.insert_user(&user).await.unwrap();
    token
}

pub async fn seed_course(store: &MemStore, instid: Uuid) -> Course {
    let course = Course {
        courseid: Uuid::new_v4(),
        instid,
        title: "Basic Safety Training".to_string(),
        course_type: CourseType::Stcw,
        duration: "5 days".to_string(),
        mode: CourseMode::Offline,
        fees: 12000.0,
        description: None,
        validity_months: Some(60),
        accreditation_ref: None,
        status: CourseStatus::Active,
        master_course_id: None,
        created_at: Utc::now(),
    };
    store.insert_course(&course).await.unwrap()
}

pub async fn seed_batch(store: &MemStore, courseid: Uuid, seats_total: i32) -> Batch {
    let today = Utc::now().date_naive();
    let batch = Batch {
        batchid: Uuid::new_v4(),
        courseid,
        batch_name: "Morning batch".to_string(),
        start_date: today.checked_add_days(Days::new(14)).unwrap(),
        end_date: today.checked_add_days(Days::new(19)).unwrap(),
        seats_total,
        seats_booked: 0,
        trainer: None,
        location: None,
        batch_status: BatchStatus::Upcoming,
        created_at: Utc::now(),
    };
    store.insert_batch(&batch).await.unwrap()
}

pub async fn seed_master_course(store: &MemStore, name: &str, code: &str) -> MasterCourse {
    let course = MasterCourse {
        master_course_id: Uuid::new_v4(),
        course_name: name.to_string(),
        course_code: code.to_string(),
        category: "STCW".to_string(),
        description: None,
        required_documents: None,
        is_active: true,
    };
    store.seed_master_courses(vec![course.clone()]).await;
    course
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

pub fn put(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("PUT").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn assert_error(response: Response<Body>, status: StatusCode, message: &str) {
    assert_eq!(response.status(), status);
    let body = body_json(response).await;
    assert_eq!(body["error"], message);
}
