use axum::{
    Router,
    routing::{get, put},
};

use super::controller::{
    list_bookings, list_course_applications, list_institutes, list_reactivation_requests,
    platform_stats, review_reactivation_request, update_application_status, verify_institute,
};
use crate::state::AppState;

pub fn init_admin_router() -> Router<AppState> {
    Router::new()
        .route("/institutes", get(list_institutes))
        .route("/institutes/{id}/verify", put(verify_institute))
        .route("/reactivation-requests", get(list_reactivation_requests))
        .route(
            "/reactivation-requests/{id}",
            put(review_reactivation_request),
        )
        .route("/bookings", get(list_bookings))
        .route("/stats", get(platform_stats))
        .route("/course-applications", get(list_course_applications))
        .route(
            "/course-applications/{id}",
            put(update_application_status),
        )
}
