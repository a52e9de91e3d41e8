use axum::{
    Router,
    routing::{get, put},
};

use super::controller::{
    create_course, get_course, list_courses, list_master_courses, my_courses,
    update_course_status,
};
use crate::state::AppState;

pub fn init_courses_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_courses).post(create_course))
        .route("/master-courses", get(list_master_courses))
        .route("/institute/my-courses", get(my_courses))
        .route("/{id}", get(get_course))
        .route("/{id}/status", put(update_course_status))
}
