use axum::{Router, routing::get};

use super::controller::{get_my_profile, get_student, update_my_profile};
use crate::state::AppState;

pub fn init_students_router() -> Router<AppState> {
    Router::new()
        .route("/me", get(get_my_profile).put(update_my_profile))
        .route("/{id}", get(get_student))
}
