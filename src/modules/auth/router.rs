use axum::{Router, routing::post};

use super::controller::{login, signup_institute, signup_student};
use crate::state::AppState;

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/signup/student", post(signup_student))
        .route("/signup/institute", post(signup_institute))
        .route("/login", post(login))
}
