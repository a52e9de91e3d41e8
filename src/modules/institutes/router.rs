use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{
    create_reactivation_request, get_institute, get_my_institute, my_reactivation_requests,
};
use crate::state::AppState;

pub fn init_institutes_router() -> Router<AppState> {
    Router::new()
        .route("/me", get(get_my_institute))
        .route("/reactivation-request", post(create_reactivation_request))
        .route("/reactivation-requests/me", get(my_reactivation_requests))
        .route("/{id}", get(get_institute))
}
