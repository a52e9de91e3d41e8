use axum::{
    Router,
    routing::{get, post, put},
};

use super::controller::{
    get_certificate, issue_certificate, issued_certificates, mark_dgshipping_uploaded,
    my_certificates,
};
use crate::state::AppState;

pub fn init_certificates_router() -> Router<AppState> {
    Router::new()
        .route("/", post(issue_certificate))
        .route("/my-certificates", get(my_certificates))
        .route("/institute/my-certificates", get(issued_certificates))
        .route("/{id}", get(get_certificate))
        .route("/{id}/dgshipping-upload", put(mark_dgshipping_uploaded))
}
