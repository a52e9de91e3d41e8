use axum::{
    Router,
    routing::{get, post, put},
};

use super::controller::{
    batch_bookings, create_booking, get_booking, my_bookings, update_payment_status,
};
use crate::state::AppState;

pub fn init_bookings_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_booking))
        .route("/my-bookings", get(my_bookings))
        .route("/batch/{batch_id}/bookings", get(batch_bookings))
        .route("/{id}", get(get_booking))
        .route("/{id}/payment-status", put(update_payment_status))
}
