use axum::{
    Router,
    routing::{get, put},
};

use super::controller::{
    create_batch, get_batch, list_batches, my_batches, update_batch_status,
};
use crate::state::AppState;

pub fn init_batches_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_batches).post(create_batch))
        .route("/institute/my-batches", get(my_batches))
        .route("/{id}", get(get_batch))
        .route("/{id}/status", put(update_batch_status))
}
