use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use tracing::instrument;
use uuid::Uuid;

use super::model::{Batch, BatchListQuery, BatchStatusQuery, CreateBatchRequest};
use super::service::BatchService;
use crate::middleware::auth::CurrentInstitute;
use crate::modules::auth::model::MessageResponse;
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorResponse};
use crate::validator::ValidatedJson;

/// Browse scheduled batches
#[utoipa::path(
    get,
    path = "/batches",
    params(BatchListQuery),
    responses(
        (status = 200, description = "Batches ordered by start date; upcoming and ongoing unless a status filter is given", body = [Batch])
    ),
    tag = "Batches"
)]
#[instrument(skip(state))]
pub async fn list_batches(
    State(state): State<AppState>,
    Query(query): Query<BatchListQuery>,
) -> Result<Json<Vec<Batch>>, AppError> {
    let batches = BatchService::list_batches(state.store.as_ref(), query).await?;
    Ok(Json(batches))
}

/// Get a batch by id
#[utoipa::path(
    get,
    path = "/batches/{id}",
    params(("id" = Uuid, Path, description = "Batch id")),
    responses(
        (status = 200, description = "Batch", body = Batch),
        (status = 404, description = "Batch not found", body = ErrorResponse)
    ),
    tag = "Batches"
)]
#[instrument(skip(state))]
pub async fn get_batch(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Batch>, AppError> {
    let batch = BatchService::get_batch(state.store.as_ref(), id).await?;
    Ok(Json(batch))
}

/// Schedule a batch for an owned course
#[utoipa::path(
    post,
    path = "/batches",
    request_body = CreateBatchRequest,
    responses(
        (status = 201, description = "Batch scheduled", body = Batch),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Accreditation expired or course not owned", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Batches"
)]
#[instrument(skip_all)]
pub async fn create_batch(
    State(state): State<AppState>,
    CurrentInstitute(institute): CurrentInstitute,
    ValidatedJson(dto): ValidatedJson<CreateBatchRequest>,
) -> Result<(StatusCode, Json<Batch>), AppError> {
    let batch = BatchService::create_batch(state.store.as_ref(), &institute, dto).await?;
    Ok((StatusCode::CREATED, Json(batch)))
}

/// List batches across the signed-in institute's courses
#[utoipa::path(
    get,
    path = "/batches/institute/my-batches",
    responses(
        (status = 200, description = "Own batches, latest start date first", body = [Batch]),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not an institute account", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Batches"
)]
#[instrument(skip_all)]
pub async fn my_batches(
    State(state): State<AppState>,
    CurrentInstitute(institute): CurrentInstitute,
) -> Result<Json<Vec<Batch>>, AppError> {
    let batches = BatchService::my_batches(state.store.as_ref(), institute.instid).await?;
    Ok(Json(batches))
}

/// Update a batch's status
#[utoipa::path(
    put,
    path = "/batches/{id}/status",
    params(("id" = Uuid, Path, description = "Batch id"), BatchStatusQuery),
    responses(
        (status = 200, description = "Status updated", body = MessageResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not the owning institute", body = ErrorResponse),
        (status = 404, description = "Batch not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Batches"
)]
#[instrument(skip(state, institute))]
pub async fn update_batch_status(
    State(state): State<AppState>,
    CurrentInstitute(institute): CurrentInstitute,
    Path(id): Path<Uuid>,
    Query(query): Query<BatchStatusQuery>,
) -> Result<Json<MessageResponse>, AppError> {
    BatchService::update_batch_status(
        state.store.as_ref(),
        institute.instid,
        id,
        query.new_status,
    )
    .await?;
    Ok(Json(MessageResponse {
        message: "Batch status updated successfully".to_string(),
    }))
}
