use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::instrument;
use uuid::Uuid;

use super::model::{CreateReactivationRequest, Institute, ReactivationRequest};
use super::service::InstituteService;
use crate::middleware::auth::CurrentInstitute;
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorResponse};
use crate::validator::ValidatedJson;

/// Get the signed-in institute's profile
#[utoipa::path(
    get,
    path = "/institutes/me",
    responses(
        (status = 200, description = "Institute profile", body = Institute),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not an institute account", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Institutes"
)]
#[instrument(skip_all)]
pub async fn get_my_institute(CurrentInstitute(institute): CurrentInstitute) -> Json<Institute> {
    Json(institute)
}

/// Get an institute profile by id
#[utoipa::path(
    get,
    path = "/institutes/{id}",
    params(("id" = Uuid, Path, description = "Institute id")),
    responses(
        (status = 200, description = "Institute profile", body = Institute),
        (status = 404, description = "Institute not found", body = ErrorResponse)
    ),
    tag = "Institutes"
)]
#[instrument(skip(state))]
pub async fn get_institute(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Institute>, AppError> {
    let institute = InstituteService::get_institute(state.store.as_ref(), id).await?;
    Ok(Json(institute))
}

/// Submit an accreditation reactivation request
#[utoipa::path(
    post,
    path = "/institutes/reactivation-request",
    request_body = CreateReactivationRequest,
    responses(
        (status = 201, description = "Reactivation request submitted", body = ReactivationRequest),
        (status = 400, description = "Accreditation still valid or a pending request exists", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not an institute account", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Institutes"
)]
#[instrument(skip_all)]
pub async fn create_reactivation_request(
    State(state): State<AppState>,
    CurrentInstitute(institute): CurrentInstitute,
    ValidatedJson(dto): ValidatedJson<CreateReactivationRequest>,
) -> Result<(StatusCode, Json<ReactivationRequest>), AppError> {
    let request =
        InstituteService::create_reactivation_request(state.store.as_ref(), &institute, dto)
            .await?;
    Ok((StatusCode::CREATED, Json(request)))
}

/// List the signed-in institute's reactivation requests
#[utoipa::path(
    get,
    path = "/institutes/reactivation-requests/me",
    responses(
        (status = 200, description = "Requests, newest first", body = [ReactivationRequest]),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not an institute account", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Institutes"
)]
#[instrument(skip_all)]
pub async fn my_reactivation_requests(
    State(state): State<AppState>,
    CurrentInstitute(institute): CurrentInstitute,
) -> Result<Json<Vec<ReactivationRequest>>, AppError> {
    let requests =
        InstituteService::my_reactivation_requests(state.store.as_ref(), institute.instid).await?;
    Ok(Json(requests))
}
