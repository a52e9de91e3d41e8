use axum::Json;
use axum::extract::{Path, Query, State};
use tracing::instrument;
use uuid::Uuid;

use super::model::{
    ApplicationStatusQuery, BookingListQuery, CourseApplicationDetail, InstituteListQuery,
    PlatformStats, RequestStatusQuery, ReviewReactivationRequest, VerifyInstituteQuery,
};
use super::service::AdminService;
use crate::middleware::auth::CurrentAdmin;
use crate::modules::auth::model::MessageResponse;
use crate::modules::bookings::model::Booking;
use crate::modules::institutes::model::{Institute, ReactivationRequest};
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorResponse};

/// List institutes for moderation
#[utoipa::path(
    get,
    path = "/admin/institutes",
    params(InstituteListQuery),
    responses(
        (status = 200, description = "Institutes, newest first", body = [Institute]),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not an admin account", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip(state, _admin))]
pub async fn list_institutes(
    State(state): State<AppState>,
    _admin: CurrentAdmin,
    Query(query): Query<InstituteListQuery>,
) -> Result<Json<Vec<Institute>>, AppError> {
    let institutes =
        AdminService::list_institutes(state.store.as_ref(), query.verified_status).await?;
    Ok(Json(institutes))
}

/// Set an institute's verification status
#[utoipa::path(
    put,
    path = "/admin/institutes/{id}/verify",
    params(("id" = Uuid, Path, description = "Institute id"), VerifyInstituteQuery),
    responses(
        (status = 200, description = "Verification status updated", body = MessageResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not an admin account", body = ErrorResponse),
        (status = 404, description = "Institute not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip(state, _admin))]
pub async fn verify_institute(
    State(state): State<AppState>,
    _admin: CurrentAdmin,
    Path(id): Path<Uuid>,
    Query(query): Query<VerifyInstituteQuery>,
) -> Result<Json<MessageResponse>, AppError> {
    AdminService::verify_institute(state.store.as_ref(), id, query.verified_status).await?;
    Ok(Json(MessageResponse {
        message: "Institute verification status updated successfully".to_string(),
    }))
}

/// List reactivation requests
#[utoipa::path(
    get,
    path = "/admin/reactivation-requests",
    params(RequestStatusQuery),
    responses(
        (status = 200, description = "Requests, newest first", body = [ReactivationRequest]),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not an admin account", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip(state, _admin))]
pub async fn list_reactivation_requests(
    State(state): State<AppState>,
    _admin: CurrentAdmin,
    Query(query): Query<RequestStatusQuery>,
) -> Result<Json<Vec<ReactivationRequest>>, AppError> {
    let requests =
        AdminService::list_reactivation_requests(state.store.as_ref(), query.status).await?;
    Ok(Json(requests))
}

/// Review a reactivation request
#[utoipa::path(
    put,
    path = "/admin/reactivation-requests/{id}",
    params(("id" = Uuid, Path, description = "Request id")),
    request_body = ReviewReactivationRequest,
    responses(
        (status = 200, description = "Request reviewed", body = MessageResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not an admin account", body = ErrorResponse),
        (status = 404, description = "Reactivation request not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip(state, _admin, dto))]
pub async fn review_reactivation_request(
    State(state): State<AppState>,
    _admin: CurrentAdmin,
    Path(id): Path<Uuid>,
    Json(dto): Json<ReviewReactivationRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    AdminService::review_reactivation_request(state.store.as_ref(), id, dto).await?;
    Ok(Json(MessageResponse {
        message: "Reactivation request updated successfully".to_string(),
    }))
}

/// List bookings platform-wide
#[utoipa::path(
    get,
    path = "/admin/bookings",
    params(BookingListQuery),
    responses(
        (status = 200, description = "Bookings, newest first", body = [Booking]),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not an admin account", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip(state, _admin))]
pub async fn list_bookings(
    State(state): State<AppState>,
    _admin: CurrentAdmin,
    Query(query): Query<BookingListQuery>,
) -> Result<Json<Vec<Booking>>, AppError> {
    let bookings = AdminService::list_bookings(state.store.as_ref(), query.payment_status).await?;
    Ok(Json(bookings))
}

/// Platform-wide statistics
#[utoipa::path(
    get,
    path = "/admin/stats",
    responses(
        (status = 200, description = "Counters and completed revenue", body = PlatformStats),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not an admin account", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip(state, _admin))]
pub async fn platform_stats(
    State(state): State<AppState>,
    _admin: CurrentAdmin,
) -> Result<Json<PlatformStats>, AppError> {
    let stats = AdminService::platform_stats(state.store.as_ref()).await?;
    Ok(Json(stats))
}

/// List course applications with institute and catalog detail
#[utoipa::path(
    get,
    path = "/admin/course-applications",
    params(RequestStatusQuery),
    responses(
        (status = 200, description = "Applications, newest first", body = [CourseApplicationDetail]),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not an admin account", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip(state, _admin))]
pub async fn list_course_applications(
    State(state): State<AppState>,
    _admin: CurrentAdmin,
    Query(query): Query<RequestStatusQuery>,
) -> Result<Json<Vec<CourseApplicationDetail>>, AppError> {
    let applications =
        AdminService::list_course_applications(state.store.as_ref(), query.status).await?;
    Ok(Json(applications))
}

/// Update a course application's status
#[utoipa::path(
    put,
    path = "/admin/course-applications/{id}",
    params(("id" = Uuid, Path, description = "Application id"), ApplicationStatusQuery),
    responses(
        (status = 200, description = "Application status updated", body = MessageResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not an admin account", body = ErrorResponse),
        (status = 404, description = "Application not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip(state, _admin))]
pub async fn update_application_status(
    State(state): State<AppState>,
    _admin: CurrentAdmin,
    Path(id): Path<Uuid>,
    Query(query): Query<ApplicationStatusQuery>,
) -> Result<Json<MessageResponse>, AppError> {
    AdminService::update_application_status(state.store.as_ref(), id, query.new_status).await?;
    Ok(Json(MessageResponse {
        message: "Application status updated successfully".to_string(),
    }))
}
