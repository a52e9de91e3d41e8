use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use tracing::instrument;
use uuid::Uuid;

use super::model::{Booking, CreateBookingRequest, PaymentStatusQuery};
use super::service::BookingService;
use crate::middleware::auth::{CurrentInstitute, CurrentStudent};
use crate::modules::auth::model::MessageResponse;
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorResponse};
use crate::validator::ValidatedJson;

/// Book a seat on a batch
#[utoipa::path(
    post,
    path = "/bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Seat booked", body = Booking),
        (status = 400, description = "Batch full or already booked", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not a student account", body = ErrorResponse),
        (status = 404, description = "Batch not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Bookings"
)]
#[instrument(skip_all)]
pub async fn create_booking(
    State(state): State<AppState>,
    CurrentStudent(student): CurrentStudent,
    ValidatedJson(dto): ValidatedJson<CreateBookingRequest>,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    let booking = BookingService::create_booking(state.store.as_ref(), student.studid, dto).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// List the signed-in student's bookings
#[utoipa::path(
    get,
    path = "/bookings/my-bookings",
    responses(
        (status = 200, description = "Own bookings, newest first", body = [Booking]),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not a student account", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Bookings"
)]
#[instrument(skip_all)]
pub async fn my_bookings(
    State(state): State<AppState>,
    CurrentStudent(student): CurrentStudent,
) -> Result<Json<Vec<Booking>>, AppError> {
    let bookings = BookingService::my_bookings(state.store.as_ref(), student.studid).await?;
    Ok(Json(bookings))
}

/// Get one of the signed-in student's bookings
#[utoipa::path(
    get,
    path = "/bookings/{id}",
    params(("id" = Uuid, Path, description = "Booking id")),
    responses(
        (status = 200, description = "Booking", body = Booking),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "Booking not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Bookings"
)]
#[instrument(skip(state, student))]
pub async fn get_booking(
    State(state): State<AppState>,
    CurrentStudent(student): CurrentStudent,
    Path(id): Path<Uuid>,
) -> Result<Json<Booking>, AppError> {
    let booking = BookingService::get_booking(state.store.as_ref(), id, student.studid).await?;
    Ok(Json(booking))
}

/// Update the payment status on an own booking
#[utoipa::path(
    put,
    path = "/bookings/{id}/payment-status",
    params(("id" = Uuid, Path, description = "Booking id"), PaymentStatusQuery),
    responses(
        (status = 200, description = "Payment status updated", body = MessageResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "Booking not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Bookings"
)]
#[instrument(skip(state, student))]
pub async fn update_payment_status(
    State(state): State<AppState>,
    CurrentStudent(student): CurrentStudent,
    Path(id): Path<Uuid>,
    Query(query): Query<PaymentStatusQuery>,
) -> Result<Json<MessageResponse>, AppError> {
    BookingService::update_payment_status(
        state.store.as_ref(),
        id,
        student.studid,
        query.payment_status,
    )
    .await?;
    Ok(Json(MessageResponse {
        message: "Payment status updated successfully".to_string(),
    }))
}

/// List bookings on a batch, for the owning institute
#[utoipa::path(
    get,
    path = "/bookings/batch/{batch_id}/bookings",
    params(("batch_id" = Uuid, Path, description = "Batch id")),
    responses(
        (status = 200, description = "Bookings, oldest first", body = [Booking]),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Batch belongs to another institute", body = ErrorResponse),
        (status = 404, description = "Batch not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Bookings"
)]
#[instrument(skip(state, institute))]
pub async fn batch_bookings(
    State(state): State<AppState>,
    CurrentInstitute(institute): CurrentInstitute,
    Path(batch_id): Path<Uuid>,
) -> Result<Json<Vec<Booking>>, AppError> {
    let bookings =
        BookingService::batch_bookings(state.store.as_ref(), institute.instid, batch_id).await?;
    Ok(Json(bookings))
}
