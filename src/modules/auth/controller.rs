use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::instrument;

use super::model::{InstituteSignupRequest, LoginRequest, StudentSignupRequest, TokenResponse};
use super::service::AuthService;
use crate::modules::institutes::model::Institute;
use crate::modules::students::model::Student;
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorResponse};
use crate::validator::ValidatedJson;

/// Register a student account
#[utoipa::path(
    post,
    path = "/auth/signup/student",
    request_body = StudentSignupRequest,
    responses(
        (status = 201, description = "Student account created", body = Student),
        (status = 400, description = "Email already registered or malformed body", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn signup_student(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<StudentSignupRequest>,
) -> Result<(StatusCode, Json<Student>), AppError> {
    let student = AuthService::signup_student(state.store.as_ref(), dto).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

/// Register an institute account
#[utoipa::path(
    post,
    path = "/auth/signup/institute",
    request_body = InstituteSignupRequest,
    responses(
        (status = 201, description = "Institute account created, pending verification", body = Institute),
        (status = 400, description = "Email already registered or malformed body", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn signup_institute(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<InstituteSignupRequest>,
) -> Result<(StatusCode, Json<Institute>), AppError> {
    let institute = AuthService::signup_institute(state.store.as_ref(), dto).await?;
    Ok((StatusCode::CREATED, Json(institute)))
}

/// Login and receive a bearer token
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let response = AuthService::login(state.store.as_ref(), dto, &state.jwt_config).await?;
    Ok(Json(response))
}
