use axum::Json;
use axum::extract::{Path, State};
use tracing::instrument;
use uuid::Uuid;

use super::model::{Student, UpdateStudentProfileRequest};
use super::service::StudentService;
use crate::middleware::auth::{AuthUser, CurrentStudent};
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorResponse};

/// Get the signed-in student's profile
#[utoipa::path(
    get,
    path = "/students/me",
    responses(
        (status = 200, description = "Student profile", body = Student),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not a student account", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip_all)]
pub async fn get_my_profile(CurrentStudent(student): CurrentStudent) -> Json<Student> {
    Json(student)
}

/// Update the signed-in student's profile
#[utoipa::path(
    put,
    path = "/students/me",
    request_body = UpdateStudentProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = Student),
        (status = 400, description = "No valid fields to update", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not a student account", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip_all)]
pub async fn update_my_profile(
    State(state): State<AppState>,
    CurrentStudent(student): CurrentStudent,
    Json(changes): Json<UpdateStudentProfileRequest>,
) -> Result<Json<Student>, AppError> {
    let updated =
        StudentService::update_profile(state.store.as_ref(), student.studid, changes).await?;
    Ok(Json(updated))
}

/// Get a student profile by id
#[utoipa::path(
    get,
    path = "/students/{id}",
    params(("id" = Uuid, Path, description = "Student id")),
    responses(
        (status = 200, description = "Student profile", body = Student),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, _auth))]
pub async fn get_student(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Student>, AppError> {
    let student = StudentService::get_student(state.store.as_ref(), id).await?;
    Ok(Json(student))
}
