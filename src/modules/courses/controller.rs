use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use tracing::instrument;
use uuid::Uuid;

use super::model::{
    Course, CourseListQuery, CourseStatusQuery, CreateCourseRequest, MasterCourse,
};
use super::service::CourseService;
use crate::middleware::auth::CurrentInstitute;
use crate::modules::auth::model::MessageResponse;
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorResponse};
use crate::validator::ValidatedJson;

/// List the master course catalog
#[utoipa::path(
    get,
    path = "/courses/master-courses",
    responses(
        (status = 200, description = "Active catalog templates, sorted by name", body = [MasterCourse])
    ),
    tag = "Courses"
)]
#[instrument(skip_all)]
pub async fn list_master_courses(
    State(state): State<AppState>,
) -> Result<Json<Vec<MasterCourse>>, AppError> {
    let courses = CourseService::list_master_courses(state.store.as_ref()).await?;
    Ok(Json(courses))
}

/// Browse active courses
#[utoipa::path(
    get,
    path = "/courses",
    params(CourseListQuery),
    responses(
        (status = 200, description = "Active courses, newest first", body = [Course])
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn list_courses(
    State(state): State<AppState>,
    Query(query): Query<CourseListQuery>,
) -> Result<Json<Vec<Course>>, AppError> {
    let courses = CourseService::list_courses(state.store.as_ref(), query).await?;
    Ok(Json(courses))
}

/// Get a course by id
#[utoipa::path(
    get,
    path = "/courses/{id}",
    params(("id" = Uuid, Path, description = "Course id")),
    responses(
        (status = 200, description = "Course", body = Course),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Course>, AppError> {
    let course = CourseService::get_course(state.store.as_ref(), id).await?;
    Ok(Json(course))
}

/// Publish a course
#[utoipa::path(
    post,
    path = "/courses",
    request_body = CreateCourseRequest,
    responses(
        (status = 201, description = "Course published", body = Course),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Accreditation expired or institute not verified", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip_all)]
pub async fn create_course(
    State(state): State<AppState>,
    CurrentInstitute(institute): CurrentInstitute,
    ValidatedJson(dto): ValidatedJson<CreateCourseRequest>,
) -> Result<(StatusCode, Json<Course>), AppError> {
    let course = CourseService::create_course(state.store.as_ref(), &institute, dto).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

/// List the signed-in institute's courses
#[utoipa::path(
    get,
    path = "/courses/institute/my-courses",
    responses(
        (status = 200, description = "Own courses, newest first", body = [Course]),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not an institute account", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip_all)]
pub async fn my_courses(
    State(state): State<AppState>,
    CurrentInstitute(institute): CurrentInstitute,
) -> Result<Json<Vec<Course>>, AppError> {
    let courses = CourseService::my_courses(state.store.as_ref(), institute.instid).await?;
    Ok(Json(courses))
}

/// Update a course's status
#[utoipa::path(
    put,
    path = "/courses/{id}/status",
    params(("id" = Uuid, Path, description = "Course id"), CourseStatusQuery),
    responses(
        (status = 200, description = "Status updated", body = MessageResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not the owning institute", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, institute))]
pub async fn update_course_status(
    State(state): State<AppState>,
    CurrentInstitute(institute): CurrentInstitute,
    Path(id): Path<Uuid>,
    Query(query): Query<CourseStatusQuery>,
) -> Result<Json<MessageResponse>, AppError> {
    CourseService::update_course_status(state.store.as_ref(), institute.instid, id, query.status)
        .await?;
    Ok(Json(MessageResponse {
        message: "Course status updated successfully".to_string(),
    }))
}
