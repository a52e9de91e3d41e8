use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::instrument;
use uuid::Uuid;

use super::model::{Certificate, CreateCertificateRequest};
use super::service::CertificateService;
use crate::middleware::auth::{CurrentInstitute, CurrentStudent};
use crate::modules::auth::model::MessageResponse;
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorResponse};
use crate::validator::ValidatedJson;

/// Issue a certificate
#[utoipa::path(
    post,
    path = "/certificates",
    request_body = CreateCertificateRequest,
    responses(
        (status = 201, description = "Certificate issued", body = Certificate),
        (status = 400, description = "Certificate already exists for this student and course", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Course belongs to another institute", body = ErrorResponse),
        (status = 404, description = "Course or student not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Certificates"
)]
#[instrument(skip_all)]
pub async fn issue_certificate(
    State(state): State<AppState>,
    CurrentInstitute(institute): CurrentInstitute,
    ValidatedJson(dto): ValidatedJson<CreateCertificateRequest>,
) -> Result<(StatusCode, Json<Certificate>), AppError> {
    let certificate =
        CertificateService::issue_certificate(state.store.as_ref(), institute.instid, dto).await?;
    Ok((StatusCode::CREATED, Json(certificate)))
}

/// List the signed-in student's certificates
#[utoipa::path(
    get,
    path = "/certificates/my-certificates",
    responses(
        (status = 200, description = "Own certificates, latest issue date first", body = [Certificate]),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not a student account", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Certificates"
)]
#[instrument(skip_all)]
pub async fn my_certificates(
    State(state): State<AppState>,
    CurrentStudent(student): CurrentStudent,
) -> Result<Json<Vec<Certificate>>, AppError> {
    let certificates =
        CertificateService::my_certificates(state.store.as_ref(), student.studid).await?;
    Ok(Json(certificates))
}

/// List certificates issued by the signed-in institute
#[utoipa::path(
    get,
    path = "/certificates/institute/my-certificates",
    responses(
        (status = 200, description = "Issued certificates, latest issue date first", body = [Certificate]),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not an institute account", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Certificates"
)]
#[instrument(skip_all)]
pub async fn issued_certificates(
    State(state): State<AppState>,
    CurrentInstitute(institute): CurrentInstitute,
) -> Result<Json<Vec<Certificate>>, AppError> {
    let certificates =
        CertificateService::issued_certificates(state.store.as_ref(), institute.instid).await?;
    Ok(Json(certificates))
}

/// Look up a certificate by id
///
/// Public, so that a certificate number printed on paper can be verified.
#[utoipa::path(
    get,
    path = "/certificates/{id}",
    params(("id" = Uuid, Path, description = "Certificate id")),
    responses(
        (status = 200, description = "Certificate", body = Certificate),
        (status = 404, description = "Certificate not found", body = ErrorResponse)
    ),
    tag = "Certificates"
)]
#[instrument(skip(state))]
pub async fn get_certificate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Certificate>, AppError> {
    let certificate = CertificateService::get_certificate(state.store.as_ref(), id).await?;
    Ok(Json(certificate))
}

/// Mark a certificate as uploaded to the DGShipping registry
#[utoipa::path(
    put,
    path = "/certificates/{id}/dgshipping-upload",
    params(("id" = Uuid, Path, description = "Certificate id")),
    responses(
        (status = 200, description = "Upload flag set", body = MessageResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Certificate belongs to another institute", body = ErrorResponse),
        (status = 404, description = "Certificate not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Certificates"
)]
#[instrument(skip(state, institute))]
pub async fn mark_dgshipping_uploaded(
    State(state): State<AppState>,
    CurrentInstitute(institute): CurrentInstitute,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    CertificateService::mark_dgshipping_uploaded(state.store.as_ref(), institute.instid, id)
        .await?;
    Ok(Json(MessageResponse {
        message: "DGShipping upload status updated successfully".to_string(),
    }))
}
