use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use chrono::Utc;
use uuid::Uuid;

use crate::modules::auth::model::{User, UserRole};
use crate::modules::institutes::model::Institute;
use crate::modules::students::model::Student;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::verify_token;

/// Extractor that validates the bearer token and loads the account it
/// belongs to. Handlers that only need "any signed-in user" take this
/// directly; the role-specific extractors below build on it.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized("Invalid authorization header format"))?;

        let claims = verify_token(token, &state.jwt_config)?;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::unauthorized("Could not validate credentials"))?;

        let user = state
            .store
            .user_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        Ok(AuthUser(user))
    }
}

/// Signed-in student with their profile loaded.
#[derive(Debug, Clone)]
pub struct CurrentStudent(pub Student);

impl FromRequestParts<AppState> for CurrentStudent {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;

        if user.role != UserRole::Student {
            return Err(AppError::forbidden("Access denied. Student role required."));
        }

        let student = state
            .store
            .student_by_user(user.userid)
            .await?
            .ok_or_else(|| AppError::not_found("Student profile not found"))?;

        Ok(CurrentStudent(student))
    }
}

/// Signed-in institute with its profile loaded. Accreditation expiry is not
/// checked here; only course and batch creation refuse expired institutes.
#[derive(Debug, Clone)]
pub struct CurrentInstitute(pub Institute);

impl FromRequestParts<AppState> for CurrentInstitute {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;

        if user.role != UserRole::Institute {
            return Err(AppError::forbidden(
                "Access denied. Institute role required.",
            ));
        }

        let institute = state
            .store
            .institute_by_user(user.userid)
            .await?
            .ok_or_else(|| AppError::not_found("Institute profile not found"))?;

        Ok(CurrentInstitute(institute))
    }
}

/// Signed-in platform administrator. Admin accounts have no profile row.
#[derive(Debug, Clone)]
pub struct CurrentAdmin(pub User);

impl FromRequestParts<AppState> for CurrentAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;

        if user.role != UserRole::Admin {
            return Err(AppError::forbidden("Access denied. Admin role required."));
        }

        Ok(CurrentAdmin(user))
    }
}

/// An accreditation valid through today is still usable; it expires at the
/// end of its `valid_to` date.
pub fn accreditation_expired(institute: &Institute) -> bool {
    institute.valid_to < Utc::now().date_naive()
}
