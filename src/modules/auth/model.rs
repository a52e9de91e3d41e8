use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
pub enum UserRole {
    Student,
    Institute,
    Admin,
}

/// JWT claims: subject id, role, expiry and issue time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: UserRole,
    pub exp: usize,
    pub iat: usize,
}

/// Base account row. The password hash never leaves the server.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct User {
    pub userid: Uuid,
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
    #[serde(skip)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub user_id: Uuid,
    pub role: UserRole,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct StudentSignupRequest {
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
    #[validate(length(min = 1, message = "full_name is required"))]
    pub full_name: String,
    pub date_of_birth: NaiveDate,
    #[validate(length(min = 1, message = "phone is required"))]
    pub phone: String,
    pub cdc_number: Option<String>,
    pub indos_number: Option<String>,
    pub rank: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct InstituteSignupRequest {
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
    #[validate(length(min = 1, message = "full_name is required"))]
    pub full_name: String,
    #[validate(length(min = 1, message = "institute_name is required"))]
    pub institute_name: String,
    #[validate(length(min = 1, message = "accreditation_no is required"))]
    pub accreditation_no: String,
    pub valid_from: NaiveDate,
    pub valid_to: NaiveDate,
    #[validate(length(min = 1, message = "contact_phone is required"))]
    pub contact_phone: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    /// Master course templates the institute wants to offer; each becomes a
    /// pending course application.
    #[serde(default)]
    pub selected_courses: Vec<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&UserRole::Institute).unwrap(),
            "\"institute\""
        );
        assert_eq!(
            serde_json::from_str::<UserRole>("\"admin\"").unwrap(),
            UserRole::Admin
        );
    }

    #[test]
    fn password_hash_is_never_serialized() {
        let user = User {
            userid: Uuid::new_v4(),
            email: "crew@example.com".to_string(),
            full_name: "Test Crew".to_string(),
            role: UserRole::Student,
            password_hash: "$2b$12$secret".to_string(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("$2b$12$secret"));
    }
}
