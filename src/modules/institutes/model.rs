use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "verified_status", rename_all = "lowercase")]
pub enum VerifiedStatus {
    Pending,
    Verified,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "request_status", rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Institute {
    pub instid: Uuid,
    pub userid: Uuid,
    pub name: String,
    pub accreditation_no: String,
    pub valid_from: NaiveDate,
    pub valid_to: NaiveDate,
    pub contact_email: String,
    pub contact_phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub verified_status: VerifiedStatus,
    pub documents: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct ReactivationRequest {
    pub request_id: Uuid,
    pub instid: Uuid,
    pub new_accreditation_no: String,
    pub new_valid_from: NaiveDate,
    pub new_valid_to: NaiveDate,
    pub documents: Option<serde_json::Value>,
    pub status: RequestStatus,
    pub submitted_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub reviewer_notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReactivationRequest {
    #[validate(length(min = 1, message = "new_accreditation_no is required"))]
    pub new_accreditation_no: String,
    pub new_valid_from: NaiveDate,
    pub new_valid_to: NaiveDate,
    pub documents: Option<serde_json::Value>,
}
