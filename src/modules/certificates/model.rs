use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Certificate {
    pub certid: Uuid,
    pub studid: Uuid,
    pub courseid: Uuid,
    pub cert_number: String,
    pub issue_date: NaiveDate,
    pub expiry_date: NaiveDate,
    /// Whether the certificate has been submitted to the DGShipping
    /// regulator registry.
    pub dgshipping_uploaded: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCertificateRequest {
    pub studid: Uuid,
    pub courseid: Uuid,
    #[validate(length(min = 1, message = "cert_number is required"))]
    pub cert_number: String,
    pub issue_date: NaiveDate,
    pub expiry_date: NaiveDate,
}
