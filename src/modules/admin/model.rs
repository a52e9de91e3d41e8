use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::modules::bookings::model::PaymentStatus;
use crate::modules::institutes::model::{RequestStatus, VerifiedStatus};

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct CourseApplication {
    pub application_id: Uuid,
    pub instid: Uuid,
    pub master_course_id: Uuid,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

/// Application joined with the institute and catalog template it refers to,
/// for the moderation queue.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct CourseApplicationDetail {
    pub application_id: Uuid,
    pub instid: Uuid,
    pub master_course_id: Uuid,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub institute_name: Option<String>,
    pub accreditation_no: Option<String>,
    pub course_name: Option<String>,
    pub course_code: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PlatformStats {
    pub total_institutes: i64,
    pub verified_institutes: i64,
    pub pending_verification: i64,
    pub total_students: i64,
    pub total_courses: i64,
    pub active_courses: i64,
    pub total_bookings: i64,
    /// Sum of booking amounts whose payment completed.
    pub total_revenue: f64,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct InstituteListQuery {
    pub verified_status: Option<VerifiedStatus>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct VerifyInstituteQuery {
    pub verified_status: VerifiedStatus,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct RequestStatusQuery {
    pub status: Option<RequestStatus>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReviewReactivationRequest {
    pub status: RequestStatus,
    pub reviewer_notes: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct BookingListQuery {
    pub payment_status: Option<PaymentStatus>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ApplicationStatusQuery {
    pub new_status: RequestStatus,
}
