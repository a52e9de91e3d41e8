use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "batch_status", rename_all = "lowercase")]
pub enum BatchStatus {
    Upcoming,
    Ongoing,
    Completed,
    Cancelled,
}

/// A scheduled run of a course. `seats_booked` only moves through the
/// booking workflow and can never exceed `seats_total`.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Batch {
    pub batchid: Uuid,
    pub courseid: Uuid,
    pub batch_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub seats_total: i32,
    pub seats_booked: i32,
    pub trainer: Option<String>,
    pub location: Option<String>,
    pub batch_status: BatchStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBatchRequest {
    pub courseid: Uuid,
    #[validate(length(min = 1, message = "batch_name is required"))]
    pub batch_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[validate(range(min = 1, message = "seats_total must be at least 1"))]
    pub seats_total: i32,
    pub trainer: Option<String>,
    pub location: Option<String>,
}

/// When no status is given the listing is restricted to upcoming and
/// ongoing batches.
#[derive(Debug, Deserialize, IntoParams)]
pub struct BatchListQuery {
    pub course_id: Option<Uuid>,
    pub status: Option<BatchStatus>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct BatchStatusQuery {
    pub new_status: BatchStatus,
}
