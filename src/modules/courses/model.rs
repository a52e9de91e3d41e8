use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "course_type")]
pub enum CourseType {
    #[serde(rename = "STCW")]
    #[sqlx(rename = "STCW")]
    Stcw,
    Refresher,
    Technical,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "course_mode", rename_all = "lowercase")]
pub enum CourseMode {
    Offline,
    Online,
    Hybrid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "course_status", rename_all = "lowercase")]
pub enum CourseStatus {
    Active,
    Inactive,
    Archived,
}

/// Catalog template courses are published from. Reference data, not owned by
/// any institute.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct MasterCourse {
    pub master_course_id: Uuid,
    pub course_name: String,
    pub course_code: String,
    pub category: String,
    pub description: Option<String>,
    pub required_documents: Option<serde_json::Value>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Course {
    pub courseid: Uuid,
    pub instid: Uuid,
    pub title: String,
    #[serde(rename = "type")]
    pub course_type: CourseType,
    pub duration: String,
    pub mode: CourseMode,
    pub fees: f64,
    pub description: Option<String>,
    pub validity_months: Option<i32>,
    pub accreditation_ref: Option<String>,
    pub status: CourseStatus,
    pub master_course_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCourseRequest {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[serde(rename = "type")]
    pub course_type: CourseType,
    #[validate(length(min = 1, message = "duration is required"))]
    pub duration: String,
    pub mode: CourseMode,
    #[validate(range(min = 0.0, message = "fees must not be negative"))]
    pub fees: f64,
    pub description: Option<String>,
    #[serde(default = "default_validity_months")]
    pub validity_months: Option<i32>,
    pub accreditation_ref: Option<String>,
    pub master_course_id: Option<Uuid>,
}

fn default_validity_months() -> Option<i32> {
    Some(60)
}

/// Public catalog filters. Only active courses are ever listed.
#[derive(Debug, Deserialize, IntoParams)]
pub struct CourseListQuery {
    #[serde(rename = "type")]
    pub course_type: Option<CourseType>,
    pub mode: Option<CourseMode>,
    /// Case-insensitive substring match on the title.
    pub search: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct CourseStatusQuery {
    pub status: CourseStatus,
}
