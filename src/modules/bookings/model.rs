use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "payment_status", rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
    Refunded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "attendance_status", rename_all = "snake_case")]
pub enum AttendanceStatus {
    NotStarted,
    Present,
    Absent,
    Completed,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Booking {
    pub bookid: Uuid,
    pub studid: Uuid,
    pub batchid: Uuid,
    pub confirmation_number: String,
    pub amount: f64,
    pub payment_status: PaymentStatus,
    pub attendance_status: AttendanceStatus,
    pub booking_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBookingRequest {
    pub batchid: Uuid,
    #[validate(range(min = 0.0, message = "amount must not be negative"))]
    pub amount: f64,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct PaymentStatusQuery {
    pub payment_status: PaymentStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attendance_status_uses_snake_case() {
        assert_eq!(
            serde_json::to_string(&AttendanceStatus::NotStarted).unwrap(),
            "\"not_started\""
        );
        assert_eq!(
            serde_json::from_str::<AttendanceStatus>("\"present\"").unwrap(),
            AttendanceStatus::Present
        );
    }
}
