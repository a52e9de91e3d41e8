use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Student {
    pub studid: Uuid,
    pub userid: Uuid,
    pub full_name: String,
    pub date_of_birth: NaiveDate,
    pub phone: String,
    pub cdc_number: Option<String>,
    pub indos_number: Option<String>,
    pub rank: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Profile update allow-list. Fields absent from this struct are silently
/// dropped during deserialization; a field left `None` keeps its current
/// value (there is no way to null a field out through this endpoint).
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateStudentProfileRequest {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub cdc_number: Option<String>,
    pub indos_number: Option<String>,
    pub rank: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
}

impl UpdateStudentProfileRequest {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.phone.is_none()
            && self.cdc_number.is_none()
            && self.indos_number.is_none()
            && self.rank.is_none()
            && self.address.is_none()
            && self.city.is_none()
            && self.state.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_fields_are_dropped() {
        let update: UpdateStudentProfileRequest =
            serde_json::from_str(r#"{"phone": "555-0100", "foo": "bar"}"#).unwrap();

        assert_eq!(update.phone.as_deref(), Some("555-0100"));
        assert!(!update.is_empty());
    }

    #[test]
    fn update_with_only_unknown_fields_is_empty() {
        let update: UpdateStudentProfileRequest =
            serde_json::from_str(r#"{"foo": "bar", "role": "admin"}"#).unwrap();

        assert!(update.is_empty());
    }
}
