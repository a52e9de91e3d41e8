use tracing::instrument;
use uuid::Uuid;

use crate::modules::students::model::{Student, UpdateStudentProfileRequest};
use crate::store::Store;
use crate::utils::errors::AppError;

pub struct StudentService;

impl StudentService {
    #[instrument(skip(store, changes))]
    pub async fn update_profile(
        store: &dyn Store,
        studid: Uuid,
        changes: UpdateStudentProfileRequest,
    ) -> Result<Student, AppError> {
        if changes.is_empty() {
            return Err(AppError::bad_request("No valid fields to update"));
        }

        store.update_student(studid, &changes).await
    }

    #[instrument(skip(store))]
    pub async fn get_student(store: &dyn Store, studid: Uuid) -> Result<Student, AppError> {
        store
            .student_by_id(studid)
            .await?
            .ok_or_else(|| AppError::not_found("Student not found"))
    }
}
