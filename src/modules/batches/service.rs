use chrono::Utc;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::accreditation_expired;
use crate::modules::batches::model::{Batch, BatchListQuery, BatchStatus, CreateBatchRequest};
use crate::modules::institutes::model::Institute;
use crate::store::{BatchFilter, Store};
use crate::utils::errors::AppError;

pub struct BatchService;

impl BatchService {
    #[instrument(skip(store, query))]
    pub async fn list_batches(
        store: &dyn Store,
        query: BatchListQuery,
    ) -> Result<Vec<Batch>, AppError> {
        let filter = BatchFilter {
            course_id: query.course_id,
            status: query.status,
        };
        store.list_batches(&filter).await
    }

    #[instrument(skip(store))]
    pub async fn get_batch(store: &dyn Store, batchid: Uuid) -> Result<Batch, AppError> {
        store
            .batch_by_id(batchid)
            .await?
            .ok_or_else(|| AppError::not_found("Batch not found"))
    }

    #[instrument(skip(store, institute, dto))]
    pub async fn create_batch(
        store: &dyn Store,
        institute: &Institute,
        dto: CreateBatchRequest,
    ) -> Result<Batch, AppError> {
        if accreditation_expired(institute) {
            return Err(AppError::forbidden(
                "Institute accreditation has expired. Cannot create batches.",
            ));
        }

        let course = store
            .course_by_id(dto.courseid)
            .await?
            .ok_or_else(|| AppError::not_found("Course not found"))?;

        if course.instid != institute.instid {
            return Err(AppError::forbidden(
                "Not authorized to create batch for this course",
            ));
        }

        let batch = Batch {
            batchid: Uuid::new_v4(),
            courseid: dto.courseid,
            batch_name: dto.batch_name,
            start_date: dto.start_date,
            end_date: dto.end_date,
            seats_total: dto.seats_total,
            seats_booked: 0,
            trainer: dto.trainer,
            location: dto.location,
            batch_status: BatchStatus::Upcoming,
            created_at: Utc::now(),
        };

        store.insert_batch(&batch).await
    }

    /// All batches under the institute's courses, latest start date first.
    #[instrument(skip(store))]
    pub async fn my_batches(store: &dyn Store, instid: Uuid) -> Result<Vec<Batch>, AppError> {
        let course_ids = store.course_ids_by_institute(instid).await?;
        if course_ids.is_empty() {
            return Ok(Vec::new());
        }
        store.batches_by_courses(&course_ids).await
    }

    #[instrument(skip(store))]
    pub async fn update_batch_status(
        store: &dyn Store,
        instid: Uuid,
        batchid: Uuid,
        status: BatchStatus,
    ) -> Result<(), AppError> {
        let batch = store
            .batch_by_id(batchid)
            .await?
            .ok_or_else(|| AppError::not_found("Batch not found"))?;

        let course = store
            .course_by_id(batch.courseid)
            .await?
            .ok_or_else(|| AppError::not_found("Course not found"))?;

        if course.instid != instid {
            return Err(AppError::forbidden("Not authorized to update this batch"));
        }

        store.set_batch_status(batchid, status).await
    }
}
