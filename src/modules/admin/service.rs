use chrono::Utc;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::admin::model::{
    CourseApplicationDetail, PlatformStats, ReviewReactivationRequest,
};
use crate::modules::bookings::model::{Booking, PaymentStatus};
use crate::modules::courses::model::CourseStatus;
use crate::modules::institutes::model::{
    Institute, ReactivationRequest, RequestStatus, VerifiedStatus,
};
use crate::store::Store;
use crate::utils::errors::AppError;

pub struct AdminService;

impl AdminService {
    #[instrument(skip(store))]
    pub async fn list_institutes(
        store: &dyn Store,
        verified_status: Option<VerifiedStatus>,
    ) -> Result<Vec<Institute>, AppError> {
        store.list_institutes(verified_status).await
    }

    #[instrument(skip(store))]
    pub async fn verify_institute(
        store: &dyn Store,
        instid: Uuid,
        status: VerifiedStatus,
    ) -> Result<(), AppError> {
        store
            .institute_by_id(instid)
            .await?
            .ok_or_else(|| AppError::not_found("Institute not found"))?;

        store.set_institute_verification(instid, status).await
    }

    #[instrument(skip(store))]
    pub async fn list_reactivation_requests(
        store: &dyn Store,
        status: Option<RequestStatus>,
    ) -> Result<Vec<ReactivationRequest>, AppError> {
        store.list_reactivation_requests(status).await
    }

    /// Records the review verdict. Approval also renews the institute's
    /// accreditation window and marks it verified, atomically.
    #[instrument(skip(store, dto))]
    pub async fn review_reactivation_request(
        store: &dyn Store,
        request_id: Uuid,
        dto: ReviewReactivationRequest,
    ) -> Result<ReactivationRequest, AppError> {
        store
            .reactivation_request_by_id(request_id)
            .await?
            .ok_or_else(|| AppError::not_found("Reactivation request not found"))?;

        store
            .review_reactivation_request(request_id, dto.status, dto.reviewer_notes, Utc::now())
            .await
    }

    #[instrument(skip(store))]
    pub async fn list_bookings(
        store: &dyn Store,
        payment_status: Option<PaymentStatus>,
    ) -> Result<Vec<Booking>, AppError> {
        store.list_bookings(payment_status).await
    }

    #[instrument(skip(store))]
    pub async fn platform_stats(store: &dyn Store) -> Result<PlatformStats, AppError> {
        let total_institutes = store.count_institutes(None).await?;
        let verified_institutes = store
            .count_institutes(Some(VerifiedStatus::Verified))
            .await?;

        Ok(PlatformStats {
            total_institutes,
            verified_institutes,
            pending_verification: total_institutes - verified_institutes,
            total_students: store.count_students().await?,
            total_courses: store.count_courses(None).await?,
            active_courses: store.count_courses(Some(CourseStatus::Active)).await?,
            total_bookings: store.count_bookings().await?,
            total_revenue: store.completed_revenue().await?,
        })
    }

    #[instrument(skip(store))]
    pub async fn list_course_applications(
        store: &dyn Store,
        status: Option<RequestStatus>,
    ) -> Result<Vec<CourseApplicationDetail>, AppError> {
        store.list_course_applications(status).await
    }

    #[instrument(skip(store))]
    pub async fn update_application_status(
        store: &dyn Store,
        application_id: Uuid,
        status: RequestStatus,
    ) -> Result<(), AppError> {
        store
            .application_by_id(application_id)
            .await?
            .ok_or_else(|| AppError::not_found("Application not found"))?;

        store
            .set_application_status(application_id, status, Utc::now())
            .await
    }
}
