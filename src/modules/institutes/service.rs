use chrono::Utc;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::accreditation_expired;
use crate::modules::institutes::model::{
    CreateReactivationRequest, Institute, ReactivationRequest, RequestStatus,
};
use crate::store::Store;
use crate::utils::errors::AppError;

pub struct InstituteService;

impl InstituteService {
    #[instrument(skip(store))]
    pub async fn get_institute(store: &dyn Store, instid: Uuid) -> Result<Institute, AppError> {
        store
            .institute_by_id(instid)
            .await?
            .ok_or_else(|| AppError::not_found("Institute not found"))
    }

    /// Files a reactivation proposal for an institute whose accreditation has
    /// lapsed. Refused while the current accreditation is still valid, and
    /// while an earlier proposal is awaiting review.
    #[instrument(skip(store, institute, dto))]
    pub async fn create_reactivation_request(
        store: &dyn Store,
        institute: &Institute,
        dto: CreateReactivationRequest,
    ) -> Result<ReactivationRequest, AppError> {
        if !accreditation_expired(institute) {
            return Err(AppError::bad_request(
                "Institute accreditation is still valid",
            ));
        }

        if store.pending_reactivation_exists(institute.instid).await? {
            return Err(AppError::bad_request(
                "You already have a pending reactivation request",
            ));
        }

        let request = ReactivationRequest {
            request_id: Uuid::new_v4(),
            instid: institute.instid,
            new_accreditation_no: dto.new_accreditation_no,
            new_valid_from: dto.new_valid_from,
            new_valid_to: dto.new_valid_to,
            documents: dto.documents,
            status: RequestStatus::Pending,
            submitted_at: Utc::now(),
            reviewed_at: None,
            reviewer_notes: None,
        };

        store.insert_reactivation_request(&request).await
    }

    #[instrument(skip(store))]
    pub async fn my_reactivation_requests(
        store: &dyn Store,
        instid: Uuid,
    ) -> Result<Vec<ReactivationRequest>, AppError> {
        store.reactivation_requests_by_institute(instid).await
    }
}
