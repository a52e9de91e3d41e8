use chrono::Utc;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::accreditation_expired;
use crate::modules::courses::model::{
    Course, CourseListQuery, CourseStatus, CreateCourseRequest, MasterCourse,
};
use crate::modules::institutes::model::{Institute, VerifiedStatus};
use crate::store::{CourseFilter, Store};
use crate::utils::errors::AppError;

const DEFAULT_LIST_LIMIT: i64 = 100;

pub struct CourseService;

impl CourseService {
    #[instrument(skip(store))]
    pub async fn list_master_courses(store: &dyn Store) -> Result<Vec<MasterCourse>, AppError> {
        store.list_master_courses().await
    }

    #[instrument(skip(store, query))]
    pub async fn list_courses(
        store: &dyn Store,
        query: CourseListQuery,
    ) -> Result<Vec<Course>, AppError> {
        // A negative limit would be rejected by Postgres; floor it at zero
        // so both store implementations return an empty page.
        let filter = CourseFilter {
            course_type: query.course_type,
            mode: query.mode,
            search: query.search,
            limit: query.limit.unwrap_or(DEFAULT_LIST_LIMIT).max(0),
        };
        store.list_courses(&filter).await
    }

    #[instrument(skip(store))]
    pub async fn get_course(store: &dyn Store, courseid: Uuid) -> Result<Course, AppError> {
        store
            .course_by_id(courseid)
            .await?
            .ok_or_else(|| AppError::not_found("Course not found"))
    }

    /// Publishing requires a verified institute with a live accreditation.
    #[instrument(skip(store, institute, dto))]
    pub async fn create_course(
        store: &dyn Store,
        institute: &Institute,
        dto: CreateCourseRequest,
    ) -> Result<Course, AppError> {
        if accreditation_expired(institute) {
            return Err(AppError::forbidden(
                "Institute accreditation has expired. Cannot create courses.",
            ));
        }

        if institute.verified_status != VerifiedStatus::Verified {
            return Err(AppError::forbidden(
                "Institute must be verified to create courses",
            ));
        }

        let course = Course {
            courseid: Uuid::new_v4(),
            instid: institute.instid,
            title: dto.title,
            course_type: dto.course_type,
            duration: dto.duration,
            mode: dto.mode,
            fees: dto.fees,
            description: dto.description,
            validity_months: dto.validity_months,
            accreditation_ref: dto.accreditation_ref,
            status: CourseStatus::Active,
            master_course_id: dto.master_course_id,
            created_at: Utc::now(),
        };

        store.insert_course(&course).await
    }

    #[instrument(skip(store))]
    pub async fn my_courses(store: &dyn Store, instid: Uuid) -> Result<Vec<Course>, AppError> {
        store.courses_by_institute(instid).await
    }

    #[instrument(skip(store))]
    pub async fn update_course_status(
        store: &dyn Store,
        instid: Uuid,
        courseid: Uuid,
        status: CourseStatus,
    ) -> Result<(), AppError> {
        let course = store
            .course_by_id(courseid)
            .await?
            .ok_or_else(|| AppError::not_found("Course not found"))?;

        if course.instid != instid {
            return Err(AppError::forbidden("Not authorized to update this course"));
        }

        store.set_course_status(courseid, status).await
    }
}
