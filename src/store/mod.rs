//! Data-access seam for the managed backend.
//!
//! All persistence goes through the [`Store`] trait so that handlers and
//! services never touch a concrete driver. [`postgres::PgStore`] is the
//! production implementation; [`memory::MemStore`] is an in-memory double
//! used by the integration suite.
//!
//! Methods return [`AppError`] directly: uniqueness and capacity violations
//! map to the client-facing refusals the API promises, everything else maps
//! to an internal error. The multi-step write sequences (booking + seat
//! increment, reactivation approval + institute update) are atomic inside
//! every implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::modules::admin::model::{CourseApplication, CourseApplicationDetail};
use crate::modules::auth::model::User;
use crate::modules::batches::model::{Batch, BatchStatus};
use crate::modules::bookings::model::{Booking, PaymentStatus};
use crate::modules::certificates::model::Certificate;
use crate::modules::courses::model::{Course, CourseMode, CourseStatus, CourseType, MasterCourse};
use crate::modules::institutes::model::{
    Institute, ReactivationRequest, RequestStatus, VerifiedStatus,
};
use crate::modules::students::model::{Student, UpdateStudentProfileRequest};
use crate::utils::errors::AppError;

pub mod postgres;

#[cfg(any(test, feature = "test-utils"))]
pub mod memory;

/// Catalog listing filters; only active courses are returned.
#[derive(Debug, Default, Clone)]
pub struct CourseFilter {
    pub course_type: Option<CourseType>,
    pub mode: Option<CourseMode>,
    pub search: Option<String>,
    pub limit: i64,
}

#[derive(Debug, Default, Clone)]
pub struct BatchFilter {
    pub course_id: Option<Uuid>,
    pub status: Option<BatchStatus>,
}

#[async_trait]
pub trait Store: Send + Sync {
    // -- users ---------------------------------------------------------

    /// Inserts a bare user row (admin accounts have no profile row).
    /// Duplicate email -> 400.
    async fn insert_user(&self, user: &User) -> Result<User, AppError>;
    async fn user_by_id(&self, userid: Uuid) -> Result<Option<User>, AppError>;
    async fn user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    // -- students ------------------------------------------------------

    /// Creates the user row and student profile together.
    async fn create_student_account(
        &self,
        user: &User,
        student: &Student,
    ) -> Result<Student, AppError>;
    async fn student_by_user(&self, userid: Uuid) -> Result<Option<Student>, AppError>;
    async fn student_by_id(&self, studid: Uuid) -> Result<Option<Student>, AppError>;
    /// Applies the allow-listed changes; `None` fields keep current values.
    async fn update_student(
        &self,
        studid: Uuid,
        changes: &UpdateStudentProfileRequest,
    ) -> Result<Student, AppError>;
    async fn count_students(&self) -> Result<i64, AppError>;

    // -- institutes ----------------------------------------------------

    /// Creates the user row, institute profile and any pending course
    /// applications together.
    async fn create_institute_account(
        &self,
        user: &User,
        institute: &Institute,
        applications: &[CourseApplication],
    ) -> Result<Institute, AppError>;
    async fn institute_by_user(&self, userid: Uuid) -> Result<Option<Institute>, AppError>;
    async fn institute_by_id(&self, instid: Uuid) -> Result<Option<Institute>, AppError>;
    async fn list_institutes(
        &self,
        verified_status: Option<VerifiedStatus>,
    ) -> Result<Vec<Institute>, AppError>;
    async fn set_institute_verification(
        &self,
        instid: Uuid,
        status: VerifiedStatus,
    ) -> Result<(), AppError>;
    async fn count_institutes(
        &self,
        verified_status: Option<VerifiedStatus>,
    ) -> Result<i64, AppError>;

    // -- master courses ------------------------------------------------

    /// Active catalog templates, sorted by name.
    async fn list_master_courses(&self) -> Result<Vec<MasterCourse>, AppError>;

    // -- courses -------------------------------------------------------

    async fn insert_course(&self, course: &Course) -> Result<Course, AppError>;
    async fn course_by_id(&self, courseid: Uuid) -> Result<Option<Course>, AppError>;
    async fn list_courses(&self, filter: &CourseFilter) -> Result<Vec<Course>, AppError>;
    async fn courses_by_institute(&self, instid: Uuid) -> Result<Vec<Course>, AppError>;
    async fn course_ids_by_institute(&self, instid: Uuid) -> Result<Vec<Uuid>, AppError>;
    async fn set_course_status(
        &self,
        courseid: Uuid,
        status: CourseStatus,
    ) -> Result<(), AppError>;
    async fn count_courses(&self, status: Option<CourseStatus>) -> Result<i64, AppError>;

    // -- batches -------------------------------------------------------

    async fn insert_batch(&self, batch: &Batch) -> Result<Batch, AppError>;
    async fn batch_by_id(&self, batchid: Uuid) -> Result<Option<Batch>, AppError>;
    async fn list_batches(&self, filter: &BatchFilter) -> Result<Vec<Batch>, AppError>;
    /// Batches belonging to any of the given courses, latest start first.
    async fn batches_by_courses(&self, courseids: &[Uuid]) -> Result<Vec<Batch>, AppError>;
    async fn set_batch_status(&self, batchid: Uuid, status: BatchStatus) -> Result<(), AppError>;

    // -- bookings ------------------------------------------------------

    /// Inserts the booking and takes one seat on the batch atomically.
    /// A full batch -> 400; an existing (student, batch) booking -> 400.
    async fn insert_booking_taking_seat(&self, booking: &Booking) -> Result<Booking, AppError>;
    async fn booking_for_student(
        &self,
        bookid: Uuid,
        studid: Uuid,
    ) -> Result<Option<Booking>, AppError>;
    async fn booking_exists(&self, studid: Uuid, batchid: Uuid) -> Result<bool, AppError>;
    async fn bookings_by_student(&self, studid: Uuid) -> Result<Vec<Booking>, AppError>;
    /// Oldest booking first, matching the confirmation order.
    async fn bookings_by_batch(&self, batchid: Uuid) -> Result<Vec<Booking>, AppError>;
    async fn list_bookings(
        &self,
        payment_status: Option<PaymentStatus>,
    ) -> Result<Vec<Booking>, AppError>;
    async fn set_payment_status(
        &self,
        bookid: Uuid,
        status: PaymentStatus,
    ) -> Result<(), AppError>;
    async fn count_bookings(&self) -> Result<i64, AppError>;
    /// Sum of amounts over bookings with completed payments.
    async fn completed_revenue(&self) -> Result<f64, AppError>;

    // -- certificates --------------------------------------------------

    /// Duplicate (student, course) pair -> 400.
    async fn insert_certificate(&self, cert: &Certificate) -> Result<Certificate, AppError>;
    async fn certificate_by_id(&self, certid: Uuid) -> Result<Option<Certificate>, AppError>;
    async fn certificate_exists(&self, studid: Uuid, courseid: Uuid) -> Result<bool, AppError>;
    async fn certificates_by_student(&self, studid: Uuid) -> Result<Vec<Certificate>, AppError>;
    async fn certificates_by_courses(
        &self,
        courseids: &[Uuid],
    ) -> Result<Vec<Certificate>, AppError>;
    async fn mark_dgshipping_uploaded(&self, certid: Uuid) -> Result<(), AppError>;

    // -- reactivation requests ----------------------------------------

    /// An existing pending request for the institute -> 400.
    async fn insert_reactivation_request(
        &self,
        request: &ReactivationRequest,
    ) -> Result<ReactivationRequest, AppError>;
    async fn reactivation_request_by_id(
        &self,
        request_id: Uuid,
    ) -> Result<Option<ReactivationRequest>, AppError>;
    async fn pending_reactivation_exists(&self, instid: Uuid) -> Result<bool, AppError>;
    async fn reactivation_requests_by_institute(
        &self,
        instid: Uuid,
    ) -> Result<Vec<ReactivationRequest>, AppError>;
    async fn list_reactivation_requests(
        &self,
        status: Option<RequestStatus>,
    ) -> Result<Vec<ReactivationRequest>, AppError>;
    /// Records the review; on approval also copies the proposed
    /// accreditation window onto the institute and marks it verified, in the
    /// same transaction.
    async fn review_reactivation_request(
        &self,
        request_id: Uuid,
        status: RequestStatus,
        reviewer_notes: Option<String>,
        reviewed_at: DateTime<Utc>,
    ) -> Result<ReactivationRequest, AppError>;

    // -- course applications ------------------------------------------

    async fn application_by_id(
        &self,
        application_id: Uuid,
    ) -> Result<Option<CourseApplication>, AppError>;
    async fn list_course_applications(
        &self,
        status: Option<RequestStatus>,
    ) -> Result<Vec<CourseApplicationDetail>, AppError>;
    async fn set_application_status(
        &self,
        application_id: Uuid,
        status: RequestStatus,
        reviewed_at: DateTime<Utc>,
    ) -> Result<(), AppError>;
}
