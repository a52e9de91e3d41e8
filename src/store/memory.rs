//! In-memory [`Store`] double for the test suite.
//!
//! Mirrors the Postgres implementation's observable behavior: the same
//! uniqueness refusals, the same orderings, the same atomicity for the
//! booking and reactivation-review sequences (a single write lock covers
//! each sequence).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::modules::admin::model::{CourseApplication, CourseApplicationDetail};
use crate::modules::auth::model::User;
use crate::modules::batches::model::{Batch, BatchStatus};
use crate::modules::bookings::model::{Booking, PaymentStatus};
use crate::modules::certificates::model::Certificate;
use crate::modules::courses::model::{Course, CourseStatus, MasterCourse};
use crate::modules::institutes::model::{
    Institute, ReactivationRequest, RequestStatus, VerifiedStatus,
};
use crate::modules::students::model::{Student, UpdateStudentProfileRequest};
use crate::store::{BatchFilter, CourseFilter, Store};
use crate::utils::errors::AppError;

#[derive(Default)]
struct Inner {
    users: Vec<User>,
    students: Vec<Student>,
    institutes: Vec<Institute>,
    master_courses: Vec<MasterCourse>,
    courses: Vec<Course>,
    batches: Vec<Batch>,
    bookings: Vec<Booking>,
    certificates: Vec<Certificate>,
    reactivation_requests: Vec<ReactivationRequest>,
    course_applications: Vec<CourseApplication>,
}

#[derive(Default)]
pub struct MemStore {
    inner: RwLock<Inner>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads catalog templates, standing in for migration seed data.
    pub async fn seed_master_courses(&self, courses: Vec<MasterCourse>) {
        let mut inner = self.inner.write().await;
        inner.master_courses.extend(courses);
    }
}

fn check_unique_email(inner: &Inner, email: &str) -> Result<(), AppError> {
    if inner.users.iter().any(|u| u.email == email) {
        return Err(AppError::bad_request(
            "An account with this email already exists",
        ));
    }
    Ok(())
}

#[async_trait]
impl Store for MemStore {
    async fn insert_user(&self, user: &User) -> Result<User, AppError> {
        let mut inner = self.inner.write().await;
        check_unique_email(&inner, &user.email)?;
        inner.users.push(user.clone());
        Ok(user.clone())
    }

    async fn user_by_id(&self, userid: Uuid) -> Result<Option<User>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.users.iter().find(|u| u.userid == userid).cloned())
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.users.iter().find(|u| u.email == email).cloned())
    }

    async fn create_student_account(
        &self,
        user: &User,
        student: &Student,
    ) -> Result<Student, AppError> {
        let mut inner = self.inner.write().await;
        check_unique_email(&inner, &user.email)?;
        inner.users.push(user.clone());
        inner.students.push(student.clone());
        Ok(student.clone())
    }

    async fn student_by_user(&self, userid: Uuid) -> Result<Option<Student>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.students.iter().find(|s| s.userid == userid).cloned())
    }

    async fn student_by_id(&self, studid: Uuid) -> Result<Option<Student>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.students.iter().find(|s| s.studid == studid).cloned())
    }

    async fn update_student(
        &self,
        studid: Uuid,
        changes: &UpdateStudentProfileRequest,
    ) -> Result<Student, AppError> {
        let mut inner = self.inner.write().await;
        let student = inner
            .students
            .iter_mut()
            .find(|s| s.studid == studid)
            .ok_or_else(|| AppError::not_found("Student profile not found"))?;

        if let Some(full_name) = &changes.full_name {
            student.full_name = full_name.clone();
        }
        if let Some(phone) = &changes.phone {
            student.phone = phone.clone();
        }
        if changes.cdc_number.is_some() {
            student.cdc_number = changes.cdc_number.clone();
        }
        if changes.indos_number.is_some() {
            student.indos_number = changes.indos_number.clone();
        }
        if changes.rank.is_some() {
            student.rank = changes.rank.clone();
        }
        if changes.address.is_some() {
            student.address = changes.address.clone();
        }
        if changes.city.is_some() {
            student.city = changes.city.clone();
        }
        if changes.state.is_some() {
            student.state = changes.state.clone();
        }

        Ok(student.clone())
    }

    async fn count_students(&self) -> Result<i64, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.students.len() as i64)
    }

    async fn create_institute_account(
        &self,
        user: &User,
        institute: &Institute,
        applications: &[CourseApplication],
    ) -> Result<Institute, AppError> {
        let mut inner = self.inner.write().await;
        check_unique_email(&inner, &user.email)?;
        inner.users.push(user.clone());
        inner.institutes.push(institute.clone());
        inner.course_applications.extend_from_slice(applications);
        Ok(institute.clone())
    }

    async fn institute_by_user(&self, userid: Uuid) -> Result<Option<Institute>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner
            .institutes
            .iter()
            .find(|i| i.userid == userid)
            .cloned())
    }

    async fn institute_by_id(&self, instid: Uuid) -> Result<Option<Institute>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner
            .institutes
            .iter()
            .find(|i| i.instid == instid)
            .cloned())
    }

    async fn list_institutes(
        &self,
        verified_status: Option<VerifiedStatus>,
    ) -> Result<Vec<Institute>, AppError> {
        let inner = self.inner.read().await;
        let mut institutes: Vec<Institute> = inner
            .institutes
            .iter()
            .filter(|i| verified_status.is_none_or(|s| i.verified_status == s))
            .cloned()
            .collect();
        institutes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(institutes)
    }

    async fn set_institute_verification(
        &self,
        instid: Uuid,
        status: VerifiedStatus,
    ) -> Result<(), AppError> {
        let mut inner = self.inner.write().await;
        if let Some(institute) = inner.institutes.iter_mut().find(|i| i.instid == instid) {
            institute.verified_status = status;
        }
        Ok(())
    }

    async fn count_institutes(
        &self,
        verified_status: Option<VerifiedStatus>,
    ) -> Result<i64, AppError> {
        let inner = self.inner.read().await;
        Ok(inner
            .institutes
            .iter()
            .filter(|i| verified_status.is_none_or(|s| i.verified_status == s))
            .count() as i64)
    }

    async fn list_master_courses(&self) -> Result<Vec<MasterCourse>, AppError> {
        let inner = self.inner.read().await;
        let mut courses: Vec<MasterCourse> = inner
            .master_courses
            .iter()
            .filter(|m| m.is_active)
            .cloned()
            .collect();
        courses.sort_by(|a, b| a.course_name.cmp(&b.course_name));
        Ok(courses)
    }

    async fn insert_course(&self, course: &Course) -> Result<Course, AppError> {
        let mut inner = self.inner.write().await;
        inner.courses.push(course.clone());
        Ok(course.clone())
    }

    async fn course_by_id(&self, courseid: Uuid) -> Result<Option<Course>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner
            .courses
            .iter()
            .find(|c| c.courseid == courseid)
            .cloned())
    }

    async fn list_courses(&self, filter: &CourseFilter) -> Result<Vec<Course>, AppError> {
        let inner = self.inner.read().await;
        let search = filter.search.as_deref().map(str::to_lowercase);
        let mut courses: Vec<Course> = inner
            .courses
            .iter()
            .filter(|c| c.status == CourseStatus::Active)
            .filter(|c| filter.course_type.is_none_or(|t| c.course_type == t))
            .filter(|c| filter.mode.is_none_or(|m| c.mode == m))
            .filter(|c| {
                search
                    .as_deref()
                    .is_none_or(|s| c.title.to_lowercase().contains(s))
            })
            .cloned()
            .collect();
        courses.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        courses.truncate(filter.limit as usize);
        Ok(courses)
    }

    async fn courses_by_institute(&self, instid: Uuid) -> Result<Vec<Course>, AppError> {
        let inner = self.inner.read().await;
        let mut courses: Vec<Course> = inner
            .courses
            .iter()
            .filter(|c| c.instid == instid)
            .cloned()
            .collect();
        courses.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(courses)
    }

    async fn course_ids_by_institute(&self, instid: Uuid) -> Result<Vec<Uuid>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner
            .courses
            .iter()
            .filter(|c| c.instid == instid)
            .map(|c| c.courseid)
            .collect())
    }

    async fn set_course_status(
        &self,
        courseid: Uuid,
        status: CourseStatus,
    ) -> Result<(), AppError> {
        let mut inner = self.inner.write().await;
        if let Some(course) = inner.courses.iter_mut().find(|c| c.courseid == courseid) {
            course.status = status;
        }
        Ok(())
    }

    async fn count_courses(&self, status: Option<CourseStatus>) -> Result<i64, AppError> {
        let inner = self.inner.read().await;
        Ok(inner
            .courses
            .iter()
            .filter(|c| status.is_none_or(|s| c.status == s))
            .count() as i64)
    }

    async fn insert_batch(&self, batch: &Batch) -> Result<Batch, AppError> {
        let mut inner = self.inner.write().await;
        inner.batches.push(batch.clone());
        Ok(batch.clone())
    }

    async fn batch_by_id(&self, batchid: Uuid) -> Result<Option<Batch>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.batches.iter().find(|b| b.batchid == batchid).cloned())
    }

    async fn list_batches(&self, filter: &BatchFilter) -> Result<Vec<Batch>, AppError> {
        let inner = self.inner.read().await;
        let mut batches: Vec<Batch> = inner
            .batches
            .iter()
            .filter(|b| filter.course_id.is_none_or(|c| b.courseid == c))
            .filter(|b| match filter.status {
                Some(status) => b.batch_status == status,
                None => matches!(b.batch_status, BatchStatus::Upcoming | BatchStatus::Ongoing),
            })
            .cloned()
            .collect();
        batches.sort_by(|a, b| a.start_date.cmp(&b.start_date));
        Ok(batches)
    }

    async fn batches_by_courses(&self, courseids: &[Uuid]) -> Result<Vec<Batch>, AppError> {
        let inner = self.inner.read().await;
        let mut batches: Vec<Batch> = inner
            .batches
            .iter()
            .filter(|b| courseids.contains(&b.courseid))
            .cloned()
            .collect();
        batches.sort_by(|a, b| b.start_date.cmp(&a.start_date));
        Ok(batches)
    }

    async fn set_batch_status(&self, batchid: Uuid, status: BatchStatus) -> Result<(), AppError> {
        let mut inner = self.inner.write().await;
        if let Some(batch) = inner.batches.iter_mut().find(|b| b.batchid == batchid) {
            batch.batch_status = status;
        }
        Ok(())
    }

    async fn insert_booking_taking_seat(&self, booking: &Booking) -> Result<Booking, AppError> {
        let mut inner = self.inner.write().await;

        if inner
            .bookings
            .iter()
            .any(|b| b.studid == booking.studid && b.batchid == booking.batchid)
        {
            return Err(AppError::bad_request("You have already booked this batch"));
        }

        let batch = inner
            .batches
            .iter_mut()
            .find(|b| b.batchid == booking.batchid)
            .ok_or_else(|| AppError::not_found("Batch not found"))?;

        if batch.seats_booked >= batch.seats_total {
            return Err(AppError::bad_request("Batch is full. No seats available."));
        }
        batch.seats_booked += 1;

        inner.bookings.push(booking.clone());
        Ok(booking.clone())
    }

    async fn booking_for_student(
        &self,
        bookid: Uuid,
        studid: Uuid,
    ) -> Result<Option<Booking>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner
            .bookings
            .iter()
            .find(|b| b.bookid == bookid && b.studid == studid)
            .cloned())
    }

    async fn booking_exists(&self, studid: Uuid, batchid: Uuid) -> Result<bool, AppError> {
        let inner = self.inner.read().await;
        Ok(inner
            .bookings
            .iter()
            .any(|b| b.studid == studid && b.batchid == batchid))
    }

    async fn bookings_by_student(&self, studid: Uuid) -> Result<Vec<Booking>, AppError> {
        let inner = self.inner.read().await;
        let mut bookings: Vec<Booking> = inner
            .bookings
            .iter()
            .filter(|b| b.studid == studid)
            .cloned()
            .collect();
        bookings.sort_by(|a, b| b.booking_date.cmp(&a.booking_date));
        Ok(bookings)
    }

    async fn bookings_by_batch(&self, batchid: Uuid) -> Result<Vec<Booking>, AppError> {
        let inner = self.inner.read().await;
        let mut bookings: Vec<Booking> = inner
            .bookings
            .iter()
            .filter(|b| b.batchid == batchid)
            .cloned()
            .collect();
        bookings.sort_by(|a, b| a.booking_date.cmp(&b.booking_date));
        Ok(bookings)
    }

    async fn list_bookings(
        &self,
        payment_status: Option<PaymentStatus>,
    ) -> Result<Vec<Booking>, AppError> {
        let inner = self.inner.read().await;
        let mut bookings: Vec<Booking> = inner
            .bookings
            .iter()
            .filter(|b| payment_status.is_none_or(|s| b.payment_status == s))
            .cloned()
            .collect();
        bookings.sort_by(|a, b| b.booking_date.cmp(&a.booking_date));
        Ok(bookings)
    }

    async fn set_payment_status(
        &self,
        bookid: Uuid,
        status: PaymentStatus,
    ) -> Result<(), AppError> {
        let mut inner = self.inner.write().await;
        if let Some(booking) = inner.bookings.iter_mut().find(|b| b.bookid == bookid) {
            booking.payment_status = status;
        }
        Ok(())
    }

    async fn count_bookings(&self) -> Result<i64, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.bookings.len() as i64)
    }

    async fn completed_revenue(&self) -> Result<f64, AppError> {
        let inner = self.inner.read().await;
        Ok(inner
            .bookings
            .iter()
            .filter(|b| b.payment_status == PaymentStatus::Completed)
            .map(|b| b.amount)
            .sum())
    }

    async fn insert_certificate(&self, cert: &Certificate) -> Result<Certificate, AppError> {
        let mut inner = self.inner.write().await;
        if inner
            .certificates
            .iter()
            .any(|c| c.studid == cert.studid && c.courseid == cert.courseid)
        {
            return Err(AppError::bad_request(
                "Certificate already exists for this student and course",
            ));
        }
        inner.certificates.push(cert.clone());
        Ok(cert.clone())
    }

    async fn certificate_by_id(&self, certid: Uuid) -> Result<Option<Certificate>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner
            .certificates
            .iter()
            .find(|c| c.certid == certid)
            .cloned())
    }

    async fn certificate_exists(&self, studid: Uuid, courseid: Uuid) -> Result<bool, AppError> {
        let inner = self.inner.read().await;
        Ok(inner
            .certificates
            .iter()
            .any(|c| c.studid == studid && c.courseid == courseid))
    }

    async fn certificates_by_student(&self, studid: Uuid) -> Result<Vec<Certificate>, AppError> {
        let inner = self.inner.read().await;
        let mut certs: Vec<Certificate> = inner
            .certificates
            .iter()
            .filter(|c| c.studid == studid)
            .cloned()
            .collect();
        certs.sort_by(|a, b| b.issue_date.cmp(&a.issue_date));
        Ok(certs)
    }

    async fn certificates_by_courses(
        &self,
        courseids: &[Uuid],
    ) -> Result<Vec<Certificate>, AppError> {
        let inner = self.inner.read().await;
        let mut certs: Vec<Certificate> = inner
            .certificates
            .iter()
            .filter(|c| courseids.contains(&c.courseid))
            .cloned()
            .collect();
        certs.sort_by(|a, b| b.issue_date.cmp(&a.issue_date));
        Ok(certs)
    }

    async fn mark_dgshipping_uploaded(&self, certid: Uuid) -> Result<(), AppError> {
        let mut inner = self.inner.write().await;
        if let Some(cert) = inner.certificates.iter_mut().find(|c| c.certid == certid) {
            cert.dgshipping_uploaded = true;
        }
        Ok(())
    }

    async fn insert_reactivation_request(
        &self,
        request: &ReactivationRequest,
    ) -> Result<ReactivationRequest, AppError> {
        let mut inner = self.inner.write().await;
        if inner
            .reactivation_requests
            .iter()
            .any(|r| r.instid == request.instid && r.status == RequestStatus::Pending)
        {
            return Err(AppError::bad_request(
                "You already have a pending reactivation request",
            ));
        }
        inner.reactivation_requests.push(request.clone());
        Ok(request.clone())
    }

    async fn reactivation_request_by_id(
        &self,
        request_id: Uuid,
    ) -> Result<Option<ReactivationRequest>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner
            .reactivation_requests
            .iter()
            .find(|r| r.request_id == request_id)
            .cloned())
    }

    async fn pending_reactivation_exists(&self, instid: Uuid) -> Result<bool, AppError> {
        let inner = self.inner.read().await;
        Ok(inner
            .reactivation_requests
            .iter()
            .any(|r| r.instid == instid && r.status == RequestStatus::Pending))
    }

    async fn reactivation_requests_by_institute(
        &self,
        instid: Uuid,
    ) -> Result<Vec<ReactivationRequest>, AppError> {
        let inner = self.inner.read().await;
        let mut requests: Vec<ReactivationRequest> = inner
            .reactivation_requests
            .iter()
            .filter(|r| r.instid == instid)
            .cloned()
            .collect();
        requests.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(requests)
    }

    async fn list_reactivation_requests(
        &self,
        status: Option<RequestStatus>,
    ) -> Result<Vec<ReactivationRequest>, AppError> {
        let inner = self.inner.read().await;
        let mut requests: Vec<ReactivationRequest> = inner
            .reactivation_requests
            .iter()
            .filter(|r| status.is_none_or(|s| r.status == s))
            .cloned()
            .collect();
        requests.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(requests)
    }

    async fn review_reactivation_request(
        &self,
        request_id: Uuid,
        status: RequestStatus,
        reviewer_notes: Option<String>,
        reviewed_at: DateTime<Utc>,
    ) -> Result<ReactivationRequest, AppError> {
        let mut inner = self.inner.write().await;

        let request = inner
            .reactivation_requests
            .iter_mut()
            .find(|r| r.request_id == request_id)
            .ok_or_else(|| AppError::not_found("Reactivation request not found"))?;

        request.status = status;
        request.reviewer_notes = reviewer_notes;
        request.reviewed_at = Some(reviewed_at);
        let updated = request.clone();

        if status == RequestStatus::Approved {
            if let Some(institute) = inner
                .institutes
                .iter_mut()
                .find(|i| i.instid == updated.instid)
            {
                institute.accreditation_no = updated.new_accreditation_no.clone();
                institute.valid_from = updated.new_valid_from;
                institute.valid_to = updated.new_valid_to;
                institute.verified_status = VerifiedStatus::Verified;
            }
        }

        Ok(updated)
    }

    async fn application_by_id(
        &self,
        application_id: Uuid,
    ) -> Result<Option<CourseApplication>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner
            .course_applications
            .iter()
            .find(|a| a.application_id == application_id)
            .cloned())
    }

    async fn list_course_applications(
        &self,
        status: Option<RequestStatus>,
    ) -> Result<Vec<CourseApplicationDetail>, AppError> {
        let inner = self.inner.read().await;
        let mut applications: Vec<CourseApplicationDetail> = inner
            .course_applications
            .iter()
            .filter(|a| status.is_none_or(|s| a.status == s))
            .map(|a| {
                let institute = inner.institutes.iter().find(|i| i.instid == a.instid);
                let master = inner
                    .master_courses
                    .iter()
                    .find(|m| m.master_course_id == a.master_course_id);
                CourseApplicationDetail {
                    application_id: a.application_id,
                    instid: a.instid,
                    master_course_id: a.master_course_id,
                    status: a.status,
                    created_at: a.created_at,
                    reviewed_at: a.reviewed_at,
                    institute_name: institute.map(|i| i.name.clone()),
                    accreditation_no: institute.map(|i| i.accreditation_no.clone()),
                    course_name: master.map(|m| m.course_name.clone()),
                    course_code: master.map(|m| m.course_code.clone()),
                }
            })
            .collect();
        applications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(applications)
    }

    async fn set_application_status(
        &self,
        application_id: Uuid,
        status: RequestStatus,
        reviewed_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        let mut inner = self.inner.write().await;
        if let Some(application) = inner
            .course_applications
            .iter_mut()
            .find(|a| a.application_id == application_id)
        {
            application.status = status;
            application.reviewed_at = Some(reviewed_at);
        }
        Ok(())
    }
}
