//! Postgres-backed [`Store`] implementation.
//!
//! Queries are runtime-checked and rely on the schema in `migrations/`.
//! Storage-level constraints back the uniqueness invariants: the explicit
//! service-layer pre-checks produce the client-facing messages, and the
//! constraints close the race window between check and insert.

use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;
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

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_insert_err(e: sqlx::Error, duplicate_msg: &str) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return AppError::bad_request(duplicate_msg);
        }
    }
    AppError::database(anyhow::Error::from(e))
}

const INSERT_USER: &str = r#"
    INSERT INTO users (userid, email, full_name, role, password_hash, created_at)
    VALUES ($1, $2, $3, $4, $5, $6)
    RETURNING *
"#;

const INSERT_STUDENT: &str = r#"
    INSERT INTO students (studid, userid, full_name, date_of_birth, phone, cdc_number,
                          indos_number, rank, address, city, state, created_at)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
    RETURNING *
"#;

const INSERT_INSTITUTE: &str = r#"
    INSERT INTO institutes (instid, userid, name, accreditation_no, valid_from, valid_to,
                            contact_email, contact_phone, address, city, state,
                            verified_status, documents, created_at)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
    RETURNING *
"#;

fn bind_student_insert<'q>(
    query: sqlx::query::QueryAs<'q, sqlx::Postgres, Student, sqlx::postgres::PgArguments>,
    student: &'q Student,
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, Student, sqlx::postgres::PgArguments> {
    query
        .bind(student.studid)
        .bind(student.userid)
        .bind(&student.full_name)
        .bind(student.date_of_birth)
        .bind(&student.phone)
        .bind(&student.cdc_number)
        .bind(&student.indos_number)
        .bind(&student.rank)
        .bind(&student.address)
        .bind(&student.city)
        .bind(&student.state)
        .bind(student.created_at)
}

#[async_trait]
impl Store for PgStore {
    #[instrument(skip(self, user))]
    async fn insert_user(&self, user: &User) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(INSERT_USER)
            .bind(user.userid)
            .bind(&user.email)
            .bind(&user.full_name)
            .bind(user.role)
            .bind(&user.password_hash)
            .bind(user.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_insert_err(e, "An account with this email already exists"))
    }

    #[instrument(skip(self))]
    async fn user_by_id(&self, userid: Uuid) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE userid = $1")
            .bind(userid)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch user by id")
            .map_err(AppError::database)
    }

    #[instrument(skip(self))]
    async fn user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch user by email")
            .map_err(AppError::database)
    }

    #[instrument(skip(self, user, student))]
    async fn create_student_account(
        &self,
        user: &User,
        student: &Student,
    ) -> Result<Student, AppError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin transaction")
            .map_err(AppError::database)?;

        sqlx::query_as::<_, User>(INSERT_USER)
            .bind(user.userid)
            .bind(&user.email)
            .bind(&user.full_name)
            .bind(user.role)
            .bind(&user.password_hash)
            .bind(user.created_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| map_insert_err(e, "An account with this email already exists"))?;

        let created = bind_student_insert(
            sqlx::query_as::<_, Student>(INSERT_STUDENT),
            student,
        )
        .fetch_one(&mut *tx)
        .await
        .context("Failed to insert student profile")
        .map_err(AppError::database)?;

        tx.commit()
            .await
            .context("Failed to commit student signup")
            .map_err(AppError::database)?;

        Ok(created)
    }

    #[instrument(skip(self))]
    async fn student_by_user(&self, userid: Uuid) -> Result<Option<Student>, AppError> {
        sqlx::query_as::<_, Student>("SELECT * FROM students WHERE userid = $1")
            .bind(userid)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch student profile")
            .map_err(AppError::database)
    }

    #[instrument(skip(self))]
    async fn student_by_id(&self, studid: Uuid) -> Result<Option<Student>, AppError> {
        sqlx::query_as::<_, Student>("SELECT * FROM students WHERE studid = $1")
            .bind(studid)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch student by id")
            .map_err(AppError::database)
    }

    #[instrument(skip(self, changes))]
    async fn update_student(
        &self,
        studid: Uuid,
        changes: &UpdateStudentProfileRequest,
    ) -> Result<Student, AppError> {
        sqlx::query_as::<_, Student>(
            r#"
            UPDATE students
            SET full_name = COALESCE($2, full_name),
                phone = COALESCE($3, phone),
                cdc_number = COALESCE($4, cdc_number),
                indos_number = COALESCE($5, indos_number),
                rank = COALESCE($6, rank),
                address = COALESCE($7, address),
                city = COALESCE($8, city),
                state = COALESCE($9, state)
            WHERE studid = $1
            RETURNING *
            "#,
        )
        .bind(studid)
        .bind(&changes.full_name)
        .bind(&changes.phone)
        .bind(&changes.cdc_number)
        .bind(&changes.indos_number)
        .bind(&changes.rank)
        .bind(&changes.address)
        .bind(&changes.city)
        .bind(&changes.state)
        .fetch_one(&self.pool)
        .await
        .context("Failed to update student profile")
        .map_err(AppError::database)
    }

    #[instrument(skip(self))]
    async fn count_students(&self) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM students")
            .fetch_one(&self.pool)
            .await
            .context("Failed to count students")
            .map_err(AppError::database)
    }

    #[instrument(skip(self, user, institute, applications))]
    async fn create_institute_account(
        &self,
        user: &User,
        institute: &Institute,
        applications: &[CourseApplication],
    ) -> Result<Institute, AppError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin transaction")
            .map_err(AppError::database)?;

        sqlx::query_as::<_, User>(INSERT_USER)
            .bind(user.userid)
            .bind(&user.email)
            .bind(&user.full_name)
            .bind(user.role)
            .bind(&user.password_hash)
            .bind(user.created_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| map_insert_err(e, "An account with this email already exists"))?;

        let created = sqlx::query_as::<_, Institute>(INSERT_INSTITUTE)
            .bind(institute.instid)
            .bind(institute.userid)
            .bind(&institute.name)
            .bind(&institute.accreditation_no)
            .bind(institute.valid_from)
            .bind(institute.valid_to)
            .bind(&institute.contact_email)
            .bind(&institute.contact_phone)
            .bind(&institute.address)
            .bind(&institute.city)
            .bind(&institute.state)
            .bind(institute.verified_status)
            .bind(&institute.documents)
            .bind(institute.created_at)
            .fetch_one(&mut *tx)
            .await
            .context("Failed to insert institute profile")
            .map_err(AppError::database)?;

        for application in applications {
            sqlx::query(
                r#"
                INSERT INTO institute_course_applications
                    (application_id, instid, master_course_id, status, created_at)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(application.application_id)
            .bind(application.instid)
            .bind(application.master_course_id)
            .bind(application.status)
            .bind(application.created_at)
            .execute(&mut *tx)
            .await
            .context("Failed to insert course application")
            .map_err(AppError::database)?;
        }

        tx.commit()
            .await
            .context("Failed to commit institute signup")
            .map_err(AppError::database)?;

        Ok(created)
    }

    #[instrument(skip(self))]
    async fn institute_by_user(&self, userid: Uuid) -> Result<Option<Institute>, AppError> {
        sqlx::query_as::<_, Institute>("SELECT * FROM institutes WHERE userid = $1")
            .bind(userid)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch institute profile")
            .map_err(AppError::database)
    }

    #[instrument(skip(self))]
    async fn institute_by_id(&self, instid: Uuid) -> Result<Option<Institute>, AppError> {
        sqlx::query_as::<_, Institute>("SELECT * FROM institutes WHERE instid = $1")
            .bind(instid)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch institute by id")
            .map_err(AppError::database)
    }

    #[instrument(skip(self))]
    async fn list_institutes(
        &self,
        verified_status: Option<VerifiedStatus>,
    ) -> Result<Vec<Institute>, AppError> {
        sqlx::query_as::<_, Institute>(
            r#"
            SELECT * FROM institutes
            WHERE ($1::verified_status IS NULL OR verified_status = $1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(verified_status)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list institutes")
        .map_err(AppError::database)
    }

    #[instrument(skip(self))]
    async fn set_institute_verification(
        &self,
        instid: Uuid,
        status: VerifiedStatus,
    ) -> Result<(), AppError> {
        sqlx::query("UPDATE institutes SET verified_status = $2 WHERE instid = $1")
            .bind(instid)
            .bind(status)
            .execute(&self.pool)
            .await
            .context("Failed to update institute verification status")
            .map_err(AppError::database)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn count_institutes(
        &self,
        verified_status: Option<VerifiedStatus>,
    ) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM institutes
            WHERE ($1::verified_status IS NULL OR verified_status = $1)
            "#,
        )
        .bind(verified_status)
        .fetch_one(&self.pool)
        .await
        .context("Failed to count institutes")
        .map_err(AppError::database)
    }

    #[instrument(skip(self))]
    async fn list_master_courses(&self) -> Result<Vec<MasterCourse>, AppError> {
        sqlx::query_as::<_, MasterCourse>(
            "SELECT * FROM master_courses WHERE is_active ORDER BY course_name",
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list master courses")
        .map_err(AppError::database)
    }

    #[instrument(skip(self, course))]
    async fn insert_course(&self, course: &Course) -> Result<Course, AppError> {
        sqlx::query_as::<_, Course>(
            r#"
            INSERT INTO courses (courseid, instid, title, course_type, duration, mode, fees,
                                 description, validity_months, accreditation_ref, status,
                                 master_course_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(course.courseid)
        .bind(course.instid)
        .bind(&course.title)
        .bind(course.course_type)
        .bind(&course.duration)
        .bind(course.mode)
        .bind(course.fees)
        .bind(&course.description)
        .bind(course.validity_months)
        .bind(&course.accreditation_ref)
        .bind(course.status)
        .bind(course.master_course_id)
        .bind(course.created_at)
        .fetch_one(&self.pool)
        .await
        .context("Failed to insert course")
        .map_err(AppError::database)
    }

    #[instrument(skip(self))]
    async fn course_by_id(&self, courseid: Uuid) -> Result<Option<Course>, AppError> {
        sqlx::query_as::<_, Course>("SELECT * FROM courses WHERE courseid = $1")
            .bind(courseid)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch course by id")
            .map_err(AppError::database)
    }

    #[instrument(skip(self, filter))]
    async fn list_courses(&self, filter: &CourseFilter) -> Result<Vec<Course>, AppError> {
        sqlx::query_as::<_, Course>(
            r#"
            SELECT * FROM courses
            WHERE status = 'active'
              AND ($1::course_type IS NULL OR course_type = $1)
              AND ($2::course_mode IS NULL OR mode = $2)
              AND ($3::text IS NULL OR title ILIKE '%' || $3 || '%')
            ORDER BY created_at DESC
            LIMIT $4
            "#,
        )
        .bind(filter.course_type)
        .bind(filter.mode)
        .bind(&filter.search)
        .bind(filter.limit)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list courses")
        .map_err(AppError::database)
    }

    #[instrument(skip(self))]
    async fn courses_by_institute(&self, instid: Uuid) -> Result<Vec<Course>, AppError> {
        sqlx::query_as::<_, Course>(
            "SELECT * FROM courses WHERE instid = $1 ORDER BY created_at DESC",
        )
        .bind(instid)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list institute courses")
        .map_err(AppError::database)
    }

    #[instrument(skip(self))]
    async fn course_ids_by_institute(&self, instid: Uuid) -> Result<Vec<Uuid>, AppError> {
        sqlx::query_scalar::<_, Uuid>("SELECT courseid FROM courses WHERE instid = $1")
            .bind(instid)
            .fetch_all(&self.pool)
            .await
            .context("Failed to list institute course ids")
            .map_err(AppError::database)
    }

    #[instrument(skip(self))]
    async fn set_course_status(
        &self,
        courseid: Uuid,
        status: CourseStatus,
    ) -> Result<(), AppError> {
        sqlx::query("UPDATE courses SET status = $2 WHERE courseid = $1")
            .bind(courseid)
            .bind(status)
            .execute(&self.pool)
            .await
            .context("Failed to update course status")
            .map_err(AppError::database)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn count_courses(&self, status: Option<CourseStatus>) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM courses WHERE ($1::course_status IS NULL OR status = $1)",
        )
        .bind(status)
        .fetch_one(&self.pool)
        .await
        .context("Failed to count courses")
        .map_err(AppError::database)
    }

    #[instrument(skip(self, batch))]
    async fn insert_batch(&self, batch: &Batch) -> Result<Batch, AppError> {
        sqlx::query_as::<_, Batch>(
            r#"
            INSERT INTO batches (batchid, courseid, batch_name, start_date, end_date,
                                 seats_total, seats_booked, trainer, location, batch_status,
                                 created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(batch.batchid)
        .bind(batch.courseid)
        .bind(&batch.batch_name)
        .bind(batch.start_date)
        .bind(batch.end_date)
        .bind(batch.seats_total)
        .bind(batch.seats_booked)
        .bind(&batch.trainer)
        .bind(&batch.location)
        .bind(batch.batch_status)
        .bind(batch.created_at)
        .fetch_one(&self.pool)
        .await
        .context("Failed to insert batch")
        .map_err(AppError::database)
    }

    #[instrument(skip(self))]
    async fn batch_by_id(&self, batchid: Uuid) -> Result<Option<Batch>, AppError> {
        sqlx::query_as::<_, Batch>("SELECT * FROM batches WHERE batchid = $1")
            .bind(batchid)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch batch by id")
            .map_err(AppError::database)
    }

    #[instrument(skip(self, filter))]
    async fn list_batches(&self, filter: &BatchFilter) -> Result<Vec<Batch>, AppError> {
        sqlx::query_as::<_, Batch>(
            r#"
            SELECT * FROM batches
            WHERE ($1::uuid IS NULL OR courseid = $1)
              AND (CASE
                     WHEN $2::batch_status IS NULL
                       THEN batch_status IN ('upcoming', 'ongoing')
                     ELSE batch_status = $2
                   END)
            ORDER BY start_date
            "#,
        )
        .bind(filter.course_id)
        .bind(filter.status)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list batches")
        .map_err(AppError::database)
    }

    #[instrument(skip(self, courseids))]
    async fn batches_by_courses(&self, courseids: &[Uuid]) -> Result<Vec<Batch>, AppError> {
        sqlx::query_as::<_, Batch>(
            "SELECT * FROM batches WHERE courseid = ANY($1) ORDER BY start_date DESC",
        )
        .bind(courseids)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list batches by courses")
        .map_err(AppError::database)
    }

    #[instrument(skip(self))]
    async fn set_batch_status(&self, batchid: Uuid, status: BatchStatus) -> Result<(), AppError> {
        sqlx::query("UPDATE batches SET batch_status = $2 WHERE batchid = $1")
            .bind(batchid)
            .bind(status)
            .execute(&self.pool)
            .await
            .context("Failed to update batch status")
            .map_err(AppError::database)?;
        Ok(())
    }

    #[instrument(skip(self, booking))]
    async fn insert_booking_taking_seat(&self, booking: &Booking) -> Result<Booking, AppError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin transaction")
            .map_err(AppError::database)?;

        // Conditional increment: refuses the seat when the batch is full,
        // closing the race the original read-then-increment sequence had.
        let taken = sqlx::query(
            r#"
            UPDATE batches
            SET seats_booked = seats_booked + 1
            WHERE batchid = $1 AND seats_booked < seats_total
            "#,
        )
        .bind(booking.batchid)
        .execute(&mut *tx)
        .await
        .context("Failed to take batch seat")
        .map_err(AppError::database)?;

        if taken.rows_affected() == 0 {
            return Err(AppError::bad_request("Batch is full. No seats available."));
        }

        let created = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (bookid, studid, batchid, confirmation_number, amount,
                                  payment_status, attendance_status, booking_date, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(booking.bookid)
        .bind(booking.studid)
        .bind(booking.batchid)
        .bind(&booking.confirmation_number)
        .bind(booking.amount)
        .bind(booking.payment_status)
        .bind(booking.attendance_status)
        .bind(booking.booking_date)
        .bind(booking.created_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_insert_err(e, "You have already booked this batch"))?;

        tx.commit()
            .await
            .context("Failed to commit booking")
            .map_err(AppError::database)?;

        Ok(created)
    }

    #[instrument(skip(self))]
    async fn booking_for_student(
        &self,
        bookid: Uuid,
        studid: Uuid,
    ) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE bookid = $1 AND studid = $2")
            .bind(bookid)
            .bind(studid)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch booking")
            .map_err(AppError::database)
    }

    #[instrument(skip(self))]
    async fn booking_exists(&self, studid: Uuid, batchid: Uuid) -> Result<bool, AppError> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM bookings WHERE studid = $1 AND batchid = $2)",
        )
        .bind(studid)
        .bind(batchid)
        .fetch_one(&self.pool)
        .await
        .context("Failed to check existing booking")
        .map_err(AppError::database)
    }

    #[instrument(skip(self))]
    async fn bookings_by_student(&self, studid: Uuid) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE studid = $1 ORDER BY booking_date DESC",
        )
        .bind(studid)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list student bookings")
        .map_err(AppError::database)
    }

    #[instrument(skip(self))]
    async fn bookings_by_batch(&self, batchid: Uuid) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE batchid = $1 ORDER BY booking_date",
        )
        .bind(batchid)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list batch bookings")
        .map_err(AppError::database)
    }

    #[instrument(skip(self))]
    async fn list_bookings(
        &self,
        payment_status: Option<PaymentStatus>,
    ) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>(
            r#"
            SELECT * FROM bookings
            WHERE ($1::payment_status IS NULL OR payment_status = $1)
            ORDER BY booking_date DESC
            "#,
        )
        .bind(payment_status)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list bookings")
        .map_err(AppError::database)
    }

    #[instrument(skip(self))]
    async fn set_payment_status(
        &self,
        bookid: Uuid,
        status: PaymentStatus,
    ) -> Result<(), AppError> {
        sqlx::query("UPDATE bookings SET payment_status = $2 WHERE bookid = $1")
            .bind(bookid)
            .bind(status)
            .execute(&self.pool)
            .await
            .context("Failed to update payment status")
            .map_err(AppError::database)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn count_bookings(&self) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM bookings")
            .fetch_one(&self.pool)
            .await
            .context("Failed to count bookings")
            .map_err(AppError::database)
    }

    #[instrument(skip(self))]
    async fn completed_revenue(&self) -> Result<f64, AppError> {
        sqlx::query_scalar::<_, f64>(
            "SELECT COALESCE(SUM(amount), 0) FROM bookings WHERE payment_status = 'completed'",
        )
        .fetch_one(&self.pool)
        .await
        .context("Failed to sum completed revenue")
        .map_err(AppError::database)
    }

    #[instrument(skip(self, cert))]
    async fn insert_certificate(&self, cert: &Certificate) -> Result<Certificate, AppError> {
        sqlx::query_as::<_, Certificate>(
            r#"
            INSERT INTO certificates (certid, studid, courseid, cert_number, issue_date,
                                      expiry_date, dgshipping_uploaded, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(cert.certid)
        .bind(cert.studid)
        .bind(cert.courseid)
        .bind(&cert.cert_number)
        .bind(cert.issue_date)
        .bind(cert.expiry_date)
        .bind(cert.dgshipping_uploaded)
        .bind(cert.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_insert_err(e, "Certificate already exists for this student and course"))
    }

    #[instrument(skip(self))]
    async fn certificate_by_id(&self, certid: Uuid) -> Result<Option<Certificate>, AppError> {
        sqlx::query_as::<_, Certificate>("SELECT * FROM certificates WHERE certid = $1")
            .bind(certid)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch certificate by id")
            .map_err(AppError::database)
    }

    #[instrument(skip(self))]
    async fn certificate_exists(&self, studid: Uuid, courseid: Uuid) -> Result<bool, AppError> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM certificates WHERE studid = $1 AND courseid = $2)",
        )
        .bind(studid)
        .bind(courseid)
        .fetch_one(&self.pool)
        .await
        .context("Failed to check existing certificate")
        .map_err(AppError::database)
    }

    #[instrument(skip(self))]
    async fn certificates_by_student(&self, studid: Uuid) -> Result<Vec<Certificate>, AppError> {
        sqlx::query_as::<_, Certificate>(
            "SELECT * FROM certificates WHERE studid = $1 ORDER BY issue_date DESC",
        )
        .bind(studid)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list student certificates")
        .map_err(AppError::database)
    }

    #[instrument(skip(self, courseids))]
    async fn certificates_by_courses(
        &self,
        courseids: &[Uuid],
    ) -> Result<Vec<Certificate>, AppError> {
        sqlx::query_as::<_, Certificate>(
            "SELECT * FROM certificates WHERE courseid = ANY($1) ORDER BY issue_date DESC",
        )
        .bind(courseids)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list certificates by courses")
        .map_err(AppError::database)
    }

    #[instrument(skip(self))]
    async fn mark_dgshipping_uploaded(&self, certid: Uuid) -> Result<(), AppError> {
        sqlx::query("UPDATE certificates SET dgshipping_uploaded = TRUE WHERE certid = $1")
            .bind(certid)
            .execute(&self.pool)
            .await
            .context("Failed to mark certificate uploaded")
            .map_err(AppError::database)?;
        Ok(())
    }

    #[instrument(skip(self, request))]
    async fn insert_reactivation_request(
        &self,
        request: &ReactivationRequest,
    ) -> Result<ReactivationRequest, AppError> {
        sqlx::query_as::<_, ReactivationRequest>(
            r#"
            INSERT INTO institute_reactivation_requests
                (request_id, instid, new_accreditation_no, new_valid_from, new_valid_to,
                 documents, status, submitted_at, reviewed_at, reviewer_notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(request.request_id)
        .bind(request.instid)
        .bind(&request.new_accreditation_no)
        .bind(request.new_valid_from)
        .bind(request.new_valid_to)
        .bind(&request.documents)
        .bind(request.status)
        .bind(request.submitted_at)
        .bind(request.reviewed_at)
        .bind(&request.reviewer_notes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_insert_err(e, "You already have a pending reactivation request"))
    }

    #[instrument(skip(self))]
    async fn reactivation_request_by_id(
        &self,
        request_id: Uuid,
    ) -> Result<Option<ReactivationRequest>, AppError> {
        sqlx::query_as::<_, ReactivationRequest>(
            "SELECT * FROM institute_reactivation_requests WHERE request_id = $1",
        )
        .bind(request_id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch reactivation request")
        .map_err(AppError::database)
    }

    #[instrument(skip(self))]
    async fn pending_reactivation_exists(&self, instid: Uuid) -> Result<bool, AppError> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM institute_reactivation_requests
                WHERE instid = $1 AND status = 'pending'
            )
            "#,
        )
        .bind(instid)
        .fetch_one(&self.pool)
        .await
        .context("Failed to check pending reactivation request")
        .map_err(AppError::database)
    }

    #[instrument(skip(self))]
    async fn reactivation_requests_by_institute(
        &self,
        instid: Uuid,
    ) -> Result<Vec<ReactivationRequest>, AppError> {
        sqlx::query_as::<_, ReactivationRequest>(
            r#"
            SELECT * FROM institute_reactivation_requests
            WHERE instid = $1
            ORDER BY submitted_at DESC
            "#,
        )
        .bind(instid)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list institute reactivation requests")
        .map_err(AppError::database)
    }

    #[instrument(skip(self))]
    async fn list_reactivation_requests(
        &self,
        status: Option<RequestStatus>,
    ) -> Result<Vec<ReactivationRequest>, AppError> {
        sqlx::query_as::<_, ReactivationRequest>(
            r#"
            SELECT * FROM institute_reactivation_requests
            WHERE ($1::request_status IS NULL OR status = $1)
            ORDER BY submitted_at DESC
            "#,
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list reactivation requests")
        .map_err(AppError::database)
    }

    #[instrument(skip(self, reviewer_notes))]
    async fn review_reactivation_request(
        &self,
        request_id: Uuid,
        status: RequestStatus,
        reviewer_notes: Option<String>,
        reviewed_at: DateTime<Utc>,
    ) -> Result<ReactivationRequest, AppError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin transaction")
            .map_err(AppError::database)?;

        let updated = sqlx::query_as::<_, ReactivationRequest>(
            r#"
            UPDATE institute_reactivation_requests
            SET status = $2, reviewer_notes = $3, reviewed_at = $4
            WHERE request_id = $1
            RETURNING *
            "#,
        )
        .bind(request_id)
        .bind(status)
        .bind(&reviewer_notes)
        .bind(reviewed_at)
        .fetch_optional(&mut *tx)
        .await
        .context("Failed to update reactivation request")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found("Reactivation request not found"))?;

        if status == RequestStatus::Approved {
            sqlx::query(
                r#"
                UPDATE institutes
                SET accreditation_no = $2,
                    valid_from = $3,
                    valid_to = $4,
                    verified_status = 'verified'
                WHERE instid = $1
                "#,
            )
            .bind(updated.instid)
            .bind(&updated.new_accreditation_no)
            .bind(updated.new_valid_from)
            .bind(updated.new_valid_to)
            .execute(&mut *tx)
            .await
            .context("Failed to apply approved reactivation to institute")
            .map_err(AppError::database)?;
        }

        tx.commit()
            .await
            .context("Failed to commit reactivation review")
            .map_err(AppError::database)?;

        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn application_by_id(
        &self,
        application_id: Uuid,
    ) -> Result<Option<CourseApplication>, AppError> {
        sqlx::query_as::<_, CourseApplication>(
            "SELECT * FROM institute_course_applications WHERE application_id = $1",
        )
        .bind(application_id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch course application")
        .map_err(AppError::database)
    }

    #[instrument(skip(self))]
    async fn list_course_applications(
        &self,
        status: Option<RequestStatus>,
    ) -> Result<Vec<CourseApplicationDetail>, AppError> {
        sqlx::query_as::<_, CourseApplicationDetail>(
            r#"
            SELECT a.application_id, a.instid, a.master_course_id, a.status, a.created_at,
                   a.reviewed_at, i.name AS institute_name, i.accreditation_no,
                   m.course_name, m.course_code
            FROM institute_course_applications a
            LEFT JOIN institutes i ON i.instid = a.instid
            LEFT JOIN master_courses m ON m.master_course_id = a.master_course_id
            WHERE ($1::request_status IS NULL OR a.status = $1)
            ORDER BY a.created_at DESC
            "#,
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list course applications")
        .map_err(AppError::database)
    }

    #[instrument(skip(self))]
    async fn set_application_status(
        &self,
        application_id: Uuid,
        status: RequestStatus,
        reviewed_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE institute_course_applications
            SET status = $2, reviewed_at = $3
            WHERE application_id = $1
            "#,
        )
        .bind(application_id)
        .bind(status)
        .bind(reviewed_at)
        .execute(&self.pool)
        .await
        .context("Failed to update course application status")
        .map_err(AppError::database)?;
        Ok(())
    }
}
