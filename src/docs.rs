use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::admin::model::{
    CourseApplication, CourseApplicationDetail, PlatformStats, ReviewReactivationRequest,
};
use crate::modules::auth::model::{
    InstituteSignupRequest, LoginRequest, MessageResponse, StudentSignupRequest, TokenResponse,
    User, UserRole,
};
use crate::modules::batches::model::{Batch, BatchStatus, CreateBatchRequest};
use crate::modules::bookings::model::{
    AttendanceStatus, Booking, CreateBookingRequest, PaymentStatus,
};
use crate::modules::certificates::model::{Certificate, CreateCertificateRequest};
use crate::modules::courses::model::{
    Course, CourseMode, CourseStatus, CourseType, CreateCourseRequest, MasterCourse,
};
use crate::modules::institutes::model::{
    CreateReactivationRequest, Institute, ReactivationRequest, RequestStatus, VerifiedStatus,
};
use crate::modules::students::model::{Student, UpdateStudentProfileRequest};
use crate::utils::errors::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::signup_student,
        crate::modules::auth::controller::signup_institute,
        crate::modules::auth::controller::login,
        crate::modules::institutes::controller::get_my_institute,
        crate::modules::institutes::controller::get_institute,
        crate::modules::institutes::controller::create_reactivation_request,
        crate::modules::institutes::controller::my_reactivation_requests,
        crate::modules::courses::controller::list_master_courses,
        crate::modules::courses::controller::list_courses,
        crate::modules::courses::controller::get_course,
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::my_courses,
        crate::modules::courses::controller::update_course_status,
        crate::modules::batches::controller::list_batches,
        crate::modules::batches::controller::get_batch,
        crate::modules::batches::controller::create_batch,
        crate::modules::batches::controller::my_batches,
        crate::modules::batches::controller::update_batch_status,
        crate::modules::bookings::controller::create_booking,
        crate::modules::bookings::controller::my_bookings,
        crate::modules::bookings::controller::get_booking,
        crate::modules::bookings::controller::update_payment_status,
        crate::modules::bookings::controller::batch_bookings,
        crate::modules::certificates::controller::issue_certificate,
        crate::modules::certificates::controller::my_certificates,
        crate::modules::certificates::controller::issued_certificates,
        crate::modules::certificates::controller::get_certificate,
        crate::modules::certificates::controller::mark_dgshipping_uploaded,
        crate::modules::students::controller::get_my_profile,
        crate::modules::students::controller::update_my_profile,
        crate::modules::students::controller::get_student,
        crate::modules::admin::controller::list_institutes,
        crate::modules::admin::controller::verify_institute,
        crate::modules::admin::controller::list_reactivation_requests,
        crate::modules::admin::controller::review_reactivation_request,
        crate::modules::admin::controller::list_bookings,
        crate::modules::admin::controller::platform_stats,
        crate::modules::admin::controller::list_course_applications,
        crate::modules::admin::controller::update_application_status,
    ),
    components(
        schemas(
            User,
            UserRole,
            StudentSignupRequest,
            InstituteSignupRequest,
            LoginRequest,
            TokenResponse,
            MessageResponse,
            Student,
            UpdateStudentProfileRequest,
            Institute,
            VerifiedStatus,
            ReactivationRequest,
            CreateReactivationRequest,
            RequestStatus,
            MasterCourse,
            Course,
            CourseType,
            CourseMode,
            CourseStatus,
            CreateCourseRequest,
            Batch,
            BatchStatus,
            CreateBatchRequest,
            Booking,
            PaymentStatus,
            AttendanceStatus,
            CreateBookingRequest,
            Certificate,
            CreateCertificateRequest,
            CourseApplication,
            CourseApplicationDetail,
            ReviewReactivationRequest,
            PlatformStats,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Signup and login"),
        (name = "Institutes", description = "Institute profiles and accreditation reactivation"),
        (name = "Courses", description = "Course catalog and publishing"),
        (name = "Batches", description = "Scheduled course runs"),
        (name = "Bookings", description = "Seat bookings and payments"),
        (name = "Certificates", description = "Certificate issuance and verification"),
        (name = "Students", description = "Student profiles"),
        (name = "Admin", description = "Platform moderation")
    ),
    info(
        title = "Seatrain API",
        version = "0.1.0",
        description = "Marketplace backend for maritime training: institutes publish courses and batches, students book seats, admins moderate."
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
