use chrono::Utc;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::certificates::model::{Certificate, CreateCertificateRequest};
use crate::store::Store;
use crate::utils::errors::AppError;

pub struct CertificateService;

impl CertificateService {
    /// Issues a certificate for a completed course. One certificate per
    /// (student, course) pair.
    #[instrument(skip(store, dto))]
    pub async fn issue_certificate(
        store: &dyn Store,
        instid: Uuid,
        dto: CreateCertificateRequest,
    ) -> Result<Certificate, AppError> {
        let course = store
            .course_by_id(dto.courseid)
            .await?
            .ok_or_else(|| AppError::not_found("Course not found"))?;

        if course.instid != instid {
            return Err(AppError::forbidden(
                "Not authorized to issue certificates for this course",
            ));
        }

        store
            .student_by_id(dto.studid)
            .await?
            .ok_or_else(|| AppError::not_found("Student not found"))?;

        if store.certificate_exists(dto.studid, dto.courseid).await? {
            return Err(AppError::bad_request(
                "Certificate already exists for this student and course",
            ));
        }

        let certificate = Certificate {
            certid: Uuid::new_v4(),
            studid: dto.studid,
            courseid: dto.courseid,
            cert_number: dto.cert_number,
            issue_date: dto.issue_date,
            expiry_date: dto.expiry_date,
            dgshipping_uploaded: false,
            created_at: Utc::now(),
        };

        store.insert_certificate(&certificate).await
    }

    #[instrument(skip(store))]
    pub async fn my_certificates(
        store: &dyn Store,
        studid: Uuid,
    ) -> Result<Vec<Certificate>, AppError> {
        store.certificates_by_student(studid).await
    }

    /// Certificates issued across all of the institute's courses.
    #[instrument(skip(store))]
    pub async fn issued_certificates(
        store: &dyn Store,
        instid: Uuid,
    ) -> Result<Vec<Certificate>, AppError> {
        let course_ids = store.course_ids_by_institute(instid).await?;
        if course_ids.is_empty() {
            return Ok(Vec::new());
        }
        store.certificates_by_courses(&course_ids).await
    }

    #[instrument(skip(store))]
    pub async fn get_certificate(
        store: &dyn Store,
        certid: Uuid,
    ) -> Result<Certificate, AppError> {
        store
            .certificate_by_id(certid)
            .await?
            .ok_or_else(|| AppError::not_found("Certificate not found"))
    }

    #[instrument(skip(store))]
    pub async fn mark_dgshipping_uploaded(
        store: &dyn Store,
        instid: Uuid,
        certid: Uuid,
    ) -> Result<(), AppError> {
        let certificate = store
            .certificate_by_id(certid)
            .await?
            .ok_or_else(|| AppError::not_found("Certificate not found"))?;

        let course = store
            .course_by_id(certificate.courseid)
            .await?
            .ok_or_else(|| AppError::not_found("Course not found"))?;

        if course.instid != instid {
            return Err(AppError::forbidden(
                "Not authorized to update this certificate",
            ));
        }

        store.mark_dgshipping_uploaded(certid).await
    }
}
