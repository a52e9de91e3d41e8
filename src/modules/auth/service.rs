use chrono::Utc;
use tracing::instrument;
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::modules::admin::model::CourseApplication;
use crate::modules::auth::model::{
    InstituteSignupRequest, LoginRequest, StudentSignupRequest, TokenResponse, User, UserRole,
};
use crate::modules::institutes::model::{Institute, RequestStatus, VerifiedStatus};
use crate::modules::students::model::Student;
use crate::store::Store;
use crate::utils::errors::AppError;
use crate::utils::jwt::create_access_token;
use crate::utils::password::{hash_password, verify_password};

pub struct AuthService;

impl AuthService {
    #[instrument(skip(store, dto))]
    pub async fn signup_student(
        store: &dyn Store,
        dto: StudentSignupRequest,
    ) -> Result<Student, AppError> {
        if store.user_by_email(&dto.email).await?.is_some() {
            return Err(AppError::bad_request(
                "An account with this email already exists",
            ));
        }

        let now = Utc::now();
        let user = User {
            userid: Uuid::new_v4(),
            email: dto.email,
            full_name: dto.full_name.clone(),
            role: UserRole::Student,
            password_hash: hash_password(&dto.password)?,
            created_at: now,
        };
        let student = Student {
            studid: Uuid::new_v4(),
            userid: user.userid,
            full_name: dto.full_name,
            date_of_birth: dto.date_of_birth,
            phone: dto.phone,
            cdc_number: dto.cdc_number,
            indos_number: dto.indos_number,
            rank: dto.rank,
            address: dto.address,
            city: dto.city,
            state: dto.state,
            created_at: now,
        };

        store.create_student_account(&user, &student).await
    }

    #[instrument(skip(store, dto))]
    pub async fn signup_institute(
        store: &dyn Store,
        dto: InstituteSignupRequest,
    ) -> Result<Institute, AppError> {
        if store.user_by_email(&dto.email).await?.is_some() {
            return Err(AppError::bad_request(
                "An account with this email already exists",
            ));
        }

        let now = Utc::now();
        let user = User {
            userid: Uuid::new_v4(),
            email: dto.email.clone(),
            full_name: dto.full_name,
            role: UserRole::Institute,
            password_hash: hash_password(&dto.password)?,
            created_at: now,
        };
        let institute = Institute {
            instid: Uuid::new_v4(),
            userid: user.userid,
            name: dto.institute_name,
            accreditation_no: dto.accreditation_no,
            valid_from: dto.valid_from,
            valid_to: dto.valid_to,
            contact_email: dto.email,
            contact_phone: Some(dto.contact_phone),
            address: dto.address,
            city: dto.city,
            state: dto.state,
            verified_status: VerifiedStatus::Pending,
            documents: None,
            created_at: now,
        };

        // Each selected catalog template becomes a pending application the
        // platform admins review.
        let applications: Vec<CourseApplication> = dto
            .selected_courses
            .into_iter()
            .map(|master_course_id| CourseApplication {
                application_id: Uuid::new_v4(),
                instid: institute.instid,
                master_course_id,
                status: RequestStatus::Pending,
                created_at: now,
                reviewed_at: None,
            })
            .collect();

        store
            .create_institute_account(&user, &institute, &applications)
            .await
    }

    #[instrument(skip(store, dto, jwt_config))]
    pub async fn login(
        store: &dyn Store,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<TokenResponse, AppError> {
        let user = store
            .user_by_email(&dto.email)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid credentials"))?;

        if !verify_password(&dto.password, &user.password_hash)? {
            return Err(AppError::unauthorized("Invalid credentials"));
        }

        let access_token = create_access_token(user.userid, user.role, jwt_config)?;

        Ok(TokenResponse {
            access_token,
            token_type: "bearer".to_string(),
            user_id: user.userid,
            role: user.role,
        })
    }
}
