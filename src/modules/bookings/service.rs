use chrono::Utc;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::bookings::model::{
    AttendanceStatus, Booking, CreateBookingRequest, PaymentStatus,
};
use crate::store::Store;
use crate::utils::errors::AppError;

/// `BK` + booking date + a short uppercase token, e.g. `BK20260301A1B2C3D4`.
fn confirmation_number() -> String {
    let token = Uuid::new_v4().simple().to_string()[..8].to_uppercase();
    format!("BK{}{}", Utc::now().format("%Y%m%d"), token)
}

pub struct BookingService;

impl BookingService {
    /// Books a seat on a batch. The seat increment and the booking row are
    /// written atomically, so a refusal can never leak a taken seat.
    #[instrument(skip(store, dto))]
    pub async fn create_booking(
        store: &dyn Store,
        studid: Uuid,
        dto: CreateBookingRequest,
    ) -> Result<Booking, AppError> {
        let batch = store
            .batch_by_id(dto.batchid)
            .await?
            .ok_or_else(|| AppError::not_found("Batch not found"))?;

        if store.booking_exists(studid, batch.batchid).await? {
            return Err(AppError::bad_request("You have already booked this batch"));
        }

        if batch.seats_booked >= batch.seats_total {
            return Err(AppError::bad_request("Batch is full. No seats available."));
        }

        let now = Utc::now();
        let booking = Booking {
            bookid: Uuid::new_v4(),
            studid,
            batchid: batch.batchid,
            confirmation_number: confirmation_number(),
            amount: dto.amount,
            payment_status: PaymentStatus::Pending,
            attendance_status: AttendanceStatus::NotStarted,
            booking_date: now,
            created_at: now,
        };

        store.insert_booking_taking_seat(&booking).await
    }

    #[instrument(skip(store))]
    pub async fn my_bookings(store: &dyn Store, studid: Uuid) -> Result<Vec<Booking>, AppError> {
        store.bookings_by_student(studid).await
    }

    /// Students can only see their own bookings; anything else is a 404.
    #[instrument(skip(store))]
    pub async fn get_booking(
        store: &dyn Store,
        bookid: Uuid,
        studid: Uuid,
    ) -> Result<Booking, AppError> {
        store
            .booking_for_student(bookid, studid)
            .await?
            .ok_or_else(|| AppError::not_found("Booking not found"))
    }

    #[instrument(skip(store))]
    pub async fn update_payment_status(
        store: &dyn Store,
        bookid: Uuid,
        studid: Uuid,
        status: PaymentStatus,
    ) -> Result<(), AppError> {
        store
            .booking_for_student(bookid, studid)
            .await?
            .ok_or_else(|| AppError::not_found("Booking not found"))?;

        store.set_payment_status(bookid, status).await
    }

    #[instrument(skip(store))]
    pub async fn batch_bookings(
        store: &dyn Store,
        instid: Uuid,
        batchid: Uuid,
    ) -> Result<Vec<Booking>, AppError> {
        let batch = store
            .batch_by_id(batchid)
            .await?
            .ok_or_else(|| AppError::not_found("Batch not found"))?;

        let course = store
            .course_by_id(batch.courseid)
            .await?
            .ok_or_else(|| AppError::not_found("Course not found"))?;

        if course.instid != instid {
            return Err(AppError::forbidden(
                "Not authorized to view bookings for this batch",
            ));
        }

        store.bookings_by_batch(batchid).await
    }
}
