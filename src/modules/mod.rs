pub mod admin;
pub mod auth;
pub mod batches;
pub mod bookings;
pub mod certificates;
pub mod courses;
pub mod institutes;
pub mod students;
