/// Profile lookup and the per-day availability endpoint
pub mod availability;
/// Booking new appointments
pub mod appointment;
/// Profile management
pub mod profile;
