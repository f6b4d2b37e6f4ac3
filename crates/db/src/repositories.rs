pub mod appointment;
pub mod profile;
