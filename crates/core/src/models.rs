pub mod appointment;
pub mod availability;
pub mod profile;
pub mod time_of_day;
