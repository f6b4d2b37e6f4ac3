use chrono::{DateTime, Utc};
use mockall::mock;
use uuid::Uuid;

use crate::models::{DbAppointment, DbBookingRecord, DbProfile};

// Mock repositories for testing
mock! {
    pub ProfileRepo {
        pub async fn get_profile_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbProfile>>;

        pub async fn get_active_profile_for_doctor(
            &self,
            doctor_id: &'static str,
        ) -> eyre::Result<Option<DbProfile>>;

        pub async fn get_profiles_by_doctor(
            &self,
            doctor_id: &'static str,
        ) -> eyre::Result<Vec<DbProfile>>;
    }
}

mock! {
    pub AppointmentRepo {
        pub async fn get_bookings_for_doctor(
            &self,
            doctor_id: &'static str,
            from: DateTime<Utc>,
            until: DateTime<Utc>,
        ) -> eyre::Result<Vec<DbBookingRecord>>;

        pub async fn find_patient_overlaps(
            &self,
            patient_id: &'static str,
            start: DateTime<Utc>,
            end: DateTime<Utc>,
        ) -> eyre::Result<Vec<DbAppointment>>;
    }
}
