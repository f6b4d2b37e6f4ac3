use axum::{
    routing::{get, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/profiles", get(handlers::profile::list_profiles))
        .route(
            "/api/doctors/:doctor_id/profiles",
            get(handlers::profile::list_doctor_profiles).post(handlers::profile::create_profile),
        )
        .route(
            "/api/doctors/:doctor_id/profiles/:profile_id",
            put(handlers::profile::update_profile).delete(handlers::profile::delete_profile),
        )
        .route(
            "/api/doctors/:doctor_id/profiles/:profile_id/assign",
            put(handlers::profile::assign_profile),
        )
        .route(
            "/api/doctors/:doctor_id/profiles/:profile_id/unassign",
            put(handlers::profile::unassign_profile),
        )
}
