use axum::{routing::post, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new().route(
        "/api/patients/:patient_id/appointments",
        post(handlers::appointment::create_appointment),
    )
}
