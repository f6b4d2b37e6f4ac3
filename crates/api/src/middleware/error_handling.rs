//! # Error Handling Middleware
//!
//! Maps `BookingError` values to HTTP status codes and a JSON body of the
//! form `{"error": "<message>"}`, so every handler reports failures the same
//! way.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use slotbook_core::errors::BookingError;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use slotbook_api::middleware::error_handling::AppError;
/// use slotbook_core::{dates::parse_calendar_date, errors::BookingError};
///
/// async fn handler(date: String) -> Result<Json<String>, AppError> {
///     let date = parse_calendar_date(&date)?;
///     if date.format("%m-%d").to_string() == "12-25" {
///         return Err(AppError(BookingError::Validation("closed".to_string())));
///     }
///     Ok(Json(date.to_string()))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub BookingError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            BookingError::NotFound(_) => StatusCode::NOT_FOUND,
            BookingError::Validation(_)
            | BookingError::InvalidTemplate(_)
            | BookingError::MalformedDate(_) => StatusCode::BAD_REQUEST,
            BookingError::Authorization(_) => StatusCode::FORBIDDEN,
            BookingError::Conflict(_) => StatusCode::CONFLICT,
            BookingError::Database(_) | BookingError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {:?}", self.0);
        }

        let message = self.0.to_string();
        let body = Json(json!({ "error": message }));

        (status, body).into_response()
    }
}

/// Allows `?` on `BookingResult` inside handlers.
impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        AppError(err)
    }
}

/// Collaborator failures surface as database errors.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(BookingError::Database(err))
    }
}

/// Maps a BookingError straight to an HTTP response
pub fn map_error(err: BookingError) -> Response {
    AppError(err).into_response()
}
