use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::services::booking::BookingError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("database error: {0}")]
    Database(#[from] anyhow::Error),

    #[error("invalid request: {0}")]
    BadRequest(String),

    #[error("invalid booking request")]
    Validation(Vec<String>),

    #[error("{0}")]
    Conflict(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("unauthorized")]
    Unauthorized,
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::Invalid(errors) => AppError::Validation(errors),
            BookingError::Conflict => {
                AppError::Conflict("that time slot is already booked".to_string())
            }
            BookingError::VenueNotFound(id) => AppError::NotFound(format!("venue {id}")),
            BookingError::CourtNotFound(id) => AppError::NotFound(format!("court {id}")),
            BookingError::VenueNotBookable(msg) => AppError::BadRequest(msg),
            BookingError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
        };

        if let AppError::Database(e) = &self {
            tracing::error!(error = %e, "request failed");
        }

        let body = match &self {
            AppError::Validation(errors) => {
                serde_json::json!({ "error": self.to_string(), "errors": errors })
            }
            _ => serde_json::json!({ "error": self.to_string() }),
        };
        (status, axum::Json(body)).into_response()
    }
}
