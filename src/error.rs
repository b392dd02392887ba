use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use crate::booking::BookingError;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg).into_response(),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg).into_response(),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg).into_response(),
        }
    }
}

impl From<BookingError> for ApiError {
    fn from(value: BookingError) -> Self {
        match value {
            BookingError::Unavailable(_) => ApiError::Conflict(value.to_string()),
            BookingError::CourtNotFound => ApiError::NotFound(value.to_string()),
            BookingError::Store(err) => {
                error!("store error: {err}");
                ApiError::Internal("Storage failure".into())
            }
        }
    }
}

impl From<crate::store::StoreError> for ApiError {
    fn from(value: crate::store::StoreError) -> Self {
        ApiError::from(BookingError::Store(value))
    }
}
