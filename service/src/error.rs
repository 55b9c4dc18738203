use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

const INTERNAL_ERROR_MESSAGE: &str = "An internal server error occurred.";

/// Carries an `abi::Error` to the HTTP boundary. Internal details are logged, never returned.
#[derive(Debug)]
pub struct ApiError(pub abi::Error);

impl From<abi::Error> for ApiError {
    fn from(e: abi::Error) -> Self {
        Self(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(abi::Error::InvalidInput(rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self(abi::Error::InvalidInput(rejection.body_text()))
    }
}

impl ApiError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match &self.0 {
            abi::Error::NotFound => (StatusCode::NOT_FOUND, "Reservation not found.".into()),
            abi::Error::NoCapacity => (
                StatusCode::BAD_REQUEST,
                "No available parking spots.".into(),
            ),
            abi::Error::SpotUnavailable(_) => (
                StatusCode::BAD_REQUEST,
                "New spot is not available.".into(),
            ),
            abi::Error::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                INTERNAL_ERROR_MESSAGE.into(),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if !self.0.is_client_error() {
            error!(error = %self.0, "request failed");
        }
        let (status, message) = self.status_and_message();
        (status, Json(json!({ "message": message }))).into_response()
    }
}
