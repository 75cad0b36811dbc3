//! Mapping of engine errors to HTTP responses.
//!
//! Every error leaves the server as `{ "error": "..." }`. Caller mistakes get a 400 with the
//! validation message; anything else gets a 500 with a generic message and the detail is logged.

use api_shared::ErrorRes;
use aurum_core::RxError;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<RxError> for ApiError {
    fn from(err: RxError) -> Self {
        if err.is_client_error() {
            tracing::warn!("Rejected request: {}", err);
            Self {
                status: StatusCode::BAD_REQUEST,
                message: err.to_string(),
            }
        } else {
            tracing::error!("Drug interaction analysis error: {:?}", err);
            Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: "Failed to analyze drug interaction".into(),
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!("Rejected request body: {}", rejection.body_text());
        Self {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorRes {
                error: self.message,
            }),
        )
            .into_response()
    }
}
