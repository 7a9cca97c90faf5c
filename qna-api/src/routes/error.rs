use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::qna::QnaError;

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// The rejection for a `type` outside buyer/supplier, shared by all
    /// three endpoints.
    pub fn invalid_query_type() -> Self {
        Self::bad_request("Type can only be buyer or supplier")
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            detail: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<QnaError> for ApiError {
    fn from(err: QnaError) -> Self {
        tracing::error!("QnA pipeline error: {}", err);
        Self::internal(err.to_string())
    }
}
