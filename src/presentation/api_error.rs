// Maps analytics errors onto HTTP responses
use crate::domain::error::AnalyticsError;
use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl AnalyticsError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AnalyticsError::RestaurantNotFound(_) => StatusCode::NOT_FOUND,
            AnalyticsError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AnalyticsError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::warn!("Request rejected: {}", self);
        }

        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}

impl From<QueryRejection> for AnalyticsError {
    fn from(rejection: QueryRejection) -> Self {
        AnalyticsError::InvalidRequest(rejection.body_text())
    }
}

impl From<JsonRejection> for AnalyticsError {
    fn from(rejection: JsonRejection) -> Self {
        AnalyticsError::InvalidRequest(rejection.body_text())
    }
}
