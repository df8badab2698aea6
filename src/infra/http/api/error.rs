use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::error::ErrorReport;

/// The fixed 500 body. The original surface never distinguished error kinds
/// at this layer and callers depend on the exact message.
const GENERIC_ERROR_MESSAGE: &str = "An unknown error occurred!";
const NOT_FOUND_BODY: &str = "Not found";

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    pub message: String,
}

#[derive(Debug)]
pub struct ApiError {
    kind: ApiErrorKind,
    report: ErrorReport,
}

#[derive(Debug)]
enum ApiErrorKind {
    /// No row matches the identifier. Plain-text body.
    NotFound,
    /// Everything else: gateway failures, malformed bodies, the lot.
    /// Fixed JSON body, details stay server-side.
    Internal,
}

impl ApiError {
    pub fn not_found(source: &'static str) -> Self {
        Self {
            kind: ApiErrorKind::NotFound,
            report: ErrorReport::from_message(source, StatusCode::NOT_FOUND, "no matching row"),
        }
    }

    pub fn internal(source: &'static str, error: &dyn std::error::Error) -> Self {
        Self {
            kind: ApiErrorKind::Internal,
            report: ErrorReport::from_error(source, StatusCode::INTERNAL_SERVER_ERROR, error),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response = match self.kind {
            ApiErrorKind::NotFound => (StatusCode::NOT_FOUND, NOT_FOUND_BODY).into_response(),
            ApiErrorKind::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiErrorBody {
                    message: GENERIC_ERROR_MESSAGE.to_string(),
                }),
            )
                .into_response(),
        };
        self.report.attach(&mut response);
        response
    }
}
