use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::dto::StatusResponse;

/// Failure kinds of the ingest path.
///
/// The caller only ever sees a fixed message; causes are logged where the
/// error is raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestError {
    InvalidInput,
    PersistenceFailure,
}

impl IntoResponse for IngestError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            IngestError::InvalidInput => (StatusCode::BAD_REQUEST, "Invalid JSON format."),
            IngestError::PersistenceFailure => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error.")
            }
        };
        (status, Json(StatusResponse::error(message))).into_response()
    }
}
