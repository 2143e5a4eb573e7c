use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use voxcat_core::error::{CoreError, FieldError};
use voxcat_core::history::Direction;
use voxcat_db::history::HistoryError;
use voxcat_db::StoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`StoreError`] for file store
/// failures. Implements [`IntoResponse`] to produce consistent JSON error
/// responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `voxcat_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A read or write of a project file failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<HistoryError> for AppError {
    fn from(err: HistoryError) -> Self {
        match err {
            HistoryError::Empty(Direction::Undo) => Self::Core(CoreError::NothingToUndo),
            HistoryError::Empty(Direction::Redo) => Self::Core(CoreError::NothingToRedo),
            HistoryError::Store(e) => Self::Store(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut fields: Option<&[FieldError]> = None;

        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::InvalidFields { entity, fields: f } => {
                    fields = Some(f.as_slice());
                    (
                        StatusCode::BAD_REQUEST,
                        "VALIDATION_ERROR",
                        format!("Invalid {entity}"),
                    )
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::NoProjectSelected => (
                    StatusCode::BAD_REQUEST,
                    "NO_PROJECT_SELECTED",
                    core.to_string(),
                ),
                CoreError::NothingToUndo => {
                    (StatusCode::BAD_REQUEST, "NOTHING_TO_UNDO", core.to_string())
                }
                CoreError::NothingToRedo => {
                    (StatusCode::BAD_REQUEST, "NOTHING_TO_REDO", core.to_string())
                }
                CoreError::DuplicateName { .. } => {
                    (StatusCode::BAD_REQUEST, "DUPLICATE_NAME", core.to_string())
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Store errors ---
            AppError::Store(err) => {
                tracing::error!(error = %err, "Store error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORE_ERROR",
                    "An internal error occurred".to_string(),
                )
            }

            // --- HTTP-specific errors ---
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = match fields {
            Some(fields) => json!({
                "error": message,
                "code": code,
                "fields": fields,
            }),
            None => json!({
                "error": message,
                "code": code,
            }),
        };

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn empty_history_maps_to_direction_specific_errors() {
        assert_matches!(
            AppError::from(HistoryError::Empty(Direction::Undo)),
            AppError::Core(CoreError::NothingToUndo)
        );
        assert_matches!(
            AppError::from(HistoryError::Empty(Direction::Redo)),
            AppError::Core(CoreError::NothingToRedo)
        );
    }

    #[test]
    fn status_codes() {
        let cases = [
            (AppError::Core(CoreError::not_found("Actor", 1)), StatusCode::NOT_FOUND),
            (AppError::Core(CoreError::NoProjectSelected), StatusCode::BAD_REQUEST),
            (
                AppError::Core(CoreError::DuplicateName { names: vec!["A".into()] }),
                StatusCode::BAD_REQUEST,
            ),
            (AppError::Core(CoreError::Conflict("x".into())), StatusCode::CONFLICT),
            (
                AppError::InternalError("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
