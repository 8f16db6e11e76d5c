use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use xlstore_sheet::SheetError;

/// JSON body of every error response.
#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Errors a request can fail with.
///
/// Validation failures map to 400 with their specific message; filesystem and
/// codec failures map to 500 with the underlying error text forwarded to the
/// caller.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Only .xlsx files are allowed.")]
    InvalidExtension,

    #[error("Both old and new file names are required")]
    MissingRenameNames,

    #[error("Only .xlsx files are allowed for renaming.")]
    RenameExtension,

    #[error("{}", .0.body_text())]
    Json(#[from] JsonRejection),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Sheet(#[from] SheetError),

    #[error("Error renaming file: {0}")]
    Rename(String),

    #[error("Something went wrong!")]
    Internal,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidExtension
            | ApiError::MissingRenameNames
            | ApiError::RenameExtension => StatusCode::BAD_REQUEST,
            ApiError::Json(rejection) => rejection.status(),
            ApiError::Io(_) | ApiError::Sheet(_) | ApiError::Rename(_) | ApiError::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_are_client_errors() {
        assert_eq!(ApiError::InvalidExtension.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::MissingRenameNames.status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::RenameExtension.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_io_errors_are_server_errors() {
        let err = ApiError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "no such file",
        ));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "no such file");
    }

    #[test]
    fn test_rename_error_message_prefix() {
        let err = ApiError::Rename("no such file or directory".to_string());
        assert_eq!(
            err.to_string(),
            "Error renaming file: no such file or directory"
        );
    }
}
