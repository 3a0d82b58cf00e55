use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::storage::SheetError;

/// Handler error mapped to a plain-text HTTP response.
pub struct AppError(pub anyhow::Error);

fn sheet_error_to_status_code(error: &SheetError) -> StatusCode {
    match error {
        SheetError::NotFound { .. } => StatusCode::NOT_FOUND,
        SheetError::MissingIdColumn => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = match self.0.downcast_ref::<SheetError>() {
            Some(sheet_error) => sheet_error_to_status_code(sheet_error),
            None => StatusCode::INTERNAL_SERVER_ERROR,
        };

        tracing::error!(error = %self.0, status = %status_code, "request failed");
        (status_code, self.0.to_string()).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
