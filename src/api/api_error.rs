use crate::error::Error;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Renders an [`Error`] as a plain text response. The status code is the primary error signal.
pub(crate) struct APIError(Error);

impl IntoResponse for APIError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = match err {
            Error::Unauthorized => StatusCode::UNAUTHORIZED,
            Error::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Error::BodyRead(ref rejection) => {
                tracing::warn!("error reading request body: {rejection}");
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, format!("{err}\n")).into_response()
    }
}

impl<E> From<E> for APIError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
