//! Error types.

use axum::extract::rejection::BytesRejection;
use std::path::PathBuf;

/// Error enumerates the possible odr-webapi error states.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Returned when a required command line parameter is missing, empty, or out of range.
    #[error("All parameters (port, target, token) are mandatory")]
    InvalidArguments,

    /// Returned at startup when the parent directory of
    /// [`Config::target_path`][`crate::config::Config::target_path`] doesn't exist.
    #[error("Target directory does not exist: {}", .0.display())]
    TargetDirMissing(PathBuf),

    /// Returned when clients `POST` the [`/api/dls` endpoint][crate::api#apidls-post] without
    /// an `Authorization` header matching the configured token.
    #[error("Unauthorized: Invalid or missing token")]
    Unauthorized,

    /// Returned when clients use any method other than `POST` on
    /// the [`/api/dls` endpoint][crate::api#apidls-post].
    #[error("Only POST method is supported")]
    MethodNotAllowed,

    /// Returned when the request body can't be read.
    #[error("Error reading request body")]
    BodyRead(#[from] BytesRejection),

    /// Returned when the DLS text can't be written to the target file.
    #[error("Error writing to file")]
    WriteTarget(#[source] std::io::Error),

    /// Returned when a generic IO error occurs.
    #[error("an IO error occurred")]
    IO(#[from] std::io::Error),

    #[error("file modification time is out of range")]
    TimestampOutOfRange,

    #[error("file modification time can't be formatted")]
    TimestampFormat(#[from] time::error::Format),

    /// Returned when the HTTP server fails to bind or serve.
    #[error("HTTP server error")]
    Server(#[from] hyper::Error),
}
