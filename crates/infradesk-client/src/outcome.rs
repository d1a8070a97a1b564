//! Tagged results of outbound calls.

use thiserror::Error;

use infradesk_core::error::{AppError, ErrorKind};
use infradesk_core::result::AppResult;

/// Why a call failed, other than authorization loss.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The backend answered with a non-success status.
    #[error("request failed with status {status}: {}", .message.as_deref().unwrap_or("no details"))]
    Status {
        /// HTTP status code.
        status: u16,
        /// `message` or `detail` from the error body, if any.
        message: Option<String>,
    },
    /// The backend could not be reached (DNS, connect, timeout...).
    #[error("transport error: {0}")]
    Transport(String),
    /// The response body did not match the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// The backend-supplied message, if the failure carried one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        let kind = match &err {
            ApiError::Status { status: 404, .. } => ErrorKind::NotFound,
            ApiError::Status { status: 400 | 422, .. } => ErrorKind::Validation,
            ApiError::Status { .. } => ErrorKind::ExternalService,
            ApiError::Transport(_) => ErrorKind::Network,
            ApiError::Decode(_) => ErrorKind::Serialization,
        };
        let message = err.to_string();
        AppError::with_source(kind, message, err)
    }
}

/// Result of a call through [`crate::ApiClient`].
///
/// `AuthExpired` is kept apart from other failures: by the time a caller
/// sees it, the forced-logout hook has already run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiOutcome<T> {
    /// The call succeeded.
    Ok(T),
    /// The backend answered 401 or 403.
    AuthExpired {
        /// The status that triggered it.
        status: u16,
    },
    /// Any other failure.
    Error(ApiError),
}

impl<T> ApiOutcome<T> {
    /// Transform the success value.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiOutcome<U> {
        match self {
            Self::Ok(value) => ApiOutcome::Ok(f(value)),
            Self::AuthExpired { status } => ApiOutcome::AuthExpired { status },
            Self::Error(err) => ApiOutcome::Error(err),
        }
    }

    /// Collapse into an [`AppResult`] for `?` propagation.
    ///
    /// `AuthExpired` becomes an `Authorization` error.
    pub fn into_result(self) -> AppResult<T> {
        match self {
            Self::Ok(value) => Ok(value),
            Self::AuthExpired { status } => Err(AppError::authorization(format!(
                "Session expired or access denied (HTTP {status}). Please sign in again."
            ))),
            Self::Error(err) => Err(err.into()),
        }
    }
}
