use axum::http::StatusCode;
use thiserror::Error;

use crate::auth::dto::AuthFailure;

/// Everything a controller command can fail with.
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("record store unavailable: {0:#}")]
    StoreUnavailable(#[source] anyhow::Error),
    #[error("record store write failed: {0:#}")]
    StoreWriteFailure(#[source] anyhow::Error),
    #[error(transparent)]
    Auth(#[from] AuthFailure),
    #[error("unknown record {0}")]
    UnknownRecord(String),
    #[error("{0} must not be empty")]
    InvalidDraft(&'static str),
    #[error("login required")]
    NotAuthenticated,
}

impl ControllerError {
    pub fn status(&self) -> StatusCode {
        use crate::auth::dto::AuthFailureReason;
        match self {
            ControllerError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ControllerError::StoreWriteFailure(_) => StatusCode::BAD_GATEWAY,
            ControllerError::Auth(AuthFailure {
                reason: AuthFailureReason::NotFound,
            }) => StatusCode::UNAUTHORIZED,
            ControllerError::Auth(AuthFailure {
                reason: AuthFailureReason::Blocked,
            }) => StatusCode::FORBIDDEN,
            ControllerError::UnknownRecord(_) => StatusCode::NOT_FOUND,
            ControllerError::InvalidDraft(_) => StatusCode::BAD_REQUEST,
            ControllerError::NotAuthenticated => StatusCode::UNAUTHORIZED,
        }
    }
}

/// Handler-side mapping, logged once at the boundary.
pub fn reject(e: ControllerError) -> (StatusCode, String) {
    let status = e.status();
    if status.is_server_error() {
        tracing::error!(error = %e, %status, "request failed");
    } else {
        tracing::warn!(error = %e, %status, "request rejected");
    }
    (status, e.to_string())
}
