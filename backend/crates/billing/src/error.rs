//! Billing Error Types
//!
//! This module provides billing-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Billing-specific result type alias
pub type BillingResult<T> = Result<T, BillingError>;

/// Billing-specific error variants
#[derive(Debug, Error)]
pub enum BillingError {
    /// Shared secret missing or wrong
    #[error("Missing or invalid service secret")]
    Unauthorized,

    /// Payload failed shape validation
    #[error("Invalid request payload: {0}")]
    BadPayload(String),

    /// Stored journal could not be decoded
    #[error("Journal for user {user:?} is unreadable: {reason}")]
    CorruptJournal { user: String, reason: String },

    /// Durable write-back failed; the charge was not committed
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BillingError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            BillingError::Unauthorized => ErrorKind::Unauthorized,
            BillingError::BadPayload(_) => ErrorKind::BadRequest,
            BillingError::Storage(e) if e.kind() == std::io::ErrorKind::StorageFull => {
                ErrorKind::ServiceUnavailable
            }
            BillingError::CorruptJournal { .. }
            | BillingError::Storage(_)
            | BillingError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError. Server-side failures keep their detail in the
    /// source chain only.
    pub fn into_app_error(self) -> AppError {
        match self {
            BillingError::Unauthorized => {
                AppError::unauthorized("Missing or invalid service secret")
                    .with_action("Send the shared service secret header")
            }
            BillingError::BadPayload(reason) => {
                AppError::bad_request(format!("Invalid request payload: {reason}"))
            }
            BillingError::Storage(e) => {
                let app_error = if e.kind() == std::io::ErrorKind::StorageFull {
                    AppError::service_unavailable("Billing storage is full")
                } else {
                    AppError::internal("Billing storage failure")
                };
                app_error
                    .with_action("The charge was not recorded; retry later")
                    .with_source(e)
            }
            other @ (BillingError::CorruptJournal { .. } | BillingError::Internal(_)) => {
                AppError::internal("Billing journal unavailable").with_source(other)
            }
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            BillingError::Storage(e) => {
                tracing::error!(error = %e, "Billing storage error");
            }
            BillingError::CorruptJournal { user, reason } => {
                tracing::error!(user = %user, reason = %reason, "Billing journal corrupt");
            }
            BillingError::Internal(msg) => {
                tracing::error!(message = %msg, "Billing internal error");
            }
            BillingError::Unauthorized => {
                tracing::warn!("Billing request with missing or invalid service secret");
            }
            BillingError::BadPayload(_) => {
                tracing::debug!(error = %self, "Billing request rejected");
            }
        }
    }
}

impl From<BillingError> for AppError {
    fn from(err: BillingError) -> Self {
        err.into_app_error()
    }
}

impl IntoResponse for BillingError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

impl From<tokio::task::JoinError> for BillingError {
    fn from(err: tokio::task::JoinError) -> Self {
        BillingError::Internal(format!("journal task failed: {err}"))
    }
}
