//! Mapping of [`ProductError`] onto the error shape of each transport.
//!
//! Translation happens once, at the [`ProductGateway`](crate::gateway::ProductGateway)
//! boundary. A translator only accepts a `ProductError`, so an error that is
//! already in transport shape cannot be translated again and simply travels
//! through `?` untouched.

use axum_helpers::AppError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

use crate::error::ProductError;

/// Converts service failures into one transport's error type.
pub trait ErrorTranslator: Send + Sync + 'static {
    type Error: std::error::Error + Send + 'static;

    fn translate(&self, err: ProductError) -> Self::Error;

    fn translate_result<T>(&self, result: Result<T, ProductError>) -> Result<T, Self::Error> {
        result.map_err(|err| self.translate(err))
    }
}

/// Record the opaque cause of an internal failure. Called once per failure,
/// by whichever translator handles it.
fn log_internal(transport: &'static str, err: &ProductError) {
    if let ProductError::Internal(cause) = err {
        error!(transport, cause = %cause, "Internal error in product service");
    }
}

/// HTTP translation into [`AppError`]
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpErrorTranslator;

impl ErrorTranslator for HttpErrorTranslator {
    type Error = AppError;

    fn translate(&self, err: ProductError) -> AppError {
        log_internal("http", &err);
        let message = err.public_message();

        match err {
            ProductError::NotFound(_) => AppError::NotFound(message),
            ProductError::InvalidArgument(_) | ProductError::InvalidPage { .. } => {
                AppError::BadRequest(message)
            }
            ProductError::Internal(_) => AppError::InternalServerError(message),
        }
    }
}

/// Error envelope carried in RPC replies: `{"message": .., "status": ..}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{status}: {message}")]
pub struct RpcError {
    pub message: String,
    pub status: u16,
}

impl RpcError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(400, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(404, message)
    }
}

/// RPC translation into [`RpcError`]
#[derive(Debug, Clone, Copy, Default)]
pub struct RpcErrorTranslator;

impl ErrorTranslator for RpcErrorTranslator {
    type Error = RpcError;

    fn translate(&self, err: ProductError) -> RpcError {
        log_internal("rpc", &err);
        RpcError::new(err.status_code(), err.public_message())
    }
}
