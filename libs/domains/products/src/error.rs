use thiserror::Error;

use crate::models::ProductId;

/// Message returned in place of any internal cause
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Transport-independent failures of the product service
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProductError {
    #[error("Product with id {0} not found")]
    NotFound(ProductId),

    #[error("Product id {0} is not valid")]
    InvalidArgument(ProductId),

    #[error("Page {page} does not exist; the last page is {total_pages}")]
    InvalidPage { page: u32, total_pages: u64 },

    /// The cause is for logs only
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl ProductError {
    pub fn internal(cause: impl std::fmt::Display) -> Self {
        ProductError::Internal(cause.to_string())
    }

    /// Status shared by every transport: 404, 400 or 500.
    pub fn status_code(&self) -> u16 {
        match self {
            ProductError::NotFound(_) => 404,
            ProductError::InvalidArgument(_) | ProductError::InvalidPage { .. } => 400,
            ProductError::Internal(_) => 500,
        }
    }

    pub fn is_client_error(&self) -> bool {
        !matches!(self, ProductError::Internal(_))
    }

    /// Message safe to show callers.
    pub fn public_message(&self) -> String {
        match self {
            ProductError::Internal(_) => INTERNAL_ERROR_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ProductError::NotFound(1).status_code(), 404);
        assert_eq!(ProductError::InvalidArgument(1).status_code(), 400);
        assert_eq!(
            ProductError::InvalidPage {
                page: 4,
                total_pages: 3
            }
            .status_code(),
            400
        );
        assert_eq!(ProductError::internal("db down").status_code(), 500);
    }

    #[test]
    fn test_public_message_hides_internal_cause() {
        let err = ProductError::internal("password authentication failed for user");
        assert_eq!(err.public_message(), INTERNAL_ERROR_MESSAGE);
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_public_message_carries_identifier() {
        assert_eq!(
            ProductError::NotFound(7).public_message(),
            "Product with id 7 not found"
        );
        assert_eq!(
            ProductError::InvalidPage {
                page: 4,
                total_pages: 3
            }
            .public_message(),
            "Page 4 does not exist; the last page is 3"
        );
    }
}
