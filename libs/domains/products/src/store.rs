use async_trait::async_trait;
use strum::Display;
use thiserror::Error;

use crate::models::{CreateProduct, Product, ProductChanges, ProductId};

/// Recognised store failures that callers act on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum KnownErrorCode {
    /// The identifier could not be interpreted by the store
    InvalidIdentifier,
    /// A write targeted a row that does not exist
    RecordNotFound,
}

/// Failure raised by a [`ProductStore`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("{code}: {message}")]
    Known {
        code: KnownErrorCode,
        message: String,
    },

    #[error("{0}")]
    Unknown(String),
}

impl StoreError {
    pub fn known(code: KnownErrorCode, message: impl Into<String>) -> Self {
        StoreError::Known {
            code,
            message: message.into(),
        }
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        StoreError::Unknown(message.into())
    }

    pub fn code(&self) -> Option<KnownErrorCode> {
        match self {
            StoreError::Known { code, .. } => Some(*code),
            StoreError::Unknown(_) => None,
        }
    }

    pub fn is(&self, code: KnownErrorCode) -> bool {
        self.code() == Some(code)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Row filter for list and count queries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProductWhere {
    /// `None` matches both live and removed rows
    pub available: Option<bool>,
}

impl ProductWhere {
    /// Only rows with `available = true`.
    pub fn live() -> Self {
        Self {
            available: Some(true),
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        self.available.is_none_or(|available| product.available == available)
    }
}

/// Unique lookup by id, optionally constrained on availability
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductWhereUnique {
    pub id: ProductId,
    pub available: Option<bool>,
}

impl ProductWhereUnique {
    pub fn live(id: ProductId) -> Self {
        Self {
            id,
            available: Some(true),
        }
    }
}

/// Offset window plus filter for `find_many`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FindManyArgs {
    pub skip: u64,
    pub take: u64,
    pub filter: ProductWhere,
}

/// Persistence capability behind the product service.
///
/// `update` is keyed by id only and ignores availability; callers assert
/// liveness first.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Establish the connection. Calling it again is a no-op.
    async fn connect(&self) -> StoreResult<()>;

    async fn disconnect(&self) -> StoreResult<()>;

    async fn find_unique(&self, query: ProductWhereUnique) -> StoreResult<Option<Product>>;

    /// Rows ordered by id ascending.
    async fn find_many(&self, args: FindManyArgs) -> StoreResult<Vec<Product>>;

    async fn count(&self, filter: ProductWhere) -> StoreResult<u64>;

    async fn create(&self, input: CreateProduct) -> StoreResult<Product>;

    /// Fails with [`KnownErrorCode::RecordNotFound`] when no row has `id`.
    async fn update(&self, id: ProductId, changes: ProductChanges) -> StoreResult<Product>;
}
