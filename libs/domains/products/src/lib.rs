//! Products Domain
//!
//! Product catalog with soft delete, page-based listing and one error
//! taxonomy shared by the HTTP and RPC entry points.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐
//! │ HTTP handlers│   │ RPC handler  │  ← transport entry points
//! └──────┬───────┘   └──────┬───────┘
//!        │                  │
//! ┌──────▼──────────────────▼───────┐
//! │     Gateway + ErrorTranslator   │  ← ProductError → transport error
//! └───────────────┬─────────────────┘
//!                 │
//! ┌───────────────▼─────────────────┐
//! │            Service              │  ← liveness, pagination, soft delete
//! └───────────────┬─────────────────┘
//!                 │
//! ┌───────────────▼─────────────────┐
//! │  ProductStore (trait + Postgres)│  ← data access
//! └─────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{HttpProductGateway, PgProductStore, ProductService, handlers};
//! use sea_orm::Database;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::connect("postgres://localhost/products").await?;
//! let service = ProductService::new(PgProductStore::new(db));
//!
//! let app = axum::Router::new().nest("/products", handlers::router(HttpProductGateway::http(service)));
//! # Ok(())
//! # }
//! ```

pub mod entity;
pub mod error;
pub mod gateway;
pub mod handlers;
pub mod models;
pub mod pagination;
pub mod postgres;
pub mod service;
pub mod store;
pub mod translate;

pub use error::{INTERNAL_ERROR_MESSAGE, ProductError, ProductResult};
pub use gateway::{HttpProductGateway, ProductGateway, RpcProductGateway};
pub use handlers::ApiDoc;
pub use handlers::rpc::{ProductCommand, ProductMessageHandler, ProductReply, patterns};
pub use models::{
    CreateProduct, DEFAULT_LIMIT, DEFAULT_PAGE, PageMeta, PageRequest, Product, ProductChanges,
    ProductId, ProductPage, UpdateProduct,
};
pub use postgres::PgProductStore;
pub use service::ProductService;
pub use store::{
    FindManyArgs, KnownErrorCode, ProductStore, ProductWhere, ProductWhereUnique, StoreError,
    StoreResult,
};
pub use translate::{ErrorTranslator, HttpErrorTranslator, RpcError, RpcErrorTranslator};
