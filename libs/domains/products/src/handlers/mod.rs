mod http;
pub mod rpc;

use axum::{Router, routing::get};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::gateway::HttpProductGateway;
use crate::models::{CreateProduct, PageMeta, PageRequest, Product, ProductPage, UpdateProduct};
use crate::store::ProductStore;

/// OpenAPI documentation for the Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        http::list_products,
        http::get_product,
        http::create_product,
        http::update_product,
        http::delete_product,
    ),
    components(
        schemas(Product, CreateProduct, UpdateProduct, PageRequest, PageMeta, ProductPage)
    ),
    tags(
        (name = "Products", description = "Product catalog with soft delete")
    )
)]
pub struct ApiDoc;

/// Create router for the HTTP product handlers
pub fn router<S: ProductStore + 'static>(gateway: HttpProductGateway<S>) -> Router {
    let shared_gateway = Arc::new(gateway);

    Router::new()
        .route("/", get(http::list_products).post(http::create_product))
        .route(
            "/{id}",
            get(http::get_product)
                .patch(http::update_product)
                .delete(http::delete_product),
        )
        .with_state(shared_gateway)
}
