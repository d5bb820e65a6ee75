//! HTTP handlers for the products API

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_helpers::{AppError, ValidatedJson, ValidatedQuery};
use std::sync::Arc;

use crate::gateway::HttpProductGateway;
use crate::models::{CreateProduct, PageRequest, Product, ProductId, ProductPage, UpdateProduct};
use crate::store::ProductStore;

type Gateway<S> = State<Arc<HttpProductGateway<S>>>;

/// Path ids must be integers before they reach the service.
fn parse_id(raw: &str) -> Result<ProductId, AppError> {
    raw.trim().parse().map_err(|_| {
        AppError::BadRequest(format!("Invalid product id '{raw}': expected an integer"))
    })
}

/// List live products, one page at a time
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    params(PageRequest),
    responses(
        (status = 200, description = "Page of live products", body = ProductPage),
        (status = 400, response = axum_helpers::errors::responses::BadRequestResponse),
        (status = 500, response = axum_helpers::errors::responses::InternalServerErrorResponse)
    )
)]
pub async fn list_products<S: ProductStore>(
    State(gateway): Gateway<S>,
    ValidatedQuery(page): ValidatedQuery<PageRequest>,
) -> Result<Json<ProductPage>, AppError> {
    let page = gateway.find_all(page).await?;
    Ok(Json(page))
}

/// Create a product
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, response = axum_helpers::errors::responses::BadRequestValidationResponse),
        (status = 500, response = axum_helpers::errors::responses::InternalServerErrorResponse)
    )
)]
pub async fn create_product<S: ProductStore>(
    State(gateway): Gateway<S>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> Result<impl IntoResponse, AppError> {
    let product = gateway.create(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Get a live product by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, response = axum_helpers::errors::responses::BadRequestResponse),
        (status = 404, response = axum_helpers::errors::responses::NotFoundResponse),
        (status = 500, response = axum_helpers::errors::responses::InternalServerErrorResponse)
    )
)]
pub async fn get_product<S: ProductStore>(
    State(gateway): Gateway<S>,
    Path(id): Path<String>,
) -> Result<Json<Product>, AppError> {
    let product = gateway.find_one(parse_id(&id)?).await?;
    Ok(Json(product))
}

/// Update a live product. An `id` in the body is ignored.
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Products",
    params(("id" = i32, Path, description = "Product id")),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 400, response = axum_helpers::errors::responses::BadRequestValidationResponse),
        (status = 404, response = axum_helpers::errors::responses::NotFoundResponse),
        (status = 500, response = axum_helpers::errors::responses::InternalServerErrorResponse)
    )
)]
pub async fn update_product<S: ProductStore>(
    State(gateway): Gateway<S>,
    Path(id): Path<String>,
    ValidatedJson(patch): ValidatedJson<UpdateProduct>,
) -> Result<Json<Product>, AppError> {
    let product = gateway.update(parse_id(&id)?, patch).await?;
    Ok(Json(product))
}

/// Soft-delete a live product and return it
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product marked unavailable", body = Product),
        (status = 400, response = axum_helpers::errors::responses::BadRequestResponse),
        (status = 404, response = axum_helpers::errors::responses::NotFoundResponse),
        (status = 500, response = axum_helpers::errors::responses::InternalServerErrorResponse)
    )
)]
pub async fn delete_product<S: ProductStore>(
    State(gateway): Gateway<S>,
    Path(id): Path<String>,
) -> Result<Json<Product>, AppError> {
    let product = gateway.remove(parse_id(&id)?).await?;
    Ok(Json(product))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert_eq!(parse_id(" 7 ").unwrap(), 7);
        assert!(matches!(parse_id("abc"), Err(AppError::BadRequest(_))));
        assert!(matches!(parse_id("99999999999"), Err(AppError::BadRequest(_))));
    }
}
