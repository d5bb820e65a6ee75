use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Store-assigned product identifier
pub type ProductId = i32;

/// Default page when the caller omits `page`
pub const DEFAULT_PAGE: u32 = 1;

/// Default page size when the caller omits `limit`
pub const DEFAULT_LIMIT: u32 = 10;

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier, assigned by the store
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    /// `false` once the product has been removed
    pub available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
}

/// DTO for updating a product
///
/// An `id` in the body is accepted but never applied. `available` is not
/// part of the patch; only removal changes it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
}

impl UpdateProduct {
    /// Drop the identifier and keep only the writable fields.
    pub fn into_changes(self) -> ProductChanges {
        let UpdateProduct { id: _, name, price } = self;
        ProductChanges {
            name,
            price,
            available: None,
        }
    }
}

/// Column-level changes handed to the store's update primitive
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub available: Option<bool>,
}

impl ProductChanges {
    /// The only change `remove` ever writes.
    pub fn soft_delete() -> Self {
        Self {
            available: Some(false),
            ..Default::default()
        }
    }
}

fn default_page() -> u32 {
    DEFAULT_PAGE
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

/// Page request; both fields are optional on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageRequest {
    /// 1-based page number
    #[serde(default = "default_page")]
    #[validate(range(min = 1))]
    pub page: u32,
    /// Items per page
    #[serde(default = "default_limit")]
    #[validate(range(min = 1))]
    pub limit: u32,
}

impl PageRequest {
    pub fn new(page: u32, limit: u32) -> Self {
        Self { page, limit }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE, DEFAULT_LIMIT)
    }
}

/// Pagination metadata returned alongside a page of results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total_items: u64,
    pub total_pages: u64,
    pub page: u32,
    pub limit: u32,
}

/// One page of live products
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductPage {
    pub data: Vec<Product>,
    pub meta: PageMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_defaults_when_fields_missing() {
        let page: PageRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(page, PageRequest::new(1, 10));

        let page: PageRequest = serde_json::from_str(r#"{"page":3}"#).unwrap();
        assert_eq!(page, PageRequest::new(3, 10));
    }

    #[test]
    fn test_page_request_rejects_zero() {
        assert!(PageRequest::new(0, 10).validate().is_err());
        assert!(PageRequest::new(1, 0).validate().is_err());
        assert!(PageRequest::new(1, 1).validate().is_ok());
    }

    #[test]
    fn test_into_changes_strips_identifier() {
        let patch = UpdateProduct {
            id: Some(99),
            name: None,
            price: Some(20.0),
        };

        let changes = patch.into_changes();
        assert_eq!(changes.price, Some(20.0));
        assert_eq!(changes.name, None);
        assert_eq!(changes.available, None);
    }

    #[test]
    fn test_update_product_ignores_available_field() {
        let patch: UpdateProduct =
            serde_json::from_str(r#"{"available":false,"name":"Lamp"}"#).unwrap();
        assert_eq!(patch.into_changes().available, None);
    }

    #[test]
    fn test_create_product_validation() {
        let valid = CreateProduct {
            name: "Keyboard".into(),
            price: 49.9,
        };
        assert!(valid.validate().is_ok());

        let negative = CreateProduct {
            name: "Keyboard".into(),
            price: -1.0,
        };
        assert!(negative.validate().is_err());

        let blank = CreateProduct {
            name: String::new(),
            price: 1.0,
        };
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_product_serializes_camel_case() {
        let now = Utc::now();
        let product = Product {
            id: 1,
            name: "X".into(),
            price: 10.0,
            available: true,
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_value(&product).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
    }

    #[test]
    fn test_page_meta_serializes_camel_case() {
        let meta = PageMeta {
            total_items: 25,
            total_pages: 3,
            page: 1,
            limit: 10,
        };
        let json = serde_json::to_value(meta).unwrap();
        assert_eq!(json["totalItems"], 25);
        assert_eq!(json["totalPages"], 3);
    }
}
