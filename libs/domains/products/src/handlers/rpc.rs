//! Message handler for the request/reply RPC transport
//!
//! Each request carries a pattern (the last subject token) and a JSON payload.
//! Replies are JSON: the result on success, `{"error": {"message", "status"}}`
//! on failure.

use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, warn};
use validator::Validate;

use crate::error::INTERNAL_ERROR_MESSAGE;
use crate::gateway::RpcProductGateway;
use crate::models::{CreateProduct, PageRequest, Product, ProductId, ProductPage, UpdateProduct};
use crate::store::ProductStore;
use crate::translate::RpcError;

/// Message patterns understood by [`ProductMessageHandler`]
pub mod patterns {
    pub const CREATE_PRODUCT: &str = "create_product";
    pub const FIND_ALL_PRODUCTS: &str = "find_all_products";
    pub const FIND_ONE_PRODUCT: &str = "find_one_product";
    pub const UPDATE_PRODUCT: &str = "update_product";
    pub const REMOVE_PRODUCT: &str = "remove_product";
}

#[derive(Debug, serde::Deserialize)]
struct IdMessage {
    id: ProductId,
}

/// A decoded, validated request
#[derive(Debug, Clone, PartialEq)]
pub enum ProductCommand {
    Create(CreateProduct),
    FindAll(PageRequest),
    FindOne(ProductId),
    Update { id: ProductId, patch: UpdateProduct },
    Remove(ProductId),
}

impl ProductCommand {
    /// Decode `payload` for `pattern`. Malformed or invalid payloads fail with
    /// 400, unknown patterns with 404.
    pub fn parse(pattern: &str, payload: &[u8]) -> Result<Self, RpcError> {
        match pattern {
            patterns::CREATE_PRODUCT => Ok(Self::Create(decode_valid(payload)?)),
            patterns::FIND_ALL_PRODUCTS => {
                // a bare request means "first page, default size"
                let request = if payload.iter().all(u8::is_ascii_whitespace) {
                    PageRequest::default()
                } else {
                    decode_valid(payload)?
                };
                Ok(Self::FindAll(request))
            }
            patterns::FIND_ONE_PRODUCT => Ok(Self::FindOne(decode::<IdMessage>(payload)?.id)),
            patterns::UPDATE_PRODUCT => {
                let patch: UpdateProduct = decode_valid(payload)?;
                let id = patch
                    .id
                    .ok_or_else(|| RpcError::bad_request("Field 'id' is required"))?;
                Ok(Self::Update { id, patch })
            }
            patterns::REMOVE_PRODUCT => Ok(Self::Remove(decode::<IdMessage>(payload)?.id)),
            unknown => Err(RpcError::not_found(format!(
                "No handler for message pattern '{unknown}'"
            ))),
        }
    }
}

fn decode<T: DeserializeOwned>(payload: &[u8]) -> Result<T, RpcError> {
    serde_json::from_slice(payload)
        .map_err(|e| RpcError::bad_request(format!("Malformed payload: {e}")))
}

fn decode_valid<T: DeserializeOwned + Validate>(payload: &[u8]) -> Result<T, RpcError> {
    let value: T = decode(payload)?;
    value
        .validate()
        .map_err(|e| RpcError::bad_request(format!("Validation failed: {e}")))?;
    Ok(value)
}

/// Successful reply body
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ProductReply {
    Product(Product),
    Page(ProductPage),
}

#[derive(Serialize)]
struct ErrorReply<'a> {
    error: &'a RpcError,
}

/// Dispatches decoded commands to the RPC gateway and encodes the reply
pub struct ProductMessageHandler<S: ProductStore> {
    gateway: RpcProductGateway<S>,
}

impl<S: ProductStore> ProductMessageHandler<S> {
    pub fn new(gateway: RpcProductGateway<S>) -> Self {
        Self { gateway }
    }

    pub async fn dispatch(&self, command: ProductCommand) -> Result<ProductReply, RpcError> {
        let reply = match command {
            ProductCommand::Create(input) => ProductReply::Product(self.gateway.create(input).await?),
            ProductCommand::FindAll(request) => {
                ProductReply::Page(self.gateway.find_all(request).await?)
            }
            ProductCommand::FindOne(id) => ProductReply::Product(self.gateway.find_one(id).await?),
            ProductCommand::Update { id, patch } => {
                ProductReply::Product(self.gateway.update(id, patch).await?)
            }
            ProductCommand::Remove(id) => ProductReply::Product(self.gateway.remove(id).await?),
        };
        Ok(reply)
    }

    /// Handle one raw request and return the encoded reply.
    #[instrument(skip(self, payload), fields(payload_len = payload.len()))]
    pub async fn handle(&self, pattern: &str, payload: &[u8]) -> Vec<u8> {
        let result = match ProductCommand::parse(pattern, payload) {
            Ok(command) => self.dispatch(command).await,
            Err(err) => Err(err),
        };

        match result {
            Ok(reply) => {
                debug!("Replying with success");
                encode(&reply)
            }
            Err(err) => {
                warn!(status = err.status, message = %err.message, "Replying with error");
                encode(&ErrorReply { error: &err })
            }
        }
    }
}

fn encode<T: Serialize>(value: &T) -> Vec<u8> {
    serde_json::to_vec(value).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to encode reply");
        format!(r#"{{"error":{{"message":"{INTERNAL_ERROR_MESSAGE}","status":500}}}}"#).into_bytes()
    })
}
