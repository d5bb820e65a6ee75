//! Extractors that turn rejected or invalid input into [`AppError`](crate::errors::AppError) responses.

pub mod validated_json;
pub mod validated_query;

pub use validated_json::ValidatedJson;
pub use validated_query::ValidatedQuery;
