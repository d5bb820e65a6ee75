//! Query string extractor with validation through the validator crate.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Query-string counterpart of [`ValidatedJson`](super::ValidatedJson).
///
/// ```ignore
/// async fn list(ValidatedQuery(page): ValidatedQuery<PageRequest>) -> impl IntoResponse {
///     // page.page >= 1 is guaranteed by the validation rules on PageRequest
/// }
/// ```
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(data) = Query::<T>::from_request_parts(parts, state).await?;
        data.validate()?;
        Ok(ValidatedQuery(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        routing::get,
    };
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize, Validate)]
    struct Paging {
        #[validate(range(min = 1))]
        page: u32,
    }

    fn app() -> Router {
        Router::new().route(
            "/",
            get(|ValidatedQuery(q): ValidatedQuery<Paging>| async move { q.page.to_string() }),
        )
    }

    async fn status_for(uri: &str) -> StatusCode {
        app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_accepts_valid_query() {
        assert_eq!(status_for("/?page=2").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_rejects_out_of_range_value() {
        assert_eq!(status_for("/?page=0").await, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_rejects_unparseable_value() {
        assert_eq!(status_for("/?page=abc").await, StatusCode::BAD_REQUEST);
    }
}
