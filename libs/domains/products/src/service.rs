use std::sync::Arc;
use tracing::{debug, instrument};

use crate::error::{ProductError, ProductResult};
use crate::models::{
    CreateProduct, PageRequest, Product, ProductChanges, ProductId, ProductPage, UpdateProduct,
};
use crate::pagination::PageWindow;
use crate::store::{
    FindManyArgs, KnownErrorCode, ProductStore, ProductWhere, ProductWhereUnique, StoreError,
};

/// Soft-delete-aware product operations over a [`ProductStore`].
///
/// Every error leaving this type is a [`ProductError`]; raw store errors
/// never escape.
pub struct ProductService<S: ProductStore> {
    store: Arc<S>,
}

impl<S: ProductStore> Clone for ProductService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: ProductStore> ProductService<S> {
    pub fn new(store: S) -> Self {
        Self::from_shared(Arc::new(store))
    }

    /// Share a store that the caller also keeps, e.g. for disconnecting.
    pub fn from_shared(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// The live product with `id`, or `NotFound` / `InvalidArgument` / `Internal`.
    #[instrument(skip(self), fields(product_id = id))]
    pub async fn find_product_or_fail(&self, id: ProductId) -> ProductResult<Product> {
        match self.store.find_unique(ProductWhereUnique::live(id)).await {
            Ok(Some(product)) => Ok(product),
            Ok(None) => Err(ProductError::NotFound(id)),
            Err(e) if e.is(KnownErrorCode::InvalidIdentifier) => {
                Err(ProductError::InvalidArgument(id))
            }
            Err(e) => Err(ProductError::internal(e)),
        }
    }

    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let product = self.store.create(input).await.map_err(ProductError::internal)?;
        debug!(product_id = product.id, "Created product");
        Ok(product)
    }

    /// Count the live set, bounds-check the page, then fetch it.
    ///
    /// The count and the fetch are separate round trips, so `meta` can be
    /// stale relative to `data` under concurrent writes.
    #[instrument(skip(self), fields(page = request.page, limit = request.limit))]
    pub async fn find_all(&self, request: PageRequest) -> ProductResult<ProductPage> {
        let total_items = self
            .store
            .count(ProductWhere::live())
            .await
            .map_err(ProductError::internal)?;

        let window = PageWindow::resolve(request, total_items)?;

        let data = self
            .store
            .find_many(FindManyArgs {
                skip: window.skip(),
                take: window.take(),
                filter: ProductWhere::live(),
            })
            .await
            .map_err(ProductError::internal)?;

        Ok(ProductPage {
            data,
            meta: window.meta(),
        })
    }

    pub async fn find_one(&self, id: ProductId) -> ProductResult<Product> {
        self.find_product_or_fail(id).await
    }

    /// Apply `patch` to a live product. Any id inside the patch is ignored.
    #[instrument(skip(self, patch), fields(product_id = id))]
    pub async fn update(&self, id: ProductId, patch: UpdateProduct) -> ProductResult<Product> {
        let changes = patch.into_changes();
        self.find_product_or_fail(id).await?;
        self.write(id, changes).await
    }

    /// Soft-delete a live product and return it with `available = false`.
    #[instrument(skip(self), fields(product_id = id))]
    pub async fn remove(&self, id: ProductId) -> ProductResult<Product> {
        self.find_product_or_fail(id).await?;
        self.write(id, ProductChanges::soft_delete()).await
    }

    /// Keyed write after liveness was asserted. A row that vanished in
    /// between is reported as `NotFound`.
    async fn write(&self, id: ProductId, changes: ProductChanges) -> ProductResult<Product> {
        self.store
            .update(id, changes)
            .await
            .map_err(|e| remap_write_error(id, e))
    }
}

fn remap_write_error(id: ProductId, err: StoreError) -> ProductError {
    if err.is(KnownErrorCode::RecordNotFound) {
        ProductError::NotFound(id)
    } else {
        ProductError::internal(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MockProductStore;
    use chrono::Utc;
    use mockall::predicate::eq;

    fn product(id: ProductId, available: bool) -> Product {
        let now = Utc::now();
        Product {
            id,
            name: format!("Product {id}"),
            price: 10.0,
            available,
            created_at: now,
            updated_at: now,
        }
    }

    fn live_lookup(mock: &mut MockProductStore, id: ProductId) {
        mock.expect_find_unique()
            .with(eq(ProductWhereUnique::live(id)))
            .times(1)
            .returning(move |_| Ok(Some(product(id, true))));
    }

    #[tokio::test]
    async fn test_find_product_or_fail_returns_live_product() {
        let mut mock = MockProductStore::new();
        live_lookup(&mut mock, 1);

        let service = ProductService::new(mock);
        let found = service.find_product_or_fail(1).await.unwrap();
        assert_eq!(found.id, 1);
        assert!(found.available);
    }

    #[tokio::test]
    async fn test_find_product_or_fail_not_found() {
        let mut mock = MockProductStore::new();
        mock.expect_find_unique().returning(|_| Ok(None));

        let service = ProductService::new(mock);
        assert_eq!(
            service.find_product_or_fail(5).await.unwrap_err(),
            ProductError::NotFound(5)
        );
    }

    #[tokio::test]
    async fn test_invalid_identifier_maps_to_invalid_argument() {
        let mut mock = MockProductStore::new();
        mock.expect_find_unique().returning(|_| {
            Err(StoreError::known(
                KnownErrorCode::InvalidIdentifier,
                "value out of range for type integer",
            ))
        });

        let service = ProductService::new(mock);
        assert_eq!(
            service.find_one(9).await.unwrap_err(),
            ProductError::InvalidArgument(9)
        );
    }

    #[tokio::test]
    async fn test_unknown_lookup_failure_maps_to_internal() {
        let mut mock = MockProductStore::new();
        mock.expect_find_unique()
            .returning(|_| Err(StoreError::unknown("connection reset")));

        let service = ProductService::new(mock);
        let err = service.find_one(1).await.unwrap_err();
        assert!(matches!(err, ProductError::Internal(cause) if cause.contains("connection reset")));
    }

    #[tokio::test]
    async fn test_record_not_found_during_lookup_is_internal() {
        let mut mock = MockProductStore::new();
        mock.expect_find_unique()
            .returning(|_| Err(StoreError::known(KnownErrorCode::RecordNotFound, "odd")));

        let service = ProductService::new(mock);
        assert!(matches!(
            service.find_one(1).await.unwrap_err(),
            ProductError::Internal(_)
        ));
    }

    #[tokio::test]
    async fn test_create_wraps_store_failure() {
        let mut mock = MockProductStore::new();
        mock.expect_create()
            .returning(|_| Err(StoreError::unknown("insert failed")));

        let service = ProductService::new(mock);
        let err = service
            .create(CreateProduct {
                name: "X".into(),
                price: 10.0,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ProductError::Internal(_)));
    }

    #[tokio::test]
    async fn test_find_all_fetches_live_window() {
        let mut mock = MockProductStore::new();
        mock.expect_count()
            .with(eq(ProductWhere::live()))
            .times(1)
            .returning(|_| Ok(25));
        mock.expect_find_many()
            .with(eq(FindManyArgs {
                skip: 10,
                take: 10,
                filter: ProductWhere::live(),
            }))
            .times(1)
            .returning(|_| Ok((11..=20).map(|id| product(id, true)).collect()));

        let service = ProductService::new(mock);
        let page = service.find_all(PageRequest::new(2, 10)).await.unwrap();

        assert_eq!(page.data.len(), 10);
        assert_eq!(page.meta.total_items, 25);
        assert_eq!(page.meta.total_pages, 3);
        assert_eq!(page.meta.page, 2);
    }

    #[tokio::test]
    async fn test_find_all_rejects_page_past_end_without_fetching() {
        let mut mock = MockProductStore::new();
        mock.expect_count().returning(|_| Ok(25));
        mock.expect_find_many().never();

        let service = ProductService::new(mock);
        assert_eq!(
            service.find_all(PageRequest::new(4, 10)).await.unwrap_err(),
            ProductError::InvalidPage {
                page: 4,
                total_pages: 3
            }
        );
    }

    #[tokio::test]
    async fn test_find_all_empty_catalog() {
        let mut mock = MockProductStore::new();
        mock.expect_count().returning(|_| Ok(0));
        mock.expect_find_many().returning(|_| Ok(vec![]));

        let service = ProductService::new(mock);
        let page = service.find_all(PageRequest::default()).await.unwrap();
        assert!(page.data.is_empty());
        assert_eq!(page.meta.total_pages, 1);
    }

    #[tokio::test]
    async fn test_find_all_count_failure_is_internal() {
        let mut mock = MockProductStore::new();
        mock.expect_count()
            .returning(|_| Err(StoreError::unknown("timeout")));

        let service = ProductService::new(mock);
        assert!(matches!(
            service.find_all(PageRequest::default()).await.unwrap_err(),
            ProductError::Internal(_)
        ));
    }

    #[tokio::test]
    async fn test_update_strips_identifier_from_patch() {
        let mut mock = MockProductStore::new();
        live_lookup(&mut mock, 3);
        mock.expect_update()
            .with(
                eq(3),
                eq(ProductChanges {
                    name: None,
                    price: Some(20.0),
                    available: None,
                }),
            )
            .times(1)
            .returning(|id, changes| {
                let mut p = product(id, true);
                p.price = changes.price.unwrap_or(p.price);
                Ok(p)
            });

        let service = ProductService::new(mock);
        let updated = service
            .update(
                3,
                UpdateProduct {
                    id: Some(42),
                    name: None,
                    price: Some(20.0),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, 3);
        assert_eq!(updated.price, 20.0);
    }

    #[tokio::test]
    async fn test_update_of_missing_product_never_writes() {
        let mut mock = MockProductStore::new();
        mock.expect_find_unique().returning(|_| Ok(None));
        mock.expect_update().never();

        let service = ProductService::new(mock);
        assert_eq!(
            service.update(1, UpdateProduct::default()).await.unwrap_err(),
            ProductError::NotFound(1)
        );
    }

    #[tokio::test]
    async fn test_update_race_is_remapped_to_not_found() {
        let mut mock = MockProductStore::new();
        live_lookup(&mut mock, 2);
        mock.expect_update().returning(|_, _| {
            Err(StoreError::known(
                KnownErrorCode::RecordNotFound,
                "None of the records are updated",
            ))
        });

        let service = ProductService::new(mock);
        assert_eq!(
            service.update(2, UpdateProduct::default()).await.unwrap_err(),
            ProductError::NotFound(2)
        );
    }

    #[tokio::test]
    async fn test_update_unknown_write_failure_is_internal() {
        let mut mock = MockProductStore::new();
        live_lookup(&mut mock, 2);
        mock.expect_update()
            .returning(|_, _| Err(StoreError::unknown("deadlock detected")));

        let service = ProductService::new(mock);
        assert!(matches!(
            service.update(2, UpdateProduct::default()).await.unwrap_err(),
            ProductError::Internal(_)
        ));
    }

    #[tokio::test]
    async fn test_remove_writes_only_availability() {
        let mut mock = MockProductStore::new();
        live_lookup(&mut mock, 4);
        mock.expect_update()
            .with(eq(4), eq(ProductChanges::soft_delete()))
            .times(1)
            .returning(|id, _| Ok(product(id, false)));

        let service = ProductService::new(mock);
        let removed = service.remove(4).await.unwrap();
        assert!(!removed.available);
    }

    #[tokio::test]
    async fn test_remove_race_is_remapped_to_not_found() {
        let mut mock = MockProductStore::new();
        live_lookup(&mut mock, 4);
        mock.expect_update()
            .returning(|_, _| Err(StoreError::known(KnownErrorCode::RecordNotFound, "gone")));

        let service = ProductService::new(mock);
        assert_eq!(service.remove(4).await.unwrap_err(), ProductError::NotFound(4));
    }

    #[tokio::test]
    async fn test_remove_invalid_identifier() {
        let mut mock = MockProductStore::new();
        mock.expect_find_unique()
            .returning(|_| Err(StoreError::known(KnownErrorCode::InvalidIdentifier, "bad")));
        mock.expect_update().never();

        let service = ProductService::new(mock);
        assert_eq!(
            service.remove(-1).await.unwrap_err(),
            ProductError::InvalidArgument(-1)
        );
    }
}
