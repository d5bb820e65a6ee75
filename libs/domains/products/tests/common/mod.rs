//! In-memory [`ProductStore`] used by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use domain_products::*;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

#[derive(Default)]
pub struct MemoryProductStore {
    rows: Mutex<Vec<Product>>,
    connects: AtomicUsize,
    fail_lookups: Mutex<Option<StoreError>>,
    vanish_before_write: AtomicBool,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with `count` live products named `Product 1..=count`.
    pub fn with_products(count: usize) -> Self {
        let store = Self::new();
        {
            let mut rows = store.rows.lock().unwrap();
            for n in 1..=count {
                rows.push(row(n as ProductId, format!("Product {n}"), n as f64));
            }
        }
        store
    }

    /// Every lookup fails with `err` from now on.
    pub fn fail_lookups_with(&self, err: StoreError) {
        *self.fail_lookups.lock().unwrap() = Some(err);
    }

    /// Rows disappear between the liveness check and the write.
    pub fn vanish_before_write(&self) {
        self.vanish_before_write.store(true, Ordering::SeqCst);
    }

    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    /// Raw row, including removed ones.
    pub fn row(&self, id: ProductId) -> Option<Product> {
        self.rows.lock().unwrap().iter().find(|p| p.id == id).cloned()
    }

    fn lookup_failure(&self) -> StoreResult<()> {
        match self.fail_lookups.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

fn row(id: ProductId, name: String, price: f64) -> Product {
    let now = Utc::now();
    Product {
        id,
        name,
        price,
        available: true,
        created_at: now,
        updated_at: now,
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn connect(&self) -> StoreResult<()> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn disconnect(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn find_unique(&self, query: ProductWhereUnique) -> StoreResult<Option<Product>> {
        self.lookup_failure()?;
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .find(|p| p.id == query.id && query.available.is_none_or(|a| p.available == a))
            .cloned())
    }

    async fn find_many(&self, args: FindManyArgs) -> StoreResult<Vec<Product>> {
        self.lookup_failure()?;
        let mut rows: Vec<Product> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|p| args.filter.matches(p))
            .cloned()
            .collect();
        rows.sort_by_key(|p| p.id);

        Ok(rows
            .into_iter()
            .skip(args.skip as usize)
            .take(args.take as usize)
            .collect())
    }

    async fn count(&self, filter: ProductWhere) -> StoreResult<u64> {
        self.lookup_failure()?;
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().filter(|p| filter.matches(p)).count() as u64)
    }

    async fn create(&self, input: CreateProduct) -> StoreResult<Product> {
        let mut rows = self.rows.lock().unwrap();
        let id = rows.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        let product = row(id, input.name, input.price);
        rows.push(product.clone());
        Ok(product)
    }

    async fn update(&self, id: ProductId, changes: ProductChanges) -> StoreResult<Product> {
        let mut rows = self.rows.lock().unwrap();
        if self.vanish_before_write.load(Ordering::SeqCst) {
            rows.retain(|p| p.id != id);
        }

        let product = rows.iter_mut().find(|p| p.id == id).ok_or_else(|| {
            StoreError::known(KnownErrorCode::RecordNotFound, "Record to update not found")
        })?;

        if let Some(name) = changes.name {
            product.name = name;
        }
        if let Some(price) = changes.price {
            product.price = price;
        }
        if let Some(available) = changes.available {
            product.available = available;
        }
        product.updated_at = Utc::now();
        Ok(product.clone())
    }
}
