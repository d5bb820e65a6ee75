use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RuntimeErr, Select,
};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info};

use crate::{
    entity,
    models::{CreateProduct, Product, ProductChanges, ProductId},
    store::{
        FindManyArgs, KnownErrorCode, ProductStore, ProductWhere, ProductWhereUnique, StoreError,
        StoreResult,
    },
};

/// Postgres SQLSTATEs raised when a value cannot be used as an identifier
const INVALID_TEXT_REPRESENTATION: &str = "22P02";
const NUMERIC_VALUE_OUT_OF_RANGE: &str = "22003";

/// [`ProductStore`] backed by a shared sea-orm connection pool
pub struct PgProductStore {
    db: DatabaseConnection,
    connected: AtomicBool,
}

impl PgProductStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            connected: AtomicBool::new(false),
        }
    }
}

fn filtered(filter: ProductWhere) -> Select<entity::Entity> {
    let mut query = entity::Entity::find();
    if let Some(available) = filter.available {
        query = query.filter(entity::Column::Available.eq(available));
    }
    query
}

/// Sort a driver error into the store's taxonomy.
pub fn classify(err: DbErr) -> StoreError {
    match &err {
        DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => {
            return StoreError::known(KnownErrorCode::RecordNotFound, err.to_string());
        }
        DbErr::Query(RuntimeErr::SqlxError(e)) | DbErr::Exec(RuntimeErr::SqlxError(e)) => {
            let code = e
                .as_database_error()
                .and_then(|db_err| db_err.code())
                .map(|code| code.into_owned());

            if matches!(
                code.as_deref(),
                Some(INVALID_TEXT_REPRESENTATION | NUMERIC_VALUE_OUT_OF_RANGE)
            ) {
                return StoreError::known(KnownErrorCode::InvalidIdentifier, err.to_string());
            }
        }
        _ => {}
    }
    StoreError::unknown(err.to_string())
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn connect(&self) -> StoreResult<()> {
        self.db.ping().await.map_err(classify)?;
        if !self.connected.swap(true, Ordering::SeqCst) {
            info!("Product store connected");
        }
        Ok(())
    }

    async fn disconnect(&self) -> StoreResult<()> {
        if self.connected.swap(false, Ordering::SeqCst) {
            self.db.clone().close().await.map_err(classify)?;
            info!("Product store disconnected");
        }
        Ok(())
    }

    async fn find_unique(&self, query: ProductWhereUnique) -> StoreResult<Option<Product>> {
        let mut select = entity::Entity::find_by_id(query.id);
        if let Some(available) = query.available {
            select = select.filter(entity::Column::Available.eq(available));
        }

        let model = select.one(&self.db).await.map_err(classify)?;
        Ok(model.map(Into::into))
    }

    async fn find_many(&self, args: FindManyArgs) -> StoreResult<Vec<Product>> {
        let models = filtered(args.filter)
            .order_by_asc(entity::Column::Id)
            .offset(args.skip)
            .limit(args.take)
            .all(&self.db)
            .await
            .map_err(classify)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn count(&self, filter: ProductWhere) -> StoreResult<u64> {
        filtered(filter).count(&self.db).await.map_err(classify)
    }

    async fn create(&self, input: CreateProduct) -> StoreResult<Product> {
        let active_model: entity::ActiveModel = input.into();
        let model = active_model.insert(&self.db).await.map_err(classify)?;

        info!(product_id = model.id, "Created product");
        Ok(model.into())
    }

    async fn update(&self, id: ProductId, changes: ProductChanges) -> StoreResult<Product> {
        let model = entity::ActiveModel::from_changes(id, changes)
            .update(&self.db)
            .await
            .map_err(classify)?;

        debug!(product_id = id, "Updated product");
        Ok(model.into())
    }
}
