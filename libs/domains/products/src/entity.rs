use chrono::Utc;
use sea_orm::ActiveValue::{NotSet, Set, Unchanged};
use sea_orm::entity::prelude::*;

use crate::models::{CreateProduct, Product, ProductChanges, ProductId};

/// Sea-ORM Entity for the products table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(column_type = "Double")]
    pub price: f64,
    pub available: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Product {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            price: model.price,
            available: model.available,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

// The id is left to the sequence
impl From<CreateProduct> for ActiveModel {
    fn from(input: CreateProduct) -> Self {
        let now = Utc::now();
        ActiveModel {
            id: NotSet,
            name: Set(input.name),
            price: Set(input.price),
            available: Set(true),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
    }
}

impl ActiveModel {
    /// Partial update keyed by id; untouched columns stay `NotSet`.
    pub fn from_changes(id: ProductId, changes: ProductChanges) -> Self {
        let ProductChanges {
            name,
            price,
            available,
        } = changes;

        ActiveModel {
            id: Unchanged(id),
            name: name.map_or(NotSet, Set),
            price: price.map_or(NotSet, Set),
            available: available.map_or(NotSet, Set),
            created_at: NotSet,
            updated_at: Set(Utc::now().into()),
        }
    }
}
