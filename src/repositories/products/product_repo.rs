//! # 상품 리포지토리 구현
//!
//! - **컬렉션명**: `products`
//! - **인덱스**: title(unique), is_active

use std::sync::Arc;
use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{bson::{doc, oid::ObjectId}, options::IndexOptions, Collection, IndexModel};
use crate::{
    db::{is_duplicate_key_error, Database},
    domain::entities::products::Product,
    errors::AppError,
    repositories::stores::ProductStore,
};

pub struct ProductRepository {
    db: Arc<Database>,
}

impl ProductRepository {
    pub const COLLECTION: &'static str = "products";

    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<Product> {
        self.db.get_database().collection::<Product>(Self::COLLECTION)
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let title_index = IndexModel::builder()
            .keys(doc! { "title": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("title_unique".to_string())
                .build())
            .build();

        let active_index = IndexModel::builder()
            .keys(doc! { "is_active": 1 })
            .options(IndexOptions::builder()
                .name("is_active".to_string())
                .build())
            .build();

        self.collection()
            .create_indexes([title_index, active_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl ProductStore for ProductRepository {
    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Product>, AppError> {
        self.collection()
            .find_one(doc! { "_id": *id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<Product>, AppError> {
        self.collection()
            .find_one(doc! { "title": title })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn find_active(&self) -> Result<Vec<Product>, AppError> {
        let cursor = self.collection()
            .find(doc! { "is_active": true })
            .sort(doc! { "title": 1 })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn save(&self, mut product: Product) -> Result<Product, AppError> {
        let result = match product.id {
            Some(id) => self.collection()
                .replace_one(doc! { "_id": id }, &product)
                .await
                .map(|_| None),
            None => self.collection()
                .insert_one(&product)
                .await
                .map(|inserted| inserted.inserted_id.as_object_id()),
        };

        match result {
            Ok(Some(new_id)) => product.id = Some(new_id),
            Ok(None) => {}
            Err(e) if is_duplicate_key_error(&e) => {
                return Err(AppError::ConflictError(format!("이미 존재하는 상품명입니다: {}", product.title)));
            }
            Err(e) => return Err(AppError::DatabaseError(e.to_string())),
        }

        Ok(product)
    }
}
