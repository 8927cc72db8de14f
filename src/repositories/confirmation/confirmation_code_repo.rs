//! # 가입 확인 코드 리포지토리 구현
//!
//! - **컬렉션명**: `confirmation_codes`
//! - **인덱스**: code(unique)
//!
//! 만료된 코드는 자동 삭제하지 않습니다 (TTL 인덱스 없음).

use std::sync::Arc;
use async_trait::async_trait;
use mongodb::{bson::{doc, oid::ObjectId}, options::IndexOptions, Collection, IndexModel};
use crate::{
    db::{is_duplicate_key_error, Database},
    domain::entities::confirmation::ConfirmationCode,
    errors::AppError,
    repositories::stores::ConfirmationCodeStore,
};

pub struct ConfirmationCodeRepository {
    db: Arc<Database>,
}

impl ConfirmationCodeRepository {
    pub const COLLECTION: &'static str = "confirmation_codes";

    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<ConfirmationCode> {
        self.db.get_database().collection::<ConfirmationCode>(Self::COLLECTION)
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let code_index = IndexModel::builder()
            .keys(doc! { "code": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("code_unique".to_string())
                .build())
            .build();

        let user_index = IndexModel::builder()
            .keys(doc! { "user_id": 1 })
            .options(IndexOptions::builder()
                .name("user_id".to_string())
                .build())
            .build();

        self.collection()
            .create_indexes([code_index, user_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl ConfirmationCodeStore for ConfirmationCodeRepository {
    async fn save(&self, mut code: ConfirmationCode) -> Result<ConfirmationCode, AppError> {
        match self.collection().insert_one(&code).await {
            Ok(inserted) => {
                code.id = inserted.inserted_id.as_object_id();
                Ok(code)
            }
            Err(e) if is_duplicate_key_error(&e) => {
                Err(AppError::ConflictError("확인 코드가 중복되었습니다".to_string()))
            }
            Err(e) => Err(AppError::DatabaseError(e.to_string())),
        }
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ConfirmationCode>, AppError> {
        self.collection()
            .find_one(doc! { "code": code })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn take_by_code(&self, code: &str) -> Result<Option<ConfirmationCode>, AppError> {
        // findOneAndDelete 는 단일 문서에 대해 원자적이다
        self.collection()
            .find_one_and_delete(doc! { "code": code })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn delete(&self, code: &ConfirmationCode) -> Result<bool, AppError> {
        let result = self.collection()
            .delete_one(doc! { "code": &code.code })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.deleted_count > 0)
    }

    async fn delete_by_user(&self, user_id: &ObjectId) -> Result<u64, AppError> {
        let result = self.collection()
            .delete_many(doc! { "user_id": *user_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.deleted_count)
    }
}
