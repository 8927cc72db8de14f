//! # 사용자 리포지토리 구현
//!
//! 사용자 엔티티의 MongoDB 데이터 액세스 계층입니다.
//!
//! - **컬렉션명**: `users`
//! - **인덱스**: email(unique), username(unique), created_at(desc)

use std::sync::Arc;
use async_trait::async_trait;
use mongodb::{bson::{doc, oid::ObjectId}, options::IndexOptions, Collection, IndexModel};
use crate::{
    db::{is_duplicate_key_error, Database},
    domain::entities::users::user::User,
    errors::AppError,
    repositories::stores::UserStore,
};

/// 사용자 데이터 액세스 리포지토리
pub struct UserRepository {
    /// MongoDB 데이터베이스 연결
    db: Arc<Database>,
}

impl UserRepository {
    pub const COLLECTION: &'static str = "users";

    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<User> {
        self.db.get_database().collection::<User>(Self::COLLECTION)
    }

    /// 유니크 인덱스 생성 (멱등)
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("email_unique".to_string())
                .build())
            .build();

        let username_index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("username_unique".to_string())
                .build())
            .build();

        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(IndexOptions::builder()
                .name("created_at_desc".to_string())
                .build())
            .build();

        self.collection()
            .create_indexes([email_index, username_index, created_at_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<User>, AppError> {
        self.collection()
            .find_one(doc! { "_id": *id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        self.collection()
            .find_one(doc! { "username": username })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.collection()
            .find_one(doc! { "email": email })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn save(&self, mut user: User) -> Result<User, AppError> {
        let result = match user.id {
            Some(id) => self.collection()
                .replace_one(doc! { "_id": id }, &user)
                .await
                .map(|_| None),
            None => self.collection()
                .insert_one(&user)
                .await
                .map(|inserted| inserted.inserted_id.as_object_id()),
        };

        match result {
            Ok(Some(new_id)) => user.id = Some(new_id),
            Ok(None) => {}
            Err(e) if is_duplicate_key_error(&e) => {
                return Err(AppError::ConflictError("이미 사용 중인 사용자명 또는 이메일입니다".to_string()));
            }
            Err(e) => return Err(AppError::DatabaseError(e.to_string())),
        }

        Ok(user)
    }
}
