//! # 역할 리포지토리 구현
//!
//! - **컬렉션명**: `roles`
//! - **인덱스**: title(unique)

use std::sync::Arc;
use async_trait::async_trait;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};
use crate::{
    db::{is_duplicate_key_error, Database},
    domain::entities::roles::role::{Role, ROLE_ADMIN, ROLE_USER},
    errors::AppError,
    repositories::stores::RoleStore,
};

/// 시작 시 보장되는 기본 역할
pub const DEFAULT_ROLES: [&str; 2] = [ROLE_USER, ROLE_ADMIN];

pub struct RoleRepository {
    db: Arc<Database>,
}

impl RoleRepository {
    pub const COLLECTION: &'static str = "roles";

    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<Role> {
        self.db.get_database().collection::<Role>(Self::COLLECTION)
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let title_index = IndexModel::builder()
            .keys(doc! { "title": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("title_unique".to_string())
                .build())
            .build();

        self.collection()
            .create_index(title_index)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl RoleStore for RoleRepository {
    async fn find_by_title(&self, title: &str) -> Result<Option<Role>, AppError> {
        self.collection()
            .find_one(doc! { "title": title })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn save(&self, mut role: Role) -> Result<Role, AppError> {
        if let Some(id) = role.id {
            self.collection()
                .replace_one(doc! { "_id": id }, &role)
                .await
                .map_err(|e| AppError::DatabaseError(e.to_string()))?;
            return Ok(role);
        }

        match self.collection().insert_one(&role).await {
            Ok(inserted) => {
                role.id = inserted.inserted_id.as_object_id();
                Ok(role)
            }
            Err(e) if is_duplicate_key_error(&e) => {
                Err(AppError::ConflictError(format!("이미 존재하는 역할입니다: {}", role.title)))
            }
            Err(e) => Err(AppError::DatabaseError(e.to_string())),
        }
    }
}

/// 기본 역할이 없으면 생성합니다.
///
/// # Returns
///
/// 새로 생성된 역할 수
pub async fn seed_default_roles(store: &dyn RoleStore) -> Result<usize, AppError> {
    let mut created = 0;

    for title in DEFAULT_ROLES {
        if store.find_by_title(title).await?.is_none() {
            store.save(Role::new(title)).await?;
            log::info!("기본 역할 생성: {}", title);
            created += 1;
        }
    }

    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::memory::InMemoryRoleStore;

    #[actix_web::test]
    async fn test_seed_default_roles_is_idempotent() {
        let store = InMemoryRoleStore::default();

        assert_eq!(seed_default_roles(&store).await.unwrap(), 2);
        assert_eq!(seed_default_roles(&store).await.unwrap(), 0);
        assert!(store.find_by_title(ROLE_ADMIN).await.unwrap().is_some());
        assert!(store.find_by_title(ROLE_USER).await.unwrap().is_some());
    }
}
