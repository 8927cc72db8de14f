//! # 메모리 저장소
//!
//! 프로세스 메모리에 데이터를 보관하는 저장소 구현입니다.
//! 테스트와 `STORAGE_BACKEND=memory` 개발 모드에서 사용합니다.
//! MongoDB 구현과 같은 유니크 제약(사용자명, 이메일, 역할 이름, 코드, 상품명)을 흉내냅니다.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use crate::domain::entities::confirmation::ConfirmationCode;
use crate::domain::entities::products::Product;
use crate::domain::entities::roles::Role;
use crate::domain::entities::users::User;
use crate::errors::{AppError, AppResult, ErrorContext};
use crate::repositories::stores::{ConfirmationCodeStore, ProductStore, RoleStore, UserStore};

fn lock<T>(mutex: &Mutex<T>) -> AppResult<MutexGuard<'_, T>> {
    mutex.lock().context("메모리 저장소 잠금 실패")
}

/// 메모리 사용자 저장소
#[derive(Default)]
pub struct InMemoryUserStore {
    users: Mutex<HashMap<ObjectId, User>>,
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<User>> {
        Ok(lock(&self.users)?.get(id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(lock(&self.users)?.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(lock(&self.users)?.values().find(|u| u.email == email).cloned())
    }

    async fn save(&self, mut user: User) -> AppResult<User> {
        let mut users = lock(&self.users)?;
        let id = *user.id.get_or_insert_with(ObjectId::new);

        let duplicate = users.values().any(|other| {
            other.id != Some(id) && (other.username == user.username || other.email == user.email)
        });
        if duplicate {
            return Err(AppError::ConflictError("이미 사용 중인 사용자명 또는 이메일입니다".to_string()));
        }

        users.insert(id, user.clone());
        Ok(user)
    }
}

/// 메모리 역할 저장소
#[derive(Default)]
pub struct InMemoryRoleStore {
    roles: Mutex<HashMap<String, Role>>,
}

impl InMemoryRoleStore {
    /// 주어진 역할 이름들로 채워진 저장소
    pub fn with_titles(titles: &[&str]) -> Self {
        let roles = titles
            .iter()
            .map(|title| {
                let mut role = Role::new(*title);
                role.id = Some(ObjectId::new());
                (title.to_string(), role)
            })
            .collect();

        Self {
            roles: Mutex::new(roles),
        }
    }
}

#[async_trait]
impl RoleStore for InMemoryRoleStore {
    async fn find_by_title(&self, title: &str) -> AppResult<Option<Role>> {
        Ok(lock(&self.roles)?.get(title).cloned())
    }

    async fn save(&self, mut role: Role) -> AppResult<Role> {
        let mut roles = lock(&self.roles)?;

        if role.id.is_none() && roles.contains_key(&role.title) {
            return Err(AppError::ConflictError(format!("이미 존재하는 역할입니다: {}", role.title)));
        }

        role.id.get_or_insert_with(ObjectId::new);
        roles.insert(role.title.clone(), role.clone());
        Ok(role)
    }
}

/// 메모리 가입 확인 코드 저장소
#[derive(Default)]
pub struct InMemoryConfirmationCodeStore {
    codes: Mutex<HashMap<String, ConfirmationCode>>,
}

impl InMemoryConfirmationCodeStore {
    pub fn len(&self) -> usize {
        self.codes.lock().map(|codes| codes.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ConfirmationCodeStore for InMemoryConfirmationCodeStore {
    async fn save(&self, mut code: ConfirmationCode) -> AppResult<ConfirmationCode> {
        let mut codes = lock(&self.codes)?;

        if codes.contains_key(&code.code) {
            return Err(AppError::ConflictError("확인 코드가 중복되었습니다".to_string()));
        }

        code.id.get_or_insert_with(ObjectId::new);
        codes.insert(code.code.clone(), code.clone());
        Ok(code)
    }

    async fn find_by_code(&self, code: &str) -> AppResult<Option<ConfirmationCode>> {
        Ok(lock(&self.codes)?.get(code).cloned())
    }

    async fn take_by_code(&self, code: &str) -> AppResult<Option<ConfirmationCode>> {
        Ok(lock(&self.codes)?.remove(code))
    }

    async fn delete(&self, code: &ConfirmationCode) -> AppResult<bool> {
        Ok(lock(&self.codes)?.remove(&code.code).is_some())
    }

    async fn delete_by_user(&self, user_id: &ObjectId) -> AppResult<u64> {
        let mut codes = lock(&self.codes)?;
        let before = codes.len();
        codes.retain(|_, code| code.user_id != *user_id);
        Ok((before - codes.len()) as u64)
    }
}

/// 메모리 상품 저장소
#[derive(Default)]
pub struct InMemoryProductStore {
    products: Mutex<HashMap<ObjectId, Product>>,
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Product>> {
        Ok(lock(&self.products)?.get(id).cloned())
    }

    async fn find_by_title(&self, title: &str) -> AppResult<Option<Product>> {
        Ok(lock(&self.products)?.values().find(|p| p.title == title).cloned())
    }

    async fn find_active(&self) -> AppResult<Vec<Product>> {
        let mut active: Vec<Product> = lock(&self.products)?
            .values()
            .filter(|p| p.is_active)
            .cloned()
            .collect();
        active.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(active)
    }

    async fn save(&self, mut product: Product) -> AppResult<Product> {
        let mut products = lock(&self.products)?;
        let id = *product.id.get_or_insert_with(ObjectId::new);

        if products.values().any(|other| other.id != Some(id) && other.title == product.title) {
            return Err(AppError::ConflictError(format!("이미 존재하는 상품명입니다: {}", product.title)));
        }

        products.insert(id, product.clone());
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[actix_web::test]
    async fn test_user_save_assigns_id_and_updates() {
        let store = InMemoryUserStore::default();
        let user = User::new_local("alice".into(), "alice@example.com".into(), "hash".into());

        let mut saved = store.save(user).await.unwrap();
        let id = saved.id.unwrap();

        saved.activate();
        store.save(saved).await.unwrap();

        let found = store.find_by_id(&id).await.unwrap().unwrap();
        assert!(found.is_active);
        assert_eq!(store.find_by_username("alice").await.unwrap().unwrap().id, Some(id));
    }

    #[actix_web::test]
    async fn test_user_save_rejects_duplicate_username() {
        let store = InMemoryUserStore::default();
        store.save(User::new_local("alice".into(), "a@example.com".into(), "h".into())).await.unwrap();

        let result = store.save(User::new_local("alice".into(), "b@example.com".into(), "h".into())).await;
        assert!(matches!(result, Err(AppError::ConflictError(_))));
    }

    #[actix_web::test]
    async fn test_take_by_code_is_single_shot() {
        let store = InMemoryConfirmationCodeStore::default();
        let code = ConfirmationCode::new("abc".into(), Utc::now() + Duration::minutes(5), ObjectId::new());
        store.save(code).await.unwrap();

        assert!(store.take_by_code("abc").await.unwrap().is_some());
        assert!(store.take_by_code("abc").await.unwrap().is_none());
        assert!(store.is_empty());
    }

    #[actix_web::test]
    async fn test_delete_reports_removal() {
        let store = InMemoryConfirmationCodeStore::default();
        let code = store
            .save(ConfirmationCode::new("xyz".into(), Utc::now() + Duration::minutes(5), ObjectId::new()))
            .await
            .unwrap();

        assert!(store.delete(&code).await.unwrap());
        assert!(!store.delete(&code).await.unwrap());
        assert!(store.find_by_code("xyz").await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_delete_by_user_leaves_other_users_codes() {
        let store = InMemoryConfirmationCodeStore::default();
        let alice = ObjectId::new();
        let bob = ObjectId::new();
        let expires = Utc::now() + Duration::minutes(5);

        store.save(ConfirmationCode::new("a1".into(), expires, alice)).await.unwrap();
        store.save(ConfirmationCode::new("a2".into(), expires, alice)).await.unwrap();
        store.save(ConfirmationCode::new("b1".into(), expires, bob)).await.unwrap();

        assert_eq!(store.delete_by_user(&alice).await.unwrap(), 2);
        assert_eq!(store.len(), 1);
        assert!(store.find_by_code("b1").await.unwrap().is_some());
    }

    #[actix_web::test]
    async fn test_find_active_skips_soft_deleted_products() {
        let store = InMemoryProductStore::default();
        store.save(Product::new("Cherry".into(), 3.0, None)).await.unwrap();
        store.save(Product::new("Apple".into(), 2.0, None)).await.unwrap();
        let mut banana = store.save(Product::new("Banana".into(), 1.5, None)).await.unwrap();

        banana.deactivate();
        store.save(banana).await.unwrap();

        let titles: Vec<String> = store.find_active().await.unwrap().into_iter().map(|p| p.title).collect();
        assert_eq!(titles, vec!["Apple".to_string(), "Cherry".to_string()]);
        assert!(store.find_by_title("Banana").await.unwrap().is_some());
    }

    #[actix_web::test]
    async fn test_product_title_is_unique() {
        let store = InMemoryProductStore::default();
        store.save(Product::new("Apple".into(), 2.0, None)).await.unwrap();

        let result = store.save(Product::new("Apple".into(), 4.0, None)).await;
        assert!(matches!(result, Err(AppError::ConflictError(_))));
    }
}
