//! 저장소 추상화
//!
//! 인증 코어가 사용하는 영속성 협력자들의 계약입니다.
//! MongoDB 구현([`crate::repositories::users`] 등)과 메모리 구현([`crate::repositories::memory`])이
//! 같은 trait을 구현하므로, 서비스는 `Arc<dyn ...Store>`만 알면 됩니다.

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use crate::domain::entities::confirmation::ConfirmationCode;
use crate::domain::entities::products::Product;
use crate::domain::entities::roles::Role;
use crate::domain::entities::users::User;
use crate::errors::AppResult;

/// 사용자 저장소
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<User>>;

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// `id`가 없으면 새로 저장하고 ID를 채워 돌려주며, 있으면 전체 문서를 교체합니다.
    ///
    /// 사용자명/이메일 중복은 `AppError::ConflictError`입니다.
    async fn save(&self, user: User) -> AppResult<User>;
}

/// 역할 저장소 (참조 데이터)
#[async_trait]
pub trait RoleStore: Send + Sync {
    async fn find_by_title(&self, title: &str) -> AppResult<Option<Role>>;

    async fn save(&self, role: Role) -> AppResult<Role>;
}

/// 가입 확인 코드 저장소
#[async_trait]
pub trait ConfirmationCodeStore: Send + Sync {
    async fn save(&self, code: ConfirmationCode) -> AppResult<ConfirmationCode>;

    async fn find_by_code(&self, code: &str) -> AppResult<Option<ConfirmationCode>>;

    /// 코드를 원자적으로 조회와 동시에 삭제합니다.
    ///
    /// 같은 코드에 대한 동시 호출 중 정확히 하나만 `Some`을 받습니다.
    async fn take_by_code(&self, code: &str) -> AppResult<Option<ConfirmationCode>>;

    /// 삭제되었으면 `true`
    async fn delete(&self, code: &ConfirmationCode) -> AppResult<bool>;

    /// 사용자에게 발급된 코드를 모두 삭제하고 삭제된 개수를 돌려줍니다.
    async fn delete_by_user(&self, user_id: &ObjectId) -> AppResult<u64>;
}

/// 상품 저장소
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Product>>;

    async fn find_by_title(&self, title: &str) -> AppResult<Option<Product>>;

    /// 판매 중인 상품만 상품명 순으로
    async fn find_active(&self) -> AppResult<Vec<Product>>;

    /// `UserStore::save`와 같은 규칙이며, 상품명 중복은 `AppError::ConflictError`입니다.
    async fn save(&self, product: Product) -> AppResult<Product>;
}
