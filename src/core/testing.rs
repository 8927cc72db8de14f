//! 테스트 공용 조립 도우미

use std::ops::Deref;
use std::sync::Arc;
use crate::core::context::{AppContext, AuthSettings, Stores};
use crate::domain::dto::users::RegisterRequest;
use crate::domain::entities::users::User;
use crate::repositories::memory::{InMemoryConfirmationCodeStore, InMemoryProductStore, InMemoryRoleStore, InMemoryUserStore};
use crate::repositories::roles::DEFAULT_ROLES;
use crate::repositories::stores::UserStore;
use crate::services::auth::SigningKeys;
use crate::services::confirmation::mailer::RecordingMailer;

pub struct TestContext {
    pub app: AppContext,
    pub stores: Stores,
    pub mailer: Arc<RecordingMailer>,
}

impl Deref for TestContext {
    type Target = AppContext;

    fn deref(&self) -> &AppContext {
        &self.app
    }
}

pub fn test_keys() -> SigningKeys {
    SigningKeys::from_bytes(&[1u8; 32], &[2u8; 32]).unwrap()
}

/// 기본 역할이 채워진 메모리 저장소 기반 컨텍스트
pub fn test_context() -> TestContext {
    let stores = Stores {
        users: Arc::new(InMemoryUserStore::default()),
        roles: Arc::new(InMemoryRoleStore::with_titles(&DEFAULT_ROLES)),
        codes: Arc::new(InMemoryConfirmationCodeStore::default()),
        products: Arc::new(InMemoryProductStore::default()),
    };
    let mailer = Arc::new(RecordingMailer::default());
    let settings = AuthSettings {
        bcrypt_cost: 4,
        ..AuthSettings::default()
    };

    let app = AppContext::build(stores.clone(), test_keys(), mailer.clone(), &settings);

    TestContext { app, stores, mailer }
}

pub fn register_request(username: &str, password: &str) -> RegisterRequest {
    RegisterRequest {
        username: username.to_string(),
        email: format!("{}@example.com", username),
        password: password.to_string(),
    }
}

/// 가입 후 전달된 코드로 활성화까지 마친 사용자
pub async fn register_and_activate(ctx: &TestContext, username: &str, password: &str) -> User {
    ctx.user_service.register(register_request(username, password)).await.unwrap();
    let code = ctx.mailer.last_code_for(username).unwrap();
    ctx.confirmation_service.activate(&code).await.unwrap()
}

/// 활성 사용자에게 역할을 추가
pub async fn grant_role(ctx: &TestContext, username: &str, role: &str) {
    let mut user = ctx.stores.users.find_by_username(username).await.unwrap().unwrap();
    user.roles.push(role.to_string());
    ctx.stores.users.save(user).await.unwrap();
}
