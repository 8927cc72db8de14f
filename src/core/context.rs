//! 애플리케이션 조립
//!
//! 프로세스 시작 시 저장소와 서비스를 한 번 생성해 [`AppContext`]로 묶습니다.
//! 핸들러와 미들웨어는 `web::Data<AppContext>`와 `Arc` 필드를 통해서만 서비스에 접근합니다.
//!
//! ```text
//! Stores ─┬─▶ ConfirmationService ─▶ UserService ─┐
//!         └─▶ ClaimsMapper ───────────────────────┼─▶ SessionService
//! SigningKeys ─▶ TokenService ────────────────────┘
//! Stores ─▶ ProductService
//! ```

use std::sync::Arc;
use chrono::Duration;
use crate::config::{ConfirmationConfig, JwtConfig, PasswordConfig};
use crate::db::Database;
use crate::errors::AppResult;
use crate::repositories::confirmation::ConfirmationCodeRepository;
use crate::repositories::memory::{InMemoryConfirmationCodeStore, InMemoryProductStore, InMemoryRoleStore, InMemoryUserStore};
use crate::repositories::products::ProductRepository;
use crate::repositories::roles::RoleRepository;
use crate::repositories::stores::{ConfirmationCodeStore, ProductStore, RoleStore, UserStore};
use crate::repositories::users::UserRepository;
use crate::services::auth::{ClaimsMapper, SessionService, SigningKeys, TokenService};
use crate::services::confirmation::{ConfirmationMailer, ConfirmationService};
use crate::services::products::ProductService;
use crate::services::users::UserService;

/// 저장소 묶음
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub roles: Arc<dyn RoleStore>,
    pub codes: Arc<dyn ConfirmationCodeStore>,
    pub products: Arc<dyn ProductStore>,
}

impl Stores {
    /// 메모리 저장소 (역할은 비어 있음)
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryUserStore::default()),
            roles: Arc::new(InMemoryRoleStore::default()),
            codes: Arc::new(InMemoryConfirmationCodeStore::default()),
            products: Arc::new(InMemoryProductStore::default()),
        }
    }

    /// MongoDB 저장소, 유니크 인덱스를 함께 생성합니다.
    pub async fn mongodb(db: Arc<Database>) -> AppResult<Self> {
        let users = UserRepository::new(db.clone());
        let roles = RoleRepository::new(db.clone());
        let codes = ConfirmationCodeRepository::new(db.clone());
        let products = ProductRepository::new(db);

        users.create_indexes().await?;
        roles.create_indexes().await?;
        codes.create_indexes().await?;
        products.create_indexes().await?;

        Ok(Self {
            users: Arc::new(users),
            roles: Arc::new(roles),
            codes: Arc::new(codes),
            products: Arc::new(products),
        })
    }
}

/// 수명/해싱 설정
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
    pub code_ttl: Duration,
    pub bcrypt_cost: u32,
}

impl AuthSettings {
    pub fn from_config() -> Self {
        Self {
            access_ttl: Duration::hours(JwtConfig::access_expiration_hours()),
            refresh_ttl: Duration::days(JwtConfig::refresh_expiration_days()),
            code_ttl: Duration::minutes(ConfirmationConfig::code_ttl_minutes()),
            bcrypt_cost: PasswordConfig::bcrypt_cost(),
        }
    }
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            access_ttl: Duration::days(1),
            refresh_ttl: Duration::days(7),
            code_ttl: Duration::minutes(5),
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

/// 요청 처리 계층에 공유되는 서비스 묶음
#[derive(Clone)]
pub struct AppContext {
    pub token_service: Arc<TokenService>,
    pub claims_mapper: Arc<ClaimsMapper>,
    pub confirmation_service: Arc<ConfirmationService>,
    pub user_service: Arc<UserService>,
    pub session_service: Arc<SessionService>,
    pub product_service: Arc<ProductService>,
}

impl AppContext {
    pub fn build(
        stores: Stores,
        keys: SigningKeys,
        mailer: Arc<dyn ConfirmationMailer>,
        settings: &AuthSettings,
    ) -> Self {
        let token_service = Arc::new(TokenService::with_ttl(keys, settings.access_ttl, settings.refresh_ttl));
        let claims_mapper = Arc::new(ClaimsMapper::new(stores.roles.clone()));
        let confirmation_service = Arc::new(ConfirmationService::new(
            stores.codes.clone(),
            stores.users.clone(),
            settings.code_ttl,
        ));
        let user_service = Arc::new(UserService::new(
            stores.users.clone(),
            confirmation_service.clone(),
            mailer,
            settings.bcrypt_cost,
        ));
        let session_service = Arc::new(SessionService::new(
            user_service.clone(),
            claims_mapper.clone(),
            token_service.clone(),
        ));

        let product_service = Arc::new(ProductService::new(stores.products.clone()));

        Self {
            token_service,
            claims_mapper,
            confirmation_service,
            user_service,
            session_service,
            product_service,
        }
    }
}
