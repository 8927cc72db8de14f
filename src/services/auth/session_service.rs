//! 로그인/토큰 갱신 서비스
//!
//! 자격 증명 확인은 [`UserService`]에 맡기고, 통과한 사용자에게 토큰 쌍을 발급합니다.
//! refresh 토큰으로는 새 access 토큰만 발급하며, 역할은 항상 사용자 레코드에서 다시 읽습니다.

use std::sync::Arc;
use crate::domain::auth::authenticated_user::AuthenticatedUser;
use crate::domain::dto::users::LoginRequest;
use crate::domain::entities::users::User;
use crate::domain::token::token::{KeyDomain, TokenPair};
use crate::errors::{AppError, AppResult};
use crate::services::auth::claims_mapper::ClaimsMapper;
use crate::services::auth::token_service::TokenService;
use crate::services::users::UserService;

pub struct SessionService {
    users: Arc<UserService>,
    claims_mapper: Arc<ClaimsMapper>,
    tokens: Arc<TokenService>,
}

impl SessionService {
    pub fn new(users: Arc<UserService>, claims_mapper: Arc<ClaimsMapper>, tokens: Arc<TokenService>) -> Self {
        Self {
            users,
            claims_mapper,
            tokens,
        }
    }

    /// 사용자명/비밀번호 로그인
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 자격 증명 불일치 또는 미확인 계정
    pub async fn login(&self, request: LoginRequest) -> AppResult<TokenPair> {
        let user = self.users.verify_password(&request.username, &request.password).await?;
        let identity = self.identity_for(&user).await?;

        let pair = self.tokens.issue_token_pair(&identity)?;
        log::info!("로그인 성공: {}", user.username);

        Ok(pair)
    }

    /// refresh 토큰으로 access 토큰 재발급
    ///
    /// 응답의 `refresh_token`은 비어 있습니다. 기존 refresh 토큰은 만료 시까지 계속 유효합니다.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<TokenPair> {
        if !self.tokens.verify_refresh(refresh_token) {
            return Err(AppError::AuthenticationError("유효하지 않은 리프레시 토큰입니다".to_string()));
        }

        let claims = self.tokens.decode_claims(refresh_token, KeyDomain::Refresh)?;
        let user = self.users
            .find_active_by_username(&claims.sub)
            .await?
            .ok_or_else(|| AppError::AuthenticationError("유효하지 않은 리프레시 토큰입니다".to_string()))?;

        let identity = self.identity_for(&user).await?;

        Ok(TokenPair {
            access_token: self.tokens.issue_access_token(&identity)?,
            refresh_token: None,
        })
    }

    async fn identity_for(&self, user: &User) -> AppResult<AuthenticatedUser> {
        let roles = self.claims_mapper.resolve_roles(&user.roles).await?;
        Ok(AuthenticatedUser::new(user.username.clone(), roles))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::{register_and_activate, test_context};

    #[actix_web::test]
    async fn test_login_issues_verifiable_pair() {
        let ctx = test_context();
        register_and_activate(&ctx, "carol", "Passw0rd!").await;

        let pair = ctx.session_service
            .login(LoginRequest { username: "carol".into(), password: "Passw0rd!".into() })
            .await
            .unwrap();

        assert!(ctx.token_service.verify_access(&pair.access_token));
        assert!(ctx.token_service.verify_refresh(pair.refresh_token.as_deref().unwrap()));
    }

    #[actix_web::test]
    async fn test_login_rejects_wrong_password() {
        let ctx = test_context();
        register_and_activate(&ctx, "carol", "Passw0rd!").await;

        let result = ctx.session_service
            .login(LoginRequest { username: "carol".into(), password: "Wrong000!".into() })
            .await;

        assert!(matches!(result, Err(AppError::AuthenticationError(_))));
    }

    #[actix_web::test]
    async fn test_refresh_issues_access_token_only() {
        let ctx = test_context();
        register_and_activate(&ctx, "carol", "Passw0rd!").await;
        let pair = ctx.session_service
            .login(LoginRequest { username: "carol".into(), password: "Passw0rd!".into() })
            .await
            .unwrap();

        let refreshed = ctx.session_service
            .refresh(pair.refresh_token.as_deref().unwrap())
            .await
            .unwrap();

        assert!(ctx.token_service.verify_access(&refreshed.access_token));
        assert!(refreshed.refresh_token.is_none());
    }

    #[actix_web::test]
    async fn test_refresh_rejects_access_token() {
        let ctx = test_context();
        register_and_activate(&ctx, "carol", "Passw0rd!").await;
        let pair = ctx.session_service
            .login(LoginRequest { username: "carol".into(), password: "Passw0rd!".into() })
            .await
            .unwrap();

        let result = ctx.session_service.refresh(&pair.access_token).await;
        assert!(matches!(result, Err(AppError::AuthenticationError(_))));
    }
}
