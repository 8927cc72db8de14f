//! # 사용자 관리 서비스 구현
//!
//! 회원가입과 자격 증명 확인을 담당합니다.
//!
//! ## 회원가입 흐름
//!
//! ```text
//! RegisterRequest ─▶ validate ─▶ 사용자명/이메일 중복 확인 ─▶ bcrypt 해싱
//!        ─▶ 비활성 사용자 저장 ─▶ 확인 코드 발급 ─▶ 메일 전달
//! ```
//!
//! 확인 전 계정과 겹치는 재가입은 충돌이 아니라 코드 재발급입니다.
//!
//! 사용자는 확인 코드를 제출하기 전까지 로그인할 수 없습니다.

use std::sync::Arc;
use bcrypt::hash;
use validator::Validate;
use crate::domain::dto::users::{RegisterRequest, RegisterResponse};
use crate::domain::entities::users::User;
use crate::errors::{AppError, AppResult, ErrorContext};
use crate::repositories::stores::UserStore;
use crate::services::confirmation::{ConfirmationMailer, ConfirmationService};

const INVALID_CREDENTIALS: &str = "잘못된 사용자명 또는 비밀번호입니다";

pub struct UserService {
    users: Arc<dyn UserStore>,
    confirmation: Arc<ConfirmationService>,
    mailer: Arc<dyn ConfirmationMailer>,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserStore>,
        confirmation: Arc<ConfirmationService>,
        mailer: Arc<dyn ConfirmationMailer>,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            users,
            confirmation,
            mailer,
            bcrypt_cost,
        }
    }

    /// 새 사용자 등록
    ///
    /// 비활성 사용자를 저장하고 확인 코드를 발급해 전달자에게 넘깁니다.
    /// 같은 사용자명이나 이메일의 계정이 아직 확인 전이면 그 계정을 새 요청으로 갱신하고
    /// 이전 코드를 폐기한 뒤 새 코드를 발급합니다. 만료된 코드의 복구 경로입니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 입력 형식 오류
    /// * `AppError::ConflictError` - 활성 계정과 사용자명 또는 이메일 중복
    pub async fn register(&self, request: RegisterRequest) -> AppResult<RegisterResponse> {
        request.validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        let pending = self.find_pending(&request.username, &request.email).await?;

        let hash_start = std::time::Instant::now();
        let password_hash = hash(&request.password, self.bcrypt_cost)
            .context("비밀번호 해싱 실패")?;
        log::debug!("Password hashing took: {:?}", hash_start.elapsed());

        let user = match pending {
            Some(mut existing) => {
                existing.replace_pending_details(request.username, request.email, password_hash);
                let user = self.users.save(existing).await?;
                self.confirmation.revoke_for(&user).await?;
                log::info!("확인 대기 사용자 재가입: {}", user.username);
                user
            }
            None => {
                let user = self.users
                    .save(User::new_local(request.username, request.email, password_hash))
                    .await?;
                log::info!("신규 사용자 등록 (확인 대기): {}", user.username);
                user
            }
        };

        let code = self.confirmation.generate(&user).await?;
        self.mailer.send_confirmation(&user, &code).await?;

        Ok(RegisterResponse {
            user: user.into(),
            message: "확인 메일을 보냈습니다. 메일의 링크로 가입을 완료해주세요".to_string(),
        })
    }

    /// 사용자명/이메일과 겹치는 확인 대기 계정 조회
    ///
    /// 활성 계정과 겹치거나, 사용자명과 이메일이 서로 다른 계정에 속하면 충돌입니다.
    async fn find_pending(&self, username: &str, email: &str) -> AppResult<Option<User>> {
        let by_username = self.users.find_by_username(username).await?;
        let by_email = self.users.find_by_email(email).await?;

        match (by_username, by_email) {
            (Some(user), _) if user.is_active => {
                Err(AppError::ConflictError("이미 사용 중인 사용자명입니다".to_string()))
            }
            (_, Some(user)) if user.is_active => {
                Err(AppError::ConflictError("이미 사용 중인 이메일입니다".to_string()))
            }
            (Some(named), Some(mailed)) if named.id != mailed.id => {
                Err(AppError::ConflictError("이미 사용 중인 이메일입니다".to_string()))
            }
            (Some(user), _) | (None, Some(user)) => Ok(Some(user)),
            (None, None) => Ok(None),
        }
    }

    /// 사용자명/비밀번호 검증
    ///
    /// 사용자가 없거나 비밀번호가 틀리면 같은 메시지로 거부합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 자격 증명 불일치, 가입 확인 전 계정
    pub async fn verify_password(&self, username: &str, password: &str) -> AppResult<User> {
        let user = self.users
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::AuthenticationError(INVALID_CREDENTIALS.to_string()))?;

        let is_valid = bcrypt::verify(password, &user.password_hash)
            .context("비밀번호 검증 실패")?;

        if !is_valid {
            log::warn!("로그인 실패: {}", username);
            return Err(AppError::AuthenticationError(INVALID_CREDENTIALS.to_string()));
        }

        if !user.is_active {
            return Err(AppError::AuthenticationError("가입 확인이 완료되지 않은 계정입니다".to_string()));
        }

        Ok(user)
    }

    /// 활성 사용자 조회 (비활성이면 `None`)
    pub async fn find_active_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(self.users
            .find_by_username(username)
            .await?
            .filter(|user| user.is_active))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use crate::core::testing::{register_and_activate, register_request, test_context};
    use crate::domain::entities::confirmation::ConfirmationCode;
    use crate::repositories::stores::ConfirmationCodeStore;

    #[actix_web::test]
    async fn test_register_creates_inactive_user_and_sends_code() {
        let ctx = test_context();

        let response = ctx.user_service.register(register_request("dave", "Passw0rd!")).await.unwrap();

        assert!(!response.user.is_active);
        assert_eq!(response.user.roles, vec!["ROLE_USER".to_string()]);
        assert!(ctx.mailer.last_code_for("dave").is_some());
    }

    #[actix_web::test]
    async fn test_register_rejects_invalid_input() {
        let ctx = test_context();

        let result = ctx.user_service.register(register_request("d", "weak")).await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[actix_web::test]
    async fn test_register_rejects_active_username_and_email() {
        let ctx = test_context();
        register_and_activate(&ctx, "dave", "Passw0rd!").await;

        let mut same_name = register_request("dave", "Passw0rd!");
        same_name.email = "other@example.com".to_string();
        assert!(matches!(ctx.user_service.register(same_name).await, Err(AppError::ConflictError(_))));

        let mut same_email = register_request("david", "Passw0rd!");
        same_email.email = "dave@example.com".to_string();
        assert!(matches!(ctx.user_service.register(same_email).await, Err(AppError::ConflictError(_))));
    }

    #[actix_web::test]
    async fn test_register_rejects_name_and_email_of_different_pending_users() {
        let ctx = test_context();
        ctx.user_service.register(register_request("dave", "Passw0rd!")).await.unwrap();
        ctx.user_service.register(register_request("erin", "Passw0rd!")).await.unwrap();

        let mut mixed = register_request("dave", "Passw0rd!");
        mixed.email = "erin@example.com".to_string();

        assert!(matches!(ctx.user_service.register(mixed).await, Err(AppError::ConflictError(_))));
    }

    #[actix_web::test]
    async fn test_reregister_after_expired_code_issues_new_code() {
        let ctx = test_context();
        let first = ctx.user_service.register(register_request("dave", "Passw0rd!")).await.unwrap();
        let user = ctx.stores.users.find_by_username("dave").await.unwrap().unwrap();

        // 발급된 코드를 만료된 코드로 바꿔치기
        let issued = ctx.mailer.last_code_for("dave").unwrap();
        ctx.stores.codes.take_by_code(&issued).await.unwrap();
        ctx.stores.codes
            .save(ConfirmationCode::new("stale".into(), Utc::now() - Duration::seconds(1), user.id.unwrap()))
            .await
            .unwrap();
        assert!(matches!(ctx.confirmation_service.activate("stale").await, Err(AppError::ExpiredCode)));

        let again = ctx.user_service.register(register_request("dave", "Newpass1!")).await.unwrap();
        assert_eq!(again.user.id, first.user.id);

        let fresh = ctx.mailer.last_code_for("dave").unwrap();
        assert_ne!(fresh, issued);
        assert!(ctx.stores.codes.find_by_code("stale").await.unwrap().is_none());

        let activated = ctx.confirmation_service.activate(&fresh).await.unwrap();
        assert!(activated.is_active);
        assert!(ctx.user_service.verify_password("dave", "Newpass1!").await.is_ok());
        assert!(ctx.user_service.verify_password("dave", "Passw0rd!").await.is_err());
    }

    #[actix_web::test]
    async fn test_inactive_user_cannot_log_in() {
        let ctx = test_context();
        ctx.user_service.register(register_request("dave", "Passw0rd!")).await.unwrap();

        let result = ctx.user_service.verify_password("dave", "Passw0rd!").await;
        assert!(matches!(result, Err(AppError::AuthenticationError(_))));
        assert!(ctx.user_service.find_active_by_username("dave").await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_active_user_verifies() {
        let ctx = test_context();
        register_and_activate(&ctx, "dave", "Passw0rd!").await;

        let user = ctx.user_service.verify_password("dave", "Passw0rd!").await.unwrap();
        assert!(user.is_active);
        assert!(ctx.user_service.verify_password("dave", "Wrong000!").await.is_err());
        assert!(ctx.user_service.verify_password("nobody", "Passw0rd!").await.is_err());
    }
}
