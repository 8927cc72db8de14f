//! 가입 확인 코드 서비스
//!
//! 일회용, 시간 제한 확인 코드를 발급하고 소비합니다.
//!
//! ## 활성화 순서
//!
//! ```text
//! find_by_code ──없음──▶ InvalidCode
//!      │
//!      ├──만료──▶ ExpiredCode (코드 유지, 쓰기 없음)
//!      ▼
//! 사용자 조회 ──▶ take_by_code (원자적 삭제, 경쟁에서 지면 InvalidCode)
//!      ▼
//! 사용자 활성화 저장 ──실패──▶ 코드 복구 후 에러 전파
//! ```

use std::sync::Arc;
use chrono::{Duration, Utc};
use uuid::Uuid;
use crate::domain::entities::confirmation::ConfirmationCode;
use crate::domain::entities::users::User;
use crate::errors::{AppError, AppResult};
use crate::repositories::stores::{ConfirmationCodeStore, UserStore};

pub struct ConfirmationService {
    codes: Arc<dyn ConfirmationCodeStore>,
    users: Arc<dyn UserStore>,
    code_ttl: Duration,
}

impl ConfirmationService {
    pub fn new(codes: Arc<dyn ConfirmationCodeStore>, users: Arc<dyn UserStore>, code_ttl: Duration) -> Self {
        Self {
            codes,
            users,
            code_ttl,
        }
    }

    /// 사용자에게 새 확인 코드 발급
    ///
    /// 코드는 UUID v4 (122비트 난수) 문자열입니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 저장되지 않은 사용자 (ID 없음)
    pub async fn generate(&self, user: &User) -> AppResult<String> {
        let user_id = user.id
            .ok_or_else(|| AppError::InternalError("저장되지 않은 사용자에게 확인 코드를 발급할 수 없습니다".to_string()))?;

        let code = Uuid::new_v4().to_string();
        let expires_at = Utc::now() + self.code_ttl;

        self.codes.save(ConfirmationCode::new(code.clone(), expires_at, user_id)).await?;
        log::info!("확인 코드 발급: user={}", user.username);

        Ok(code)
    }

    /// 사용자에게 발급된 기존 코드를 모두 폐기
    ///
    /// 재가입으로 새 코드를 발급하기 전에 호출합니다. 폐기된 개수를 돌려줍니다.
    pub async fn revoke_for(&self, user: &User) -> AppResult<u64> {
        let Some(user_id) = user.id else {
            return Ok(0);
        };

        let revoked = self.codes.delete_by_user(&user_id).await?;
        if revoked > 0 {
            log::info!("이전 확인 코드 {}개 폐기: user={}", revoked, user.username);
        }

        Ok(revoked)
    }

    /// 확인 코드로 사용자 활성화
    ///
    /// 성공하면 코드는 삭제되어 같은 코드로 다시 호출하면 `InvalidCode`입니다.
    /// 만료된 코드는 삭제하지 않습니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InvalidCode` - 존재하지 않거나 이미 사용된 코드
    /// * `AppError::ExpiredCode` - 유효 시간이 지난 코드
    pub async fn activate(&self, code: &str) -> AppResult<User> {
        let found = self.codes
            .find_by_code(code)
            .await?
            .ok_or(AppError::InvalidCode)?;

        if found.is_expired_at(Utc::now()) {
            log::warn!("만료된 확인 코드 사용 시도: user_id={}", found.user_id);
            return Err(AppError::ExpiredCode);
        }

        let mut user = self.users
            .find_by_id(&found.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("확인 코드에 연결된 사용자가 없습니다".to_string()))?;

        let taken = self.codes
            .take_by_code(code)
            .await?
            .ok_or(AppError::InvalidCode)?;

        user.activate();
        match self.users.save(user).await {
            Ok(saved) => {
                log::info!("가입 확인 완료: {}", saved.username);
                Ok(saved)
            }
            Err(e) => {
                log::error!("사용자 활성화 저장 실패, 확인 코드 복구: {}", e);
                if let Err(restore) = self.codes.save(taken).await {
                    log::error!("확인 코드 복구 실패: {}", restore);
                }
                Err(e)
            }
        }
    }
}
