//! 확인 코드 전달
//!
//! 실제 메일 발송은 외부 협력자이므로 trait 경계만 둡니다.
//! 기본 구현 [`LogMailer`]는 확인 링크를 로그로 남깁니다.

use async_trait::async_trait;
use crate::config::ConfirmationConfig;
use crate::domain::entities::users::User;
use crate::errors::AppResult;

#[async_trait]
pub trait ConfirmationMailer: Send + Sync {
    async fn send_confirmation(&self, user: &User, code: &str) -> AppResult<()>;
}

/// 확인 링크를 로그로 출력하는 전달자
pub struct LogMailer {
    base_url: String,
}

impl LogMailer {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn from_config() -> Self {
        Self::new(ConfirmationConfig::base_url())
    }

    pub fn confirmation_link(&self, code: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), code)
    }
}

#[async_trait]
impl ConfirmationMailer for LogMailer {
    async fn send_confirmation(&self, user: &User, code: &str) -> AppResult<()> {
        log::info!("📧 가입 확인 메일 → {} <{}>: {}", user.username, user.email, self.confirmation_link(code));
        Ok(())
    }
}

/// 전달된 코드를 기록하는 테스트용 전달자
#[cfg(test)]
#[derive(Default)]
pub struct RecordingMailer {
    sent: std::sync::Mutex<Vec<(String, String)>>,
}

#[cfg(test)]
impl RecordingMailer {
    /// 해당 사용자에게 마지막으로 전달된 코드
    pub fn last_code_for(&self, username: &str) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(name, _)| name == username)
            .map(|(_, code)| code.clone())
    }
}

#[cfg(test)]
#[async_trait]
impl ConfirmationMailer for RecordingMailer {
    async fn send_confirmation(&self, user: &User, code: &str) -> AppResult<()> {
        self.sent.lock().unwrap().push((user.username.clone(), code.to_string()));
        Ok(())
    }
}
