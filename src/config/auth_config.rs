//! # Authentication Configuration Module
//!
//! JWT 서명 키, 토큰 수명, 가입 확인 코드 등 인증 관련 설정을 관리하는 모듈입니다.
//!
//! ## 필수 환경 변수 설정
//!
//! ### JWT 토큰 설정
//! ```bash
//! # base64 로 인코딩된 비밀키 (디코딩 후 32바이트 이상)
//! export JWT_ACCESS_SECRET="..."
//! export JWT_REFRESH_SECRET="..."
//! export JWT_ACCESS_EXPIRATION_HOURS="24"
//! export JWT_REFRESH_EXPIRATION_DAYS="7"
//! ```
//!
//! ### 가입 확인 코드 설정
//! ```bash
//! export CONFIRMATION_CODE_TTL_MINUTES="5"
//! export CONFIRMATION_BASE_URL="https://shop.example.com/api/v1/register"
//! ```
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::JwtConfig;
//!
//! let access = JwtConfig::access_secret()?;
//! let ttl = JwtConfig::access_expiration_hours();
//! ```

use std::env;
use crate::config::Environment;
use crate::errors::AppError;

/// 개발 환경 전용 access 키 (base64)
const DEV_ACCESS_SECRET: &str = "ZGV2LWFjY2Vzcy1zZWNyZXQtZG8tbm90LXVzZS1pbi1wcm9k";

/// 개발 환경 전용 refresh 키 (base64)
const DEV_REFRESH_SECRET: &str = "ZGV2LXJlZnJlc2gtc2VjcmV0LWRvLW5vdC11c2UtaW4tcHJk";

/// JWT 관련 설정
///
/// 서명 키는 프로세스 시작 시 한 번만 읽어 [`SigningKeys`](crate::services::auth::SigningKeys)로 만듭니다.
pub struct JwtConfig;

impl JwtConfig {
    /// access 토큰 서명용 base64 비밀키
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 운영 환경에서 `JWT_ACCESS_SECRET`이 비어 있는 경우
    pub fn access_secret() -> Result<String, AppError> {
        Self::secret_or_dev_default("JWT_ACCESS_SECRET", DEV_ACCESS_SECRET)
    }

    /// refresh 토큰 서명용 base64 비밀키
    pub fn refresh_secret() -> Result<String, AppError> {
        Self::secret_or_dev_default("JWT_REFRESH_SECRET", DEV_REFRESH_SECRET)
    }

    pub fn access_expiration_hours() -> i64 {
        env::var("JWT_ACCESS_EXPIRATION_HOURS")
            .unwrap_or_else(|_| "24".to_string())
            .parse()
            .unwrap_or(24)
    }

    pub fn refresh_expiration_days() -> i64 {
        env::var("JWT_REFRESH_EXPIRATION_DAYS")
            .unwrap_or_else(|_| "7".to_string())
            .parse()
            .unwrap_or(7)
    }

    fn secret_or_dev_default(var: &str, dev_default: &str) -> Result<String, AppError> {
        match env::var(var) {
            Ok(secret) if !secret.trim().is_empty() => Ok(secret),
            _ => Self::dev_default_for_env(var, dev_default, &Environment::current()),
        }
    }

    fn dev_default_for_env(var: &str, dev_default: &str, environment: &Environment) -> Result<String, AppError> {
        if *environment == Environment::Production {
            return Err(AppError::InternalError(format!("{} must be set in production", var)));
        }

        log::warn!("{} not set, using development default (not secure for production!)", var);
        Ok(dev_default.to_string())
    }
}

/// 가입 확인 코드 설정
pub struct ConfirmationConfig;

impl ConfirmationConfig {
    /// 확인 코드 유효 시간 (분)
    pub fn code_ttl_minutes() -> i64 {
        env::var("CONFIRMATION_CODE_TTL_MINUTES")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .unwrap_or(5)
    }

    /// 확인 메일에 들어갈 링크의 접두사
    pub fn base_url() -> String {
        env::var("CONFIRMATION_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:8080/api/v1/register".to_string())
    }
}
