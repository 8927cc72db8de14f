//! JWT 서명 키 저장소
//!
//! access/refresh 두 도메인의 HMAC 비밀키를 보관합니다.
//! 프로세스 시작 시 한 번 만들어지며 이후 읽기 전용으로 공유됩니다.
//! 키 교체는 재시작으로만 가능합니다.

use std::fmt;
use base64::{Engine as _, engine::general_purpose};
use jsonwebtoken::{DecodingKey, EncodingKey};
use crate::config::JwtConfig;
use crate::domain::token::token::KeyDomain;
use crate::errors::AppError;

/// 한 키 도메인의 서명/검증 키
#[derive(Clone)]
struct DomainKey {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl DomainKey {
    fn from_secret(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }
}

/// access/refresh 서명 키 쌍
#[derive(Clone)]
pub struct SigningKeys {
    access: DomainKey,
    refresh: DomainKey,
}

impl SigningKeys {
    /// HS256 비밀키 최소 길이 (바이트)
    pub const MIN_SECRET_BYTES: usize = 32;

    /// base64 문자열 두 개로부터 키를 만듭니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - base64 형식 오류, 32바이트 미만, 두 키가 같은 경우
    pub fn from_base64(access_secret: &str, refresh_secret: &str) -> Result<Self, AppError> {
        let access = Self::decode_secret(KeyDomain::Access, access_secret)?;
        let refresh = Self::decode_secret(KeyDomain::Refresh, refresh_secret)?;
        Self::from_bytes(&access, &refresh)
    }

    pub fn from_bytes(access_secret: &[u8], refresh_secret: &[u8]) -> Result<Self, AppError> {
        for (domain, secret) in [(KeyDomain::Access, access_secret), (KeyDomain::Refresh, refresh_secret)] {
            if secret.len() < Self::MIN_SECRET_BYTES {
                return Err(AppError::InternalError(format!(
                    "{} 서명 키가 너무 짧습니다 ({}바이트, 최소 {}바이트)",
                    domain.as_str(), secret.len(), Self::MIN_SECRET_BYTES
                )));
            }
        }

        if access_secret == refresh_secret {
            return Err(AppError::InternalError(
                "access 키와 refresh 키는 서로 달라야 합니다".to_string()
            ));
        }

        Ok(Self {
            access: DomainKey::from_secret(access_secret),
            refresh: DomainKey::from_secret(refresh_secret),
        })
    }

    /// 환경 변수(`JWT_ACCESS_SECRET`, `JWT_REFRESH_SECRET`)에서 키를 로드합니다.
    pub fn from_config() -> Result<Self, AppError> {
        Self::from_base64(&JwtConfig::access_secret()?, &JwtConfig::refresh_secret()?)
    }

    pub(crate) fn encoding_key(&self, domain: KeyDomain) -> &EncodingKey {
        match domain {
            KeyDomain::Access => &self.access.encoding,
            KeyDomain::Refresh => &self.refresh.encoding,
        }
    }

    pub(crate) fn decoding_key(&self, domain: KeyDomain) -> &DecodingKey {
        match domain {
            KeyDomain::Access => &self.access.decoding,
            KeyDomain::Refresh => &self.refresh.decoding,
        }
    }

    fn decode_secret(domain: KeyDomain, secret: &str) -> Result<Vec<u8>, AppError> {
        general_purpose::STANDARD
            .decode(secret.trim())
            .map_err(|e| AppError::InternalError(format!("{} 서명 키 base64 디코딩 실패: {}", domain.as_str(), e)))
    }
}

impl fmt::Debug for SigningKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKeys")
            .field("access", &"<redacted>")
            .field("refresh", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_base64_accepts_distinct_keys() {
        let access = general_purpose::STANDARD.encode([1u8; 32]);
        let refresh = general_purpose::STANDARD.encode([2u8; 32]);

        assert!(SigningKeys::from_base64(&access, &refresh).is_ok());
    }

    #[test]
    fn test_rejects_short_key() {
        let result = SigningKeys::from_bytes(&[1u8; 16], &[2u8; 32]);
        assert!(matches!(result, Err(AppError::InternalError(_))));
    }

    #[test]
    fn test_rejects_identical_keys() {
        let result = SigningKeys::from_bytes(&[7u8; 32], &[7u8; 32]);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_invalid_base64() {
        let refresh = general_purpose::STANDARD.encode([2u8; 32]);
        assert!(SigningKeys::from_base64("not base64!!", &refresh).is_err());
    }

    #[test]
    fn test_debug_does_not_leak_secrets() {
        let keys = SigningKeys::from_bytes(&[1u8; 32], &[2u8; 32]).unwrap();
        assert!(format!("{:?}", keys).contains("<redacted>"));
    }
}
