//! JWT 인증 토큰 구조체 및 페어링 된 세트
//!
//! RFC 7519 JWT 표준 클레임과 2개의 용도별 토큰을 페어링 한 정보를 표시합니다.
use serde::{Deserialize, Serialize};

/// 현재 클레임 스키마 버전
pub const CLAIMS_VERSION: u32 = 1;

/// 서명 키 도메인
///
/// access 키로 서명한 토큰은 refresh 키로 검증되지 않으며, 그 반대도 마찬가지입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDomain {
    Access,
    Refresh,
}

impl KeyDomain {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyDomain::Access => "access",
            KeyDomain::Refresh => "refresh",
        }
    }
}

/// JWT 토큰의 클레임(Payload) 구조체
///
/// ## 클레임 구성
///
/// - `sub`: 토큰의 주체 (사용자 이름)
/// - `iat`: 토큰 발급 시간 (Unix timestamp)
/// - `exp`: 토큰 만료 시간 (Unix timestamp)
/// - `ver`: 클레임 스키마 버전
/// - `roles`: 역할 이름 목록 (access 토큰에만 존재)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// 토큰의 주체 (사용자 이름)
    pub sub: String,
    /// 토큰 발급 시간 (Unix timestamp)
    pub iat: i64,
    /// 토큰 만료 시간 (Unix timestamp)
    pub exp: i64,
    /// 클레임 스키마 버전
    pub ver: u32,
    /// 역할 이름 목록 (refresh 토큰에는 없음)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
}

impl TokenClaims {
    /// 역할 이름 목록 (없으면 빈 슬라이스)
    pub fn role_names(&self) -> &[String] {
        self.roles.as_deref().unwrap_or(&[])
    }
}

/// JWT 토큰 쌍 구조체
///
/// 로그인 응답으로 클라이언트에게 전달됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    /// 액세스 토큰 (API 접근용 단기 토큰)
    pub access_token: String,
    /// 리프레시 토큰 (액세스 토큰 재발급 전용)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}
