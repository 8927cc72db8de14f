//! JWT 토큰 관리 서비스 구현
//!
//! 서명된 시간 제한 토큰을 발급하고 검증합니다.
//! access 토큰과 refresh 토큰은 서로 다른 키 도메인으로 서명되어 교차 사용이 불가능합니다.
//!
//! 만료 시각은 서명된 payload 안에 있으므로 서명 검증과 만료 검사가 한 번에 이루어집니다.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, Header, Validation};
use crate::domain::auth::authenticated_user::AuthenticatedUser;
use crate::domain::token::token::{KeyDomain, TokenClaims, TokenPair, CLAIMS_VERSION};
use crate::errors::AppError;
use crate::services::auth::signing_keys::SigningKeys;

const BEARER_PREFIX: &str = "Bearer ";

/// JWT 토큰 관리 서비스
///
/// HMAC-SHA256 서명을 사용합니다.
/// 기본 수명은 access 토큰 1일, refresh 토큰 7일입니다.
#[derive(Debug, Clone)]
pub struct TokenService {
    keys: SigningKeys,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenService {
    pub fn new(keys: SigningKeys) -> Self {
        Self::with_ttl(keys, Duration::days(1), Duration::days(7))
    }

    pub fn with_ttl(keys: SigningKeys, access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            keys,
            access_ttl,
            refresh_ttl,
        }
    }

    /// 사용자를 위한 JWT 액세스 토큰 생성
    ///
    /// `sub = username`, `exp = now + access_ttl`, `roles = 역할 이름 목록`
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 토큰 인코딩 실패
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let access_token = token_service.issue_access_token(&identity)?;
    /// ```
    pub fn issue_access_token(&self, identity: &AuthenticatedUser) -> Result<String, AppError> {
        let claims = self.claims_for(identity, self.access_ttl, Some(identity.role_titles()));

        self.sign(&claims, KeyDomain::Access)
            .map_err(|e| AppError::InternalError(format!("JWT 토큰 생성 실패: {}", e)))
    }

    /// 사용자를 위한 리프레시 토큰 생성
    ///
    /// 역할 클레임을 넣지 않으므로 인가에는 쓸 수 없고, access 토큰 재발급에만 쓰입니다.
    pub fn issue_refresh_token(&self, identity: &AuthenticatedUser) -> Result<String, AppError> {
        let claims = self.claims_for(identity, self.refresh_ttl, None);

        self.sign(&claims, KeyDomain::Refresh)
            .map_err(|e| AppError::InternalError(format!("리프레시 토큰 생성 실패: {}", e)))
    }

    /// 토큰 쌍 생성 (액세스 + 리프레시)
    pub fn issue_token_pair(&self, identity: &AuthenticatedUser) -> Result<TokenPair, AppError> {
        Ok(TokenPair {
            access_token: self.issue_access_token(identity)?,
            refresh_token: Some(self.issue_refresh_token(identity)?),
        })
    }

    /// 토큰 검증
    ///
    /// 형식 오류, 서명 불일치, 만료, 알 수 없는 클레임 스키마를 모두 `false`로 돌려줍니다.
    /// 잘못된 토큰은 흔한 입력이므로 에러로 전파하지 않습니다.
    pub fn verify(&self, token: &str, domain: KeyDomain) -> bool {
        match self.decode_checked(token, domain) {
            Ok(_) => true,
            Err(reason) => {
                log::debug!("{} 토큰 검증 실패: {}", domain.as_str(), reason);
                false
            }
        }
    }

    pub fn verify_access(&self, token: &str) -> bool {
        self.verify(token, KeyDomain::Access)
    }

    pub fn verify_refresh(&self, token: &str) -> bool {
        self.verify(token, KeyDomain::Refresh)
    }

    /// 검증된 토큰에서 클레임 추출
    ///
    /// [`verify`](Self::verify)가 성공한 토큰에만 호출해야 합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::DecodeError` - 검증되지 않은 토큰을 넘긴 경우
    pub fn decode_claims(&self, token: &str, domain: KeyDomain) -> Result<TokenClaims, AppError> {
        self.decode_checked(token, domain)
            .map_err(|reason| AppError::DecodeError(format!("{} 토큰 클레임 해석 실패: {}", domain.as_str(), reason)))
    }

    /// Bearer 토큰에서 실제 토큰 부분 추출
    ///
    /// HTTP Authorization 헤더의 "Bearer {token}" 형식에서 토큰 부분만을 추출합니다.
    /// 다른 형식이거나 토큰이 비어 있으면 `None`입니다.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let token = TokenService::extract_bearer_token("Bearer eyJhbGciOi...");
    /// assert_eq!(token, Some("eyJhbGciOi..."));
    /// ```
    pub fn extract_bearer_token(auth_header: &str) -> Option<&str> {
        auth_header
            .strip_prefix(BEARER_PREFIX)
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }

    fn claims_for(&self, identity: &AuthenticatedUser, ttl: Duration, roles: Option<Vec<String>>) -> TokenClaims {
        let now = Utc::now();

        TokenClaims {
            sub: identity.username.clone(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            ver: CLAIMS_VERSION,
            roles,
        }
    }

    fn sign(&self, claims: &TokenClaims, domain: KeyDomain) -> jsonwebtoken::errors::Result<String> {
        encode(&Header::new(Algorithm::HS256), claims, self.keys.encoding_key(domain))
    }

    fn decode_checked(&self, token: &str, domain: KeyDomain) -> Result<TokenClaims, String> {
        let claims = decode::<TokenClaims>(token, self.keys.decoding_key(domain), &Self::validation())
            .map(|data| data.claims)
            .map_err(|e| e.to_string())?;

        if claims.ver != CLAIMS_VERSION {
            return Err(format!("지원하지 않는 클레임 버전: {}", claims.ver));
        }

        if domain == KeyDomain::Access && claims.roles.is_none() {
            return Err("access 토큰에 roles 클레임이 없습니다".to_string());
        }

        Ok(claims)
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);
        validation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use crate::domain::entities::roles::role::Role;

    fn keys() -> SigningKeys {
        SigningKeys::from_bytes(&[1u8; 32], &[2u8; 32]).unwrap()
    }

    fn bob_admin() -> AuthenticatedUser {
        let roles: HashSet<Role> = [Role::new("ROLE_ADMIN")].into_iter().collect();
        AuthenticatedUser::new("bob", roles)
    }

    #[test]
    fn test_access_token_verifies_immediately() {
        let service = TokenService::new(keys());
        let token = service.issue_access_token(&bob_admin()).unwrap();

        assert!(service.verify(&token, KeyDomain::Access));
    }

    #[test]
    fn test_refresh_token_does_not_verify_as_access() {
        let service = TokenService::new(keys());
        let refresh = service.issue_refresh_token(&bob_admin()).unwrap();

        assert!(service.verify_refresh(&refresh));
        assert!(!service.verify_access(&refresh));
    }

    #[test]
    fn test_access_token_does_not_verify_as_refresh() {
        let service = TokenService::new(keys());
        let access = service.issue_access_token(&bob_admin()).unwrap();

        assert!(!service.verify_refresh(&access));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let service = TokenService::with_ttl(keys(), Duration::seconds(-10), Duration::seconds(-10));
        let identity = bob_admin();

        let access = service.issue_access_token(&identity).unwrap();
        let refresh = service.issue_refresh_token(&identity).unwrap();

        assert!(!service.verify_access(&access));
        assert!(!service.verify_refresh(&refresh));
        assert!(matches!(service.decode_claims(&access, KeyDomain::Access), Err(AppError::DecodeError(_))));
    }

    #[test]
    fn test_token_signed_with_other_keys_is_rejected() {
        let issuer = TokenService::new(SigningKeys::from_bytes(&[9u8; 32], &[8u8; 32]).unwrap());
        let verifier = TokenService::new(keys());
        let token = issuer.issue_access_token(&bob_admin()).unwrap();

        assert!(!verifier.verify_access(&token));
    }

    #[test]
    fn test_malformed_token_is_rejected() {
        let service = TokenService::new(keys());

        assert!(!service.verify_access(""));
        assert!(!service.verify_access("not.a.jwt"));
        assert!(!service.verify_access("garbage"));
    }

    #[test]
    fn test_access_claims_carry_roles() {
        let service = TokenService::new(keys());
        let token = service.issue_access_token(&bob_admin()).unwrap();

        let claims = service.decode_claims(&token, KeyDomain::Access).unwrap();
        assert_eq!(claims.sub, "bob");
        assert_eq!(claims.role_names(), ["ROLE_ADMIN".to_string()]);
        assert_eq!(claims.ver, CLAIMS_VERSION);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_refresh_claims_have_no_roles() {
        let service = TokenService::new(keys());
        let token = service.issue_refresh_token(&bob_admin()).unwrap();

        let claims = service.decode_claims(&token, KeyDomain::Refresh).unwrap();
        assert_eq!(claims.sub, "bob");
        assert!(claims.roles.is_none());
    }

    #[test]
    fn test_default_lifetimes() {
        let service = TokenService::new(keys());
        let identity = bob_admin();

        let access = service.decode_claims(&service.issue_access_token(&identity).unwrap(), KeyDomain::Access).unwrap();
        let refresh = service.decode_claims(&service.issue_refresh_token(&identity).unwrap(), KeyDomain::Refresh).unwrap();

        assert_eq!(access.exp - access.iat, 24 * 3600);
        assert_eq!(refresh.exp - refresh.iat, 7 * 24 * 3600);
    }

    #[test]
    fn test_unknown_claims_version_is_rejected() {
        let service = TokenService::new(keys());
        let claims = TokenClaims {
            sub: "bob".to_string(),
            iat: Utc::now().timestamp(),
            exp: (Utc::now() + Duration::hours(1)).timestamp(),
            ver: CLAIMS_VERSION + 1,
            roles: Some(vec![]),
        };
        let token = service.sign(&claims, KeyDomain::Access).unwrap();

        assert!(!service.verify_access(&token));
        assert!(service.decode_claims(&token, KeyDomain::Access).is_err());
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(TokenService::extract_bearer_token("Bearer abc.def"), Some("abc.def"));
        assert_eq!(TokenService::extract_bearer_token("Basic dXNlcjpwYXNz"), None);
        assert_eq!(TokenService::extract_bearer_token("Bearer "), None);
        assert_eq!(TokenService::extract_bearer_token("bearer abc"), None);
    }
}
