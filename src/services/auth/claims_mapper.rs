//! 클레임 → 신원 변환
//!
//! 검증된 토큰 클레임을 요청 단위 [`AuthenticatedUser`]로 바꿉니다.
//! 역할 이름은 역할 저장소에서 하나씩 조회하며, 저장소에 없는 이름은 경고만 남기고 건너뜁니다.

use std::collections::HashSet;
use std::sync::Arc;
use crate::domain::auth::authenticated_user::AuthenticatedUser;
use crate::domain::entities::roles::Role;
use crate::domain::token::token::TokenClaims;
use crate::errors::AppResult;
use crate::repositories::stores::RoleStore;

pub struct ClaimsMapper {
    roles: Arc<dyn RoleStore>,
}

impl ClaimsMapper {
    pub fn new(roles: Arc<dyn RoleStore>) -> Self {
        Self { roles }
    }

    /// 클레임으로부터 신원 생성
    ///
    /// 결과는 아직 인증되지 않은 상태(`is_authenticated() == false`)입니다.
    /// 신뢰 표시는 호출자(인증 미들웨어)의 몫입니다.
    ///
    /// # Errors
    ///
    /// 역할 저장소 조회 실패만 에러가 됩니다.
    pub async fn map_claims_to_identity(&self, claims: &TokenClaims) -> AppResult<AuthenticatedUser> {
        let roles = self.resolve_roles(claims.role_names()).await?;
        Ok(AuthenticatedUser::new(claims.sub.clone(), roles))
    }

    /// 역할 이름 목록을 저장소의 역할로 변환
    pub async fn resolve_roles<I, S>(&self, names: I) -> AppResult<HashSet<Role>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut resolved = HashSet::new();

        for name in names {
            let name = name.as_ref();
            match self.roles.find_by_title(name).await? {
                Some(role) => {
                    resolved.insert(role);
                }
                None => log::warn!("알 수 없는 역할 클레임을 건너뜁니다: {}", name),
            }
        }

        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use crate::domain::token::token::{KeyDomain, CLAIMS_VERSION};
    use crate::repositories::memory::InMemoryRoleStore;
    use crate::services::auth::{SigningKeys, TokenService};

    fn mapper(titles: &[&str]) -> ClaimsMapper {
        ClaimsMapper::new(Arc::new(InMemoryRoleStore::with_titles(titles)))
    }

    fn claims(sub: &str, roles: Option<Vec<&str>>) -> TokenClaims {
        TokenClaims {
            sub: sub.to_string(),
            iat: Utc::now().timestamp(),
            exp: (Utc::now() + Duration::hours(1)).timestamp(),
            ver: CLAIMS_VERSION,
            roles: roles.map(|r| r.into_iter().map(String::from).collect()),
        }
    }

    #[actix_web::test]
    async fn test_identity_starts_unauthenticated() {
        let identity = mapper(&["ROLE_USER"])
            .map_claims_to_identity(&claims("alice", Some(vec!["ROLE_USER"])))
            .await
            .unwrap();

        assert_eq!(identity.username, "alice");
        assert!(identity.has_role("ROLE_USER"));
        assert!(!identity.is_authenticated());
    }

    #[actix_web::test]
    async fn test_unknown_role_names_are_skipped() {
        let identity = mapper(&["ROLE_USER"])
            .map_claims_to_identity(&claims("alice", Some(vec!["ROLE_USER", "ROLE_DELETED"])))
            .await
            .unwrap();

        assert_eq!(identity.role_titles(), vec!["ROLE_USER".to_string()]);
    }

    #[actix_web::test]
    async fn test_missing_roles_claim_yields_no_roles() {
        let identity = mapper(&["ROLE_USER"])
            .map_claims_to_identity(&claims("alice", None))
            .await
            .unwrap();

        assert!(identity.roles.is_empty());
    }

    #[actix_web::test]
    async fn test_admin_token_round_trip() {
        let tokens = TokenService::new(SigningKeys::from_bytes(&[1u8; 32], &[2u8; 32]).unwrap());
        let bob: HashSet<Role> = [Role::new("ROLE_ADMIN")].into_iter().collect();
        let token = tokens.issue_access_token(&AuthenticatedUser::new("bob", bob)).unwrap();

        let claims = tokens.decode_claims(&token, KeyDomain::Access).unwrap();
        let identity = mapper(&["ROLE_ADMIN", "ROLE_USER"]).map_claims_to_identity(&claims).await.unwrap();

        assert_eq!(identity.username, "bob");
        assert_eq!(identity.roles.len(), 1);
        assert_eq!(identity.role_titles(), vec!["ROLE_ADMIN".to_string()]);
    }
}
