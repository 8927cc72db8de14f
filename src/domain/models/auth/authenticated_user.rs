use std::collections::HashSet;
use std::future::{ready, Ready};
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};
use crate::domain::entities::roles::role::{Role, ROLE_ADMIN};
use crate::domain::models::auth::authentication_request::RequiredRole;
use crate::errors::AppError;

/// 검증된 토큰에서 만들어진 요청 단위 사용자 신원
///
/// `ClaimsMapper`가 만든 직후에는 `authenticated = false`이며,
/// 인증 미들웨어가 [`mark_authenticated`](Self::mark_authenticated)를 호출한 뒤에만
/// 요청 extensions에 설치됩니다. 요청이 끝나면 extensions와 함께 버려집니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// 사용자 이름 (토큰 subject)
    pub username: String,

    /// 역할 저장소에서 확인된 역할 집합
    pub roles: HashSet<Role>,

    #[serde(skip)]
    authenticated: bool,
}

impl AuthenticatedUser {
    pub fn new(username: impl Into<String>, roles: HashSet<Role>) -> Self {
        Self {
            username: username.into(),
            roles,
            authenticated: false,
        }
    }

    /// 이번 요청에서 신뢰할 수 있는 신원으로 표시
    pub fn mark_authenticated(&mut self) {
        self.authenticated = true;
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// 역할 이름 목록 (정렬됨)
    pub fn role_titles(&self) -> Vec<String> {
        let mut titles: Vec<String> = self.roles.iter().map(|r| r.title.clone()).collect();
        titles.sort();
        titles
    }

    /// 특정 역할을 보유하고 있는지 확인
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r.authority() == role)
    }

    /// 여러 역할 중 하나라도 보유하고 있는지 확인
    pub fn has_any_role(&self, roles: &[&str]) -> bool {
        roles.iter().any(|&role| self.has_role(role))
    }

    /// 관리자 권한을 보유하고 있는지 확인
    pub fn is_admin(&self) -> bool {
        self.has_role(ROLE_ADMIN)
    }

    /// 역할 요구사항을 검사하고, 만족하지 않으면 403 에러를 돌려줍니다.
    pub fn require(&self, required: &RequiredRole) -> Result<(), AppError> {
        if required.is_satisfied(self) {
            Ok(())
        } else {
            log::warn!("권한 부족: 사용자 {} ({:?}), 필요 권한: {:?}",
                self.username, self.role_titles(), required);
            Err(AppError::AuthorizationError("접근 권한이 부족합니다".to_string()))
        }
    }
}

/// ActixWeb FromRequest trait 구현
///
/// 인증 미들웨어가 설치한 신원이 없으면 401로 거부합니다.
impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) if user.is_authenticated() => ready(Ok(user.clone())),
            _ => ready(Err(AppError::AuthenticationError(
                "인증되지 않은 요청입니다".to_string()
            ).into())),
        }
    }
}

/// 선택적 인증 사용자 추출자
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<AuthenticatedUser>);

impl FromRequest for OptionalUser {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let user = req.extensions()
            .get::<AuthenticatedUser>()
            .filter(|u| u.is_authenticated())
            .cloned();
        ready(Ok(OptionalUser(user)))
    }
}
