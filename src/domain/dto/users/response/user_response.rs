use serde::{Deserialize, Serialize};
use crate::domain::entities::users::user::User;
use crate::domain::models::auth::authenticated_user::AuthenticatedUser;

/// 외부에 노출되는 사용자 정보 (비밀번호 해시 제외)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub is_active: bool,
    pub roles: Vec<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let User {
            id,
            username,
            email,
            is_active,
            roles,
            ..
        } = user;

        Self {
            id: id.map(|id| id.to_hex()).unwrap_or_default(),
            username,
            email,
            is_active,
            roles,
        }
    }
}

/// 회원가입 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub user: UserResponse,
    pub message: String,
}

/// 현재 요청의 인증 신원 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityResponse {
    pub username: String,
    pub roles: Vec<String>,
}

impl From<&AuthenticatedUser> for IdentityResponse {
    fn from(user: &AuthenticatedUser) -> Self {
        Self {
            username: user.username.clone(),
            roles: user.role_titles(),
        }
    }
}
