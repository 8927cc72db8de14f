use crate::domain::models::auth::authenticated_user::AuthenticatedUser;

/// 요구되는 역할 정보
#[derive(Debug, Clone)]
pub enum RequiredRole {
    /// 특정 단일 역할이 필요
    Single(String),
    /// 여러 역할 중 하나라도 있으면 허용 (OR 조건)
    Any(Vec<String>),
}

impl RequiredRole {
    /// 사용자 역할이 요구사항을 만족하는지 확인
    pub fn is_satisfied(&self, user: &AuthenticatedUser) -> bool {
        match self {
            RequiredRole::Single(required_role) => user.has_role(required_role),
            RequiredRole::Any(required_roles) => {
                required_roles.iter().any(|role| user.has_role(role))
            }
        }
    }
}
