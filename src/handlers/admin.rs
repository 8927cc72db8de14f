//! 관리자 전용 핸들러

use actix_web::{get, HttpResponse};
use crate::domain::auth::authenticated_user::AuthenticatedUser;
use crate::domain::auth::authentication_request::RequiredRole;
use crate::domain::dto::tokens::MessageResponse;
use crate::domain::entities::roles::role::ROLE_ADMIN;
use crate::errors::AppError;

/// `ROLE_ADMIN` 권한 확인용 엔드포인트
#[get("/ping")]
pub async fn ping(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    user.require(&RequiredRole::Single(ROLE_ADMIN.to_string()))?;
    Ok(HttpResponse::Ok().json(MessageResponse::new(format!("pong, {}", user.username))))
}
