//! 인증 관련 HTTP 핸들러
//!
//! 로그인, 토큰 갱신, 현재 신원 조회를 처리합니다.

use actix_web::{get, post, web, HttpResponse};
use validator::Validate;
use crate::core::AppContext;
use crate::domain::auth::authenticated_user::AuthenticatedUser;
use crate::domain::dto::users::{IdentityResponse, LoginRequest, RefreshTokenRequest};
use crate::errors::AppError;

/// 사용자명/비밀번호 로그인
///
/// 응답: `{"accessToken": "...", "refreshToken": "..."}`
#[post("/login")]
pub async fn login(
    ctx: web::Data<AppContext>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let tokens = ctx.session_service.login(payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(tokens))
}

/// refresh 토큰으로 access 토큰 재발급
#[post("/refresh")]
pub async fn refresh(
    ctx: web::Data<AppContext>,
    payload: web::Json<RefreshTokenRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let tokens = ctx.session_service.refresh(&payload.refresh_token).await?;
    Ok(HttpResponse::Ok().json(tokens))
}

/// 현재 요청의 인증 신원
#[get("/me")]
pub async fn me(user: AuthenticatedUser) -> HttpResponse {
    HttpResponse::Ok().json(IdentityResponse::from(&user))
}
