//! # Registration HTTP Handlers
//!
//! | 메서드 | 경로 | 설명 | 상태 코드 |
//! |--------|------|------|-----------|
//! | `POST` | `/api/v1/register` | 회원가입 (확인 코드 발송) | 201 Created |
//! | `GET` | `/api/v1/register/{code}` | 가입 확인 | 200 OK |
//!
//! 확인 실패는 `400 {"error": "invalid code"}` 또는 `400 {"error": "code expired"}`입니다.

use actix_web::{get, post, web, HttpResponse};
use crate::core::AppContext;
use crate::domain::dto::tokens::MessageResponse;
use crate::domain::dto::users::RegisterRequest;
use crate::errors::AppError;

/// 회원가입
#[post("")]
pub async fn register(
    ctx: web::Data<AppContext>,
    payload: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    let response = ctx.user_service.register(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

/// 가입 확인 코드 제출
#[get("/{code}")]
pub async fn confirm(
    ctx: web::Data<AppContext>,
    code: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    ctx.confirmation_service.activate(&code).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("registration confirmed")))
}
