//! 미들웨어 모듈
//!
//! ActixWeb 요청 처리 파이프라인에서 사용되는 미들웨어들을 제공합니다.
//!
//! # 제공 미들웨어
//!
//! ### 인증 미들웨어 (AuthMiddleware)
//! - Bearer 토큰 추출 및 access 키 도메인으로 검증
//! - 검증된 신원을 request extension에 저장 (요청 종료 시 함께 해제)
//! - 요청을 거부하지 않음 (거부는 `AuthenticatedUser` 추출자가 담당)
//!
//! # 사용 방법
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//! use crate::middlewares::AuthMiddleware;
//!
//! App::new()
//!     .app_data(web::Data::new(ctx.clone()))
//!     .wrap(AuthMiddleware::from_context(&ctx))
//!     .configure(configure_all_routes)
//! ```

pub mod auth_middleware;
mod auth_inner;

pub use auth_middleware::AuthMiddleware;
