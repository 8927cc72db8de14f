//! HTTP 요청 핸들러 모듈
//!
//! 핸들러는 `web::Data<AppContext>`에서 서비스를 꺼내 호출하고,
//! 서비스의 `AppError`를 그대로 돌려 HTTP 응답으로 변환합니다.

pub mod registration;
pub mod auth;
pub mod admin;
pub mod products;
