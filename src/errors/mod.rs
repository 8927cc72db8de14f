//! 에러 모듈
//!
//! [`errors::AppError`]와 HTTP 응답 매핑을 제공합니다.

pub mod errors;

pub use errors::*;
