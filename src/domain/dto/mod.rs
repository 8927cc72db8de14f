//! # Data Transfer Objects
//!
//! HTTP 요청/응답 본문 타입입니다. 엔티티와 분리하여 API 계약을 고정합니다.

pub mod users;
pub mod tokens;
pub mod products;
