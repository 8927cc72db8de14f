//! 토큰 관련 DTO
//!
//! 토큰 쌍 자체는 [`crate::domain::token::token::TokenPair`]가 응답 본문으로 직렬화됩니다.

pub mod response;

pub use response::MessageResponse;
