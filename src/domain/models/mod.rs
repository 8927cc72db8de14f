//! # Domain Models
//!
//! 영속되지 않는 도메인 모델입니다.
//!
//! - [`auth`] - 요청 단위 인증 신원과 역할 요구사항
//! - [`token`] - JWT 클레임 스키마와 토큰 쌍

pub mod auth;
pub mod token;
