//! 인증 서비스 모듈
//!
//! 토큰 발급/검증, 클레임 → 신원 변환, 로그인 세션을 담당합니다.
//!
//! # Security
//!
//! - HMAC-SHA256 토큰 서명, access/refresh 키 도메인 분리
//! - 만료 시각은 서명된 payload에 포함 (leeway 0)
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use crate::services::auth::{SigningKeys, TokenService};
//!
//! let tokens = Arc::new(TokenService::new(SigningKeys::from_config()?));
//! let pair = tokens.issue_token_pair(&identity)?;
//! ```

pub mod signing_keys;
pub mod token_service;
pub mod claims_mapper;
pub mod session_service;

pub use signing_keys::SigningKeys;
pub use token_service::TokenService;
pub use claims_mapper::ClaimsMapper;
pub use session_service::SessionService;
