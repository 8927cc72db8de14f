//! 사용자 관리 서비스 모듈
//!
//! 회원가입과 자격 증명 확인을 담당합니다.
//!
//! # Security
//!
//! - bcrypt 비밀번호 해싱 (환경별 cost)
//! - 이메일/사용자명 중복 방지
//! - 가입 확인 전 계정은 로그인 불가
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::users::UserService;
//!
//! let response = user_service.register(request).await?;
//! let user = user_service.verify_password("alice", "Passw0rd!").await?;
//! ```

pub mod user_service;

pub use user_service::UserService;
