//! # Domain Layer Module
//!
//! 도메인 계층을 구성하는 핵심 모듈입니다.
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── Entities  - 영속 엔티티 (User, Role, ConfirmationCode)
//! ├── DTOs      - 요청/응답 본문
//! └── Models    - 요청 단위 인증 신원, JWT 클레임
//! ```

pub mod entities;
pub mod dto;
pub mod models;

pub use models::*;
