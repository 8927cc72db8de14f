//! 쇼핑몰 인증 서비스 백엔드
//!
//! 회원가입 확인 코드, JWT access/refresh 토큰, 요청 단위 인증 신원을 제공하는 인증 코어입니다.
//!
//! # Features
//!
//! - **가입 확인**: 일회용, 5분 유효 확인 코드로 계정 활성화
//! - **JWT 인증**: access(1일, 역할 포함) / refresh(7일) 토큰, 키 도메인 분리
//! - **요청 인증**: Bearer 토큰 → 역할이 해석된 신원을 요청 extensions에 설치
//! - **저장소**: MongoDB 또는 메모리 (`STORAGE_BACKEND`)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트
//! └─────────────────┘
//!          │  AuthMiddleware (신원 설치, 거부하지 않음)
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리, 401/403 판단
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← TokenService, ClaimsMapper, ConfirmationService, ...
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← UserStore / RoleStore / ConfirmationCodeStore
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB / 메모리 │
//! └─────────────────┘
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod routes;
pub mod handlers;
pub mod errors;
pub mod middlewares;
