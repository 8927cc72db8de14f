//! 인증/인가 모델
//!
//! 요청 단위 신원([`authenticated_user::AuthenticatedUser`])과
//! 역할 요구사항([`authentication_request::RequiredRole`])을 정의합니다.

pub mod authenticated_user;
pub mod authentication_request;
