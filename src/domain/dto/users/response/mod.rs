//! # 사용자 관련 응답 DTO 모듈
//!
//! 엔티티를 그대로 노출하지 않고, 민감 정보(비밀번호 해시)를 제거한 응답 타입으로 변환합니다.

pub mod user_response;

pub use user_response::{UserResponse, RegisterResponse, IdentityResponse};
