//! # 사용자 DTO
//!
//! 회원가입, 로그인, 토큰 갱신 요청과 사용자/신원 응답을 정의합니다.

pub mod request;
pub mod response;

pub use request::{RegisterRequest, LoginRequest, RefreshTokenRequest};
pub use response::{UserResponse, RegisterResponse, IdentityResponse};
