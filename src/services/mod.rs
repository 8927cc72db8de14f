//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 모든 서비스는 `main`에서 한 번 생성되어 [`crate::core::AppContext`]로 묶이고,
//! `Arc`로 공유됩니다. 전역 싱글톤은 없습니다.
//!
//! - [`auth`] - 토큰 발급/검증, 클레임 → 신원 변환, 로그인/갱신
//! - [`confirmation`] - 가입 확인 코드 발급/소비
//! - [`users`] - 회원가입, 자격 증명 확인
//! - [`products`] - 상품 카탈로그 (소프트 삭제)

pub mod users;
pub mod auth;
pub mod confirmation;
pub mod products;
