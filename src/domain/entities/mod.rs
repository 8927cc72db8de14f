//! # Domain Entities
//!
//! MongoDB에 저장되는 영속 엔티티들입니다.
//!
//! - [`users`] - 사용자 (활성화 플래그, 역할 이름 목록)
//! - [`roles`] - 역할 참조 데이터
//! - [`confirmation`] - 가입 확인 코드
//! - [`products`] - 판매 상품 (소프트 삭제)

pub mod users;
pub mod roles;
pub mod confirmation;
pub mod products;
