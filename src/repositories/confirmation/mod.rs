//! 가입 확인 코드 리포지토리 모듈

pub mod confirmation_code_repo;

pub use confirmation_code_repo::*;
