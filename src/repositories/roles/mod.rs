//! 역할 리포지토리 모듈

pub mod role_repo;

pub use role_repo::*;
