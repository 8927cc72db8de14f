//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! [`stores`]의 trait이 서비스와 저장소 사이의 경계입니다.
//! MongoDB를 주 저장소로 사용하며, 테스트/개발용 메모리 구현을 함께 제공합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use crate::repositories::{stores::UserStore, users::UserRepository};
//!
//! let users: Arc<dyn UserStore> = Arc::new(UserRepository::new(database.clone()));
//! let user = users.find_by_username("alice").await?;
//! ```

pub mod stores;
pub mod users;
pub mod roles;
pub mod confirmation;
pub mod products;
pub mod memory;

pub use stores::{ConfirmationCodeStore, ProductStore, RoleStore, UserStore};
