//! Users Entity Module
//!
//! 사용자 도메인 엔티티를 정의합니다.
//!
//! ```rust,ignore
//! use crate::domain::entities::users::User;
//!
//! let user = User::new_local("alice".into(), "alice@example.com".into(), hashed_password);
//! assert!(!user.is_active);
//! ```

pub mod user;

pub use user::*;
