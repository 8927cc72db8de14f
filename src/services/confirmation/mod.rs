//! 가입 확인 모듈
//!
//! 확인 코드 발급/소비와 코드 전달 경계를 제공합니다.

pub mod confirmation_service;
pub mod mailer;

pub use confirmation_service::ConfirmationService;
pub use mailer::{ConfirmationMailer, LogMailer};
