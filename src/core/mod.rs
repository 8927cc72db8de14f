//! # Core Module
//!
//! 저장소와 서비스를 명시적으로 조립하는 모듈입니다.
//!
//! - [`context`] - [`Stores`], [`AuthSettings`], [`AppContext`]
//!
//! ```rust,ignore
//! let stores = Stores::mongodb(database).await?;
//! let ctx = AppContext::build(stores, SigningKeys::from_config()?, mailer, &AuthSettings::from_config());
//!
//! App::new().app_data(web::Data::new(ctx.clone()))
//! ```

pub mod context;

#[cfg(test)]
pub mod testing;

pub use context::{AppContext, AuthSettings, Stores};
