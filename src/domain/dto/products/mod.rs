//! # 상품 DTO

pub mod request;
pub mod response;

pub use request::ProductRequest;
pub use response::ProductResponse;
