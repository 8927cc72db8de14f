//! 상품 카탈로그 서비스 모듈

pub mod product_service;

pub use product_service::ProductService;
