//! # 상품 카탈로그 서비스
//!
//! 판매 중인 상품의 조회/통계와 관리자용 생성, 수정, 소프트 삭제, 복구를 담당합니다.
//! 조회와 통계는 판매 중(`is_active`) 상품만 대상으로 합니다.
//! 수정, 삭제, 복구는 비활성 상품에도 적용됩니다.

use std::sync::Arc;
use mongodb::bson::oid::ObjectId;
use validator::Validate;
use crate::domain::dto::products::ProductRequest;
use crate::domain::entities::products::Product;
use crate::errors::{AppError, AppResult};
use crate::repositories::stores::ProductStore;

pub struct ProductService {
    products: Arc<dyn ProductStore>,
}

impl ProductService {
    pub fn new(products: Arc<dyn ProductStore>) -> Self {
        Self { products }
    }

    /// 상품 등록 (판매 중 상태로 저장)
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 상품명, 가격, 이미지 URL 형식 오류
    /// * `AppError::ConflictError` - 상품명 중복
    pub async fn create(&self, request: ProductRequest) -> AppResult<Product> {
        request.validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        let product = self.products
            .save(Product::new(request.title, request.price, request.image))
            .await?;

        log::info!("상품 등록: {}", product.title);
        Ok(product)
    }

    pub async fn list_active(&self) -> AppResult<Vec<Product>> {
        self.products.find_active().await
    }

    /// 판매 중인 상품 조회. 비활성 상품은 없는 것으로 취급합니다.
    pub async fn get_active(&self, id: &str) -> AppResult<Product> {
        self.find(id)
            .await?
            .filter(|product| product.is_active)
            .ok_or_else(|| not_found(id))
    }

    /// 상품 정보 수정
    ///
    /// # Errors
    ///
    /// * `AppError::NotFound` - 존재하지 않는 상품
    /// * `AppError::ValidationError`, `AppError::ConflictError` - 등록과 같은 규칙
    pub async fn update(&self, id: &str, request: ProductRequest) -> AppResult<Product> {
        request.validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        let mut product = self.require(id).await?;
        product.update_details(request.title, request.price, request.image);

        self.products.save(product).await
    }

    /// 소프트 삭제
    pub async fn deactivate(&self, id: &str) -> AppResult<Product> {
        let mut product = self.require(id).await?;
        product.deactivate();

        let saved = self.products.save(product).await?;
        log::info!("상품 판매 중지: {}", saved.title);
        Ok(saved)
    }

    /// 상품명으로 소프트 삭제
    pub async fn deactivate_by_title(&self, title: &str) -> AppResult<Product> {
        let mut product = self.products
            .find_by_title(title)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("상품을 찾을 수 없습니다: {}", title)))?;
        product.deactivate();

        let saved = self.products.save(product).await?;
        log::info!("상품 판매 중지: {}", saved.title);
        Ok(saved)
    }

    /// 소프트 삭제된 상품 복구
    pub async fn restore(&self, id: &str) -> AppResult<Product> {
        let mut product = self.require(id).await?;
        product.restore();

        let saved = self.products.save(product).await?;
        log::info!("상품 판매 재개: {}", saved.title);
        Ok(saved)
    }

    pub async fn active_count(&self) -> AppResult<usize> {
        Ok(self.products.find_active().await?.len())
    }

    /// 판매 중인 상품 가격 합계 (소수 둘째 자리 반올림)
    pub async fn active_total_cost(&self) -> AppResult<f64> {
        let total: f64 = self.products.find_active().await?.iter().map(|p| p.price).sum();
        Ok(round_cents(total))
    }

    /// 판매 중인 상품 평균 가격, 상품이 없으면 0
    pub async fn active_average_price(&self) -> AppResult<f64> {
        let active = self.products.find_active().await?;
        if active.is_empty() {
            return Ok(0.0);
        }

        let total: f64 = active.iter().map(|p| p.price).sum();
        Ok(round_cents(total / active.len() as f64))
    }

    async fn find(&self, id: &str) -> AppResult<Option<Product>> {
        // 잘못된 형식의 ID는 존재하지 않는 상품과 같다
        match ObjectId::parse_str(id) {
            Ok(oid) => self.products.find_by_id(&oid).await,
            Err(_) => Ok(None),
        }
    }

    async fn require(&self, id: &str) -> AppResult<Product> {
        self.find(id).await?.ok_or_else(|| not_found(id))
    }
}

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("상품을 찾을 수 없습니다: {}", id))
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
