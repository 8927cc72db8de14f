//! Product Entity
//!
//! 판매 상품입니다. 삭제는 `is_active = false`로 표시하는 소프트 삭제이며,
//! 비활성 상품은 공개 조회와 통계에서 빠지지만 복구할 수 있습니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 상품 엔티티
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 상품명 (unique)
    pub title: String,
    /// 가격 (1.00 이상 1000.00 미만)
    pub price: f64,
    /// 이미지 URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// 판매 중 여부 (소프트 삭제 플래그)
    pub is_active: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Product {
    /// 새 상품은 판매 중 상태로 시작합니다.
    pub fn new(title: String, price: f64, image: Option<String>) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            title,
            price,
            image,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn update_details(&mut self, title: String, price: f64, image: Option<String>) {
        self.title = title;
        self.price = price;
        self.image = image;
        self.updated_at = DateTime::now();
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = DateTime::now();
    }

    pub fn restore(&mut self) {
        self.is_active = true;
        self.updated_at = DateTime::now();
    }
}
