use serde::{Deserialize, Serialize};
use crate::domain::entities::products::Product;

/// 공개 상품 정보
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductResponse {
    pub id: String,
    pub title: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.map(|id| id.to_hex()).unwrap_or_default(),
            title: product.title,
            price: product.price,
            image: product.image,
        }
    }
}
