//! 상품 생성/수정 요청 DTO
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// 상품 생성/수정 요청
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProductRequest {
    /// 상품명 (대문자로 시작, 이후 소문자/공백, 최소 3자)
    #[validate(custom(function = "validate_title"))]
    pub title: String,

    #[validate(range(
        min = 1.0,
        exclusive_max = 1000.0,
        message = "가격은 1 이상 1000 미만이어야 합니다"
    ))]
    pub price: f64,

    #[validate(url(message = "유효한 이미지 URL을 입력해주세요"))]
    pub image: Option<String>,
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    let mut chars = title.chars();
    let valid = title.chars().count() >= 3
        && chars.next().is_some_and(|c| c.is_ascii_uppercase())
        && chars.all(|c| c.is_ascii_lowercase() || c == ' ');

    if !valid {
        return Err(ValidationError::new("invalid_title")
            .with_message("상품명은 대문자로 시작하는 3자 이상의 영문이어야 합니다".into()));
    }

    Ok(())
}
