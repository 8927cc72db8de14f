//! Role Entity
//!
//! 권한 이름(`title`)을 가진 참조 데이터입니다. access 토큰의 `roles` 클레임에는
//! 이 `title`이 그대로 들어갑니다.

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

pub const ROLE_USER: &str = "ROLE_USER";
pub const ROLE_ADMIN: &str = "ROLE_ADMIN";

/// 역할 엔티티
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Role {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 권한 이름 (unique, 예: "ROLE_ADMIN")
    pub title: String,
}

impl Role {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
        }
    }

    /// 권한 이름
    pub fn authority(&self) -> &str {
        &self.title
    }
}
