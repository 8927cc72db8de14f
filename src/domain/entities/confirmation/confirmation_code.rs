//! ConfirmationCode Entity
//!
//! 가입 확인용 일회성 코드입니다. 한 코드는 정확히 한 사용자를 가리키며,
//! 활성화에 성공하면 삭제됩니다. 만료된 코드는 삭제하지 않고 남겨 둡니다.
//!
//! ```text
//! Pending ──activate 성공──▶ Consumed (삭제, 종료)
//!    │
//!    └──expires_at 경과──▶ Expired (저장 유지, 활성화 불가)
//! ```

use chrono::{DateTime as ChronoDateTime, Utc};
use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 가입 확인 코드 엔티티
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfirmationCode {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 추측 불가능한 코드 문자열 (unique)
    pub code: String,
    /// 만료 시각
    pub expires_at: DateTime,
    /// 대상 사용자 ID (소유하지 않는 참조)
    pub user_id: ObjectId,
}

impl ConfirmationCode {
    pub fn new(code: String, expires_at: ChronoDateTime<Utc>, user_id: ObjectId) -> Self {
        Self {
            id: None,
            code,
            expires_at: DateTime::from_millis(expires_at.timestamp_millis()),
            user_id,
        }
    }

    /// `now` 시점에 만료되었는지 확인
    pub fn is_expired_at(&self, now: ChronoDateTime<Utc>) -> bool {
        self.expires_at.timestamp_millis() < now.timestamp_millis()
    }
}
