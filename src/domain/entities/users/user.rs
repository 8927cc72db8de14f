//! User Entity Implementation
//!
//! 쇼핑몰 사용자 엔티티입니다. 가입 직후에는 비활성 상태이며,
//! 이메일로 받은 확인 코드를 제출해야 활성화됩니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use crate::domain::entities::roles::role::ROLE_USER;

/// 사용자 엔티티
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 로그인 이름 (unique, 토큰의 subject)
    pub username: String,
    /// 사용자 이메일 (unique, 확인 코드 발송 대상)
    pub email: String,
    /// bcrypt 해시된 비밀번호
    pub password_hash: String,
    /// 계정 활성화 여부 (가입 확인 전에는 false)
    pub is_active: bool,
    /// 보유 역할 이름 목록 (예: "ROLE_USER")
    pub roles: Vec<String>,
    /// 생성 시간
    pub created_at: DateTime,
    /// 수정 시간
    pub updated_at: DateTime,
}

impl User {
    /// 새 로컬 사용자 생성
    ///
    /// 비활성 상태와 기본 역할 `ROLE_USER`로 시작합니다.
    pub fn new_local(username: String, email: String, password_hash: String) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            username,
            email,
            password_hash,
            is_active: false,
            roles: vec![ROLE_USER.to_string()],
            created_at: now,
            updated_at: now,
        }
    }

    /// 확인 대기 중인 계정의 가입 정보를 새 요청으로 교체
    ///
    /// 확인 코드가 만료된 사용자가 다시 가입할 때 사용합니다.
    pub fn replace_pending_details(&mut self, username: String, email: String, password_hash: String) {
        self.username = username;
        self.email = email;
        self.password_hash = password_hash;
        self.updated_at = DateTime::now();
    }

    /// 가입 확인 완료 처리
    pub fn activate(&mut self) {
        self.is_active = true;
        self.updated_at = DateTime::now();
    }
}
