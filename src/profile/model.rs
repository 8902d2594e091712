use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// 회원 모델(외부 인증 주체의 최소 표현)
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub joined_at: DateTime<Utc>,
}

// 회원 프로필 모델
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserProfile {
    pub id: i64,
    pub user_id: i64,
    pub user_type: String,
    pub is_seller: bool,
    pub seller_verified: bool,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// 회원 구분
pub const USER_TYPES: [&str; 2] = ["user", "admin"];

impl UserProfile {
    /// 판매 가능 여부
    /// 판매자 플래그와 판매자 인증 플래그가 모두 참일 때만 판매할 수 있다
    pub fn can_sell(&self) -> bool {
        self.is_seller && self.seller_verified
    }
}
