use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// 관심 목록 모델((회원, 경매) 쌍은 유일)
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct WatchlistEntry {
    pub id: i64,
    pub user_id: i64,
    pub auction_id: i64,
    pub added_at: DateTime<Utc>,
}
