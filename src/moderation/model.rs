use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// 신고 모델
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct Report {
    pub id: i64,
    pub reported_by: i64,
    pub gemstone_id: i64,
    pub reason: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// 신고 처리 상태
pub const REPORT_STATUSES: [&str; 3] = ["open", "reviewed", "resolved"];
