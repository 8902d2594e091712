use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// 보석 종류 모델
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct GemstoneType {
    pub id: i64,
    pub name: String,
}

// 보석 모델
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct Gemstone {
    pub id: i64,
    pub seller_id: i64,
    pub name: String,
    pub description: String,
    pub gemstone_type_id: Option<i64>,
    pub carat_points: i64,
    pub clarity: String,
    pub certification_path: Option<String>,
    pub certificate_id: Option<String>,
    pub certificate_issuer: Option<String>,
    pub image_path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
}

/// 투명도 등급(FL ~ I3, 11단계)
pub const CLARITY_GRADES: [&str; 11] = [
    "FL", "IF", "VVS1", "VVS2", "VS1", "VS2", "SI1", "SI2", "I1", "I2", "I3",
];

/// 투명도 등급 코드 검증
pub fn is_valid_clarity(code: &str) -> bool {
    CLARITY_GRADES.contains(&code)
}

impl Gemstone {
    /// 캐럿(1캐럿 = 100포인트로 저장)
    pub fn carat(&self) -> f64 {
        self.carat_points as f64 / 100.0
    }
}
