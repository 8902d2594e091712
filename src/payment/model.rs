use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// 결제 모델(경매당 하나)
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct Payment {
    pub id: i64,
    pub auction_id: i64,
    pub buyer_id: i64,
    pub razorpay_order_id: Option<String>,
    pub razorpay_payment_id: Option<String>,
    pub razorpay_signature: Option<String>,
    pub status: String,
    pub method: String,
    pub payment_date: DateTime<Utc>,
}

/// 결제 상태
pub const PAYMENT_STATUS_PENDING: &str = "pending";
pub const PAYMENT_STATUS_COMPLETED: &str = "completed";
pub const PAYMENT_STATUS_FAILED: &str = "failed";
