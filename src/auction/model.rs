use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// 경매 로트 모델(보석 한 개 이상을 묶어 하나의 단위로 경매)
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct AuctionLot {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

// 경매 모델(로트당 하나)
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct Auction {
    pub id: i64,
    pub lot_id: i64,
    pub starting_price: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub is_closed: bool,
    pub winning_bid_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl Auction {
    /// 경매 활성 여부
    /// 시작 시간과 종료 시간 사이이면서 마감되지 않았을 때만 참
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.start_time <= now && now <= self.end_time && !self.is_closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn auction(start_offset: i64, end_offset: i64, is_closed: bool) -> Auction {
        let now = Utc::now();
        Auction {
            id: 1,
            lot_id: 1,
            starting_price: 10000,
            start_time: now + Duration::seconds(start_offset),
            end_time: now + Duration::seconds(end_offset),
            is_closed,
            winning_bid_id: None,
            created_at: now,
        }
    }

    /// 시작 전 경매는 비활성
    #[test]
    fn is_active_before_start() {
        assert!(!auction(60, 120, false).is_active(Utc::now()));
    }

    /// 진행 중인 경매는 활성
    #[test]
    fn is_active_within_window() {
        assert!(auction(-60, 60, false).is_active(Utc::now()));
    }

    /// 종료 시간이 지난 경매는 비활성
    #[test]
    fn is_active_after_end() {
        assert!(!auction(-120, -60, false).is_active(Utc::now()));
    }

    /// 마감된 경매는 진행 시간 내라도 비활성
    #[test]
    fn is_active_closed_within_window() {
        assert!(!auction(-60, 60, true).is_active(Utc::now()));
    }

    /// 경계값: 시작 시각과 종료 시각은 포함
    #[test]
    fn is_active_window_is_inclusive() {
        let a = auction(0, 60, false);
        assert!(a.is_active(a.start_time));
        assert!(a.is_active(a.end_time));
    }
}
