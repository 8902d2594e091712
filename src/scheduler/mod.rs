/// 경매 마감 스케줄러
/// 종료 시간이 지난 경매를 주기적으로 마감 처리한다
/// 마감 시 최고 입찰(동일 금액이면 먼저 들어온 입찰)을 낙찰 입찰로 지정하고,
/// 입찰이 없으면 낙찰 입찰 없이 마감한다
// region:    --- Imports
use chrono::Utc;
use sqlx::PgPool;
use std::sync::Arc;
use tokio::time::{interval, Duration};
use tracing::{debug, error};

// endregion: --- Imports

// region:    --- Auction Scheduler
/// 경매 마감 스케줄러
pub struct AuctionScheduler {
    pool: Arc<PgPool>,
}

impl AuctionScheduler {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// 경매 마감 스케줄러 시작
    pub async fn start(&self) {
        let pool = Arc::clone(&self.pool);
        tokio::spawn(async move {
            let mut interval = interval(Duration::from_secs(1)); // 1초마다 실행
            loop {
                interval.tick().await;
                if let Err(e) = Self::close_expired_auctions(&pool).await {
                    error!(
                        "{:<12} --> 경매 마감 처리 중 오류 발생: {:?}",
                        "Scheduler", e
                    );
                }
            }
        });
    }

    /// 종료 시간이 지난 경매 마감 및 낙찰 입찰 지정
    async fn close_expired_auctions(pool: &PgPool) -> Result<(), sqlx::Error> {
        let now = Utc::now();

        let result = sqlx::query(
            "UPDATE auctions a
             SET is_closed = TRUE,
                 winning_bid_id = (
                     SELECT b.id FROM bids b
                     WHERE b.auction_id = a.id
                     ORDER BY b.amount DESC, b.bid_time ASC
                     LIMIT 1
                 )
             WHERE NOT a.is_closed AND a.end_time <= $1",
        )
        .bind(now)
        .execute(pool)
        .await?;

        if result.rows_affected() > 0 {
            debug!(
                "{:<12} --> 경매 {}건이 마감 처리되었습니다.",
                "Scheduler",
                result.rows_affected()
            );
        }

        Ok(())
    }
}
// endregion: --- Auction Scheduler
