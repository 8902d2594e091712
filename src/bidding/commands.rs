/// 입찰 관련 커맨드 처리
/// 경매 로우를 잠근 단일 트랜잭션 안에서 검증과 기록을 함께 수행한다
// region:    --- Imports
use crate::auction::model::Auction;
use crate::bidding::model::Bid;
use crate::database::{db_error_to_json, DatabaseManager};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
// endregion: --- Imports

// region:    --- Commands
/// 입찰 명령
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PlaceBidCommand {
    pub auction_id: i64,
    pub bidder_id: i64,
    pub amount: i64,
}

/// 입찰
/// 1. 경매 로우 잠금(동시 입찰 직렬화)
/// 2. 경매 시간/마감 검증
/// 3. 입찰 금액 검증(최고 입찰가 초과, 최초 입찰은 시작가 이상)
/// 4. 입찰 기록
pub async fn handle_place_bid(
    cmd: PlaceBidCommand,
    db_manager: &DatabaseManager,
) -> Result<Bid, serde_json::Value> {
    info!("{:<12} --> 입찰 요청 처리 시작: {:?}", "Command", cmd);
    let PlaceBidCommand {
        auction_id,
        bidder_id,
        amount,
    } = cmd;

    let placed = db_manager
        .transaction(|tx| {
            Box::pin(async move {
                // 경매 로우 잠금
                let auction = sqlx::query_as::<_, Auction>(
                    "SELECT id, lot_id, starting_price, start_time, end_time, is_closed,
                         winning_bid_id, created_at
                     FROM auctions WHERE id = $1
                     FOR UPDATE",
                )
                .bind(auction_id)
                .fetch_optional(&mut **tx)
                .await?;

                let auction = match auction {
                    Some(auction) => auction,
                    None => {
                        return Ok(Err(serde_json::json!({
                            "error": "경매를 찾을 수 없습니다.",
                            "code": "NOT_FOUND"
                        })))
                    }
                };

                let now = Utc::now();

                // 경매 시간/마감 검증
                if let Err(e) = check_bid_window(&auction, now) {
                    return Ok(Err(e));
                }

                // 현재 최고 입찰가 조회
                let highest = sqlx::query_scalar::<_, Option<i64>>(
                    "SELECT MAX(amount) FROM bids WHERE auction_id = $1",
                )
                .bind(auction_id)
                .fetch_one(&mut **tx)
                .await?;

                // 입찰 금액 검증
                if let Err(e) = check_bid_amount(amount, highest, auction.starting_price) {
                    return Ok(Err(e));
                }

                // 입찰 기록
                let bid = sqlx::query_as::<_, Bid>(
                    "INSERT INTO bids (auction_id, bidder_id, amount, bid_time)
                     VALUES ($1, $2, $3, $4)
                     RETURNING id, auction_id, bidder_id, amount, bid_time",
                )
                .bind(auction_id)
                .bind(bidder_id)
                .bind(amount)
                .bind(now)
                .fetch_one(&mut **tx)
                .await?;

                Ok(Ok(bid))
            })
        })
        .await
        .map_err(|e: sqlx::Error| db_error_to_json(&e))?;

    placed
}

/// 입찰 가능 시간 검증
fn check_bid_window(auction: &Auction, now: DateTime<Utc>) -> Result<(), serde_json::Value> {
    if auction.is_closed {
        return Err(serde_json::json!({
            "error": "경매가 이미 마감되었습니다.",
            "code": "ALREADY_CLOSED"
        }));
    }
    if now < auction.start_time {
        return Err(serde_json::json!({
            "error": "경매가 아직 시작되지 않았습니다.",
            "code": "NOT_STARTED"
        }));
    }
    if now > auction.end_time {
        return Err(serde_json::json!({
            "error": "경매가 이미 종료되었습니다.",
            "code": "ALREADY_ENDED"
        }));
    }
    Ok(())
}

/// 입찰 금액 검증
/// 최초 입찰은 시작가 이상, 이후 입찰은 현재 최고 입찰가 초과여야 한다
fn check_bid_amount(
    amount: i64,
    highest: Option<i64>,
    starting_price: i64,
) -> Result<(), serde_json::Value> {
    let valid = match highest {
        Some(h) => amount > h,
        None => amount >= starting_price,
    };
    if !valid {
        return Err(serde_json::json!({
            "error": "입찰 금액이 현재 가격보다 낮습니다.",
            "code": "LOW_BID",
            "bid_amount": amount,
            "current_price": highest.unwrap_or(starting_price)
        }));
    }
    Ok(())
}
// endregion: --- Commands

// endregion: --- Tests
