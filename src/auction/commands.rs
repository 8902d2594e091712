/// 경매 관련 커맨드 처리
/// 1. 로트 구성
/// 2. 경매 개설
/// 3. 경매 마감(낙찰 입찰 지정)
// region:    --- Imports
use crate::auction::model::{Auction, AuctionLot};
use crate::database::{db_error_to_json, DatabaseManager};
use serde::{Deserialize, Serialize};
use tracing::info;
// endregion: --- Imports

// region:    --- Commands
/// 로트 구성 명령
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateLotCommand {
    pub name: String,
    pub description: Option<String>,
    pub gemstone_ids: Vec<i64>,
}

/// 경매 개설 명령
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateAuctionCommand {
    pub lot_id: i64,
    pub starting_price: i64,
    pub start_time: chrono::DateTime<chrono::Utc>,
    pub end_time: chrono::DateTime<chrono::Utc>,
}

/// 1. 로트 구성(보석 한 개 이상 필수)
pub async fn handle_create_lot(
    cmd: CreateLotCommand,
    db_manager: &DatabaseManager,
) -> Result<AuctionLot, serde_json::Value> {
    info!("{:<12} --> 로트 구성 시작: {:?}", "Command", cmd);

    if cmd.gemstone_ids.is_empty() {
        return Err(serde_json::json!({
            "error": "로트에는 보석이 한 개 이상 포함되어야 합니다.",
            "code": "EMPTY_LOT"
        }));
    }

    let CreateLotCommand {
        name,
        description,
        gemstone_ids,
    } = cmd;

    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                let lot = sqlx::query_as::<_, AuctionLot>(
                    "INSERT INTO auction_lots (name, description)
                     VALUES ($1, $2)
                     RETURNING id, name, description, created_at",
                )
                .bind(&name)
                .bind(&description)
                .fetch_one(&mut **tx)
                .await?;

                // 로트 구성 보석 연결
                for gemstone_id in gemstone_ids {
                    sqlx::query("INSERT INTO lot_gemstones (lot_id, gemstone_id) VALUES ($1, $2)")
                        .bind(lot.id)
                        .bind(gemstone_id)
                        .execute(&mut **tx)
                        .await?;
                }

                Ok(lot)
            })
        })
        .await
        .map_err(|e| db_error_to_json(&e))
}

/// 2. 경매 개설(로트당 하나)
pub async fn handle_create_auction(
    cmd: CreateAuctionCommand,
    db_manager: &DatabaseManager,
) -> Result<Auction, serde_json::Value> {
    info!("{:<12} --> 경매 개설 시작: {:?}", "Command", cmd);

    // 경매 시간 검증
    if cmd.start_time >= cmd.end_time {
        return Err(serde_json::json!({
            "error": "경매 종료 시간은 시작 시간보다 뒤여야 합니다.",
            "code": "INVALID_WINDOW"
        }));
    }

    // 시작가 검증
    if cmd.starting_price < 0 {
        return Err(serde_json::json!({
            "error": "시작가는 0 이상이어야 합니다.",
            "code": "INVALID_PRICE"
        }));
    }

    let CreateAuctionCommand {
        lot_id,
        starting_price,
        start_time,
        end_time,
    } = cmd;

    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Auction>(
                    "INSERT INTO auctions (lot_id, starting_price, start_time, end_time)
                     VALUES ($1, $2, $3, $4)
                     RETURNING id, lot_id, starting_price, start_time, end_time, is_closed,
                         winning_bid_id, created_at",
                )
                .bind(lot_id)
                .bind(starting_price)
                .bind(start_time)
                .bind(end_time)
                .fetch_one(&mut **tx)
                .await
            })
        })
        .await
        .map_err(|e| db_error_to_json(&e))
}

/// 3. 경매 마감
/// 최고 입찰(동일 금액이면 먼저 들어온 입찰)을 낙찰 입찰로 지정하고 마감 처리한다
/// 입찰이 없으면 낙찰 입찰 없이 마감된다
pub async fn handle_close_auction(
    auction_id: i64,
    db_manager: &DatabaseManager,
) -> Result<Auction, serde_json::Value> {
    info!("{:<12} --> 경매 마감 시작 id: {}", "Command", auction_id);

    let closed = db_manager
        .transaction(|tx| {
            Box::pin(async move {
                let winning_bid_id = sqlx::query_scalar::<_, i64>(
                    "SELECT id FROM bids WHERE auction_id = $1
                     ORDER BY amount DESC, bid_time ASC
                     LIMIT 1",
                )
                .bind(auction_id)
                .fetch_optional(&mut **tx)
                .await?;

                sqlx::query_as::<_, Auction>(
                    "UPDATE auctions SET is_closed = TRUE, winning_bid_id = $2
                     WHERE id = $1 AND NOT is_closed
                     RETURNING id, lot_id, starting_price, start_time, end_time, is_closed,
                         winning_bid_id, created_at",
                )
                .bind(auction_id)
                .bind(winning_bid_id)
                .fetch_optional(&mut **tx)
                .await
            })
        })
        .await
        .map_err(|e| db_error_to_json(&e))?;

    match closed {
        Some(auction) => Ok(auction),
        None => Err(serde_json::json!({
            "error": "경매가 이미 마감되었거나 존재하지 않습니다.",
            "code": "ALREADY_CLOSED"
        })),
    }
}
// endregion: --- Commands
