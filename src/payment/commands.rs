/// 결제 관련 커맨드 처리
/// 1. 결제 개설(마감된 경매의 낙찰자만, 경매당 하나)
/// 2. 결제 완료(razorpay 거래 정보 기록)
/// 3. 결제 실패
// region:    --- Imports
use crate::auction::model::Auction;
use crate::bidding::model::Bid;
use crate::database::{db_error_to_json, DatabaseManager};
use crate::payment::model::{
    Payment, PAYMENT_STATUS_COMPLETED, PAYMENT_STATUS_FAILED, PAYMENT_STATUS_PENDING,
};
use serde::{Deserialize, Serialize};
use tracing::info;
// endregion: --- Imports

// region:    --- Commands
/// 결제 개설 명령
#[derive(Debug, Serialize, Deserialize)]
pub struct OpenPaymentCommand {
    pub auction_id: i64,
    pub buyer_id: i64,
}

/// 결제 완료 명령
#[derive(Debug, Serialize, Deserialize)]
pub struct CompletePaymentCommand {
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    pub razorpay_signature: String,
}

/// 1. 결제 개설
/// 마감된 경매의 낙찰자만 결제를 개설할 수 있고, 경매당 결제는 하나뿐이다
pub async fn handle_open_payment(
    cmd: OpenPaymentCommand,
    db_manager: &DatabaseManager,
) -> Result<Payment, serde_json::Value> {
    info!("{:<12} --> 결제 개설 시작: {:?}", "Command", cmd);
    let OpenPaymentCommand {
        auction_id,
        buyer_id,
    } = cmd;

    let opened = db_manager
        .transaction(|tx| {
            Box::pin(async move {
                let auction = sqlx::query_as::<_, Auction>(
                    "SELECT id, lot_id, starting_price, start_time, end_time, is_closed,
                         winning_bid_id, created_at
                     FROM auctions WHERE id = $1",
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

                // 마감 전에는 결제할 수 없다
                if !auction.is_closed {
                    return Ok(Err(serde_json::json!({
                        "error": "마감되지 않은 경매는 결제할 수 없습니다.",
                        "code": "NOT_CLOSED"
                    })));
                }

                // 낙찰 입찰 확인
                let winning_bid_id = match auction.winning_bid_id {
                    Some(id) => id,
                    None => {
                        return Ok(Err(serde_json::json!({
                            "error": "낙찰 입찰이 없는 경매입니다.",
                            "code": "NO_WINNING_BID"
                        })))
                    }
                };

                let winning_bid = sqlx::query_as::<_, Bid>(
                    "SELECT id, auction_id, bidder_id, amount, bid_time FROM bids WHERE id = $1",
                )
                .bind(winning_bid_id)
                .fetch_one(&mut **tx)
                .await?;

                // 낙찰자 본인 확인
                if winning_bid.bidder_id != buyer_id {
                    return Ok(Err(serde_json::json!({
                        "error": "낙찰자만 결제할 수 있습니다.",
                        "code": "NOT_WINNER"
                    })));
                }

                let payment = sqlx::query_as::<_, Payment>(
                    "INSERT INTO payments (auction_id, buyer_id, status)
                     VALUES ($1, $2, $3)
                     RETURNING id, auction_id, buyer_id, razorpay_order_id, razorpay_payment_id,
                         razorpay_signature, status, method, payment_date",
                )
                .bind(auction_id)
                .bind(buyer_id)
                .bind(PAYMENT_STATUS_PENDING)
                .fetch_one(&mut **tx)
                .await?;

                Ok(Ok(payment))
            })
        })
        .await
        .map_err(|e: sqlx::Error| db_error_to_json(&e))?;

    opened
}

/// 2. 결제 완료(대기 상태의 결제만)
pub async fn handle_complete_payment(
    payment_id: i64,
    cmd: CompletePaymentCommand,
    db_manager: &DatabaseManager,
) -> Result<Payment, serde_json::Value> {
    info!(
        "{:<12} --> 결제 완료 처리 시작 id: {}",
        "Command", payment_id
    );
    let CompletePaymentCommand {
        razorpay_order_id,
        razorpay_payment_id,
        razorpay_signature,
    } = cmd;

    let updated = db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Payment>(
                    "UPDATE payments
                     SET status = $2, razorpay_order_id = $3, razorpay_payment_id = $4,
                         razorpay_signature = $5
                     WHERE id = $1 AND status = 'pending'
                     RETURNING id, auction_id, buyer_id, razorpay_order_id, razorpay_payment_id,
                         razorpay_signature, status, method, payment_date",
                )
                .bind(payment_id)
                .bind(PAYMENT_STATUS_COMPLETED)
                .bind(&razorpay_order_id)
                .bind(&razorpay_payment_id)
                .bind(&razorpay_signature)
                .fetch_optional(&mut **tx)
                .await
            })
        })
        .await
        .map_err(|e| db_error_to_json(&e))?;

    match updated {
        Some(payment) => Ok(payment),
        None => Err(serde_json::json!({
            "error": "대기 상태의 결제를 찾을 수 없습니다.",
            "code": "INVALID_PAYMENT_STATE"
        })),
    }
}

/// 3. 결제 실패(대기 상태의 결제만)
pub async fn handle_fail_payment(
    payment_id: i64,
    db_manager: &DatabaseManager,
) -> Result<Payment, serde_json::Value> {
    info!(
        "{:<12} --> 결제 실패 처리 시작 id: {}",
        "Command", payment_id
    );

    let updated = db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Payment>(
                    "UPDATE payments SET status = $2
                     WHERE id = $1 AND status = 'pending'
                     RETURNING id, auction_id, buyer_id, razorpay_order_id, razorpay_payment_id,
                         razorpay_signature, status, method, payment_date",
                )
                .bind(payment_id)
                .bind(PAYMENT_STATUS_FAILED)
                .fetch_optional(&mut **tx)
                .await
            })
        })
        .await
        .map_err(|e| db_error_to_json(&e))?;

    match updated {
        Some(payment) => Ok(payment),
        None => Err(serde_json::json!({
            "error": "대기 상태의 결제를 찾을 수 없습니다.",
            "code": "INVALID_PAYMENT_STATE"
        })),
    }
}
// endregion: --- Commands
