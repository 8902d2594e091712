// region:    --- Imports
use super::queries;
use crate::auction::model::{Auction, AuctionLot};
use crate::bidding::model::Bid;
use crate::catalog::model::{Gemstone, GemstoneType};
use crate::database::DatabaseManager;
use crate::moderation::model::Report;
use crate::payment::model::Payment;
use crate::profile::model::{User, UserProfile};
use crate::watchlist::model::WatchlistEntry;
use sqlx::Error as SqlxError;
use sqlx::Row;
use tracing::info;

// endregion: --- Imports

// region:    --- Query Handlers

/// 회원 조회
pub async fn get_user(db_manager: &DatabaseManager, user_id: i64) -> Result<User, SqlxError> {
    info!("{:<12} --> 회원 조회 id: {}", "Query", user_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, User>(queries::GET_USER)
                    .bind(user_id)
                    .fetch_one(&mut **tx)
                    .await
            })
        })
        .await
}

/// 프로필 조회
pub async fn get_profile(
    db_manager: &DatabaseManager,
    user_id: i64,
) -> Result<UserProfile, SqlxError> {
    info!("{:<12} --> 프로필 조회 user_id: {}", "Query", user_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, UserProfile>(queries::GET_PROFILE)
                    .bind(user_id)
                    .fetch_one(&mut **tx)
                    .await
            })
        })
        .await
}

/// 보석 종류 목록 조회
pub async fn get_gemstone_types(
    db_manager: &DatabaseManager,
) -> Result<Vec<GemstoneType>, SqlxError> {
    info!("{:<12} --> 보석 종류 목록 조회", "Query");
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, GemstoneType>(queries::GET_GEMSTONE_TYPES)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 보석 조회
pub async fn get_gemstone(
    db_manager: &DatabaseManager,
    gemstone_id: i64,
) -> Result<Gemstone, SqlxError> {
    info!("{:<12} --> 보석 조회 id: {}", "Query", gemstone_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Gemstone>(queries::GET_GEMSTONE)
                    .bind(gemstone_id)
                    .fetch_one(&mut **tx)
                    .await
            })
        })
        .await
}

/// 활성 보석 목록 조회
pub async fn get_active_gemstones(
    db_manager: &DatabaseManager,
) -> Result<Vec<Gemstone>, SqlxError> {
    info!("{:<12} --> 활성 보석 목록 조회", "Query");
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Gemstone>(queries::GET_ACTIVE_GEMSTONES)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 로트 조회
pub async fn get_lot(db_manager: &DatabaseManager, lot_id: i64) -> Result<AuctionLot, SqlxError> {
    info!("{:<12} --> 로트 조회 id: {}", "Query", lot_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, AuctionLot>(queries::GET_LOT)
                    .bind(lot_id)
                    .fetch_one(&mut **tx)
                    .await
            })
        })
        .await
}

/// 모든 로트 조회
pub async fn get_all_lots(db_manager: &DatabaseManager) -> Result<Vec<AuctionLot>, SqlxError> {
    info!("{:<12} --> 모든 로트 조회", "Query");
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, AuctionLot>(queries::GET_ALL_LOTS)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 로트 구성 보석 조회
pub async fn get_lot_gemstones(
    db_manager: &DatabaseManager,
    lot_id: i64,
) -> Result<Vec<Gemstone>, SqlxError> {
    info!("{:<12} --> 로트 구성 보석 조회 lot_id: {}", "Query", lot_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Gemstone>(queries::GET_LOT_GEMSTONES)
                    .bind(lot_id)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 경매 조회
pub async fn get_auction(
    db_manager: &DatabaseManager,
    auction_id: i64,
) -> Result<Auction, SqlxError> {
    info!("{:<12} --> 경매 조회 id: {}", "Query", auction_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Auction>(queries::GET_AUCTION)
                    .bind(auction_id)
                    .fetch_one(&mut **tx)
                    .await
            })
        })
        .await
}

/// 모든 경매 조회
pub async fn get_all_auctions(db_manager: &DatabaseManager) -> Result<Vec<Auction>, SqlxError> {
    info!("{:<12} --> 모든 경매 조회", "Query");
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Auction>(queries::GET_ALL_AUCTIONS)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 경매 입찰 목록 조회(금액 내림차순)
pub async fn get_auction_bids(
    db_manager: &DatabaseManager,
    auction_id: i64,
) -> Result<Vec<Bid>, SqlxError> {
    info!("{:<12} --> 경매 입찰 목록 조회 id: {}", "Query", auction_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Bid>(queries::GET_AUCTION_BIDS)
                    .bind(auction_id)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 최고 입찰가 조회
pub async fn get_highest_bid(
    db_manager: &DatabaseManager,
    auction_id: i64,
) -> Result<Option<i64>, SqlxError> {
    info!("{:<12} --> 최고 입찰가 조회 id: {}", "Query", auction_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                let result = sqlx::query(queries::GET_HIGHEST_BID)
                    .bind(auction_id)
                    .fetch_one(&mut **tx)
                    .await?;

                Ok(result.get("highest_bid"))
            })
        })
        .await
}

/// 경매 결제 조회
pub async fn get_auction_payment(
    db_manager: &DatabaseManager,
    auction_id: i64,
) -> Result<Option<Payment>, SqlxError> {
    info!("{:<12} --> 경매 결제 조회 id: {}", "Query", auction_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Payment>(queries::GET_AUCTION_PAYMENT)
                    .bind(auction_id)
                    .fetch_optional(&mut **tx)
                    .await
            })
        })
        .await
}

/// 미처리 신고 목록 조회
pub async fn get_open_reports(db_manager: &DatabaseManager) -> Result<Vec<Report>, SqlxError> {
    info!("{:<12} --> 미처리 신고 목록 조회", "Query");
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Report>(queries::GET_OPEN_REPORTS)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 회원 관심 목록 조회
pub async fn get_user_watchlist(
    db_manager: &DatabaseManager,
    user_id: i64,
) -> Result<Vec<WatchlistEntry>, SqlxError> {
    info!("{:<12} --> 회원 관심 목록 조회 user_id: {}", "Query", user_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, WatchlistEntry>(queries::GET_USER_WATCHLIST)
                    .bind(user_id)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

// endregion: --- Query Handlers
