// region:    --- Imports
use crate::database::DatabaseManager;
use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};
// endregion: --- Imports

// region:    --- Modules
mod auction;
mod bidding;
mod catalog;
mod database;
mod handlers;
mod moderation;
mod payment;
mod profile;
mod query;
mod scheduler;
mod watchlist;

// endregion: --- Modules

// region:    --- Main
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // logging 초기화
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .without_time()
        .with_target(false)
        .init();

    // DatabaseManager 생성
    let db_manager = Arc::new(DatabaseManager::new().await);

    // 데이터베이스 초기화
    if let Err(e) = db_manager.initialize_database().await {
        error!("{:<12} --> 데이터베이스 초기화 실패: {:?}", "Main", e);
        return Err(e.into());
    }
    info!("{:<12} --> 데이터베이스 초기화 성공", "Main");

    // 경매 마감 스케줄러 시작
    let scheduler = scheduler::AuctionScheduler::new(db_manager.get_pool());
    scheduler.start().await;

    // 테스트 페이지를 위한 cors 설정
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // 라우터 설정
    let routes_all = Router::new()
        // 회원/프로필
        .route("/users", post(handlers::handle_create_user))
        .route(
            "/users/:id",
            get(handlers::handle_get_user).delete(handlers::handle_delete_user),
        )
        .route("/profiles", post(handlers::handle_create_profile))
        .route("/profiles/:user_id", get(handlers::handle_get_profile))
        .route(
            "/profiles/:user_id/mark-seller",
            post(handlers::handle_mark_seller),
        )
        .route(
            "/profiles/:user_id/verify-seller",
            post(handlers::handle_verify_seller),
        )
        // 보석 카탈로그
        .route(
            "/gemstone-types",
            post(handlers::handle_create_gemstone_type).get(handlers::handle_get_gemstone_types),
        )
        .route(
            "/gemstone-types/:id",
            delete(handlers::handle_delete_gemstone_type),
        )
        .route(
            "/gemstones",
            post(handlers::handle_create_gemstone).get(handlers::handle_get_gemstones),
        )
        .route(
            "/gemstones/:id",
            get(handlers::handle_get_gemstone).delete(handlers::handle_delete_gemstone),
        )
        .route(
            "/gemstones/:id/deactivate",
            post(handlers::handle_deactivate_gemstone),
        )
        // 로트/경매
        .route(
            "/lots",
            post(handlers::handle_create_lot).get(handlers::handle_get_lots),
        )
        .route("/lots/:id", get(handlers::handle_get_lot))
        .route(
            "/auctions",
            post(handlers::handle_create_auction).get(handlers::handle_get_auctions),
        )
        .route("/auctions/:id", get(handlers::handle_get_auction))
        .route("/auctions/:id/close", post(handlers::handle_close_auction))
        // 입찰
        .route("/bid", post(handlers::handle_bid))
        .route("/auctions/:id/bids", get(handlers::handle_get_auction_bids))
        .route(
            "/auctions/:id/highest-bid",
            get(handlers::handle_get_highest_bid),
        )
        // 결제
        .route("/payments", post(handlers::handle_open_payment))
        .route(
            "/payments/:id/complete",
            post(handlers::handle_complete_payment),
        )
        .route("/payments/:id/fail", post(handlers::handle_fail_payment))
        .route(
            "/auctions/:id/payment",
            get(handlers::handle_get_auction_payment),
        )
        // 신고
        .route("/reports", post(handlers::handle_file_report))
        .route("/reports/open", get(handlers::handle_get_open_reports))
        .route(
            "/reports/:id/status",
            post(handlers::handle_update_report_status),
        )
        // 관심 목록
        .route(
            "/watchlist",
            post(handlers::handle_watch).delete(handlers::handle_unwatch),
        )
        .route(
            "/users/:id/watchlist",
            get(handlers::handle_get_watchlist),
        )
        .layer(cors)
        .with_state(db_manager);

    // 리스너 생성(로컬 호스트의 3000번 포트를 사용)
    let listener = TcpListener::bind("0.0.0.0:3000").await?;
    info!(
        "{:<12} --> Web Server: Listening on {}",
        "Main",
        listener.local_addr()?
    );

    // 서버 실행
    if let Err(err) = axum::serve(listener, routes_all.into_make_service()).await {
        error!("{:<12} --> Server error: {}", "Main", err);
    }
    Ok(())
}
// endregion: --- Main
