// region:    --- Imports
use crate::auction::commands as auction_commands;
use crate::auction::commands::{CreateAuctionCommand, CreateLotCommand};
use crate::bidding::commands as bidding_commands;
use crate::bidding::commands::PlaceBidCommand;
use crate::catalog::commands as catalog_commands;
use crate::catalog::commands::{CreateGemstoneCommand, CreateGemstoneTypeCommand};
use crate::database::DatabaseManager;
use crate::moderation::commands as moderation_commands;
use crate::moderation::commands::{FileReportCommand, UpdateReportStatusCommand};
use crate::payment::commands as payment_commands;
use crate::payment::commands::{CompletePaymentCommand, OpenPaymentCommand};
use crate::profile::commands as profile_commands;
use crate::profile::commands::{CreateProfileCommand, CreateUserCommand};
use crate::query;
use crate::watchlist::commands as watchlist_commands;
use crate::watchlist::commands::WatchCommand;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

// endregion: --- Imports

// region:    --- Error Mapping

/// 커맨드 오류 코드에 따른 HTTP 상태 매핑
fn error_status(e: &serde_json::Value) -> StatusCode {
    match e["code"].as_str() {
        Some("NOT_FOUND") => StatusCode::NOT_FOUND,
        Some("DUPLICATE") | Some("ALREADY_WATCHING") => StatusCode::CONFLICT,
        _ => StatusCode::BAD_REQUEST,
    }
}

/// 조회 오류 응답 변환
fn query_error_response(e: sqlx::Error) -> Response {
    if matches!(e, sqlx::Error::RowNotFound) {
        (StatusCode::NOT_FOUND, e.to_string()).into_response()
    } else {
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
    }
}

// endregion: --- Error Mapping

// region:    --- Command Handlers

/// 회원 생성 요청 처리
pub async fn handle_create_user(
    State(db_manager): State<Arc<DatabaseManager>>,
    Json(cmd): Json<CreateUserCommand>,
) -> impl IntoResponse {
    match profile_commands::handle_create_user(cmd, &db_manager).await {
        Ok(user) => (StatusCode::CREATED, Json(user)).into_response(),
        Err(e) => (error_status(&e), Json(e)).into_response(),
    }
}

/// 회원 삭제 요청 처리(소유 데이터는 외래 키 규칙에 따라 함께 삭제)
pub async fn handle_delete_user(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(user_id): Path<i64>,
) -> impl IntoResponse {
    match profile_commands::handle_delete_user(user_id, &db_manager).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => (error_status(&e), Json(e)).into_response(),
    }
}

/// 프로필 생성 요청 처리
pub async fn handle_create_profile(
    State(db_manager): State<Arc<DatabaseManager>>,
    Json(cmd): Json<CreateProfileCommand>,
) -> impl IntoResponse {
    match profile_commands::handle_create_profile(cmd, &db_manager).await {
        Ok(profile) => (StatusCode::CREATED, Json(profile)).into_response(),
        Err(e) => (error_status(&e), Json(e)).into_response(),
    }
}

/// 판매자 등록 요청 처리
pub async fn handle_mark_seller(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(user_id): Path<i64>,
) -> impl IntoResponse {
    match profile_commands::handle_mark_seller(user_id, &db_manager).await {
        Ok(profile) => Json(profile).into_response(),
        Err(e) => (error_status(&e), Json(e)).into_response(),
    }
}

/// 판매자 인증 요청 처리(관리자 작업)
pub async fn handle_verify_seller(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(user_id): Path<i64>,
) -> impl IntoResponse {
    match profile_commands::handle_verify_seller(user_id, &db_manager).await {
        Ok(profile) => Json(profile).into_response(),
        Err(e) => (error_status(&e), Json(e)).into_response(),
    }
}

/// 보석 종류 생성 요청 처리
pub async fn handle_create_gemstone_type(
    State(db_manager): State<Arc<DatabaseManager>>,
    Json(cmd): Json<CreateGemstoneTypeCommand>,
) -> impl IntoResponse {
    match catalog_commands::handle_create_gemstone_type(cmd, &db_manager).await {
        Ok(gemstone_type) => (StatusCode::CREATED, Json(gemstone_type)).into_response(),
        Err(e) => (error_status(&e), Json(e)).into_response(),
    }
}

/// 보석 종류 삭제 요청 처리(해당 종류의 보석은 종류만 NULL 처리)
pub async fn handle_delete_gemstone_type(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(type_id): Path<i64>,
) -> impl IntoResponse {
    match catalog_commands::handle_delete_gemstone_type(type_id, &db_manager).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => (error_status(&e), Json(e)).into_response(),
    }
}

/// 보석 등록 요청 처리
pub async fn handle_create_gemstone(
    State(db_manager): State<Arc<DatabaseManager>>,
    Json(cmd): Json<CreateGemstoneCommand>,
) -> impl IntoResponse {
    match catalog_commands::handle_create_gemstone(cmd, &db_manager).await {
        Ok(gemstone) => (StatusCode::CREATED, Json(gemstone)).into_response(),
        Err(e) => (error_status(&e), Json(e)).into_response(),
    }
}

/// 보석 비활성화 요청 처리
pub async fn handle_deactivate_gemstone(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(gemstone_id): Path<i64>,
) -> impl IntoResponse {
    match catalog_commands::handle_deactivate_gemstone(gemstone_id, &db_manager).await {
        Ok(gemstone) => Json(gemstone).into_response(),
        Err(e) => (error_status(&e), Json(e)).into_response(),
    }
}

/// 보석 삭제 요청 처리
pub async fn handle_delete_gemstone(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(gemstone_id): Path<i64>,
) -> impl IntoResponse {
    match catalog_commands::handle_delete_gemstone(gemstone_id, &db_manager).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => (error_status(&e), Json(e)).into_response(),
    }
}

/// 로트 구성 요청 처리
pub async fn handle_create_lot(
    State(db_manager): State<Arc<DatabaseManager>>,
    Json(cmd): Json<CreateLotCommand>,
) -> impl IntoResponse {
    match auction_commands::handle_create_lot(cmd, &db_manager).await {
        Ok(lot) => (StatusCode::CREATED, Json(lot)).into_response(),
        Err(e) => (error_status(&e), Json(e)).into_response(),
    }
}

/// 경매 개설 요청 처리
pub async fn handle_create_auction(
    State(db_manager): State<Arc<DatabaseManager>>,
    Json(cmd): Json<CreateAuctionCommand>,
) -> impl IntoResponse {
    match auction_commands::handle_create_auction(cmd, &db_manager).await {
        Ok(auction) => (StatusCode::CREATED, Json(auction)).into_response(),
        Err(e) => (error_status(&e), Json(e)).into_response(),
    }
}

/// 경매 마감 요청 처리
pub async fn handle_close_auction(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(auction_id): Path<i64>,
) -> impl IntoResponse {
    match auction_commands::handle_close_auction(auction_id, &db_manager).await {
        Ok(auction) => Json(auction).into_response(),
        Err(e) => (error_status(&e), Json(e)).into_response(),
    }
}

/// 입찰 요청 처리
pub async fn handle_bid(
    State(db_manager): State<Arc<DatabaseManager>>,
    Json(cmd): Json<PlaceBidCommand>,
) -> impl IntoResponse {
    info!("{:<12} --> 입찰 요청 처리 시작: {:?}", "Handler", cmd);
    match bidding_commands::handle_place_bid(cmd, &db_manager).await {
        Ok(bid) => (
            StatusCode::CREATED,
            Json(serde_json::json!({
                "message": "입찰이 성공적으로 처리되었습니다.",
                "bid": bid
            })),
        )
            .into_response(),
        Err(e) => (error_status(&e), Json(e)).into_response(),
    }
}

/// 결제 개설 요청 처리
pub async fn handle_open_payment(
    State(db_manager): State<Arc<DatabaseManager>>,
    Json(cmd): Json<OpenPaymentCommand>,
) -> impl IntoResponse {
    match payment_commands::handle_open_payment(cmd, &db_manager).await {
        Ok(payment) => (StatusCode::CREATED, Json(payment)).into_response(),
        Err(e) => (error_status(&e), Json(e)).into_response(),
    }
}

/// 결제 완료 요청 처리
pub async fn handle_complete_payment(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(payment_id): Path<i64>,
    Json(cmd): Json<CompletePaymentCommand>,
) -> impl IntoResponse {
    match payment_commands::handle_complete_payment(payment_id, cmd, &db_manager).await {
        Ok(payment) => Json(payment).into_response(),
        Err(e) => (error_status(&e), Json(e)).into_response(),
    }
}

/// 결제 실패 요청 처리
pub async fn handle_fail_payment(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(payment_id): Path<i64>,
) -> impl IntoResponse {
    match payment_commands::handle_fail_payment(payment_id, &db_manager).await {
        Ok(payment) => Json(payment).into_response(),
        Err(e) => (error_status(&e), Json(e)).into_response(),
    }
}

/// 신고 접수 요청 처리
pub async fn handle_file_report(
    State(db_manager): State<Arc<DatabaseManager>>,
    Json(cmd): Json<FileReportCommand>,
) -> impl IntoResponse {
    match moderation_commands::handle_file_report(cmd, &db_manager).await {
        Ok(report) => (StatusCode::CREATED, Json(report)).into_response(),
        Err(e) => (error_status(&e), Json(e)).into_response(),
    }
}

/// 신고 상태 변경 요청 처리
pub async fn handle_update_report_status(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(report_id): Path<i64>,
    Json(cmd): Json<UpdateReportStatusCommand>,
) -> impl IntoResponse {
    match moderation_commands::handle_update_report_status(report_id, cmd, &db_manager).await {
        Ok(report) => Json(report).into_response(),
        Err(e) => (error_status(&e), Json(e)).into_response(),
    }
}

/// 관심 경매 등록 요청 처리
pub async fn handle_watch(
    State(db_manager): State<Arc<DatabaseManager>>,
    Json(cmd): Json<WatchCommand>,
) -> impl IntoResponse {
    match watchlist_commands::handle_watch(cmd, &db_manager).await {
        Ok(entry) => (StatusCode::CREATED, Json(entry)).into_response(),
        Err(e) => (error_status(&e), Json(e)).into_response(),
    }
}

/// 관심 경매 해제 요청 처리
pub async fn handle_unwatch(
    State(db_manager): State<Arc<DatabaseManager>>,
    Json(cmd): Json<WatchCommand>,
) -> impl IntoResponse {
    match watchlist_commands::handle_unwatch(cmd, &db_manager).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => (error_status(&e), Json(e)).into_response(),
    }
}

// endregion: --- Command Handlers

// region:    --- Query Handlers

/// 회원 조회
pub async fn handle_get_user(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(user_id): Path<i64>,
) -> impl IntoResponse {
    info!("{:<12} --> 회원 조회 id: {}", "HandlerQuery", user_id);
    match query::handlers::get_user(&db_manager, user_id).await {
        Ok(user) => Json(user).into_response(),
        Err(e) => query_error_response(e),
    }
}

/// 프로필 조회
pub async fn handle_get_profile(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(user_id): Path<i64>,
) -> impl IntoResponse {
    info!("{:<12} --> 프로필 조회 user_id: {}", "HandlerQuery", user_id);
    match query::handlers::get_profile(&db_manager, user_id).await {
        Ok(profile) => {
            let can_sell = profile.can_sell();
            Json(serde_json::json!({
                "profile": profile,
                "can_sell": can_sell
            }))
            .into_response()
        }
        Err(e) => query_error_response(e),
    }
}

/// 보석 종류 목록 조회
pub async fn handle_get_gemstone_types(
    State(db_manager): State<Arc<DatabaseManager>>,
) -> impl IntoResponse {
    info!("{:<12} --> 보석 종류 목록 조회", "HandlerQuery");
    match query::handlers::get_gemstone_types(&db_manager).await {
        Ok(types) => Json(types).into_response(),
        Err(e) => query_error_response(e),
    }
}

/// 활성 보석 목록 조회
pub async fn handle_get_gemstones(
    State(db_manager): State<Arc<DatabaseManager>>,
) -> impl IntoResponse {
    info!("{:<12} --> 활성 보석 목록 조회", "HandlerQuery");
    match query::handlers::get_active_gemstones(&db_manager).await {
        Ok(gemstones) => Json(gemstones).into_response(),
        Err(e) => query_error_response(e),
    }
}

/// 보석 조회
pub async fn handle_get_gemstone(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(gemstone_id): Path<i64>,
) -> impl IntoResponse {
    info!("{:<12} --> 보석 조회 id: {}", "HandlerQuery", gemstone_id);
    match query::handlers::get_gemstone(&db_manager, gemstone_id).await {
        Ok(gemstone) => {
            let carat = gemstone.carat();
            Json(serde_json::json!({
                "gemstone": gemstone,
                "carat": carat
            }))
            .into_response()
        }
        Err(e) => query_error_response(e),
    }
}

/// 모든 로트 조회
pub async fn handle_get_lots(State(db_manager): State<Arc<DatabaseManager>>) -> impl IntoResponse {
    info!("{:<12} --> 모든 로트 조회", "HandlerQuery");
    match query::handlers::get_all_lots(&db_manager).await {
        Ok(lots) => Json(lots).into_response(),
        Err(e) => query_error_response(e),
    }
}

/// 로트 조회(구성 보석 포함)
pub async fn handle_get_lot(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(lot_id): Path<i64>,
) -> impl IntoResponse {
    info!("{:<12} --> 로트 조회 id: {}", "HandlerQuery", lot_id);
    let lot = match query::handlers::get_lot(&db_manager, lot_id).await {
        Ok(lot) => lot,
        Err(e) => return query_error_response(e),
    };
    match query::handlers::get_lot_gemstones(&db_manager, lot_id).await {
        Ok(gemstones) => Json(serde_json::json!({
            "lot": lot,
            "gemstones": gemstones
        }))
        .into_response(),
        Err(e) => query_error_response(e),
    }
}

/// 모든 경매 조회
pub async fn handle_get_auctions(
    State(db_manager): State<Arc<DatabaseManager>>,
) -> impl IntoResponse {
    info!("{:<12} --> 모든 경매 조회", "HandlerQuery");
    match query::handlers::get_all_auctions(&db_manager).await {
        Ok(auctions) => Json(auctions).into_response(),
        Err(e) => query_error_response(e),
    }
}

/// 경매 조회(활성 여부 포함)
pub async fn handle_get_auction(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(auction_id): Path<i64>,
) -> impl IntoResponse {
    info!("{:<12} --> 경매 조회 id: {}", "HandlerQuery", auction_id);
    match query::handlers::get_auction(&db_manager, auction_id).await {
        Ok(auction) => {
            let is_active = auction.is_active(Utc::now());
            Json(serde_json::json!({
                "auction": auction,
                "is_active": is_active
            }))
            .into_response()
        }
        Err(e) => query_error_response(e),
    }
}

/// 경매 입찰 목록 조회(금액 내림차순)
pub async fn handle_get_auction_bids(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(auction_id): Path<i64>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 경매 입찰 목록 조회 id: {}",
        "HandlerQuery", auction_id
    );
    match query::handlers::get_auction_bids(&db_manager, auction_id).await {
        Ok(bids) => Json(bids).into_response(),
        Err(e) => query_error_response(e),
    }
}

/// 최고 입찰가 조회
pub async fn handle_get_highest_bid(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(auction_id): Path<i64>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 최고 입찰가 조회 id: {}",
        "HandlerQuery", auction_id
    );
    match query::handlers::get_highest_bid(&db_manager, auction_id).await {
        Ok(bid) => Json(bid).into_response(),
        Err(e) => query_error_response(e),
    }
}

/// 경매 결제 조회
pub async fn handle_get_auction_payment(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(auction_id): Path<i64>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 경매 결제 조회 id: {}",
        "HandlerQuery", auction_id
    );
    match query::handlers::get_auction_payment(&db_manager, auction_id).await {
        Ok(Some(payment)) => Json(payment).into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => query_error_response(e),
    }
}

/// 미처리 신고 목록 조회
pub async fn handle_get_open_reports(
    State(db_manager): State<Arc<DatabaseManager>>,
) -> impl IntoResponse {
    info!("{:<12} --> 미처리 신고 목록 조회", "HandlerQuery");
    match query::handlers::get_open_reports(&db_manager).await {
        Ok(reports) => Json(reports).into_response(),
        Err(e) => query_error_response(e),
    }
}

/// 회원 관심 목록 조회
pub async fn handle_get_watchlist(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(user_id): Path<i64>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 회원 관심 목록 조회 user_id: {}",
        "HandlerQuery", user_id
    );
    match query::handlers::get_user_watchlist(&db_manager, user_id).await {
        Ok(entries) => Json(entries).into_response(),
        Err(e) => query_error_response(e),
    }
}

// endregion: --- Query Handlers
