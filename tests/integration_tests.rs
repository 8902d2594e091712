use chrono::{Duration, Utc};
use gemstone_auction_service::auction::commands::{
    handle_close_auction, handle_create_auction, handle_create_lot, CreateAuctionCommand,
    CreateLotCommand,
};
use gemstone_auction_service::auction::model::Auction;
use gemstone_auction_service::bidding::commands::{handle_place_bid, PlaceBidCommand};
use gemstone_auction_service::catalog::commands::{
    handle_create_gemstone, handle_create_gemstone_type, handle_delete_gemstone_type,
    CreateGemstoneCommand, CreateGemstoneTypeCommand,
};
use gemstone_auction_service::catalog::model::Gemstone;
use gemstone_auction_service::database::DatabaseManager;
use gemstone_auction_service::moderation::commands::{
    handle_file_report, handle_update_report_status, FileReportCommand, UpdateReportStatusCommand,
};
use gemstone_auction_service::payment::commands::{
    handle_complete_payment, handle_fail_payment, handle_open_payment, CompletePaymentCommand,
    OpenPaymentCommand,
};
use gemstone_auction_service::profile::commands::{
    handle_create_profile, handle_create_user, handle_delete_user, handle_mark_seller,
    handle_verify_seller, CreateProfileCommand, CreateUserCommand,
};
use gemstone_auction_service::profile::model::User;
use gemstone_auction_service::query;
use gemstone_auction_service::watchlist::commands::{handle_watch, WatchCommand};
use serde_json::json;
use std::sync::Arc;

/// 데이터베이스 매니저 설정
async fn setup() -> Arc<DatabaseManager> {
    Arc::new(DatabaseManager::new().await)
}

/// 테스트용 회원 생성(유일한 이름 보장)
async fn create_test_user(db_manager: &DatabaseManager, prefix: &str) -> User {
    let suffix = Utc::now().timestamp_nanos_opt().unwrap_or_default();
    handle_create_user(
        CreateUserCommand {
            username: format!("{}_{}", prefix, suffix),
            email: format!("{}_{}@example.com", prefix, suffix),
        },
        db_manager,
    )
    .await
    .expect("회원 생성 실패")
}

/// 테스트용 인증 판매자 생성
async fn create_verified_seller(db_manager: &DatabaseManager, prefix: &str) -> User {
    let user = create_test_user(db_manager, prefix).await;
    handle_create_profile(
        CreateProfileCommand {
            user_id: user.id,
            user_type: "user".to_string(),
            phone: None,
            address: None,
        },
        db_manager,
    )
    .await
    .expect("프로필 생성 실패");
    handle_mark_seller(user.id, db_manager)
        .await
        .expect("판매자 등록 실패");
    handle_verify_seller(user.id, db_manager)
        .await
        .expect("판매자 인증 실패");
    user
}

/// 테스트용 보석 등록
async fn create_test_gemstone(
    db_manager: &DatabaseManager,
    seller_id: i64,
    gemstone_type_id: Option<i64>,
) -> Gemstone {
    handle_create_gemstone(
        CreateGemstoneCommand {
            seller_id,
            name: "테스트 루비".to_string(),
            description: "통합 테스트용 보석입니다.".to_string(),
            gemstone_type_id,
            carat_points: 150,
            clarity: "VS1".to_string(),
            certification_path: None,
            certificate_id: None,
            certificate_issuer: None,
            image_path: None,
        },
        db_manager,
    )
    .await
    .expect("보석 등록 실패")
}

/// 테스트용 로트 구성 및 경매 개설(시작 1시간 전, 종료 1시간 후)
async fn create_test_auction(db_manager: &DatabaseManager, gemstone_id: i64) -> Auction {
    let lot = handle_create_lot(
        CreateLotCommand {
            name: "테스트 로트".to_string(),
            description: Some("통합 테스트용 로트입니다.".to_string()),
            gemstone_ids: vec![gemstone_id],
        },
        db_manager,
    )
    .await
    .expect("로트 구성 실패");

    handle_create_auction(
        CreateAuctionCommand {
            lot_id: lot.id,
            starting_price: 10000,
            start_time: Utc::now() - Duration::hours(1),
            end_time: Utc::now() + Duration::hours(1),
        },
        db_manager,
    )
    .await
    .expect("경매 개설 실패")
}

/// 보석 종류 이름 중복 생성은 실패해야 한다
#[tokio::test]
#[ignore = "로컬 Postgres(DATABASE_URL)와 초기화된 스키마 필요"]
async fn test_gemstone_type_name_unique() {
    let db_manager = setup().await;
    let name = format!(
        "루비_{}",
        Utc::now().timestamp_nanos_opt().unwrap_or_default()
    );

    handle_create_gemstone_type(
        CreateGemstoneTypeCommand { name: name.clone() },
        &db_manager,
    )
    .await
    .expect("보석 종류 생성 실패");

    let duplicate =
        handle_create_gemstone_type(CreateGemstoneTypeCommand { name }, &db_manager).await;
    let error = duplicate.expect_err("중복 이름이 허용되어서는 안 된다");
    assert_eq!(error["code"], json!("DUPLICATE"));
}

/// 보석 종류 삭제 시 해당 보석의 종류는 NULL 처리되어야 한다
#[tokio::test]
#[ignore = "로컬 Postgres(DATABASE_URL)와 초기화된 스키마 필요"]
async fn test_gemstone_type_delete_sets_null() {
    let db_manager = setup().await;
    let seller = create_verified_seller(&db_manager, "type_del_seller").await;

    let gemstone_type = handle_create_gemstone_type(
        CreateGemstoneTypeCommand {
            name: format!(
                "사파이어_{}",
                Utc::now().timestamp_nanos_opt().unwrap_or_default()
            ),
        },
        &db_manager,
    )
    .await
    .expect("보석 종류 생성 실패");

    let gemstone = create_test_gemstone(&db_manager, seller.id, Some(gemstone_type.id)).await;
    assert_eq!(gemstone.gemstone_type_id, Some(gemstone_type.id));

    handle_delete_gemstone_type(gemstone_type.id, &db_manager)
        .await
        .expect("보석 종류 삭제 실패");

    // 보석은 남고 종류만 NULL
    let survived = query::handlers::get_gemstone(&db_manager, gemstone.id)
        .await
        .expect("보석이 삭제되어서는 안 된다");
    assert_eq!(survived.gemstone_type_id, None);
}

/// 같은 (회원, 경매) 쌍의 관심 목록 중복 등록은 실패해야 한다
#[tokio::test]
#[ignore = "로컬 Postgres(DATABASE_URL)와 초기화된 스키마 필요"]
async fn test_watchlist_pair_unique() {
    let db_manager = setup().await;
    let seller = create_verified_seller(&db_manager, "watch_seller").await;
    let watcher = create_test_user(&db_manager, "watcher").await;
    let gemstone = create_test_gemstone(&db_manager, seller.id, None).await;
    let auction = create_test_auction(&db_manager, gemstone.id).await;

    let cmd = WatchCommand {
        user_id: watcher.id,
        auction_id: auction.id,
    };
    handle_watch(
        WatchCommand {
            user_id: watcher.id,
            auction_id: auction.id,
        },
        &db_manager,
    )
    .await
    .expect("관심 경매 등록 실패");

    let duplicate = handle_watch(cmd, &db_manager).await;
    let error = duplicate.expect_err("중복 등록이 허용되어서는 안 된다");
    assert_eq!(error["code"], json!("ALREADY_WATCHING"));
}

/// 입찰 목록은 금액 내림차순으로 조회되어야 한다
#[tokio::test]
#[ignore = "로컬 Postgres(DATABASE_URL)와 초기화된 스키마 필요"]
async fn test_bids_sorted_by_amount_desc() {
    let db_manager = setup().await;
    let seller = create_verified_seller(&db_manager, "bid_seller").await;
    let gemstone = create_test_gemstone(&db_manager, seller.id, None).await;
    let auction = create_test_auction(&db_manager, gemstone.id).await;

    for (i, amount) in [10000i64, 12000, 15000].into_iter().enumerate() {
        let bidder = create_test_user(&db_manager, &format!("bidder_{i}")).await;
        handle_place_bid(
            PlaceBidCommand {
                auction_id: auction.id,
                bidder_id: bidder.id,
                amount,
            },
            &db_manager,
        )
        .await
        .expect("입찰 실패");
    }

    let bids = query::handlers::get_auction_bids(&db_manager, auction.id)
        .await
        .expect("입찰 목록 조회 실패");
    let amounts: Vec<i64> = bids.iter().map(|b| b.amount).collect();
    assert_eq!(amounts, vec![15000, 12000, 10000]);
}

/// 최고 입찰가 이하의 입찰과 마감된 경매 입찰은 거부되어야 한다
#[tokio::test]
#[ignore = "로컬 Postgres(DATABASE_URL)와 초기화된 스키마 필요"]
async fn test_low_bid_and_closed_auction_rejected() {
    let db_manager = setup().await;
    let seller = create_verified_seller(&db_manager, "reject_seller").await;
    let bidder = create_test_user(&db_manager, "reject_bidder").await;
    let gemstone = create_test_gemstone(&db_manager, seller.id, None).await;
    let auction = create_test_auction(&db_manager, gemstone.id).await;

    handle_place_bid(
        PlaceBidCommand {
            auction_id: auction.id,
            bidder_id: bidder.id,
            amount: 20000,
        },
        &db_manager,
    )
    .await
    .expect("입찰 실패");

    // 최고 입찰가와 같은 금액은 거부
    let low = handle_place_bid(
        PlaceBidCommand {
            auction_id: auction.id,
            bidder_id: bidder.id,
            amount: 20000,
        },
        &db_manager,
    )
    .await;
    assert_eq!(low.expect_err("거부되어야 한다")["code"], json!("LOW_BID"));

    // 마감 후 입찰은 거부
    handle_close_auction(auction.id, &db_manager)
        .await
        .expect("경매 마감 실패");
    let closed = handle_place_bid(
        PlaceBidCommand {
            auction_id: auction.id,
            bidder_id: bidder.id,
            amount: 30000,
        },
        &db_manager,
    )
    .await;
    assert_eq!(
        closed.expect_err("거부되어야 한다")["code"],
        json!("ALREADY_CLOSED")
    );
}

/// 경매 마감 시 최고 입찰이 낙찰 입찰로 지정되어야 한다
#[tokio::test]
#[ignore = "로컬 Postgres(DATABASE_URL)와 초기화된 스키마 필요"]
async fn test_close_auction_assigns_winning_bid() {
    let db_manager = setup().await;
    let seller = create_verified_seller(&db_manager, "close_seller").await;
    let bidder = create_test_user(&db_manager, "close_bidder").await;
    let gemstone = create_test_gemstone(&db_manager, seller.id, None).await;
    let auction = create_test_auction(&db_manager, gemstone.id).await;

    let bid = handle_place_bid(
        PlaceBidCommand {
            auction_id: auction.id,
            bidder_id: bidder.id,
            amount: 25000,
        },
        &db_manager,
    )
    .await
    .expect("입찰 실패");

    let closed = handle_close_auction(auction.id, &db_manager)
        .await
        .expect("경매 마감 실패");
    assert!(closed.is_closed);
    assert_eq!(closed.winning_bid_id, Some(bid.id));

    // 입찰 없는 경매는 낙찰 입찰 없이 마감
    let gemstone2 = create_test_gemstone(&db_manager, seller.id, None).await;
    let auction2 = create_test_auction(&db_manager, gemstone2.id).await;
    let closed2 = handle_close_auction(auction2.id, &db_manager)
        .await
        .expect("경매 마감 실패");
    assert!(closed2.is_closed);
    assert_eq!(closed2.winning_bid_id, None);
}

/// 결제는 마감된 경매의 낙찰자만, 경매당 하나만 개설할 수 있다
#[tokio::test]
#[ignore = "로컬 Postgres(DATABASE_URL)와 초기화된 스키마 필요"]
async fn test_one_payment_per_auction() {
    let db_manager = setup().await;
    let seller = create_verified_seller(&db_manager, "pay_seller").await;
    let winner = create_test_user(&db_manager, "pay_winner").await;
    let other = create_test_user(&db_manager, "pay_other").await;
    let gemstone = create_test_gemstone(&db_manager, seller.id, None).await;
    let auction = create_test_auction(&db_manager, gemstone.id).await;

    handle_place_bid(
        PlaceBidCommand {
            auction_id: auction.id,
            bidder_id: winner.id,
            amount: 25000,
        },
        &db_manager,
    )
    .await
    .expect("입찰 실패");

    // 마감 전 결제는 거부
    let premature = handle_open_payment(
        OpenPaymentCommand {
            auction_id: auction.id,
            buyer_id: winner.id,
        },
        &db_manager,
    )
    .await;
    assert_eq!(
        premature.expect_err("거부되어야 한다")["code"],
        json!("NOT_CLOSED")
    );

    handle_close_auction(auction.id, &db_manager)
        .await
        .expect("경매 마감 실패");

    // 낙찰자가 아닌 회원의 결제는 거부
    let not_winner = handle_open_payment(
        OpenPaymentCommand {
            auction_id: auction.id,
            buyer_id: other.id,
        },
        &db_manager,
    )
    .await;
    assert_eq!(
        not_winner.expect_err("거부되어야 한다")["code"],
        json!("NOT_WINNER")
    );

    let payment = handle_open_payment(
        OpenPaymentCommand {
            auction_id: auction.id,
            buyer_id: winner.id,
        },
        &db_manager,
    )
    .await
    .expect("결제 개설 실패");
    assert_eq!(payment.status, "pending");
    assert_eq!(payment.method, "razorpay");

    // 같은 경매의 두 번째 결제는 거부
    let duplicate = handle_open_payment(
        OpenPaymentCommand {
            auction_id: auction.id,
            buyer_id: winner.id,
        },
        &db_manager,
    )
    .await;
    assert_eq!(
        duplicate.expect_err("거부되어야 한다")["code"],
        json!("DUPLICATE")
    );

    // 결제 완료 처리 후에는 실패 처리할 수 없다
    let completed = handle_complete_payment(
        payment.id,
        CompletePaymentCommand {
            razorpay_order_id: "order_test".to_string(),
            razorpay_payment_id: "pay_test".to_string(),
            razorpay_signature: "sig_test".to_string(),
        },
        &db_manager,
    )
    .await
    .expect("결제 완료 처리 실패");
    assert_eq!(completed.status, "completed");

    let failed = handle_fail_payment(payment.id, &db_manager).await;
    assert_eq!(
        failed.expect_err("거부되어야 한다")["code"],
        json!("INVALID_PAYMENT_STATE")
    );
}

/// 신고는 open으로 접수되고 상태 변경 후에는 미처리 목록에서 빠져야 한다
#[tokio::test]
#[ignore = "로컬 Postgres(DATABASE_URL)와 초기화된 스키마 필요"]
async fn test_report_lifecycle() {
    let db_manager = setup().await;
    let seller = create_verified_seller(&db_manager, "report_seller").await;
    let reporter = create_test_user(&db_manager, "reporter").await;
    let gemstone = create_test_gemstone(&db_manager, seller.id, None).await;

    let report = handle_file_report(
        FileReportCommand {
            reported_by: reporter.id,
            gemstone_id: gemstone.id,
            reason: "허위 감정서가 의심됩니다.".to_string(),
        },
        &db_manager,
    )
    .await
    .expect("신고 접수 실패");
    assert_eq!(report.status, "open");

    let open_reports = query::handlers::get_open_reports(&db_manager)
        .await
        .expect("미처리 신고 목록 조회 실패");
    assert!(open_reports.iter().any(|r| r.id == report.id));

    // 잘못된 상태 값은 거부
    let invalid = handle_update_report_status(
        report.id,
        UpdateReportStatusCommand {
            status: "closed".to_string(),
        },
        &db_manager,
    )
    .await;
    assert_eq!(
        invalid.expect_err("거부되어야 한다")["code"],
        json!("INVALID_STATUS")
    );

    let resolved = handle_update_report_status(
        report.id,
        UpdateReportStatusCommand {
            status: "resolved".to_string(),
        },
        &db_manager,
    )
    .await
    .expect("신고 상태 변경 실패");
    assert_eq!(resolved.status, "resolved");

    let open_reports = query::handlers::get_open_reports(&db_manager)
        .await
        .expect("미처리 신고 목록 조회 실패");
    assert!(!open_reports.iter().any(|r| r.id == report.id));
}

/// 회원 삭제 시 보석, 입찰, 관심 목록이 함께 삭제되어야 한다
#[tokio::test]
#[ignore = "로컬 Postgres(DATABASE_URL)와 초기화된 스키마 필요"]
async fn test_user_delete_cascades() {
    let db_manager = setup().await;
    let seller = create_verified_seller(&db_manager, "cascade_seller").await;
    let bidder = create_test_user(&db_manager, "cascade_bidder").await;
    let gemstone = create_test_gemstone(&db_manager, seller.id, None).await;
    let auction = create_test_auction(&db_manager, gemstone.id).await;

    handle_place_bid(
        PlaceBidCommand {
            auction_id: auction.id,
            bidder_id: bidder.id,
            amount: 11000,
        },
        &db_manager,
    )
    .await
    .expect("입찰 실패");
    handle_watch(
        WatchCommand {
            user_id: bidder.id,
            auction_id: auction.id,
        },
        &db_manager,
    )
    .await
    .expect("관심 경매 등록 실패");

    // 입찰자 삭제: 입찰과 관심 목록이 함께 삭제
    handle_delete_user(bidder.id, &db_manager)
        .await
        .expect("회원 삭제 실패");
    let bids = query::handlers::get_auction_bids(&db_manager, auction.id)
        .await
        .expect("입찰 목록 조회 실패");
    assert!(bids.is_empty());

    // 판매자 삭제: 보석이 함께 삭제
    handle_delete_user(seller.id, &db_manager)
        .await
        .expect("회원 삭제 실패");
    let gemstone_result = query::handlers::get_gemstone(&db_manager, gemstone.id).await;
    assert!(matches!(gemstone_result, Err(sqlx::Error::RowNotFound)));
}

/// 입찰 엔드포인트 왕복 테스트
#[tokio::test]
#[ignore = "로컬 Postgres(DATABASE_URL)와 localhost:3000에서 실행 중인 서비스 필요"]
async fn test_bid_endpoint_end_to_end() {
    let db_manager = setup().await;
    let client = reqwest::Client::new();

    let seller = create_verified_seller(&db_manager, "e2e_seller").await;
    let bidder = create_test_user(&db_manager, "e2e_bidder").await;
    let gemstone = create_test_gemstone(&db_manager, seller.id, None).await;
    let auction = create_test_auction(&db_manager, gemstone.id).await;

    // 입찰 요청 생성
    let bid_data = json!({
        "auction_id": auction.id,
        "bidder_id": bidder.id,
        "amount": 13000
    });

    // 입찰 처리
    let response = client
        .post("http://localhost:3000/bid")
        .json(&bid_data)
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    // 최고 입찰가 확인
    let highest = query::handlers::get_highest_bid(&db_manager, auction.id)
        .await
        .expect("최고 입찰가 조회 실패");
    assert_eq!(highest, Some(13000));
}
