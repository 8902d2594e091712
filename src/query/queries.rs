/// 회원 조회
pub const GET_USER: &str = "SELECT id, username, email, joined_at FROM users WHERE id = $1";

/// 프로필 조회
pub const GET_PROFILE: &str =
    "SELECT id, user_id, user_type, is_seller, seller_verified, phone, address FROM user_profiles WHERE user_id = $1";

/// 보석 종류 목록 조회
pub const GET_GEMSTONE_TYPES: &str = "SELECT id, name FROM gemstone_types ORDER BY name";

/// 보석 조회
pub const GET_GEMSTONE: &str =
    "SELECT id, seller_id, name, description, gemstone_type_id, carat_points, clarity, certification_path, certificate_id, certificate_issuer, image_path, created_at, is_active FROM gemstones WHERE id = $1";

/// 활성 보석 목록 조회
pub const GET_ACTIVE_GEMSTONES: &str =
    "SELECT id, seller_id, name, description, gemstone_type_id, carat_points, clarity, certification_path, certificate_id, certificate_issuer, image_path, created_at, is_active FROM gemstones WHERE is_active ORDER BY created_at DESC";

/// 로트 조회
pub const GET_LOT: &str =
    "SELECT id, name, description, created_at FROM auction_lots WHERE id = $1";

/// 모든 로트 조회
pub const GET_ALL_LOTS: &str =
    "SELECT id, name, description, created_at FROM auction_lots ORDER BY created_at DESC";

/// 로트 구성 보석 조회
pub const GET_LOT_GEMSTONES: &str = r#"
    SELECT g.id, g.seller_id, g.name, g.description, g.gemstone_type_id, g.carat_points,
        g.clarity, g.certification_path, g.certificate_id, g.certificate_issuer,
        g.image_path, g.created_at, g.is_active
    FROM gemstones g
    JOIN lot_gemstones lg ON lg.gemstone_id = g.id
    WHERE lg.lot_id = $1
    ORDER BY g.id
"#;

/// 경매 조회
pub const GET_AUCTION: &str =
    "SELECT id, lot_id, starting_price, start_time, end_time, is_closed, winning_bid_id, created_at FROM auctions WHERE id = $1";

/// 모든 경매 조회
pub const GET_ALL_AUCTIONS: &str =
    "SELECT id, lot_id, starting_price, start_time, end_time, is_closed, winning_bid_id, created_at FROM auctions ORDER BY created_at DESC";

/// 경매 입찰 목록 조회(기본 정렬은 금액 내림차순)
pub const GET_AUCTION_BIDS: &str = r#"
    SELECT id, auction_id, bidder_id, amount, bid_time
    FROM bids
    WHERE auction_id = $1
    ORDER BY amount DESC, bid_time ASC
"#;

/// 최고 입찰가 조회
pub const GET_HIGHEST_BID: &str =
    "SELECT MAX(amount) as highest_bid FROM bids WHERE auction_id = $1";

/// 경매 결제 조회
pub const GET_AUCTION_PAYMENT: &str =
    "SELECT id, auction_id, buyer_id, razorpay_order_id, razorpay_payment_id, razorpay_signature, status, method, payment_date FROM payments WHERE auction_id = $1";

/// 미처리 신고 목록 조회
pub const GET_OPEN_REPORTS: &str =
    "SELECT id, reported_by, gemstone_id, reason, status, created_at FROM reports WHERE status = 'open' ORDER BY created_at DESC";

/// 회원 관심 목록 조회
pub const GET_USER_WATCHLIST: &str =
    "SELECT id, user_id, auction_id, added_at FROM watchlists WHERE user_id = $1 ORDER BY added_at DESC";
