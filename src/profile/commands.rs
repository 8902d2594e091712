/// 회원/프로필 관련 커맨드 처리
/// 1. 회원 생성 및 삭제
/// 2. 프로필 생성
/// 3. 판매자 등록 및 판매자 인증
// region:    --- Imports
use crate::database::{db_error_to_json, DatabaseManager};
use crate::profile::model::{User, UserProfile, USER_TYPES};
use serde::{Deserialize, Serialize};
use tracing::info;
// endregion: --- Imports

// region:    --- Commands
/// 회원 생성 명령
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateUserCommand {
    pub username: String,
    pub email: String,
}

/// 프로필 생성 명령
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateProfileCommand {
    pub user_id: i64,
    #[serde(default = "default_user_type")]
    pub user_type: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

fn default_user_type() -> String {
    "user".to_string()
}

/// 1. 회원 생성
pub async fn handle_create_user(
    cmd: CreateUserCommand,
    db_manager: &DatabaseManager,
) -> Result<User, serde_json::Value> {
    info!("{:<12} --> 회원 생성 시작: {:?}", "Command", cmd);
    let CreateUserCommand { username, email } = cmd;

    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, User>(
                    "INSERT INTO users (username, email)
                     VALUES ($1, $2)
                     RETURNING id, username, email, joined_at",
                )
                .bind(&username)
                .bind(&email)
                .fetch_one(&mut **tx)
                .await
            })
        })
        .await
        .map_err(|e| db_error_to_json(&e))
}

/// 1. 회원 삭제(보석, 입찰, 관심 목록 등은 외래 키 규칙에 따라 함께 삭제)
pub async fn handle_delete_user(
    user_id: i64,
    db_manager: &DatabaseManager,
) -> Result<(), serde_json::Value> {
    info!("{:<12} --> 회원 삭제 시작 id: {}", "Command", user_id);
    let deleted = db_manager
        .transaction(|tx| {
            Box::pin(async move {
                let result = sqlx::query("DELETE FROM users WHERE id = $1")
                    .bind(user_id)
                    .execute(&mut **tx)
                    .await?;
                Ok::<_, sqlx::Error>(result.rows_affected())
            })
        })
        .await
        .map_err(|e| db_error_to_json(&e))?;

    if deleted == 0 {
        return Err(serde_json::json!({
            "error": "회원을 찾을 수 없습니다.",
            "code": "NOT_FOUND"
        }));
    }
    Ok(())
}

/// 2. 프로필 생성(회원당 하나)
pub async fn handle_create_profile(
    cmd: CreateProfileCommand,
    db_manager: &DatabaseManager,
) -> Result<UserProfile, serde_json::Value> {
    info!("{:<12} --> 프로필 생성 시작: {:?}", "Command", cmd);

    // 회원 구분 검증
    if !USER_TYPES.contains(&cmd.user_type.as_str()) {
        return Err(serde_json::json!({
            "error": "잘못된 회원 구분입니다.",
            "code": "INVALID_USER_TYPE",
            "user_type": cmd.user_type
        }));
    }

    let CreateProfileCommand {
        user_id,
        user_type,
        phone,
        address,
    } = cmd;

    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, UserProfile>(
                    "INSERT INTO user_profiles (user_id, user_type, phone, address)
                     VALUES ($1, $2, $3, $4)
                     RETURNING id, user_id, user_type, is_seller, seller_verified, phone, address",
                )
                .bind(user_id)
                .bind(&user_type)
                .bind(&phone)
                .bind(&address)
                .fetch_one(&mut **tx)
                .await
            })
        })
        .await
        .map_err(|e| db_error_to_json(&e))
}

/// 3. 판매자 등록(판매자 플래그만 설정, 인증은 별도)
pub async fn handle_mark_seller(
    user_id: i64,
    db_manager: &DatabaseManager,
) -> Result<UserProfile, serde_json::Value> {
    info!("{:<12} --> 판매자 등록 시작 user_id: {}", "Command", user_id);
    update_profile_flag(user_id, "is_seller", db_manager).await
}

/// 3. 판매자 인증(관리자 작업)
pub async fn handle_verify_seller(
    user_id: i64,
    db_manager: &DatabaseManager,
) -> Result<UserProfile, serde_json::Value> {
    info!("{:<12} --> 판매자 인증 시작 user_id: {}", "Command", user_id);
    update_profile_flag(user_id, "seller_verified", db_manager).await
}

/// 프로필 플래그 설정 공통 처리
async fn update_profile_flag(
    user_id: i64,
    flag: &'static str,
    db_manager: &DatabaseManager,
) -> Result<UserProfile, serde_json::Value> {
    let sql = format!(
        "UPDATE user_profiles SET {flag} = TRUE WHERE user_id = $1
         RETURNING id, user_id, user_type, is_seller, seller_verified, phone, address"
    );

    let updated = db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, UserProfile>(&sql)
                    .bind(user_id)
                    .fetch_optional(&mut **tx)
                    .await
            })
        })
        .await
        .map_err(|e| db_error_to_json(&e))?;

    match updated {
        Some(profile) => Ok(profile),
        None => Err(serde_json::json!({
            "error": "프로필을 찾을 수 없습니다.",
            "code": "NOT_FOUND"
        })),
    }
}
// endregion: --- Commands
