/// 보석 카탈로그 관련 커맨드 처리
/// 1. 보석 종류 생성 및 삭제
/// 2. 보석 등록
/// 3. 보석 비활성화 및 삭제
// region:    --- Imports
use crate::catalog::model::{is_valid_clarity, Gemstone, GemstoneType};
use crate::database::{db_error_to_json, DatabaseManager};
use crate::query::handlers::get_profile;
use serde::{Deserialize, Serialize};
use tracing::info;
// endregion: --- Imports

// region:    --- Commands
/// 보석 종류 생성 명령
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateGemstoneTypeCommand {
    pub name: String,
}

/// 보석 등록 명령
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateGemstoneCommand {
    pub seller_id: i64,
    pub name: String,
    pub description: String,
    pub gemstone_type_id: Option<i64>,
    pub carat_points: i64,
    pub clarity: String,
    pub certification_path: Option<String>,
    pub certificate_id: Option<String>,
    pub certificate_issuer: Option<String>,
    pub image_path: Option<String>,
}

/// 1. 보석 종류 생성(이름 중복 불가)
pub async fn handle_create_gemstone_type(
    cmd: CreateGemstoneTypeCommand,
    db_manager: &DatabaseManager,
) -> Result<GemstoneType, serde_json::Value> {
    info!("{:<12} --> 보석 종류 생성 시작: {:?}", "Command", cmd);
    let CreateGemstoneTypeCommand { name } = cmd;

    if name.trim().is_empty() {
        return Err(serde_json::json!({
            "error": "보석 종류 이름이 비어 있습니다.",
            "code": "EMPTY_NAME"
        }));
    }

    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, GemstoneType>(
                    "INSERT INTO gemstone_types (name) VALUES ($1) RETURNING id, name",
                )
                .bind(&name)
                .fetch_one(&mut **tx)
                .await
            })
        })
        .await
        .map_err(|e| db_error_to_json(&e))
}

/// 1. 보석 종류 삭제(해당 종류의 보석은 삭제되지 않고 종류만 NULL 처리)
pub async fn handle_delete_gemstone_type(
    type_id: i64,
    db_manager: &DatabaseManager,
) -> Result<(), serde_json::Value> {
    info!("{:<12} --> 보석 종류 삭제 시작 id: {}", "Command", type_id);
    let deleted = db_manager
        .transaction(|tx| {
            Box::pin(async move {
                let result = sqlx::query("DELETE FROM gemstone_types WHERE id = $1")
                    .bind(type_id)
                    .execute(&mut **tx)
                    .await?;
                Ok::<_, sqlx::Error>(result.rows_affected())
            })
        })
        .await
        .map_err(|e| db_error_to_json(&e))?;

    if deleted == 0 {
        return Err(serde_json::json!({
            "error": "보석 종류를 찾을 수 없습니다.",
            "code": "NOT_FOUND"
        }));
    }
    Ok(())
}

/// 2. 보석 등록
/// 판매자 플래그와 판매자 인증 플래그가 모두 참인 판매자만 등록할 수 있다
pub async fn handle_create_gemstone(
    cmd: CreateGemstoneCommand,
    db_manager: &DatabaseManager,
) -> Result<Gemstone, serde_json::Value> {
    info!("{:<12} --> 보석 등록 시작: {:?}", "Command", cmd);

    // 판매자 검증
    let profile = get_profile(db_manager, cmd.seller_id)
        .await
        .map_err(|e| db_error_to_json(&e))?;
    if !profile.can_sell() {
        return Err(serde_json::json!({
            "error": "인증된 판매자만 보석을 등록할 수 있습니다.",
            "code": "NOT_VERIFIED_SELLER"
        }));
    }

    // 투명도 등급 검증
    if !is_valid_clarity(&cmd.clarity) {
        return Err(serde_json::json!({
            "error": "잘못된 투명도 등급입니다.",
            "code": "INVALID_CLARITY",
            "clarity": cmd.clarity
        }));
    }

    // 캐럿 검증
    if cmd.carat_points <= 0 {
        return Err(serde_json::json!({
            "error": "캐럿은 0보다 커야 합니다.",
            "code": "INVALID_CARAT"
        }));
    }

    let CreateGemstoneCommand {
        seller_id,
        name,
        description,
        gemstone_type_id,
        carat_points,
        clarity,
        certification_path,
        certificate_id,
        certificate_issuer,
        image_path,
    } = cmd;

    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Gemstone>(
                    "INSERT INTO gemstones (seller_id, name, description, gemstone_type_id,
                         carat_points, clarity, certification_path, certificate_id,
                         certificate_issuer, image_path)
                     VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                     RETURNING id, seller_id, name, description, gemstone_type_id, carat_points,
                         clarity, certification_path, certificate_id, certificate_issuer,
                         image_path, created_at, is_active",
                )
                .bind(seller_id)
                .bind(&name)
                .bind(&description)
                .bind(gemstone_type_id)
                .bind(carat_points)
                .bind(&clarity)
                .bind(&certification_path)
                .bind(&certificate_id)
                .bind(&certificate_issuer)
                .bind(&image_path)
                .fetch_one(&mut **tx)
                .await
            })
        })
        .await
        .map_err(|e| db_error_to_json(&e))
}

/// 3. 보석 비활성화(목록에서 숨김, 데이터는 유지)
pub async fn handle_deactivate_gemstone(
    gemstone_id: i64,
    db_manager: &DatabaseManager,
) -> Result<Gemstone, serde_json::Value> {
    info!(
        "{:<12} --> 보석 비활성화 시작 id: {}",
        "Command", gemstone_id
    );
    let updated = db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Gemstone>(
                    "UPDATE gemstones SET is_active = FALSE WHERE id = $1
                     RETURNING id, seller_id, name, description, gemstone_type_id, carat_points,
                         clarity, certification_path, certificate_id, certificate_issuer,
                         image_path, created_at, is_active",
                )
                .bind(gemstone_id)
                .fetch_optional(&mut **tx)
                .await
            })
        })
        .await
        .map_err(|e| db_error_to_json(&e))?;

    match updated {
        Some(gemstone) => Ok(gemstone),
        None => Err(serde_json::json!({
            "error": "보석을 찾을 수 없습니다.",
            "code": "NOT_FOUND"
        })),
    }
}

/// 3. 보석 삭제(로트 구성, 신고는 외래 키 규칙에 따라 함께 삭제)
pub async fn handle_delete_gemstone(
    gemstone_id: i64,
    db_manager: &DatabaseManager,
) -> Result<(), serde_json::Value> {
    info!("{:<12} --> 보석 삭제 시작 id: {}", "Command", gemstone_id);
    let deleted = db_manager
        .transaction(|tx| {
            Box::pin(async move {
                let result = sqlx::query("DELETE FROM gemstones WHERE id = $1")
                    .bind(gemstone_id)
                    .execute(&mut **tx)
                    .await?;
                Ok::<_, sqlx::Error>(result.rows_affected())
            })
        })
        .await
        .map_err(|e| db_error_to_json(&e))?;

    if deleted == 0 {
        return Err(serde_json::json!({
            "error": "보석을 찾을 수 없습니다.",
            "code": "NOT_FOUND"
        }));
    }
    Ok(())
}
// endregion: --- Commands
