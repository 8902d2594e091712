/// 관심 목록 관련 커맨드 처리
/// 1. 관심 경매 등록
/// 2. 관심 경매 해제
// region:    --- Imports
use crate::database::{db_error_to_json, DatabaseManager};
use crate::watchlist::model::WatchlistEntry;
use serde::{Deserialize, Serialize};
use tracing::info;
// endregion: --- Imports

// region:    --- Commands
/// 관심 경매 등록/해제 명령
#[derive(Debug, Serialize, Deserialize)]
pub struct WatchCommand {
    pub user_id: i64,
    pub auction_id: i64,
}

/// 1. 관심 경매 등록(같은 (회원, 경매) 쌍은 한 번만)
pub async fn handle_watch(
    cmd: WatchCommand,
    db_manager: &DatabaseManager,
) -> Result<WatchlistEntry, serde_json::Value> {
    info!("{:<12} --> 관심 경매 등록 시작: {:?}", "Command", cmd);
    let WatchCommand {
        user_id,
        auction_id,
    } = cmd;

    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, WatchlistEntry>(
                    "INSERT INTO watchlists (user_id, auction_id)
                     VALUES ($1, $2)
                     RETURNING id, user_id, auction_id, added_at",
                )
                .bind(user_id)
                .bind(auction_id)
                .fetch_one(&mut **tx)
                .await
            })
        })
        .await
        .map_err(|e| match db_error_to_json(&e) {
            v if v["code"] == "DUPLICATE" => serde_json::json!({
                "error": "이미 관심 목록에 등록된 경매입니다.",
                "code": "ALREADY_WATCHING"
            }),
            v => v,
        })
}

/// 2. 관심 경매 해제
pub async fn handle_unwatch(
    cmd: WatchCommand,
    db_manager: &DatabaseManager,
) -> Result<(), serde_json::Value> {
    info!("{:<12} --> 관심 경매 해제 시작: {:?}", "Command", cmd);
    let WatchCommand {
        user_id,
        auction_id,
    } = cmd;

    let deleted = db_manager
        .transaction(|tx| {
            Box::pin(async move {
                let result =
                    sqlx::query("DELETE FROM watchlists WHERE user_id = $1 AND auction_id = $2")
                        .bind(user_id)
                        .bind(auction_id)
                        .execute(&mut **tx)
                        .await?;
                Ok::<_, sqlx::Error>(result.rows_affected())
            })
        })
        .await
        .map_err(|e| db_error_to_json(&e))?;

    if deleted == 0 {
        return Err(serde_json::json!({
            "error": "관심 목록에서 찾을 수 없습니다.",
            "code": "NOT_FOUND"
        }));
    }
    Ok(())
}
// endregion: --- Commands
