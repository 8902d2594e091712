/// 신고 관련 커맨드 처리
/// 1. 보석 신고 접수
/// 2. 신고 상태 변경(검토/해결)
// region:    --- Imports
use crate::database::{db_error_to_json, DatabaseManager};
use crate::moderation::model::{Report, REPORT_STATUSES};
use serde::{Deserialize, Serialize};
use tracing::info;
// endregion: --- Imports

// region:    --- Commands
/// 신고 접수 명령
#[derive(Debug, Serialize, Deserialize)]
pub struct FileReportCommand {
    pub reported_by: i64,
    pub gemstone_id: i64,
    pub reason: String,
}

/// 신고 상태 변경 명령
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateReportStatusCommand {
    pub status: String,
}

/// 1. 신고 접수(접수 상태는 open)
pub async fn handle_file_report(
    cmd: FileReportCommand,
    db_manager: &DatabaseManager,
) -> Result<Report, serde_json::Value> {
    info!("{:<12} --> 신고 접수 시작: {:?}", "Command", cmd);

    if cmd.reason.trim().is_empty() {
        return Err(serde_json::json!({
            "error": "신고 사유가 비어 있습니다.",
            "code": "EMPTY_REASON"
        }));
    }

    let FileReportCommand {
        reported_by,
        gemstone_id,
        reason,
    } = cmd;

    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Report>(
                    "INSERT INTO reports (reported_by, gemstone_id, reason)
                     VALUES ($1, $2, $3)
                     RETURNING id, reported_by, gemstone_id, reason, status, created_at",
                )
                .bind(reported_by)
                .bind(gemstone_id)
                .bind(&reason)
                .fetch_one(&mut **tx)
                .await
            })
        })
        .await
        .map_err(|e| db_error_to_json(&e))
}

/// 2. 신고 상태 변경(관리자 작업)
pub async fn handle_update_report_status(
    report_id: i64,
    cmd: UpdateReportStatusCommand,
    db_manager: &DatabaseManager,
) -> Result<Report, serde_json::Value> {
    info!(
        "{:<12} --> 신고 상태 변경 시작 id: {}, status: {}",
        "Command", report_id, cmd.status
    );

    // 상태 값 검증
    if !REPORT_STATUSES.contains(&cmd.status.as_str()) {
        return Err(serde_json::json!({
            "error": "잘못된 신고 상태입니다.",
            "code": "INVALID_STATUS",
            "status": cmd.status
        }));
    }

    let status = cmd.status;
    let updated = db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Report>(
                    "UPDATE reports SET status = $2 WHERE id = $1
                     RETURNING id, reported_by, gemstone_id, reason, status, created_at",
                )
                .bind(report_id)
                .bind(&status)
                .fetch_optional(&mut **tx)
                .await
            })
        })
        .await
        .map_err(|e| db_error_to_json(&e))?;

    match updated {
        Some(report) => Ok(report),
        None => Err(serde_json::json!({
            "error": "신고를 찾을 수 없습니다.",
            "code": "NOT_FOUND"
        })),
    }
}
// endregion: --- Commands
