//! Route Handlers
//!
//! `/upload`、`/shifts`、`/health`の各ハンドラ。

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Multipart, State};
use axum::Json;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use super::error::UploadError;
use super::AppState;
use crate::api::InputFormat;
use crate::builder::Extractor;
use crate::error::ShiftGridError;
use crate::security::{check_extension, sanitize_filename};
use crate::types::ScheduleResult;

/// multipartのファイルフィールド名
pub(crate) const FILE_FIELD: &str = "file";

/// アップロードされたファイルからスケジュールを抽出し、ストアを置き換える
pub(crate) async fn upload_schedule(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ScheduleResult>, UploadError> {
    let (file_name, bytes) = read_file_field(&mut multipart).await?;

    if file_name.trim().is_empty() {
        return Err(UploadError::EmptyFilename);
    }
    let format = check_extension(&file_name)
        .map_err(|_| UploadError::DisallowedExtension(file_name.clone()))?;
    let safe_name = sanitize_filename(&file_name);

    info!(file = %safe_name, bytes = bytes.len(), "upload received");

    let extractor = Arc::clone(&state.extractor);
    let upload_dir = state.upload_dir.clone();
    let result = tokio::task::spawn_blocking(move || {
        process_upload(&extractor, &upload_dir, &safe_name, &bytes, format)
    })
    .await
    .map_err(|e| UploadError::Task(e.to_string()))??;

    info!(
        month = %result.month,
        records = result.shifts.len(),
        "schedule replaced"
    );
    state.store.replace(result.clone());

    Ok(Json(result))
}

/// 最後に組み立てられたスケジュールを返す
pub(crate) async fn get_shifts(State(state): State<AppState>) -> Json<ScheduleResult> {
    Json(state.store.snapshot())
}

pub(crate) async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// `file`フィールドのファイル名と内容を取り出す
async fn read_file_field(multipart: &mut Multipart) -> Result<(String, Bytes), UploadError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| UploadError::Multipart(e.body_text()))?
    {
        if field.name() != Some(FILE_FIELD) {
            debug!(field = ?field.name(), "skipping multipart field");
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| UploadError::Multipart(e.body_text()))?;
        return Ok((file_name, bytes));
    }

    Err(UploadError::MissingFile)
}

/// アップロード内容を一時ファイルに保存して抽出する
///
/// 一時ファイルは処理後に削除されます。
fn process_upload(
    extractor: &Extractor,
    upload_dir: &Path,
    safe_name: &str,
    bytes: &[u8],
    format: InputFormat,
) -> Result<ScheduleResult, ShiftGridError> {
    let stem = safe_name
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(safe_name);

    let mut temp = tempfile::Builder::new()
        .prefix(&format!("{}-", stem))
        .suffix(&format!(".{}", format.extension()))
        .tempfile_in(upload_dir)?;
    temp.write_all(bytes)?;
    temp.flush()?;

    debug!(path = %temp.path().display(), "upload persisted");
    let result = extractor.extract_path(temp.path());

    if let Err(e) = temp.close() {
        warn!(error = %e, "failed to remove uploaded file");
    }

    result
}
