//! HTTP Error Types
//!
//! アップロードエンドポイントのエラーと、そのHTTPレスポンスへの変換。

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::{error, warn};

use crate::error::ShiftGridError;

/// アップロード処理のエラー
///
/// 入力不備は400、処理中の失敗は500に変換されます。
/// レスポンスボディは常に`{"error": "..."}`です。
#[derive(Error, Debug)]
pub enum UploadError {
    /// `file`パートがない
    #[error("No file part")]
    MissingFile,

    /// ファイル名が空
    #[error("No selected file")]
    EmptyFilename,

    /// 許可リストにない拡張子
    #[error("File type not allowed")]
    DisallowedExtension(String),

    /// multipartボディの解析に失敗
    #[error("Invalid multipart request: {0}")]
    Multipart(String),

    /// 抽出処理の失敗
    #[error("{0}")]
    Processing(#[from] ShiftGridError),

    /// ブロッキングタスクの失敗
    #[error("Processing task failed: {0}")]
    Task(String),
}

impl UploadError {
    /// 対応するHTTPステータス
    pub fn status(&self) -> StatusCode {
        match self {
            UploadError::MissingFile
            | UploadError::EmptyFilename
            | UploadError::DisallowedExtension(_)
            | UploadError::Multipart(_) => StatusCode::BAD_REQUEST,
            UploadError::Processing(_) | UploadError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            error!(error = %self, "upload processing failed");
        } else {
            warn!(error = %self, detail = ?self, "upload rejected");
        }

        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
