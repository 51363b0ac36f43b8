//! HTTP Service Module
//!
//! アップロード・読み取りエンドポイントを提供するaxumルーター。
//!
//! | メソッド | パス | 内容 |
//! | -------- | ---- | ---- |
//! | `POST` | `/upload` | multipartの`file`フィールドを抽出し、ストアを置き換える |
//! | `GET` | `/shifts` | 最後に組み立てられたスケジュール |
//! | `GET` | `/health` | 稼働確認 |

mod error;
mod handlers;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::builder::Extractor;
use crate::error::ShiftGridError;
use crate::store::ScheduleStore;

pub use error::UploadError;

/// multipartの境界やヘッダー分の余裕
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// ハンドラ間で共有する状態
#[derive(Debug, Clone)]
pub struct AppState {
    /// 抽出処理
    pub extractor: Arc<Extractor>,

    /// 最新のスケジュール
    pub store: Arc<ScheduleStore>,

    /// アップロードを一時保存するディレクトリ
    pub upload_dir: PathBuf,
}

impl AppState {
    pub fn new(extractor: Extractor, store: ScheduleStore, upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            extractor: Arc::new(extractor),
            store: Arc::new(store),
            upload_dir: upload_dir.into(),
        }
    }
}

/// サーバーの起動設定
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,

    /// アップロードの一時保存先（存在しなければ作成）
    pub upload_dir: PathBuf,

    /// 起動時に読み込んでストアを初期化するファイル
    pub preload: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            upload_dir: PathBuf::from("uploads"),
            preload: None,
        }
    }
}

/// ルーターを構築する
///
/// リクエストボディの上限は抽出処理の入力サイズ上限に合わせます。
pub fn router(state: AppState) -> Router {
    let max_input = state.extractor.security().max_input_file_size;
    let body_limit = usize::try_from(max_input)
        .unwrap_or(usize::MAX)
        .saturating_add(MULTIPART_OVERHEAD);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/shifts", get(handlers::get_shifts))
        .route("/upload", post(handlers::upload_schedule))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// サーバーを起動し、終了まで待機する
///
/// # 引数
///
/// * `config` - 待ち受けアドレスとアップロード先
/// * `extractor` - アップロードの抽出に使用する設定済みの`Extractor`
pub async fn serve(config: ServerConfig, extractor: Extractor) -> Result<(), ShiftGridError> {
    tokio::fs::create_dir_all(&config.upload_dir).await?;

    let store = match &config.preload {
        Some(path) => preload_store(&extractor, path),
        None => ScheduleStore::new(),
    };

    let app = router(AppState::new(extractor, store, config.upload_dir.clone()));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

/// 起動時のファイルからストアを初期化する
///
/// 読み込みに失敗した場合は空のストアで起動します。
fn preload_store(extractor: &Extractor, path: &Path) -> ScheduleStore {
    match extractor.extract_path(path) {
        Ok(result) => {
            info!(
                path = %path.display(),
                month = %result.month,
                records = result.shifts.len(),
                "schedule preloaded"
            );
            ScheduleStore::with_result(result)
        }
        Err(e) => {
            error!(path = %path.display(), error = %e, "preload failed; starting empty");
            ScheduleStore::new()
        }
    }
}
