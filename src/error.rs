//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use thiserror::Error;

use crate::api::AnchorKind;

/// shiftgridクレート全体で使用するエラー型
///
/// # エラーの種類
///
/// - `Io`: I/O操作中に発生したエラー
/// - `SourceUnreadable`: 入力を表形式データとして読み込めなかった（Grid Loader境界）
/// - `AnchorNotFound`: 必須アンカー（データ開始マーカー）が見つからなかった
/// - `Config`: 設定の検証に失敗した
/// - `UnsupportedFormat`: 許可されていない拡張子
/// - `SecurityViolation`: 入力サイズ制限などに違反した
///
/// 任意アンカー（月・日付番号）の欠落はエラーではなく、`AnchorSet`上の`None`として
/// 表現されます。列数の不揃いな行も位置合わせで吸収され、エラーにはなりません。
///
/// # 使用例
///
/// ```rust,no_run
/// use shiftgrid::{ExtractorBuilder, ShiftGridError};
/// use std::fs::File;
///
/// fn load(path: &str) -> Result<(), ShiftGridError> {
///     let extractor = ExtractorBuilder::new().build()?;
///     let file = File::open(path)?;  // Ioエラーが自動的に変換される
///     let schedule = extractor.extract_from_reader(file)?;
///     println!("{} employees", schedule.shifts.len());
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum ShiftGridError {
    /// I/O操作中に発生したエラー
    ///
    /// `#[from]`属性により、`std::io::Error`から自動的に変換されます。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 入力を表形式データとして解釈できなかったエラー
    ///
    /// calamineがワークブックを開けない場合、シートが存在しない場合などに発生します。
    /// エンジンは回復を試みず、呼び出し元へそのまま伝播します。
    #[error("Source unreadable: {0}")]
    SourceUnreadable(String),

    /// 必須アンカーが見つからなかったエラー
    ///
    /// データ開始マーカーがない場合、ヘッダーと従業員行を区別できないため
    /// 抽出を中止します。`Extractor::extract`はこのエラーを空の結果に変換します。
    #[error("Anchor '{kind}' not found (token: '{token}')")]
    AnchorNotFound {
        /// 見つからなかったアンカーの種類
        kind: AnchorKind,
        /// 検索したトークン
        token: String,
    },

    /// 設定の検証に失敗したエラー
    ///
    /// `ExtractorBuilder::build()`時に設定を検証し、無効な設定が検出された場合に発生します。
    ///
    /// # 例
    ///
    /// ```rust,no_run
    /// use shiftgrid::{ExtractorBuilder, ShiftGridError};
    ///
    /// let result = ExtractorBuilder::new()
    ///     .with_data_start_anchor("  ", 2)  // 空白のみのトークン
    ///     .build();
    ///
    /// match result {
    ///     Err(ShiftGridError::Config(msg)) => {
    ///         println!("設定エラー: {}", msg);
    ///     }
    ///     _ => {}
    /// }
    /// ```
    #[error("Configuration error: {0}")]
    Config(String),

    /// サポートされていない入力形式
    #[error("Unsupported input format: {0}")]
    UnsupportedFormat(String),

    /// セキュリティ制限に違反したエラー
    ///
    /// 入力ファイルサイズの上限超過などで発生します。
    #[error("Security violation: {0}")]
    SecurityViolation(String),

    /// JSONシリアライズのエラー
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<calamine::Error> for ShiftGridError {
    fn from(err: calamine::Error) -> Self {
        ShiftGridError::SourceUnreadable(err.to_string())
    }
}

impl ShiftGridError {
    /// 抽出パイプライン内部の致命的エラーかどうか
    ///
    /// `true`の場合、`Extractor::extract`は空の結果（センチネル）を返します。
    pub fn collapses_to_sentinel(&self) -> bool {
        matches!(self, ShiftGridError::AnchorNotFound { .. })
    }
}
