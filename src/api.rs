//! Public API Types
//!
//! 公開APIで使用する列挙型・設定型を定義するモジュール。

use std::fmt;
use std::path::Path;

/// アンカーの種類
///
/// グリッド内の構造的な境界を示すマーカーセルの種類です。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnchorKind {
    /// 月ラベル（任意）
    Month,

    /// 日付番号の行（任意）
    DayNumbers,

    /// 従業員データの開始行（必須）
    DataStart,
}

impl AnchorKind {
    /// すべてのアンカー種別
    pub const ALL: [AnchorKind; 3] = [
        AnchorKind::Month,
        AnchorKind::DayNumbers,
        AnchorKind::DataStart,
    ];

    /// 見つからない場合に抽出を中止するかどうか
    pub fn is_required(self) -> bool {
        matches!(self, AnchorKind::DataStart)
    }

    /// ログやエラーメッセージで使用する名前
    pub fn as_str(self) -> &'static str {
        match self {
            AnchorKind::Month => "month",
            AnchorKind::DayNumbers => "day_numbers",
            AnchorKind::DataStart => "data_start",
        }
    }
}

impl fmt::Display for AnchorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 1種類のアンカーの検索ルール
///
/// `token`を大文字小文字を区別せずにセル内の部分文字列として検索し、
/// 最初に見つかった行から`row_offset`行下を解決後の行とします。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorRule {
    /// 検索するトークン（大文字小文字を区別しない部分一致）
    pub token: String,

    /// マーカー行から解決行までの行オフセット
    pub row_offset: usize,
}

impl AnchorRule {
    /// 新しいルールを生成
    pub fn new(token: impl Into<String>, row_offset: usize) -> Self {
        Self {
            token: token.into(),
            row_offset,
        }
    }

    /// セルがこのルールのトークンを含むかどうか
    pub(crate) fn matches(&self, cell: &str) -> bool {
        let needle = self.token.trim().to_lowercase();
        !needle.is_empty() && cell.to_lowercase().contains(&needle)
    }
}

/// レイアウト検出の設定
///
/// 各アンカーのトークンとオフセットをデータとして保持します。
/// デフォルトは元のスケジュール表のレイアウトに合わせています。
///
/// | アンカー | トークン | 行オフセット |
/// | -------- | -------- | ------------ |
/// | 月 | `MES` | 0（値はマーカーの右隣の列） |
/// | 日付番号 | `PLANTILLA` | 1 |
/// | データ開始 | `PLANTILLA` | 2 |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorSpec {
    /// 月アンカー
    pub month: AnchorRule,

    /// 日付番号アンカー
    pub day_numbers: AnchorRule,

    /// データ開始アンカー
    pub data_start: AnchorRule,

    /// 月の値を読む列（月マーカーの列からの相対位置）
    pub month_col_offset: usize,
}

impl Default for AnchorSpec {
    fn default() -> Self {
        Self {
            month: AnchorRule::new("MES", 0),
            day_numbers: AnchorRule::new("PLANTILLA", 1),
            data_start: AnchorRule::new("PLANTILLA", 2),
            month_col_offset: 1,
        }
    }
}

impl AnchorSpec {
    /// 種類に対応するルールを取得
    pub fn rule(&self, kind: AnchorKind) -> &AnchorRule {
        match kind {
            AnchorKind::Month => &self.month,
            AnchorKind::DayNumbers => &self.day_numbers,
            AnchorKind::DataStart => &self.data_start,
        }
    }

    pub(crate) fn rule_mut(&mut self, kind: AnchorKind) -> &mut AnchorRule {
        match kind {
            AnchorKind::Month => &mut self.month,
            AnchorKind::DayNumbers => &mut self.day_numbers,
            AnchorKind::DataStart => &mut self.data_start,
        }
    }
}

/// シートの選択方式
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SheetSelector {
    /// インデックス指定（0始まり、デフォルトは最初のシート）
    Index(usize),

    /// シート名指定
    Name(String),

    /// すべてのシート（`Extractor::extract_sheets`で使用）
    ///
    /// 単一結果を返すAPIでは最初のシートを使用します。
    All,
}

impl Default for SheetSelector {
    fn default() -> Self {
        SheetSelector::Index(0)
    }
}

/// 出力フォーマット
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum OutputFormat {
    /// JSON形式（デフォルト）
    ///
    /// ```json
    /// {
    ///   "month": "FEBRERO",
    ///   "day_numbers": ["1", "2"],
    ///   "shifts": [{"name": "Alice", "shifts": ["M", "T"]}]
    /// }
    /// ```
    #[default]
    Json,

    /// 整列済みのプレーンテキスト表
    ///
    /// ```text
    /// FEBRERO
    /// Name  | 1 | 2
    /// Alice | M | T
    /// ```
    Table,
}

/// 入力ファイルの形式
///
/// 許可リストは`xlsx`（表形式）と`txt`（行ベースのテキスト形式）の2つです。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// calamineで読み込むワークブック
    Workbook,

    /// 行ベースのテキスト
    Text,
}

impl InputFormat {
    /// 許可されている拡張子
    pub const ALLOWED_EXTENSIONS: [&'static str; 2] = ["xlsx", "txt"];

    /// 拡張子から形式を判定（大文字小文字を区別しない）
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "xlsx" => Some(InputFormat::Workbook),
            "txt" => Some(InputFormat::Text),
            _ => None,
        }
    }

    /// 形式に対応する拡張子
    pub fn extension(self) -> &'static str {
        match self {
            InputFormat::Workbook => "xlsx",
            InputFormat::Text => "txt",
        }
    }

    /// ファイル名・パスから形式を判定
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}
