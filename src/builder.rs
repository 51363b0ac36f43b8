//! Builder Module
//!
//! Fluent Builder APIを提供し、`Extractor`インスタンスを段階的に構築する。
//! `Extractor`は抽出パイプライン（アンカー検索 → 切り分け → 正規化 → 組み立て）の
//! ファサードです。

use rayon::prelude::*;
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;
use tracing::{debug, warn};

use crate::api::{AnchorKind, AnchorRule, AnchorSpec, InputFormat, SheetSelector};
use crate::error::ShiftGridError;
use crate::grid::Grid;
use crate::layout::slice;
use crate::locator::locate;
use crate::normalizer::normalize;
use crate::parser::{lines_to_grid, read_text_lines, WorkbookLoader};
use crate::security::SecurityConfig;
use crate::types::{AnchorSet, ScheduleResult, ShiftRecord};

/// 抽出処理の設定を保持する内部構造体
#[derive(Debug, Clone, Default)]
pub(crate) struct ExtractionConfig {
    /// レイアウト検出の設定
    pub anchor_spec: AnchorSpec,

    /// シート選択方式
    pub sheet_selector: SheetSelector,

    /// 入力サイズ制限
    pub security: SecurityConfig,
}

/// Fluent Builder APIを提供する構造体
///
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use shiftgrid::{ExtractorBuilder, SheetSelector};
///
/// # fn main() -> Result<(), shiftgrid::ShiftGridError> {
/// let extractor = ExtractorBuilder::new()
///     .with_data_start_anchor("EMPLEADOS", 1)
///     .with_sheet_selector(SheetSelector::Name("Febrero".to_string()))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ExtractorBuilder {
    /// 内部設定（構築中）
    config: ExtractionConfig,
}

impl Default for ExtractorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractorBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - アンカー: `AnchorSpec::default()`（`MES` / `PLANTILLA`+1 / `PLANTILLA`+2）
    /// - シート選択: 最初のシート
    /// - 入力サイズ上限: 16MB
    pub fn new() -> Self {
        Self {
            config: ExtractionConfig::default(),
        }
    }

    /// アンカー設定をまとめて置き換える
    pub fn with_anchor_spec(mut self, spec: AnchorSpec) -> Self {
        self.config.anchor_spec = spec;
        self
    }

    /// 月アンカーのトークンと行オフセットを指定する
    pub fn with_month_anchor(self, token: impl Into<String>, row_offset: usize) -> Self {
        self.with_anchor(AnchorKind::Month, token, row_offset)
    }

    /// 日付番号アンカーのトークンと行オフセットを指定する
    pub fn with_day_numbers_anchor(self, token: impl Into<String>, row_offset: usize) -> Self {
        self.with_anchor(AnchorKind::DayNumbers, token, row_offset)
    }

    /// データ開始アンカーのトークンと行オフセットを指定する
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use shiftgrid::ExtractorBuilder;
    ///
    /// // 「TURNOS」と書かれた行の3行下から従業員データが始まる
    /// let builder = ExtractorBuilder::new()
    ///     .with_data_start_anchor("TURNOS", 3);
    /// ```
    pub fn with_data_start_anchor(self, token: impl Into<String>, row_offset: usize) -> Self {
        self.with_anchor(AnchorKind::DataStart, token, row_offset)
    }

    fn with_anchor(mut self, kind: AnchorKind, token: impl Into<String>, row_offset: usize) -> Self {
        *self.config.anchor_spec.rule_mut(kind) = AnchorRule::new(token, row_offset);
        self
    }

    /// 月の値を読む列を、月マーカーの列からの相対位置で指定する
    pub fn with_month_column_offset(mut self, offset: usize) -> Self {
        self.config.anchor_spec.month_col_offset = offset;
        self
    }

    /// 読み込むシートを選択する
    pub fn with_sheet_selector(mut self, selector: SheetSelector) -> Self {
        self.config.sheet_selector = selector;
        self
    }

    /// 入力ファイルの最大サイズ（バイト）を指定する
    pub fn with_max_input_size(mut self, bytes: u64) -> Self {
        self.config.security.max_input_file_size = bytes;
        self
    }

    /// 設定を検証し、`Extractor`インスタンスを生成する
    ///
    /// # 発生し得るエラー
    ///
    /// * `ShiftGridError::Config(String)`:
    ///   * アンカーのトークンが空白のみ
    ///   * 日付番号とデータ開始が同じトークンで、日付番号の行がデータ開始より下にある
    ///   * 入力サイズ上限が0
    pub fn build(self) -> Result<Extractor, ShiftGridError> {
        let spec = &self.config.anchor_spec;

        // 1. トークンの検証
        for kind in AnchorKind::ALL {
            if spec.rule(kind).token.trim().is_empty() {
                return Err(ShiftGridError::Config(format!(
                    "Anchor token for '{}' must not be blank",
                    kind
                )));
            }
        }

        // 2. 共有トークンのオフセット順序の検証
        let same_token = spec
            .day_numbers
            .token
            .trim()
            .eq_ignore_ascii_case(spec.data_start.token.trim());
        if same_token && spec.day_numbers.row_offset > spec.data_start.row_offset {
            return Err(ShiftGridError::Config(format!(
                "Invalid anchors: day_numbers offset ({}) lies below data_start offset ({})",
                spec.day_numbers.row_offset, spec.data_start.row_offset
            )));
        }

        // 3. 入力サイズ上限の検証
        if self.config.security.max_input_file_size == 0 {
            return Err(ShiftGridError::Config(
                "Maximum input size must be greater than zero".to_string(),
            ));
        }

        Ok(Extractor::new(self.config))
    }
}

/// 抽出処理のファサード
///
/// グリッドからスケジュールを抽出するメインエントリーポイントです。
/// 呼び出しごとに独立しており、状態を持たないため、複数スレッドから同時に使用できます。
///
/// # 使用例
///
/// ```rust
/// use shiftgrid::{ExtractorBuilder, Grid};
///
/// # fn main() -> Result<(), shiftgrid::ShiftGridError> {
/// let extractor = ExtractorBuilder::new().build()?;
/// let grid = Grid::from_rows(vec![
///     vec!["", "PLANTILLA", ""],
///     vec!["", "1", "2"],
///     vec!["Alice Bob", "AM", "PM"],
/// ]);
///
/// let schedule = extractor.extract(&grid);
/// assert_eq!(schedule.shifts.len(), 2);
/// assert_eq!(schedule.shifts[1].employee_name, "Bob");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    /// 抽出設定
    config: ExtractionConfig,
}

impl Extractor {
    pub(crate) fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    /// レイアウト検出の設定
    pub fn anchor_spec(&self) -> &AnchorSpec {
        &self.config.anchor_spec
    }

    /// 入力サイズ制限の設定
    pub fn security(&self) -> &SecurityConfig {
        &self.config.security
    }

    /// グリッドからスケジュールを抽出する
    ///
    /// 読み込めたグリッドに対しては失敗しません。データ開始アンカーがない場合は
    /// 空の結果（センチネル）を返します。
    pub fn extract(&self, grid: &Grid) -> ScheduleResult {
        settle(self.try_extract(grid)).unwrap_or_default()
    }

    /// グリッドからスケジュールを抽出する（エラーを返すバージョン）
    ///
    /// # 戻り値
    ///
    /// * `Ok(ScheduleResult)` - 抽出に成功した場合
    /// * `Err(ShiftGridError::AnchorNotFound)` - データ開始アンカーが見つからない場合
    pub fn try_extract(&self, grid: &Grid) -> Result<ScheduleResult, ShiftGridError> {
        let anchors = locate(grid, &self.config.anchor_spec)?;
        Ok(self.assemble_from(grid, &anchors))
    }

    /// 切り分け → 正規化 → 組み立て
    fn assemble_from(&self, grid: &Grid, anchors: &AnchorSet) -> ScheduleResult {
        let layout = slice(grid, anchors, &self.config.anchor_spec);
        let shifts = normalize(layout.employee_rows, &layout.day_numbers);

        debug!(
            month = %layout.month,
            days = layout.day_numbers.len(),
            records = shifts.len(),
            "schedule assembled"
        );

        assemble(layout.month, layout.day_numbers, shifts)
    }

    /// ワークブックを読み込み、選択されたシートをグリッドに変換する
    ///
    /// `SheetSelector::All`の場合は最初のシートを使用します。
    ///
    /// # 戻り値
    ///
    /// * `Ok(Grid)` - 読み込みに成功した場合
    /// * `Err(ShiftGridError::SourceUnreadable)` - 表形式データとして解釈できない場合
    /// * `Err(ShiftGridError::SecurityViolation)` - 入力サイズが上限を超えた場合
    pub fn load_grid<R: Read>(&self, input: R) -> Result<Grid, ShiftGridError> {
        let buffer = self.config.security.read_limited(input)?;
        let mut loader = WorkbookLoader::from_bytes(buffer)?;

        let sheet_name = loader
            .select_sheets(&self.config.sheet_selector)?
            .into_iter()
            .next()
            .ok_or_else(|| ShiftGridError::SourceUnreadable("No sheet selected".to_string()))?;

        debug!(sheet = %sheet_name, "loading worksheet");
        loader.load_grid(&sheet_name)
    }

    /// ワークブックからスケジュールを抽出する
    ///
    /// 読み込みの失敗（`SourceUnreadable`など）は呼び出し元に伝播します。
    ///
    /// ```rust,no_run
    /// use shiftgrid::ExtractorBuilder;
    /// use std::fs::File;
    ///
    /// # fn main() -> Result<(), shiftgrid::ShiftGridError> {
    /// let extractor = ExtractorBuilder::new().build()?;
    /// let schedule = extractor.extract_from_reader(File::open("schedule-febrero.xlsx")?)?;
    /// println!("{}: {} employees", schedule.month, schedule.shifts.len());
    /// # Ok(())
    /// # }
    /// ```
    pub fn extract_from_reader<R: Read>(&self, input: R) -> Result<ScheduleResult, ShiftGridError> {
        let grid = self.load_grid(input)?;
        settle(self.try_extract(&grid))
    }

    /// 選択されたすべてのシートからスケジュールを並列に抽出する
    ///
    /// 各シートはメモリ上のバッファから個別にワークブックを開き直して処理されます。
    /// 結果はワークブック内のシート順に並びます。
    pub fn extract_sheets<R: Read>(
        &self,
        input: R,
    ) -> Result<Vec<(String, ScheduleResult)>, ShiftGridError> {
        let buffer = self.config.security.read_limited(input)?;
        let sheet_names =
            WorkbookLoader::from_bytes(buffer.clone())?.select_sheets(&self.config.sheet_selector)?;

        sheet_names
            .par_iter()
            .map(|sheet_name| -> Result<(String, ScheduleResult), ShiftGridError> {
                let mut loader = WorkbookLoader::from_bytes(buffer.clone())?;
                let grid = loader.load_grid(sheet_name)?;
                Ok((sheet_name.clone(), settle(self.try_extract(&grid))?))
            })
            .collect()
    }

    /// 行ベースのテキストからスケジュールを抽出する
    pub fn extract_text<R: Read>(&self, input: R) -> Result<ScheduleResult, ShiftGridError> {
        let buffer = self.config.security.read_limited(input)?;
        let lines = read_text_lines(Cursor::new(buffer))?;
        let grid = lines_to_grid(&lines);
        settle(self.try_extract(&grid))
    }

    /// ファイルの拡張子に応じてスケジュールを抽出する
    ///
    /// * `.xlsx` - ワークブックとして読み込む
    /// * `.txt` - 行ベースのテキストとして読み込む
    ///
    /// それ以外の拡張子は`ShiftGridError::UnsupportedFormat`になります。
    pub fn extract_path(&self, path: impl AsRef<Path>) -> Result<ScheduleResult, ShiftGridError> {
        let path = path.as_ref();
        let format = InputFormat::from_path(path)
            .ok_or_else(|| ShiftGridError::UnsupportedFormat(path.display().to_string()))?;

        let file = File::open(path)?;
        match format {
            InputFormat::Workbook => self.extract_from_reader(file),
            InputFormat::Text => self.extract_text(file),
        }
    }
}

/// 抽出の中止をセンチネルに置き換え、それ以外のエラーはそのまま返す
fn settle(result: Result<ScheduleResult, ShiftGridError>) -> Result<ScheduleResult, ShiftGridError> {
    match result {
        Err(err) if err.collapses_to_sentinel() => {
            warn!(error = %err, "extraction aborted; returning empty schedule");
            Ok(ScheduleResult::empty())
        }
        other => other,
    }
}

/// 抽出結果を組み立てる
///
/// 追加の検証は行いません。
pub fn assemble(month: String, day_numbers: Vec<String>, shifts: Vec<ShiftRecord>) -> ScheduleResult {
    ScheduleResult {
        month,
        day_numbers,
        shifts,
    }
}
