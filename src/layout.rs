//! Layout Slicer Module
//!
//! アンカー位置を使ってグリッドを3つの論理領域（月セル・日付番号行・従業員ブロック）に
//! 切り分けるモジュール。

use tracing::debug;

use crate::api::AnchorSpec;
use crate::grid::Grid;
use crate::types::AnchorSet;

/// 従業員名の列ラベル
pub const NAME_COLUMN_LABEL: &str = "Name";

/// 切り分け済みのレイアウト
///
/// 従業員ブロックは元のグリッドを借用します。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout<'g> {
    /// 月セルの値（月アンカーがない場合は空文字列）
    pub month: String,

    /// 日付番号行（先頭のラベル列を除く。アンカーがない場合は空）
    pub day_numbers: Vec<String>,

    /// データ開始行からグリッド末尾までの行
    ///
    /// 各行の先頭セルが従業員名、残りがシフト列です。
    /// この段階では列数の検証は行いません。
    pub employee_rows: &'g [Vec<String>],
}

/// グリッドを切り分ける
///
/// * 月セル: 月マーカーの行で、マーカー列から`month_col_offset`列右のセル
/// * 日付番号行: 解決行の全セルから先頭列を除いたもの
/// * 従業員ブロック: データ開始の解決行から末尾まで
///
/// 解決行がグリッドの範囲外の場合、その領域は空になります。
pub fn slice<'g>(grid: &'g Grid, anchors: &AnchorSet, spec: &AnchorSpec) -> Layout<'g> {
    let month = anchors
        .month
        .and_then(|hit| {
            let col = hit.marker_col.checked_add(spec.month_col_offset)?;
            grid.cell(hit.row, col)
        })
        .unwrap_or_default()
        .to_string();

    let day_numbers: Vec<String> = anchors
        .day_numbers
        .and_then(|hit| grid.row(hit.row))
        .map(|row| row.iter().skip(1).cloned().collect())
        .unwrap_or_default();

    let employee_rows = grid
        .rows()
        .get(anchors.data_start.row..)
        .unwrap_or_default();

    debug!(
        month = %month,
        day_count = day_numbers.len(),
        employee_rows = employee_rows.len(),
        "grid sliced"
    );

    Layout {
        month,
        day_numbers,
        employee_rows,
    }
}

/// 従業員ブロックの列ラベルを生成
///
/// 先頭は`Name`、以降は日付番号を使います。日付番号が足りない列には
/// `Day N`（1始まりの列番号）を割り当てます。
pub fn column_labels(day_numbers: &[String], shift_columns: usize) -> Vec<String> {
    let width = shift_columns.max(day_numbers.len());
    let mut labels = Vec::with_capacity(width + 1);
    labels.push(NAME_COLUMN_LABEL.to_string());

    for col in 0..width {
        match day_numbers.get(col) {
            Some(day) if !day.is_empty() => labels.push(day.clone()),
            _ => labels.push(format!("Day {}", col + 1)),
        }
    }

    labels
}
