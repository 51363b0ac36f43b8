//! Record Normalizer Module
//!
//! 従業員ブロックを走査し、従業員ごとの`ShiftRecord`を構築するモジュール。

use tracing::{debug, warn};

use crate::types::ShiftRecord;

/// 従業員ブロックを正規化する
///
/// # 規則
///
/// 1. 名前セル（各行の先頭セル）をトリムし、空なら区切り行としてスキップする
/// 2. 名前セルに空白区切りのトークンが複数ある場合、各トークンを別々の従業員とし、
///    その行のシフト列の同一コピーを割り当てる（1行を2人で共有するレイアウト用）
/// 3. 同名の従業員が複数行に現れても統合せず、出現順に保持する
/// 4. シフト列は列幅に揃える。短い行は末尾を空文字列で埋め、長い行は列幅で切り詰める
///
/// 列幅は日付番号列の長さです。日付番号がない場合はブロック内で最も長い行の
/// シフト列数を使います。
pub fn normalize(employee_rows: &[Vec<String>], day_numbers: &[String]) -> Vec<ShiftRecord> {
    let width = column_width(employee_rows, day_numbers);
    let mut records = Vec::new();

    for (offset, row) in employee_rows.iter().enumerate() {
        let name = row.first().map(|cell| cell.trim()).unwrap_or_default();
        if name.is_empty() {
            continue;
        }

        let shifts = align_shifts(row.get(1..).unwrap_or_default(), width, offset);

        let names: Vec<&str> = name.split_whitespace().collect();
        if names.len() > 1 {
            debug!(row = offset, count = names.len(), "splitting shared name cell");
        }

        for employee in names {
            records.push(ShiftRecord::new(employee, shifts.clone()));
        }
    }

    records
}

/// シフト列の列幅を決定
fn column_width(employee_rows: &[Vec<String>], day_numbers: &[String]) -> usize {
    if !day_numbers.is_empty() {
        return day_numbers.len();
    }

    employee_rows
        .iter()
        .map(|row| row.len().saturating_sub(1))
        .max()
        .unwrap_or(0)
}

/// シフト列を列幅に揃える
fn align_shifts(cells: &[String], width: usize, offset: usize) -> Vec<String> {
    if cells.len() > width {
        let dropped = cells[width..].iter().filter(|c| !c.is_empty()).count();
        if dropped > 0 {
            warn!(
                row = offset,
                width,
                dropped,
                "row has shift cells beyond the last day column; truncating"
            );
        }
    }

    let mut shifts: Vec<String> = cells.iter().take(width).cloned().collect();
    shifts.resize(width, String::new());
    shifts
}
