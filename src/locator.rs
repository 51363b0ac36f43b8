//! Anchor Locator Module
//!
//! グリッド内のマーカーセル（月・日付番号・データ開始）を検索し、
//! 解決後の行インデックスを返すモジュール。

use tracing::debug;

use crate::api::{AnchorKind, AnchorRule, AnchorSpec};
use crate::error::ShiftGridError;
use crate::grid::Grid;
use crate::types::{AnchorHit, AnchorSet};

/// アンカーを検索する
///
/// 行を上から順に走査し、各アンカー種別について、トークンを含むセルを持つ
/// 最初の行を採用します（先勝ち）。
///
/// 任意アンカー（月・日付番号）の検索範囲は、データ開始マーカーの行までの
/// ヘッダー領域に限定されます。
///
/// # 戻り値
///
/// * `Ok(AnchorSet)` - データ開始アンカーが見つかった場合
/// * `Err(ShiftGridError::AnchorNotFound)` - データ開始アンカーが見つからない場合
pub fn locate(grid: &Grid, spec: &AnchorSpec) -> Result<AnchorSet, ShiftGridError> {
    // 1. 必須アンカー（全行を走査）
    let data_start = find_anchor(grid, &spec.data_start, grid.row_count()).ok_or_else(|| {
        ShiftGridError::AnchorNotFound {
            kind: AnchorKind::DataStart,
            token: spec.data_start.token.clone(),
        }
    })?;

    // 2. 任意アンカー（ヘッダー領域のみ）
    let header_end = data_start.marker_row + 1;
    let month = find_anchor(grid, &spec.month, header_end);
    let day_numbers = find_anchor(grid, &spec.day_numbers, header_end);

    let anchors = AnchorSet {
        month,
        day_numbers,
        data_start,
    };

    debug!(
        data_start = anchors.data_start.row,
        month = ?anchors.month.map(|h| h.row),
        day_numbers = ?anchors.day_numbers.map(|h| h.row),
        "anchors located"
    );

    let absent = anchors.absent();
    if !absent.is_empty() {
        debug!(absent = ?absent, "optional anchors not found");
    }

    Ok(anchors)
}

/// 先頭`row_limit`行の中からルールに一致する最初のセルを探す
fn find_anchor(grid: &Grid, rule: &AnchorRule, row_limit: usize) -> Option<AnchorHit> {
    grid.rows()
        .iter()
        .take(row_limit)
        .enumerate()
        .find_map(|(row_idx, row)| {
            row.iter()
                .position(|cell| rule.matches(cell))
                .map(|col_idx| AnchorHit::new(row_idx, col_idx, rule.row_offset))
        })
}
