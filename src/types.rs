//! Types Module
//!
//! 抽出パイプラインで使用する共通データ型を定義するモジュール。

use serde::{Deserialize, Serialize};

use crate::api::AnchorKind;

/// 解決済みのアンカー位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorHit {
    /// マーカートークンが見つかった行
    pub marker_row: usize,

    /// マーカートークンが見つかった列
    pub marker_col: usize,

    /// オフセット適用後の行
    pub row: usize,
}

impl AnchorHit {
    /// 新しいアンカー位置を生成
    ///
    /// 解決行が`usize`の範囲を超える場合は`usize::MAX`に飽和し、
    /// グリッド外の行として扱われます。
    pub fn new(marker_row: usize, marker_col: usize, row_offset: usize) -> Self {
        Self {
            marker_row,
            marker_col,
            row: marker_row.saturating_add(row_offset),
        }
    }
}

/// アンカー種別ごとの解決結果
///
/// 任意アンカーの欠落は`None`で表現されます。データ開始アンカーは必須のため、
/// `AnchorSet`が存在する時点で常に解決済みです。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorSet {
    /// 月アンカー
    pub month: Option<AnchorHit>,

    /// 日付番号アンカー
    pub day_numbers: Option<AnchorHit>,

    /// データ開始アンカー
    pub data_start: AnchorHit,
}

impl AnchorSet {
    /// 種類に対応する解決結果を取得
    pub fn get(&self, kind: AnchorKind) -> Option<AnchorHit> {
        match kind {
            AnchorKind::Month => self.month,
            AnchorKind::DayNumbers => self.day_numbers,
            AnchorKind::DataStart => Some(self.data_start),
        }
    }

    /// 見つからなかった任意アンカーの一覧
    pub fn absent(&self) -> Vec<AnchorKind> {
        AnchorKind::ALL
            .into_iter()
            .filter(|kind| !kind.is_required() && self.get(*kind).is_none())
            .collect()
    }
}

/// 1人の従業員のシフト列
///
/// `shifts`は日付番号列と位置で対応し、同じ長さを持ちます。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftRecord {
    /// 従業員名（空でない、トリム済み）
    #[serde(rename = "name")]
    pub employee_name: String,

    /// 日ごとのシフトコード
    pub shifts: Vec<String>,
}

impl ShiftRecord {
    /// 新しいレコードを生成
    pub fn new(employee_name: impl Into<String>, shifts: Vec<String>) -> Self {
        Self {
            employee_name: employee_name.into(),
            shifts,
        }
    }
}

/// 抽出結果
///
/// 抽出ごとに1回だけ組み立てられ、以後変更されません。
/// 抽出に失敗した場合はすべてのフィールドが空のセンチネル（[`ScheduleResult::empty`]）になります。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScheduleResult {
    /// 月ラベル（空文字列は不明を意味する）
    pub month: String,

    /// 日付番号列
    pub day_numbers: Vec<String>,

    /// 従業員ごとのシフト（同名の従業員もそのまま保持）
    pub shifts: Vec<ShiftRecord>,
}

impl ScheduleResult {
    /// 空の結果（センチネル）
    pub fn empty() -> Self {
        Self::default()
    }

    /// センチネルかどうか
    pub fn is_empty(&self) -> bool {
        self.month.is_empty() && self.day_numbers.is_empty() && self.shifts.is_empty()
    }

    /// 指定した名前のレコードをすべて取得
    pub fn records_for<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a ShiftRecord> + 'a {
        self.shifts.iter().filter(move |r| r.employee_name == name)
    }
}
