//! Workbook Loader
//!
//! calamineでワークブックを開き、選択されたシートを`Grid`に変換します。
//! すべてのセルはトリム済みの文字列に正規化されます。

use calamine::{open_workbook_auto_from_rs, Data, Reader, Sheets};
use chrono::{Duration, NaiveDate};
use std::io::Cursor;
use tracing::debug;

use crate::api::SheetSelector;
use crate::error::ShiftGridError;
use crate::grid::{CellCoord, Grid};

/// ワークブックローダー
///
/// calamineのラッパーとして、シート選択とグリッド変換を提供します。
/// 入力はメモリ上のバッファとして保持されます。
pub(crate) struct WorkbookLoader {
    /// calamineのワークブック（形式は自動判定）
    sheets: Sheets<Cursor<Vec<u8>>>,
}

impl WorkbookLoader {
    /// メモリ上のバイト列からワークブックを開く
    ///
    /// # 戻り値
    ///
    /// * `Ok(WorkbookLoader)` - ワークブックの読み込みに成功した場合
    /// * `Err(ShiftGridError::SourceUnreadable)` - 表形式データとして解釈できない場合
    pub fn from_bytes(buffer: Vec<u8>) -> Result<Self, ShiftGridError> {
        let sheets = open_workbook_auto_from_rs(Cursor::new(buffer))?;
        Ok(Self { sheets })
    }

    /// すべてのシート名を取得
    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.sheet_names()
    }

    /// シート選択方式に基づいてシートを選択
    ///
    /// # 戻り値
    ///
    /// * `Ok(Vec<String>)` - 選択されたシート名のリスト（ワークブック順）
    /// * `Err(ShiftGridError::SourceUnreadable)` - ワークブックにシートがない場合
    /// * `Err(ShiftGridError::Config)` - シートが見つからない、またはインデックスが範囲外の場合
    pub fn select_sheets(&self, selector: &SheetSelector) -> Result<Vec<String>, ShiftGridError> {
        let all_sheet_names = self.sheet_names();

        if all_sheet_names.is_empty() {
            return Err(ShiftGridError::SourceUnreadable(
                "Workbook contains no sheets".to_string(),
            ));
        }

        match selector {
            SheetSelector::All => Ok(all_sheet_names),

            SheetSelector::Index(index) => all_sheet_names
                .get(*index)
                .map(|name| vec![name.clone()])
                .ok_or_else(|| {
                    ShiftGridError::Config(format!(
                        "Sheet index {} is out of range (total: {})",
                        index,
                        all_sheet_names.len()
                    ))
                }),

            SheetSelector::Name(name) => {
                if !all_sheet_names.contains(name) {
                    return Err(ShiftGridError::Config(format!("Sheet '{}' not found", name)));
                }
                Ok(vec![name.clone()])
            }
        }
    }

    /// シートを読み込み、A1を原点とするグリッドに変換
    ///
    /// calamineの範囲は最初の非空セルから始まるため、範囲の開始位置を加算して
    /// シート上の絶対座標に戻します。
    pub fn load_grid(&mut self, sheet_name: &str) -> Result<Grid, ShiftGridError> {
        let range = self.sheets.worksheet_range(sheet_name)?;

        let Some((start_row, start_col)) = range.start() else {
            return Ok(Grid::default());
        };

        let mut cells = Vec::new();
        for (row_idx, row) in range.rows().enumerate() {
            for (col_idx, cell) in row.iter().enumerate() {
                let coord = CellCoord::new(start_row + row_idx as u32, start_col + col_idx as u32);
                cells.push((coord, cell_to_string(cell)));
            }
        }

        let grid = Grid::from_sparse(cells);
        debug!(
            sheet = %sheet_name,
            rows = grid.row_count(),
            cols = grid.max_width(),
            "worksheet loaded"
        );

        Ok(grid)
    }
}

/// calamineのセル値を文字列に変換
///
/// * 空セル・エラーセル: 空文字列
/// * 整数値の浮動小数点: 小数点なし（`1.0` → `1`）
/// * 論理値: `TRUE` / `FALSE`
/// * 日付: `YYYY-MM-DD`（時刻部分があれば`YYYY-MM-DD HH:MM:SS`）
pub(crate) fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => format_number(*f),
        Data::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        Data::DateTime(dt) => format_serial_date(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.trim().to_string(),
        _ => String::new(),
    }
}

/// 数値をフォーマット
fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Excelのシリアル日付値（1900年システム）をフォーマット
///
/// 1899年12月30日を起点とします。範囲外の値は数値としてフォーマットします。
fn format_serial_date(serial_value: f64) -> String {
    let Some(epoch) = NaiveDate::from_ymd_opt(1899, 12, 30).and_then(|d| d.and_hms_opt(0, 0, 0))
    else {
        return format_number(serial_value);
    };

    let days = serial_value.floor();
    let seconds = ((serial_value - days) * 86_400.0).round() as i64;

    let datetime = epoch
        .checked_add_signed(Duration::days(days as i64))
        .and_then(|dt| dt.checked_add_signed(Duration::seconds(seconds)));

    match datetime {
        Some(dt) if seconds == 0 => dt.format("%Y-%m-%d").to_string(),
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => format_number(serial_value),
    }
}
