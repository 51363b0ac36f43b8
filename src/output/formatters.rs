//! Output Formatters Implementation
//!
//! 各出力フォーマットの実装を提供するモジュール。

use crate::error::ShiftGridError;
use crate::layout::column_labels;
use crate::types::ScheduleResult;
use std::io::Write;
use unicode_width::UnicodeWidthStr;

/// JSON形式のフォーマッター
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn render<W: Write>(
        &self,
        result: &ScheduleResult,
        writer: &mut W,
    ) -> Result<(), ShiftGridError> {
        serde_json::to_writer_pretty(&mut *writer, result)?;
        writeln!(writer)?;
        Ok(())
    }

    pub fn render_sheets<W: Write>(
        &self,
        sheets: &[(String, ScheduleResult)],
        writer: &mut W,
    ) -> Result<(), ShiftGridError> {
        use serde_json::json;

        let entries: Vec<serde_json::Value> = sheets
            .iter()
            .map(|(name, result)| json!({ "sheet": name, "schedule": result }))
            .collect();

        serde_json::to_writer_pretty(&mut *writer, &entries)?;
        writeln!(writer)?;
        Ok(())
    }
}

/// プレーンテキストの表形式のフォーマッター
///
/// 列幅は表示幅（全角文字は2、半角文字は1）で計算します。
pub struct TableFormatter;

impl TableFormatter {
    pub fn render<W: Write>(
        &self,
        result: &ScheduleResult,
        writer: &mut W,
    ) -> Result<(), ShiftGridError> {
        if !result.month.is_empty() {
            writeln!(writer, "{}", result.month)?;
        }

        if result.shifts.is_empty() {
            writeln!(writer, "(no shifts)")?;
            return Ok(());
        }

        // 1. 見出しと行の準備
        let shift_columns = result
            .shifts
            .iter()
            .map(|r| r.shifts.len())
            .max()
            .unwrap_or(0);
        let header = column_labels(&result.day_numbers, shift_columns);

        let rows: Vec<Vec<&str>> = result
            .shifts
            .iter()
            .map(|record| {
                std::iter::once(record.employee_name.as_str())
                    .chain(record.shifts.iter().map(String::as_str))
                    .collect()
            })
            .collect();

        // 2. 列幅の計算
        let mut col_widths: Vec<usize> = header.iter().map(|h| h.width()).collect();
        for row in &rows {
            for (col_idx, cell) in row.iter().enumerate() {
                if col_idx < col_widths.len() {
                    col_widths[col_idx] = col_widths[col_idx].max(cell.width());
                }
            }
        }

        // 3. 出力
        let header_cells: Vec<&str> = header.iter().map(String::as_str).collect();
        write_row(writer, &header_cells, &col_widths)?;

        let separator: Vec<String> = col_widths.iter().map(|w| "-".repeat(*w)).collect();
        writeln!(writer, "{}", separator.join("-+-"))?;

        for row in &rows {
            write_row(writer, row, &col_widths)?;
        }

        Ok(())
    }
}

/// 1行を左揃えで出力
fn write_row<W: Write>(
    writer: &mut W,
    cells: &[&str],
    col_widths: &[usize],
) -> Result<(), ShiftGridError> {
    let mut line = String::new();

    for (col_idx, width) in col_widths.iter().enumerate() {
        if col_idx > 0 {
            line.push_str(" | ");
        }
        let content = cells.get(col_idx).copied().unwrap_or_default();
        line.push_str(content);
        line.push_str(&" ".repeat(width.saturating_sub(content.width())));
    }

    writeln!(writer, "{}", line.trim_end())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ShiftRecord;

    fn sample() -> ScheduleResult {
        ScheduleResult {
            month: "FEBRERO".to_string(),
            day_numbers: vec!["1".to_string(), "2".to_string()],
            shifts: vec![
                ShiftRecord::new("Alice", vec!["M".into(), "T".into()]),
                ShiftRecord::new("田中", vec!["N".into(), "".into()]),
            ],
        }
    }

    #[test]
    fn test_json_render() {
        let mut out = Vec::new();
        JsonFormatter.render(&sample(), &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["month"], "FEBRERO");
        assert_eq!(value["shifts"][1]["name"], "田中");
    }

    #[test]
    fn test_json_render_sheets() {
        let mut out = Vec::new();
        let sheets = vec![("Enero".to_string(), sample()), ("Vacía".to_string(), ScheduleResult::empty())];
        JsonFormatter.render_sheets(&sheets, &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["sheet"], "Enero");
        assert_eq!(value[1]["schedule"]["month"], "");
    }

    #[test]
    fn test_table_render_aligns_wide_characters() {
        let mut out = Vec::new();
        TableFormatter.render(&sample(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "FEBRERO");
        assert_eq!(lines[1], "Name  | 1 | 2");
        assert_eq!(lines[2], "------+---+--");
        assert_eq!(lines[3], "Alice | M | T");
        // 「田中」は表示幅4なので1文字分のパディング
        assert_eq!(lines[4], "田中  | N |");
    }

    #[test]
    fn test_table_render_empty() {
        let mut out = Vec::new();
        TableFormatter.render(&ScheduleResult::empty(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "(no shifts)\n");
    }
}
