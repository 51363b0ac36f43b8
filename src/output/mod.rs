//! Output Format Module
//!
//! Strategy Patternによる出力フォーマットの抽象化を提供するモジュール。

mod formatters;

use crate::api::OutputFormat;
use crate::error::ShiftGridError;
use crate::types::ScheduleResult;
use std::io::Write;

pub use formatters::*;

/// 出力フォーマッター（Strategy Pattern）
#[derive(Debug, Clone, Copy)]
pub enum OutputFormatter {
    Json,
    Table,
}

impl OutputFormatter {
    /// 出力フォーマットからフォーマッターを生成
    pub fn from_format(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => OutputFormatter::Json,
            OutputFormat::Table => OutputFormatter::Table,
        }
    }

    /// 抽出結果を指定されたフォーマットで出力する
    pub fn render<W: Write>(
        &self,
        result: &ScheduleResult,
        writer: &mut W,
    ) -> Result<(), ShiftGridError> {
        match self {
            OutputFormatter::Json => JsonFormatter.render(result, writer),
            OutputFormatter::Table => TableFormatter.render(result, writer),
        }
    }

    /// 複数シートの抽出結果を出力する
    ///
    /// JSONの場合は`[{"sheet": ..., "schedule": ...}]`の配列、
    /// 表の場合はシートごとに見出しを付けて順に出力します。
    pub fn render_sheets<W: Write>(
        &self,
        sheets: &[(String, ScheduleResult)],
        writer: &mut W,
    ) -> Result<(), ShiftGridError> {
        match self {
            OutputFormatter::Json => JsonFormatter.render_sheets(sheets, writer),
            OutputFormatter::Table => {
                for (idx, (name, result)) in sheets.iter().enumerate() {
                    if idx > 0 {
                        writeln!(writer)?;
                    }
                    writeln!(writer, "# Sheet: {}\n", name)?;
                    TableFormatter.render(result, writer)?;
                }
                Ok(())
            }
        }
    }
}
