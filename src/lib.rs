//! shiftgrid - Anchor-based extraction of monthly shift schedules
//!
//! スプレッドシートに書かれた月次のシフト表から、月ラベル・日付番号・
//! 従業員ごとのシフトを構造化データとして抽出するクレートです。
//! 固定のセル位置ではなく、マーカーセル（アンカー）を基準にレイアウトを検出します。
//!
//! 抽出パイプライン:
//!
//! 1. アンカー検索（`locate`）
//! 2. レイアウトの切り分け（`slice`）
//! 3. 従業員行の正規化（`normalize`）
//! 4. 結果の組み立て（`assemble`）
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::fs::File;
//! use shiftgrid::ExtractorBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let extractor = ExtractorBuilder::new().build()?;
//!
//!     let input = File::open("schedule-febrero.xlsx")?;
//!     let schedule = extractor.extract_from_reader(input)?;
//!
//!     for record in &schedule.shifts {
//!         println!("{}: {:?}", record.employee_name, record.shifts);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! メモリ上のグリッドから直接抽出することもできます:
//!
//! ```rust
//! use shiftgrid::{extract, Grid};
//!
//! let grid = Grid::from_rows(vec![
//!     vec!["MES", "MARZO", ""],
//!     vec!["PLANTILLA", "", ""],
//!     vec!["", "1", "2"],
//!     vec!["", "", ""],
//!     vec!["Ana", "M", "T"],
//! ]);
//!
//! let schedule = extract(&grid);
//! assert_eq!(schedule.month, "MARZO");
//! assert_eq!(schedule.day_numbers, vec!["1", "2"]);
//! assert_eq!(schedule.shifts[0].shifts, vec!["M", "T"]);
//! ```
//!
//! # Custom Anchors
//!
//! ```rust,no_run
//! use shiftgrid::{ExtractorBuilder, OutputFormat, OutputFormatter, SheetSelector};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let extractor = ExtractorBuilder::new()
//!         .with_month_anchor("MONTH", 0)
//!         .with_day_numbers_anchor("STAFF", 1)
//!         .with_data_start_anchor("STAFF", 2)
//!         .with_sheet_selector(SheetSelector::Name("March".to_string()))
//!         .build()?;
//!
//!     let schedule = extractor.extract_path("march.xlsx")?;
//!     OutputFormatter::from_format(OutputFormat::Table)
//!         .render(&schedule, &mut std::io::stdout())?;
//!
//!     Ok(())
//! }
//! ```

mod api;
mod builder;
mod error;
mod grid;
mod layout;
mod locator;
mod normalizer;
mod output;
mod parser;
mod security;
mod store;
mod types;

#[cfg(feature = "server")]
pub mod server;

// 公開API
pub use api::{AnchorKind, AnchorRule, AnchorSpec, InputFormat, OutputFormat, SheetSelector};
pub use builder::{assemble, Extractor, ExtractorBuilder};
pub use error::ShiftGridError;
pub use grid::Grid;
pub use layout::{column_labels, slice, Layout};
pub use locator::locate;
pub use normalizer::normalize;
pub use output::OutputFormatter;
pub use parser::{lines_to_grid, read_text_lines};
pub use security::{check_extension, sanitize_filename, SecurityConfig};
pub use store::ScheduleStore;
pub use types::{AnchorHit, AnchorSet, ScheduleResult, ShiftRecord};

/// デフォルトのアンカー設定でグリッドからスケジュールを抽出する
///
/// データ開始アンカーが見つからない場合は空の結果を返します。
/// 設定を変更する場合は`ExtractorBuilder`を使用してください。
pub fn extract(grid: &Grid) -> ScheduleResult {
    Extractor::default().extract(grid)
}
